//! Whole-document assembly across all input files.

use tracing::debug;

use crate::constants::{ICS_VERSION, VTIMEZONE};
use crate::diagnostic::Diagnostic;
use crate::ics::generate::build_fragment;
use crate::line::{LineCategory, interpret_line};
use crate::state::{ParserState, RunContext};
use crate::textcal_config::TextcalConfig;

/// Result of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// The calendar with CRLF line endings, or `None` if anything failed.
    pub document: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
    pub event_count: usize,
}

impl Conversion {
    pub fn is_success(&self) -> bool {
        self.document.is_some()
    }
}

/// Drives the line interpreter over every input line, in file order then
/// line order, and collects the generated events into one calendar.
pub struct DocumentAssembler {
    ctx: RunContext,
    stable_uids: bool,
    state: ParserState,
    buffer: String,
    diagnostics: Vec<Diagnostic>,
    event_count: usize,
}

impl DocumentAssembler {
    pub fn new(ctx: RunContext, config: &TextcalConfig) -> Self {
        let mut buffer = String::new();
        buffer.push_str("BEGIN:VCALENDAR\n");
        buffer.push_str(&format!("PRODID:{}\n", config.prodid));
        buffer.push_str(&format!("VERSION:{ICS_VERSION}\n"));
        buffer.push_str(VTIMEZONE);

        DocumentAssembler {
            ctx,
            stable_uids: config.stable_uids,
            state: ParserState::new(),
            buffer,
            diagnostics: Vec::new(),
            event_count: 0,
        }
    }

    /// Process one raw line. `line_number` is 1-based.
    pub fn feed_line(&mut self, file: &str, line_number: usize, raw: &str) -> LineCategory {
        let interpretation = interpret_line(raw, &self.state, &self.ctx);
        self.state.apply(interpretation.update);
        debug!(file, line = line_number, category = ?interpretation.category, "interpreted line");

        if let Some(event) = interpretation.event {
            self.buffer.push('\n');
            self.buffer
                .push_str(&build_fragment(&event, &self.ctx.stamp, self.stable_uids));
            self.event_count += 1;
        }

        if let Some(error) = interpretation.error {
            self.diagnostics.push(Diagnostic::Line {
                file: file.to_string(),
                line: line_number,
                text: raw.trim_end_matches(['\n', '\r']).to_string(),
                error,
            });
        }

        interpretation.category
    }

    /// Process every line of an already-read source and return how many
    /// of its lines were event lines.
    pub fn feed_source(&mut self, file: &str, contents: &str) -> usize {
        contents
            .lines()
            .enumerate()
            .map(|(idx, line)| self.feed_line(file, idx + 1, line))
            .filter(|category| {
                matches!(category, LineCategory::FullSpec | LineCategory::Continuation)
            })
            .count()
    }

    /// Record a file that could not be opened or read.
    pub fn file_unreadable(&mut self, file: &str, reason: impl Into<String>) {
        self.state.error_flag = true;
        self.diagnostics.push(Diagnostic::FileUnreadable {
            file: file.to_string(),
            reason: reason.into(),
        });
    }

    /// Close the calendar and convert line endings to CRLF. The document is
    /// withheld if any line or file failed.
    pub fn finish(self) -> Conversion {
        let document = if self.state.error_flag {
            None
        } else {
            let mut buffer = self.buffer;
            buffer.push_str("END:VCALENDAR\n");
            Some(buffer.replace('\n', "\r\n"))
        };

        Conversion {
            document,
            diagnostics: self.diagnostics,
            event_count: self.event_count,
        }
    }
}
