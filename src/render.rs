//! Terminal rendering for diagnostics and the run summary.

use owo_colors::OwoColorize;
use textcal_core::{Conversion, Diagnostic};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Diagnostic {
    fn render(&self) -> String {
        match self {
            Diagnostic::FileUnreadable { file, reason } => {
                format!("{}: {} {}", file.bold(), "cannot read:".red(), reason)
            }
            Diagnostic::Line {
                file,
                line,
                text,
                error,
            } => format!(
                "{}: {}: {}",
                format!("{file}:{line}").bold(),
                error.to_string().red(),
                text.dimmed()
            ),
        }
    }
}

impl Render for Conversion {
    fn render(&self) -> String {
        let events = format!("{} {}", self.event_count, pluralize("event", self.event_count));

        if self.is_success() {
            format!("Converted {}", events).green().to_string()
        } else {
            let problems = self.diagnostics.len();
            format!(
                "Parsed {}, found {} {}; no calendar written",
                events,
                problems,
                pluralize("problem", problems)
            )
            .red()
            .to_string()
        }
    }
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
