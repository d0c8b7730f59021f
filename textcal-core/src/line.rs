//! Classification and parsing of a single agenda line.
//!
//! [`interpret_line`] is pure: it reads the current [`ParserState`] and
//! returns the changes to make as a [`StateUpdate`] alongside its result.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{DurationField, LineError};
use crate::event::{Event, ScheduleError};
use crate::grammar::{ParsedDate, parse_date, parse_duration, parse_time};
use crate::state::{FullSpec, ParserState, RunContext, StateUpdate};

/// Four single-token fields followed by a free-text subject.
static FULL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\S+)\s+(\S+)\s+(\S+)\s+(\S+)\s+(\S.*)$").expect("valid agenda line regex")
});

/// Marks an all-day event when used for both time and duration, and
/// "no reminder" in the reminder field.
const NONE_MARKER: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCategory {
    Blank,
    Directive,
    FullSpec,
    Continuation,
    Malformed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    pub category: LineCategory,
    pub event: Option<Event>,
    pub error: Option<LineError>,
    pub update: StateUpdate,
}

impl Interpretation {
    fn quiet(category: LineCategory, update: StateUpdate) -> Self {
        Interpretation {
            category,
            event: None,
            error: None,
            update,
        }
    }
}

/// The five textual fields of an event line.
struct Fields<'a> {
    date: &'a str,
    time: &'a str,
    duration: &'a str,
    reminder: &'a str,
    subject: &'a str,
}

impl Fields<'_> {
    fn to_spec(&self) -> FullSpec {
        FullSpec {
            time: self.time.to_string(),
            duration: self.duration.to_string(),
            reminder: self.reminder.to_string(),
            subject: self.subject.to_string(),
        }
    }
}

pub fn interpret_line(raw: &str, state: &ParserState, ctx: &RunContext) -> Interpretation {
    let line = raw.trim_end_matches(['\n', '\r']);
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return Interpretation::quiet(LineCategory::Blank, StateUpdate::default());
    }

    if let Some(text) = trimmed.strip_prefix('>') {
        let text = text.trim();
        let description = (!text.is_empty()).then(|| text.to_string());
        return Interpretation::quiet(
            LineCategory::Directive,
            StateUpdate {
                description: Some(description),
                ..Default::default()
            },
        );
    }

    if let Some(caps) = FULL_LINE.captures(line) {
        let fields = Fields {
            date: caps.get(1).map_or("", |m| m.as_str()),
            time: caps.get(2).map_or("", |m| m.as_str()),
            duration: caps.get(3).map_or("", |m| m.as_str()),
            reminder: caps.get(4).map_or("", |m| m.as_str()),
            subject: caps.get(5).map_or("", |m| m.as_str().trim_end()),
        };
        let spec = fields.to_spec();
        let mut result = interpret_fields(LineCategory::FullSpec, &fields, state, ctx);
        if result.error.is_none() {
            result.update.last_full_spec = Some(spec);
        }
        return result;
    }

    if let Some(spec) = &state.last_full_spec {
        if parse_date(trimmed, state.carried_year, ctx.default_year).is_ok() {
            let fields = Fields {
                date: trimmed,
                time: &spec.time,
                duration: &spec.duration,
                reminder: &spec.reminder,
                subject: &spec.subject,
            };
            return interpret_fields(LineCategory::Continuation, &fields, state, ctx);
        }
    }

    Interpretation {
        category: LineCategory::Malformed,
        event: None,
        error: Some(LineError::MalformedLine),
        update: StateUpdate {
            failed: true,
            ..Default::default()
        },
    }
}

fn interpret_fields(
    category: LineCategory,
    fields: &Fields<'_>,
    state: &ParserState,
    ctx: &RunContext,
) -> Interpretation {
    let mut update = StateUpdate::default();

    let result = parse_date(fields.date, state.carried_year, ctx.default_year).and_then(|date| {
        // The year sticks even when a later field fails
        update.carried_year = Some(date.year);
        build_event(date, fields, state)
    });

    match result {
        Ok(event) => Interpretation {
            category,
            event: Some(event),
            error: None,
            update,
        },
        Err(error) => {
            update.failed = true;
            Interpretation {
                category,
                event: None,
                error: Some(error),
                update,
            }
        }
    }
}

/// Validate the remaining fields in order: date range, time and duration
/// as a pair, then reminder.
fn build_event(
    parsed: ParsedDate,
    fields: &Fields<'_>,
    state: &ParserState,
) -> Result<Event, LineError> {
    let date = parsed
        .to_naive()
        .ok_or_else(|| LineError::InvalidDate(fields.date.to_string()))?;

    let timing = match (fields.time, fields.duration) {
        (NONE_MARKER, NONE_MARKER) => None,
        (NONE_MARKER, _) => return Err(LineError::InvalidTime(fields.time.to_string())),
        (time, NONE_MARKER) => {
            parse_time(time)?;
            return Err(LineError::InvalidDuration {
                field: DurationField::Duration,
                token: fields.duration.to_string(),
            });
        }
        (time, duration) => Some((
            parse_time(time)?,
            parse_duration(duration, DurationField::Duration)?,
        )),
    };

    let reminder = match fields.reminder {
        NONE_MARKER => None,
        token => Some(parse_duration(token, DurationField::Reminder)?),
    };

    let subject = fields.subject.to_string();
    let description = state.current_description.clone();

    match timing {
        None => Event::all_day(date, reminder, subject, description)
            .map_err(|_| LineError::InvalidDate(fields.date.to_string())),
        Some((time, minutes)) => Event::timed(date, time, minutes, reminder, subject, description)
            .map_err(|err| match err {
                ScheduleError::NonexistentLocalTime => {
                    LineError::InvalidTime(fields.time.to_string())
                }
                ScheduleError::OutOfRange => LineError::InvalidDuration {
                    field: DurationField::Duration,
                    token: fields.duration.to_string(),
                },
            }),
    }
}
