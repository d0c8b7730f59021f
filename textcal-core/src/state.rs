//! State carried from one agenda line to the next.

use chrono::{DateTime, Datelike, Utc};

use crate::event::LOCAL_ZONE;

/// Wall-clock facts sampled once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunContext {
    /// Written to CREATED, LAST-MODIFIED and DTSTAMP of every event.
    pub stamp: DateTime<Utc>,
    /// Year for `mm/dd` dates seen before any explicit year.
    pub default_year: i32,
}

impl RunContext {
    pub fn new(stamp: DateTime<Utc>) -> Self {
        RunContext {
            stamp,
            default_year: stamp.with_timezone(&LOCAL_ZONE).year(),
        }
    }

    /// Sample the clock. Call once at startup.
    pub fn capture() -> Self {
        Self::new(Utc::now())
    }
}

/// The non-date fields of the most recent full line, kept verbatim so that
/// a date-only line can be expanded into a full one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullSpec {
    pub time: String,
    pub duration: String,
    pub reminder: String,
    pub subject: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParserState {
    pub carried_year: Option<i32>,
    pub last_full_spec: Option<FullSpec>,
    pub current_description: Option<String>,
    /// Sticky: once set it is never cleared.
    pub error_flag: bool,
}

/// Changes a single line makes to [`ParserState`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StateUpdate {
    pub carried_year: Option<i32>,
    pub last_full_spec: Option<FullSpec>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub failed: bool,
}

impl ParserState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, update: StateUpdate) {
        if let Some(year) = update.carried_year {
            self.carried_year = Some(year);
        }
        if let Some(spec) = update.last_full_spec {
            self.last_full_spec = Some(spec);
        }
        if let Some(description) = update.description {
            self.current_description = description;
        }
        self.error_flag |= update.failed;
    }
}
