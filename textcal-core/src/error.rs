//! Error types for textcal.

use std::fmt;

use thiserror::Error;

/// Which field of an agenda line a duration token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationField {
    Duration,
    Reminder,
}

impl fmt::Display for DurationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationField::Duration => f.write_str("duration"),
            DurationField::Reminder => f.write_str("reminder"),
        }
    }
}

/// Why a single agenda line was rejected.
///
/// Every variant is recoverable: the line is skipped and conversion
/// continues with the next one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("malformed line")]
    MalformedLine,

    #[error("invalid date \"{0}\"")]
    InvalidDate(String),

    #[error("invalid time \"{0}\"")]
    InvalidTime(String),

    #[error("invalid {field} \"{token}\"")]
    InvalidDuration { field: DurationField, token: String },
}

/// Errors that can occur outside of line parsing.
#[derive(Error, Debug)]
pub enum TextcalError {
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for textcal operations.
pub type TextcalResult<T> = Result<T, TextcalError>;
