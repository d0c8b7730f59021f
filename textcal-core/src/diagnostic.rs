//! Problems found while converting, reported once the whole input is read.

use thiserror::Error;

use crate::error::LineError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    #[error("{file}: cannot read: {reason}")]
    FileUnreadable { file: String, reason: String },

    #[error("{file}:{line}: {error}: {text}")]
    Line {
        file: String,
        line: usize,
        /// The offending line as written, without its line terminator.
        text: String,
        error: LineError,
    },
}
