//! Core of textcal: agenda line grammars, cross-line parser state and
//! ICS generation.
//!
//! - `grammar`: date, clock-time and duration tokens
//! - `line`: classification of a single agenda line
//! - `ics`: VEVENT fragments and the assembled calendar document

pub mod constants;
pub mod diagnostic;
pub mod error;
pub mod event;
pub mod grammar;
pub mod ics;
pub mod line;
pub mod state;
pub mod textcal_config;

pub use diagnostic::Diagnostic;
pub use error::{DurationField, LineError, TextcalError, TextcalResult};
pub use event::Event;
pub use ics::{Conversion, DocumentAssembler};
pub use state::{ParserState, RunContext};
pub use textcal_config::TextcalConfig;
