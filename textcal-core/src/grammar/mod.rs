//! Token grammars for agenda lines.
//!
//! Each grammar takes one whitespace-free token and either returns a typed
//! value or the [`LineError`](crate::error::LineError) describing why the
//! token was rejected.

pub mod date;
pub mod duration;
pub mod time;

pub use date::{ParsedDate, parse_date};
pub use duration::parse_duration;
pub use time::parse_time;
