//! ICS document generation.
//!
//! Only the subset of RFC 5545 needed for VEVENT/VALARM blocks in a single
//! fixed timezone is produced.

mod document;
mod generate;

pub use document::{Conversion, DocumentAssembler};
pub use generate::build_fragment;
