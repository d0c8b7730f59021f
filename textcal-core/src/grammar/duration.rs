//! Duration tokens such as `1hr`, `15min`, `1.5h` or `2days`.
//!
//! The same grammar is used for event durations and reminder offsets.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::MINUTES_PER_DAY;
use crate::error::{DurationField, LineError};

static AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d*)?|\.\d+)(mins|min|m|hrs|hr|h|days|day|d)$")
        .expect("valid duration regex")
});

/// Parse a duration token into whole minutes, truncating fractions.
///
/// `field` only labels the error.
pub fn parse_duration(token: &str, field: DurationField) -> Result<i64, LineError> {
    let invalid = || LineError::InvalidDuration {
        field,
        token: token.to_string(),
    };

    if token == "0" {
        return Ok(0);
    }

    let caps = AMOUNT.captures(token).ok_or_else(invalid)?;
    let amount: f64 = caps[1].parse().map_err(|_| invalid())?;
    let factor = match caps[2].to_ascii_lowercase().as_str() {
        "m" | "min" | "mins" => 1.0,
        "h" | "hr" | "hrs" => 60.0,
        _ => MINUTES_PER_DAY as f64,
    };

    let minutes = (amount * factor).trunc();
    if !minutes.is_finite() || minutes > i64::MAX as f64 {
        return Err(invalid());
    }

    Ok(minutes as i64)
}
