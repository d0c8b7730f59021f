//! 12-hour clock tokens such as `9am`, `11:30P` or `12:05pm`.

use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;

use crate::error::LineError;

static CLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2})(?::(\d{2}))?([ap])m?$").expect("valid clock time regex")
});

/// Parse a 12-hour clock token into a 24-hour time.
pub fn parse_time(token: &str) -> Result<NaiveTime, LineError> {
    let invalid = || LineError::InvalidTime(token.to_string());

    let caps = CLOCK.captures(token).ok_or_else(invalid)?;
    let hour: u32 = caps[1].parse().map_err(|_| invalid())?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().map_err(|_| invalid())?,
        None => 0,
    };

    if !(1..=12).contains(&hour) || minute > 59 {
        return Err(invalid());
    }

    let pm = caps[3].eq_ignore_ascii_case("p");
    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}
