//! Date tokens: numeric and month-name forms, with an optional year.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

use crate::error::LineError;

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Every lowercase prefix of at least three letters of each month name.
/// No two months share such a prefix, so the lookup is never ambiguous.
static MONTHS: LazyLock<HashMap<String, u32>> = LazyLock::new(|| {
    let mut table = HashMap::new();
    for (idx, name) in MONTH_NAMES.iter().enumerate() {
        for len in 3..=name.len() {
            table.insert(name[..len].to_string(), idx as u32 + 1);
        }
    }
    table
});

static NUMERIC_MDY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})([/-])(\d{1,2})([/-])(\d{4})$").expect("valid mm/dd/yyyy regex")
});
static NUMERIC_YMD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})([/-])(\d{1,2})([/-])(\d{1,2})$").expect("valid yyyy/mm/dd regex")
});
static NAMED_MDY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]+)-(\d{1,2})-(\d{4})$").expect("valid Month-dd-yyyy regex")
});
static SHORT_MD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})$").expect("valid mm/dd regex"));
static NAMED_YMD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-([A-Za-z]+)-(\d{1,2})$").expect("valid yyyy-Month-dd regex")
});

/// A date as written, before calendar validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl ParsedDate {
    /// Validate against the calendar. Out-of-range months and days
    /// (e.g. February 30) yield `None` rather than rolling over.
    pub fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// Look up a month by full name or a prefix of three or more letters.
pub fn month_number(name: &str) -> Option<u32> {
    MONTHS.get(&name.to_ascii_lowercase()).copied()
}

/// Parse a date token.
///
/// Forms are tried in order and the first match wins:
/// `mm/dd/yyyy` (or with `-`), `yyyy/mm/dd` (or with `-`),
/// `Month-dd-yyyy`, `mm/dd`, `yyyy-Month-dd`.
/// A token without a year takes `carried_year`, falling back to `default_year`.
pub fn parse_date(
    token: &str,
    carried_year: Option<i32>,
    default_year: i32,
) -> Result<ParsedDate, LineError> {
    let invalid = || LineError::InvalidDate(token.to_string());

    if let Some(caps) = NUMERIC_MDY.captures(token) {
        if caps[2] == caps[4] {
            return Ok(ParsedDate {
                year: number(&caps, 5).ok_or_else(invalid)?,
                month: number(&caps, 1).ok_or_else(invalid)?,
                day: number(&caps, 3).ok_or_else(invalid)?,
            });
        }
    }

    if let Some(caps) = NUMERIC_YMD.captures(token) {
        if caps[2] == caps[4] {
            return Ok(ParsedDate {
                year: number(&caps, 1).ok_or_else(invalid)?,
                month: number(&caps, 3).ok_or_else(invalid)?,
                day: number(&caps, 5).ok_or_else(invalid)?,
            });
        }
    }

    if let Some(caps) = NAMED_MDY.captures(token) {
        return Ok(ParsedDate {
            year: number(&caps, 3).ok_or_else(invalid)?,
            month: month_number(&caps[1]).ok_or_else(invalid)?,
            day: number(&caps, 2).ok_or_else(invalid)?,
        });
    }

    if let Some(caps) = SHORT_MD.captures(token) {
        return Ok(ParsedDate {
            year: carried_year.unwrap_or(default_year),
            month: number(&caps, 1).ok_or_else(invalid)?,
            day: number(&caps, 2).ok_or_else(invalid)?,
        });
    }

    if let Some(caps) = NAMED_YMD.captures(token) {
        return Ok(ParsedDate {
            year: number(&caps, 1).ok_or_else(invalid)?,
            month: month_number(&caps[2]).ok_or_else(invalid)?,
            day: number(&caps, 3).ok_or_else(invalid)?,
        });
    }

    Err(invalid())
}

fn number<T: std::str::FromStr>(caps: &Captures<'_>, idx: usize) -> Option<T> {
    caps.get(idx)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> ParsedDate {
        ParsedDate { year, month, day }
    }

    #[test]
    fn numeric_month_first_with_either_separator() {
        assert_eq!(parse_date("04/09/2011", None, 2000), Ok(ymd(2011, 4, 9)));
        assert_eq!(parse_date("4-9-2011", None, 2000), Ok(ymd(2011, 4, 9)));
    }

    #[test]
    fn mixed_separators_are_rejected() {
        assert!(parse_date("4/9-2011", None, 2000).is_err());
        assert!(parse_date("2011-4/9", None, 2000).is_err());
    }

    #[test]
    fn numeric_year_first() {
        assert_eq!(parse_date("2012/05/24", None, 2000), Ok(ymd(2012, 5, 24)));
        assert_eq!(parse_date("2012-5-24", None, 2000), Ok(ymd(2012, 5, 24)));
    }

    #[test]
    fn month_name_forms() {
        assert_eq!(parse_date("April-9-2011", None, 2000), Ok(ymd(2011, 4, 9)));
        assert_eq!(parse_date("apr-09-2011", None, 2000), Ok(ymd(2011, 4, 9)));
        assert_eq!(parse_date("2011-Sept-3", None, 2000), Ok(ymd(2011, 9, 3)));
        assert_eq!(parse_date("2011-DEC-25", None, 2000), Ok(ymd(2011, 12, 25)));
    }

    #[test]
    fn unknown_month_name_is_invalid() {
        assert_eq!(
            parse_date("Smarch-1-2011", None, 2000),
            Err(LineError::InvalidDate("Smarch-1-2011".to_string()))
        );
        // Two letters are not enough to name a month
        assert!(parse_date("ju-1-2011", None, 2000).is_err());
    }

    #[test]
    fn short_form_uses_carried_year_then_default() {
        assert_eq!(parse_date("5/31", Some(2012), 2026), Ok(ymd(2012, 5, 31)));
        assert_eq!(parse_date("5/31", None, 2026), Ok(ymd(2026, 5, 31)));
    }

    #[test]
    fn range_checks_are_left_to_calendar_validation() {
        let parsed = parse_date("13/45/2020", None, 2000).unwrap();
        assert_eq!(parsed, ymd(2020, 13, 45));
        assert_eq!(parsed.to_naive(), None);

        assert_eq!(ymd(2021, 2, 29).to_naive(), None);
        assert!(ymd(2020, 2, 29).to_naive().is_some());
    }

    #[test]
    fn garbage_is_invalid() {
        for token in ["", "tomorrow", "2011", "1/2/11", "12345/1/1", "-"] {
            assert!(parse_date(token, None, 2000).is_err(), "{token:?} should not parse");
        }
    }

    #[test]
    fn month_table_covers_prefixes() {
        assert_eq!(month_number("jan"), Some(1));
        assert_eq!(month_number("Janu"), Some(1));
        assert_eq!(month_number("may"), Some(5));
        assert_eq!(month_number("mayo"), None);
        assert_eq!(month_number("sep"), Some(9));
        assert_eq!(month_number("september"), Some(9));
    }
}
