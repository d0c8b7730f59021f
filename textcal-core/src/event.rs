//! A single agenda event, resolved to instants in the local timezone.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::constants::MINUTES_PER_DAY;

/// Every event is interpreted in this zone.
pub const LOCAL_ZONE: Tz = chrono_tz::America::New_York;

/// Why an event's start or end could not be placed on the local timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleError {
    /// The wall-clock start falls inside a daylight-saving gap.
    NonexistentLocalTime,
    /// The end lies beyond what chrono can represent.
    OutOfRange,
}

/// A validated event.
///
/// `start` and `end` are derived on construction; `end - start` equals
/// `duration_minutes` for timed events. All-day events run from local
/// midnight to the following midnight.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub date: NaiveDate,
    /// Midnight for all-day events.
    pub time: NaiveTime,
    pub all_day: bool,
    pub duration_minutes: i64,
    pub reminder_minutes: Option<i64>,
    pub subject: String,
    pub description: Option<String>,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl Event {
    pub fn timed(
        date: NaiveDate,
        time: NaiveTime,
        duration_minutes: i64,
        reminder_minutes: Option<i64>,
        subject: String,
        description: Option<String>,
    ) -> Result<Self, ScheduleError> {
        let start = local_instant(date, time)?;
        let end = Duration::try_minutes(duration_minutes)
            .and_then(|d| start.checked_add_signed(d))
            .ok_or(ScheduleError::OutOfRange)?;

        Ok(Event {
            date,
            time,
            all_day: false,
            duration_minutes,
            reminder_minutes,
            subject,
            description,
            start,
            end,
        })
    }

    pub fn all_day(
        date: NaiveDate,
        reminder_minutes: Option<i64>,
        subject: String,
        description: Option<String>,
    ) -> Result<Self, ScheduleError> {
        let next_day = date.succ_opt().ok_or(ScheduleError::OutOfRange)?;

        // Calendar arithmetic rather than +24h, so DST days still end at midnight
        Ok(Event {
            date,
            time: NaiveTime::default(),
            all_day: true,
            duration_minutes: MINUTES_PER_DAY,
            reminder_minutes,
            subject,
            description,
            start: local_instant(date, NaiveTime::default())?,
            end: local_instant(next_day, NaiveTime::default())?,
        })
    }

    /// Exclusive end date used for `DTEND;VALUE=DATE`.
    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }
}

/// Resolve a wall-clock time in [`LOCAL_ZONE`]. Ambiguous times (the repeated
/// hour when clocks fall back) resolve to the earlier instant.
fn local_instant(date: NaiveDate, time: NaiveTime) -> Result<DateTime<Tz>, ScheduleError> {
    LOCAL_ZONE
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .ok_or(ScheduleError::NonexistentLocalTime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Offset, Timelike};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn timed_event_end_is_start_plus_duration() {
        let event = Event::timed(date(2011, 4, 9), time(11, 30), 60, Some(15), "x".into(), None)
            .unwrap();
        assert_eq!(event.end - event.start, Duration::minutes(60));
        assert_eq!(event.end.naive_local(), date(2011, 4, 9).and_time(time(12, 30)));
        assert!(!event.all_day);
    }

    #[test]
    fn zero_duration_is_allowed() {
        let event = Event::timed(date(2011, 4, 9), time(8, 0), 0, None, "x".into(), None).unwrap();
        assert_eq!(event.start, event.end);
    }

    #[test]
    fn all_day_event_spans_one_calendar_day() {
        let event = Event::all_day(date(2011, 4, 9), None, "x".into(), None).unwrap();
        assert!(event.all_day);
        assert_eq!(event.time, NaiveTime::default());
        assert_eq!(event.duration_minutes, 1440);
        assert_eq!(event.end_date(), date(2011, 4, 10));
    }

    #[test]
    fn all_day_event_on_fall_back_day_still_ends_next_day() {
        // 2012-11-04 has 25 hours in New York
        let event = Event::all_day(date(2012, 11, 4), None, "x".into(), None).unwrap();
        assert_eq!(event.end_date(), date(2012, 11, 5));
        assert_eq!(event.end - event.start, Duration::hours(25));
    }

    #[test]
    fn start_in_dst_gap_is_rejected() {
        let result = Event::timed(date(2012, 3, 11), time(2, 30), 60, None, "x".into(), None);
        assert_eq!(result, Err(ScheduleError::NonexistentLocalTime));
    }

    #[test]
    fn ambiguous_start_takes_earlier_instant() {
        let event = Event::timed(date(2012, 11, 4), time(1, 30), 30, None, "x".into(), None)
            .unwrap();
        // Earlier 1:30 is still daylight time (UTC-4)
        assert_eq!(event.start.offset().fix().local_minus_utc(), -4 * 3600);
    }

    #[test]
    fn duration_across_spring_forward_is_absolute() {
        let event = Event::timed(date(2012, 3, 11), time(1, 30), 60, None, "x".into(), None)
            .unwrap();
        assert_eq!(event.end.naive_local().hour(), 3);
        assert_eq!(event.end.naive_local().minute(), 30);
    }

    #[test]
    fn absurd_duration_is_out_of_range() {
        let result = Event::timed(date(2011, 4, 9), time(8, 0), i64::MAX, None, "x".into(), None);
        assert_eq!(result, Err(ScheduleError::OutOfRange));
    }
}
