//! Fixed values shared by the generator and the assembler.

pub const DEFAULT_PRODID: &str = "-//textcal//textcal//EN";

pub const ICS_VERSION: &str = "2.0";

/// UTC timestamp format used for CREATED, LAST-MODIFIED, DTSTAMP and
/// timed DTSTART/DTEND.
pub const UTC_STAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

pub const DATE_FORMAT: &str = "%Y%m%d";

pub const MINUTES_PER_DAY: i64 = 1440;

/// RFC 5545 recommends folding content lines longer than this many octets.
pub const MAX_LINE_OCTETS: usize = 75;

/// VTIMEZONE definition for America/New_York, emitted verbatim.
pub const VTIMEZONE: &str = "\
BEGIN:VTIMEZONE
TZID:America/New_York
X-LIC-LOCATION:America/New_York
BEGIN:DAYLIGHT
TZOFFSETFROM:-0500
TZOFFSETTO:-0400
TZNAME:EDT
DTSTART:19700308T020000
RRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=2SU
END:DAYLIGHT
BEGIN:STANDARD
TZOFFSETFROM:-0400
TZOFFSETTO:-0500
TZNAME:EST
DTSTART:19701101T020000
RRULE:FREQ=YEARLY;BYMONTH=11;BYDAY=1SU
END:STANDARD
END:VTIMEZONE
";
