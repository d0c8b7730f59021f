//! VEVENT fragment generation.

use chrono::{DateTime, Utc};

use crate::constants::{DATE_FORMAT, MAX_LINE_OCTETS, UTC_STAMP_FORMAT};
use crate::event::Event;

/// Build the `BEGIN:VEVENT` .. `END:VEVENT` block for an event.
///
/// The UID is the hex MD5 of every other content line, newline-terminated,
/// in emission order. CREATED/LAST-MODIFIED/DTSTAMP carry the run stamp and
/// are part of that input unless `stable_uids` is set, so by default the
/// same agenda converted in two runs gets different UIDs.
///
/// Lines are `\n`-terminated; the assembler converts line endings.
pub fn build_fragment(event: &Event, stamp: &DateTime<Utc>, stable_uids: bool) -> String {
    let stamp = stamp.format(UTC_STAMP_FORMAT).to_string();
    let stamp_lines = [
        format!("CREATED:{stamp}"),
        format!("LAST-MODIFIED:{stamp}"),
        format!("DTSTAMP:{stamp}"),
    ];
    let body = body_lines(event);

    let mut digest_input = String::from("BEGIN:VEVENT\n");
    if !stable_uids {
        for line in &stamp_lines {
            digest_input.push_str(line);
            digest_input.push('\n');
        }
    }
    for line in &body {
        digest_input.push_str(line);
        digest_input.push('\n');
    }
    let uid = format!("UID:{:x}", md5::compute(digest_input.as_bytes()));

    let mut fragment = String::new();
    for line in std::iter::once("BEGIN:VEVENT")
        .chain(stamp_lines.iter().map(String::as_str))
        .chain(std::iter::once(uid.as_str()))
        .chain(body.iter().map(String::as_str))
    {
        fragment.push_str(&fold_line(line));
        fragment.push('\n');
    }

    fragment
}

/// Everything after the UID line, ending with `END:VEVENT`.
fn body_lines(event: &Event) -> Vec<String> {
    let mut lines = vec![format!("SUMMARY:{}", escape_text(&event.subject))];

    if let Some(ref desc) = event.description {
        lines.push(format!("DESCRIPTION:{}", escape_text(desc)));
    }

    if event.all_day {
        lines.push(format!("DTSTART;VALUE=DATE:{}", event.date.format(DATE_FORMAT)));
        lines.push(format!("DTEND;VALUE=DATE:{}", event.end_date().format(DATE_FORMAT)));
    } else {
        // UTC instants, so a span across a DST change keeps its length
        lines.push(format!(
            "DTSTART:{}",
            event.start.with_timezone(&Utc).format(UTC_STAMP_FORMAT)
        ));
        lines.push(format!(
            "DTEND:{}",
            event.end.with_timezone(&Utc).format(UTC_STAMP_FORMAT)
        ));
    }

    if let Some(minutes) = event.reminder_minutes {
        lines.push("BEGIN:VALARM".to_string());
        lines.push("ACTION:DISPLAY".to_string());
        lines.push(format!("TRIGGER;VALUE=DURATION:-PT{minutes}M"));
        lines.push("END:VALARM".to_string());
    }

    lines.push("END:VEVENT".to_string());
    lines
}

/// Escape a TEXT value (RFC 5545 §3.3.11).
fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Fold a content line so that no physical line exceeds 75 octets.
/// Continuation lines start with a single space, which counts toward the limit.
fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut folded = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 2);
    let mut limit = MAX_LINE_OCTETS;
    let mut used = 0;

    for c in line.chars() {
        if used + c.len_utf8() > limit {
            folded.push_str("\n ");
            limit = MAX_LINE_OCTETS - 1;
            used = 0;
        }
        folded.push(c);
        used += c.len_utf8();
    }

    folded
}
