//! Display times for conversation turns.
//!
//! Turns show a 12-hour clock with a Korean morning/afternoon marker,
//! e.g. `14:05` → `오후 02:05`, `00:30` → `오전 12:30`.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Timelike};

const MORNING: &str = "오전";
const AFTERNOON: &str = "오후";

/// Formats a wall-clock time as `오전|오후 HH:MM`.
///
/// Hour 0 renders as 12 (morning), hour 12 as 12 (afternoon), and hours
/// above 12 have 12 subtracted. Hour and minute are zero-padded.
pub fn format_timestamp<T: Timelike>(time: &T) -> String {
    let hour = time.hour();
    let marker = if hour < 12 { MORNING } else { AFTERNOON };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{marker} {hour12:02}:{:02}", time.minute())
}

/// Display time for "now".
pub fn now_display() -> String {
    format_timestamp(&Local::now())
}

/// Display time for a server-supplied timestamp, or `now` when it is
/// absent or unparseable.
///
/// Accepts RFC 3339 (converted to local time) and offset-less ISO 8601
/// date-times (taken as local time).
pub fn display_time_or(generated_at: Option<&str>, now: DateTime<Local>) -> String {
    let parsed = generated_at.and_then(parse_local);
    format_timestamp(&parsed.unwrap_or(now))
}

fn parse_local(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    Local.from_local_datetime(&naive).earliest()
}
