//! Relative timestamps ("3 minutes ago") for cards and tables.
//!
//! Backend timestamps arrive either as RFC 3339 or as an offset-less local
//! date-time; the latter is read as UTC.

#[cfg(test)]
#[path = "time_ago_test.rs"]
mod time_ago_test;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Parse a backend timestamp. `None` when neither format matches.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    if let Ok(dt) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(dt);
    }
    let local = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]");
    let Ok(dt) = PrimitiveDateTime::parse(raw, local) else {
        return None;
    };
    Some(dt.assume_utc())
}

/// Human distance between `then` and `now`, with an "ago"/"in" suffix.
#[must_use]
pub fn format_distance(then: OffsetDateTime, now: OffsetDateTime) -> String {
    let delta = (now - then).whole_seconds();
    let phrase = distance_phrase(delta.abs());
    if delta >= 0 { format!("{phrase} ago") } else { format!("in {phrase}") }
}

/// [`format_distance`] for a raw backend timestamp; unparseable input is
/// returned unchanged.
#[must_use]
pub fn time_ago(raw: &str, now: OffsetDateTime) -> String {
    parse_timestamp(raw).map_or_else(|| raw.to_owned(), |then| format_distance(then, now))
}

/// [`time_ago`] against the wall clock.
#[must_use]
pub fn time_ago_now(raw: &str) -> String {
    time_ago(raw, OffsetDateTime::now_utc())
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 { format!("1 {unit}") } else { format!("{n} {unit}s") }
}

fn distance_phrase(seconds: i64) -> String {
    let minutes = (seconds + MINUTE / 2) / MINUTE;
    match seconds {
        s if s < 30 => "less than a minute".to_owned(),
        s if s < 45 * MINUTE => plural(minutes.max(1), "minute"),
        s if s < 90 * MINUTE => "about 1 hour".to_owned(),
        s if s < DAY => format!("about {}", plural((s + HOUR / 2) / HOUR, "hour")),
        s if s < 42 * HOUR => "1 day".to_owned(),
        s if s < MONTH => plural((s + DAY / 2) / DAY, "day"),
        s if s < 2 * MONTH => format!("about {}", plural(s / MONTH, "month")),
        s if s < YEAR => plural(s / MONTH, "month"),
        s => format!("about {}", plural(s / YEAR, "year")),
    }
}
