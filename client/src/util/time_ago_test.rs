use time::Duration;
use time::macros::datetime;

use super::*;

#[test]
fn parses_rfc3339_and_local_formats() {
    let expected = datetime!(2024-03-01 12:00:00 UTC);
    assert_eq!(parse_timestamp("2024-03-01T12:00:00Z"), Some(expected));
    assert_eq!(parse_timestamp("2024-03-01T12:00:00"), Some(expected));
    assert_eq!(parse_timestamp("2024-03-01T12:00:00.250").map(|d| d.millisecond()), Some(250));
    assert_eq!(parse_timestamp("yesterday"), None);
}

#[test]
fn distance_buckets() {
    let now = datetime!(2024-03-01 12:00:00 UTC);
    let cases = [
        (Duration::seconds(10), "less than a minute ago"),
        (Duration::seconds(40), "1 minute ago"),
        (Duration::minutes(5), "5 minutes ago"),
        (Duration::minutes(50), "about 1 hour ago"),
        (Duration::hours(3), "about 3 hours ago"),
        (Duration::hours(30), "1 day ago"),
        (Duration::days(4), "4 days ago"),
        (Duration::days(40), "about 1 month ago"),
        (Duration::days(100), "3 months ago"),
        (Duration::days(800), "about 2 years ago"),
    ];
    for (ago, expected) in cases {
        assert_eq!(format_distance(now - ago, now), expected);
    }
}

#[test]
fn future_times_use_in_prefix() {
    let now = datetime!(2024-03-01 12:00:00 UTC);
    assert_eq!(format_distance(now + Duration::minutes(5), now), "in 5 minutes");
}

#[test]
fn unparseable_input_is_echoed() {
    let now = datetime!(2024-03-01 12:00:00 UTC);
    assert_eq!(time_ago("not a date", now), "not a date");
    assert_eq!(time_ago("2024-03-01T11:58:00Z", now), "2 minutes ago");
}
