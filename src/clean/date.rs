//! Date header normalization.

use chrono::{DateTime, NaiveDateTime};
use tracing::warn;

/// Sentinel for dates that are absent or unparseable.
pub const UNKNOWN_DATE: &str = "Unknown";

/// Normalize a raw `Date:` header to `YYYY-MM-DD`.
///
/// Supports RFC 2822, ISO 8601, and common broken real-world variants
/// (missing or wrong day-of-week, named timezone abbreviations). The
/// calendar date is kept as the sender wrote it; no timezone conversion
/// is applied, so a late-evening timestamp never rolls into the next day.
/// Returns [`UNKNOWN_DATE`] when the header is missing or unparseable;
/// never errors.
pub fn normalize_date(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return UNKNOWN_DATE.to_string();
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return UNKNOWN_DATE.to_string();
    }

    // Try chrono's RFC 2822
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return dt.format("%Y-%m-%d").to_string();
    }

    // Try ISO 8601 / RFC 3339
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.format("%Y-%m-%d").to_string();
    }

    // Remove leading day-of-week: "Thu, " or "Thu " (also rescues dates
    // whose day-of-week contradicts the date, which RFC 2822 rejects)
    let no_dow = strip_day_of_week(trimmed);

    let formats = [
        "%d %b %Y %H:%M:%S %z",
        "%d %b %Y %H:%M:%S",
        "%b %d %H:%M:%S %Y",
        "%Y-%m-%dT%H:%M:%S%z",
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%d %H:%M:%S %z",
        "%Y-%m-%d %H:%M:%S",
        "%d/%m/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
    ];

    for fmt in &formats {
        if let Ok(dt) = DateTime::parse_from_str(&no_dow, fmt) {
            return dt.format("%Y-%m-%d").to_string();
        }
        if let Ok(ndt) = NaiveDateTime::parse_from_str(&no_dow, fmt) {
            return ndt.format("%Y-%m-%d").to_string();
        }
    }

    // Replace named timezones with offsets and try again
    let replaced = replace_named_tz(&no_dow);
    for fmt in &formats {
        if let Ok(dt) = DateTime::parse_from_str(&replaced, fmt) {
            return dt.format("%Y-%m-%d").to_string();
        }
    }

    warn!(date = trimmed, "Could not parse date");
    UNKNOWN_DATE.to_string()
}

/// Strip leading day-of-week prefix (e.g. "Thu, " or "Thu ").
fn strip_day_of_week(s: &str) -> String {
    let days = [
        "Mon,", "Tue,", "Wed,", "Thu,", "Fri,", "Sat,", "Sun,", "Mon ", "Tue ", "Wed ", "Thu ",
        "Fri ", "Sat ", "Sun ",
    ];
    for day in &days {
        if let Some(rest) = s.strip_prefix(day) {
            return rest.trim().to_string();
        }
    }
    s.to_string()
}

/// Replace well-known timezone abbreviations with numeric offsets.
fn replace_named_tz(s: &str) -> String {
    let tzs = [
        ("EST", "-0500"),
        ("EDT", "-0400"),
        ("CST", "-0600"),
        ("CDT", "-0500"),
        ("MST", "-0700"),
        ("MDT", "-0600"),
        ("PST", "-0800"),
        ("PDT", "-0700"),
        ("GMT", "+0000"),
        ("UTC", "+0000"),
        ("CET", "+0100"),
        ("CEST", "+0200"),
        ("JST", "+0900"),
    ];
    let mut result = s.to_string();
    for (name, offset) in &tzs {
        if result.ends_with(name) {
            let pos = result.len() - name.len();
            result.replace_range(pos.., offset);
            return result;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc2822() {
        assert_eq!(
            normalize_date(Some("Fri, 05 Jul 2013 09:12:24 -0400")),
            "2013-07-05"
        );
    }

    #[test]
    fn test_no_timezone_conversion() {
        // 21:45 at -0700 is already the next day in UTC; the date as
        // written must survive.
        assert_eq!(
            normalize_date(Some("Sun, 10 Jul 2011 21:45:12 -0700")),
            "2011-07-10"
        );
    }

    #[test]
    fn test_wrong_day_of_week_still_parses() {
        // 2011-07-10 was a Sunday; strict RFC 2822 parsing rejects the
        // mismatch but the fallback recovers the date.
        assert_eq!(
            normalize_date(Some("Wed, 10 Jul 2011 21:45:12 -0700")),
            "2011-07-10"
        );
    }

    #[test]
    fn test_without_day_of_week() {
        assert_eq!(
            normalize_date(Some("04 Jan 2024 10:00:00 +0000")),
            "2024-01-04"
        );
    }

    #[test]
    fn test_named_timezone() {
        assert_eq!(
            normalize_date(Some("Thu, 04 Jan 2024 10:00:00 EST")),
            "2024-01-04"
        );
    }

    #[test]
    fn test_iso8601() {
        assert_eq!(normalize_date(Some("2024-01-04T10:00:00Z")), "2024-01-04");
    }

    #[test]
    fn test_naive_datetime() {
        assert_eq!(
            normalize_date(Some("04 Jan 2024 10:00:00")),
            "2024-01-04"
        );
    }

    #[test]
    fn test_absent_is_unknown() {
        assert_eq!(normalize_date(None), UNKNOWN_DATE);
        assert_eq!(normalize_date(Some("")), UNKNOWN_DATE);
        assert_eq!(normalize_date(Some("   ")), UNKNOWN_DATE);
    }

    #[test]
    fn test_garbage_is_unknown() {
        assert_eq!(normalize_date(Some("not a date")), UNKNOWN_DATE);
        assert_eq!(normalize_date(Some("32 Foo 20XX")), UNKNOWN_DATE);
    }
}
