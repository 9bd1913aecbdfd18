//! Timestamp parsing for the sort keys

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Display form used by the service for `upload_date`, e.g. `January 5, 2024 3:04PM`
const DISPLAY_FORMAT: &str = "%B %d, %Y %I:%M%p";

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", DISPLAY_FORMAT];

/// Offset forms RFC 3339 rejects: `+00`, `-0800`, or a space before the time
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%d %H:%M:%S%.f%#z"];

/// Parse a session timestamp. Values without an offset are taken as UTC.
///
/// Returns `None` for anything unrecognized; callers sort those first.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(raw, format) {
            return Some(ts.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|ts| ts.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339() {
        let ts = parse_timestamp("2024-01-05T10:00:00-08:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 5, 18, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_short_offsets() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 5, 23, 4, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-05T23:04:00+00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-05T15:04:00-0800"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-05 23:04:00.000+00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-06T04:34:00+05:30"), Some(expected));
    }

    #[test]
    fn test_parse_naive_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-05T10:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-05 10:00:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-03-01"),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_display_form() {
        assert_eq!(
            parse_timestamp("January 5, 2024 3:04PM"),
            Some(Utc.with_ymd_and_hms(2024, 1, 5, 15, 4, 0).unwrap())
        );
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
