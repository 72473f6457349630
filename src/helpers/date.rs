//! Date helper functions
//!
//! Front-matter dates stay plain strings in the content model; these
//! helpers parse them leniently for display purposes only.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse a date string in various formats
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
        // Try parsing date only
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    None
}

/// Format a front-matter date string for display.
///
/// A string that cannot be parsed is returned as-is rather than dropped.
pub fn format_date_string(s: &str, format: &str) -> String {
    match parse_date_string(s) {
        Some(dt) => dt.format(format).to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_formats() {
        assert!(parse_date_string("2024-01-15").is_some());
        assert!(parse_date_string("2024/01/15 10:30").is_some());
        assert!(parse_date_string("2024-01-15T10:30:00").is_some());
        assert!(parse_date_string("not a date").is_none());
    }

    #[test]
    fn formats_for_display() {
        assert_eq!(format_date_string("2024-01-15", "%Y-%m-%d"), "2024-01-15");
        assert_eq!(format_date_string("2024-01-15", "%B %-d, %Y"), "January 15, 2024");
    }

    #[test]
    fn unparseable_dates_pass_through() {
        assert_eq!(format_date_string("someday", "%Y"), "someday");
    }
}
