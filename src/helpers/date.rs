//! Date helper functions

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Format a date using a Moment.js-style format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "YYYY-MM-DD") // -> "2024-01-15"
/// ```
pub fn format_date<Z: TimeZone>(date: &DateTime<Z>, format: &str) -> String
where
    Z::Offset: std::fmt::Display,
{
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Format a UTC instant as wall-clock time in `tz`
pub fn format_in_tz(date: &DateTime<Utc>, tz: Tz, format: &str) -> String {
    format_date(&date.with_timezone(&tz), format)
}

/// Parse an RFC 3339 timestamp as stored by the CMS
pub fn parse_cms_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest patterns first within each unit
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("dddd", "%A"),
        ("ddd", "%a"),
        ("ZZ", "%z"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_date(&date, "YYYY-MM-DD"), "2024-01-15");
        assert_eq!(format_date(&date, "DD MMM YYYY, HH:mm"), "15 Jan 2024, 10:30");
    }

    #[test]
    fn test_format_in_tz() {
        // BST is UTC+1 in June
        let date = Utc.with_ymd_and_hms(2024, 6, 1, 19, 30, 0).unwrap();
        assert_eq!(
            format_in_tz(&date, chrono_tz::Europe::London, "HH:mm"),
            "20:30"
        );
    }

    #[test]
    fn test_parse_cms_date() {
        let date = parse_cms_date("2024-06-01T19:30:00.000Z").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2024, 6, 1, 19, 30, 0).unwrap());
        assert!(parse_cms_date("next friday").is_none());
    }

    #[test]
    fn test_moment_to_chrono() {
        assert_eq!(moment_to_chrono_format("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(moment_to_chrono_format("HH:mm:ss"), "%H:%M:%S");
    }
}
