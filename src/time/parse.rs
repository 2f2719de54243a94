use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::ParseError;
use crate::time::zone::Zone;

/// Wall-clock layouts, read in the caller's zone.
const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parses the supported date string forms into a UTC date-time.
///
/// A bare `YYYY-MM-DD` is UTC midnight; date-time forms without an
/// offset are local to `zone`; RFC 3339 and RFC 2822 carry their own
/// offset.
pub fn parse_datetime(text: &str, zone: Zone) -> Result<DateTime<Utc>, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .ok_or_else(|| ParseError::Malformed(text.to_string()));
    }

    for format in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return zone
                .resolve(&naive)
                .ok_or_else(|| ParseError::NonexistentLocalTime(text.to_string()));
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    Err(ParseError::Malformed(text.to_string()))
}
