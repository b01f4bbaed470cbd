//! Timestamp normalization.
//!
//! Devices report timestamps either as ISO-8601 or in a filename-safe
//! device-local encoding such as `2025-04-28T13-39-10-380729_0229`, where
//! hyphens replace the time separators and an optional `_NNNN` suffix
//! carries a frame index. Both are normalized to a UTC instant.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::warn;

/// Naive formats accepted after RFC 3339 fails, tried in order.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Offset-bearing formats that RFC 3339 parsing rejects.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%:z"];

/// Parse a timestamp in any supported encoding.
///
/// Returns `None` when the value cannot be parsed and logs a warning.
/// Naive timestamps (no offset) are interpreted as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let parsed = normalize_timestamp(value);

    if parsed.is_none() {
        warn!("Unparseable timestamp: {value:?}");
    }

    parsed
}

/// Like [`parse_timestamp`], without the warning.
///
/// For callers that look at timestamps outside the pipeline, which
/// reports unparseable values itself.
pub fn normalize_timestamp(value: &str) -> Option<DateTime<Utc>> {
    parse_iso8601(value)
        .or_else(|| parse_device_local(value))
        .or_else(|| parse_iso8601(value.trim()))
}

/// Parse an ISO-8601 timestamp, with or without an offset.
///
/// A trailing `Z` means UTC.
pub fn parse_iso8601(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parse the device-local `YYYY-MM-DDTHH-MM-SS-ffffff[_frame]` encoding.
///
/// The frame suffix is discarded. A missing fraction defaults to zero and
/// components beyond the fourth are ignored. Returns `None` when the time
/// part has fewer than three hyphen-separated components.
pub fn parse_device_local(value: &str) -> Option<DateTime<Utc>> {
    let iso = device_local_to_iso(value)?;
    parse_iso8601(&iso)
}

/// Rewrite a device-local timestamp into ISO-8601 form.
fn device_local_to_iso(value: &str) -> Option<String> {
    let (date, time) = value.split_once('T')?;

    let time = time.split_once('_').map_or(time, |(head, _frame)| head);

    let parts: Vec<&str> = time.split('-').collect();
    if parts.len() < 3 {
        return None;
    }

    let fraction = parts.get(3).copied().unwrap_or("0");

    Some(format!(
        "{date}T{}:{}:{}.{fraction}",
        parts[0], parts[1], parts[2]
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_parse_iso_with_z_suffix() {
        let dt = parse_timestamp("2025-04-28T13:39:10Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 4, 28, 13, 39, 10).unwrap());
    }

    #[test]
    fn test_parse_iso_with_offset() {
        let dt = parse_timestamp("2025-04-28T15:39:10+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 4, 28, 13, 39, 10).unwrap());
    }

    #[test]
    fn test_parse_iso_naive_is_utc() {
        let dt = parse_timestamp("2025-04-28T13:39:10.380729").unwrap();
        assert_eq!(dt.hour(), 13);
        assert_eq!(dt.nanosecond(), 380_729_000);
    }

    #[test]
    fn test_parse_iso_minute_precision_and_date_only() {
        let minute = parse_timestamp("2025-04-28T13:39").unwrap();
        assert_eq!(minute, Utc.with_ymd_and_hms(2025, 4, 28, 13, 39, 0).unwrap());

        let date = parse_timestamp("2025-04-28").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2025, 4, 28, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_device_local_with_frame_suffix() {
        let device = parse_timestamp("2025-04-28T13-39-10-380729_0229").unwrap();
        let iso = parse_timestamp("2025-04-28T13:39:10.380729").unwrap();
        assert_eq!(device, iso);
    }

    #[test]
    fn test_device_local_without_fraction() {
        let dt = parse_timestamp("2025-04-28T13-39-10").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 4, 28, 13, 39, 10).unwrap());
    }

    #[test]
    fn test_device_local_extra_components_ignored() {
        let dt = parse_timestamp("2025-04-28T13-39-10-5-99").unwrap();
        assert_eq!(dt.nanosecond(), 500_000_000);
    }

    #[test]
    fn test_device_local_too_few_components() {
        assert_eq!(device_local_to_iso("2025-04-28T13-39"), None);
        assert!(parse_timestamp("2025-04-28T13-39").is_none());
    }

    #[test]
    fn test_unparseable_values() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("not a timestamp").is_none());
        assert!(parse_timestamp("2025-13-45T99-99-99").is_none());
    }

    #[test]
    fn test_normalize_matches_parse() {
        for value in ["2025-04-28T13-39-10-380729_0229", "2025-04-28T13:39:10Z", "junk"] {
            assert_eq!(normalize_timestamp(value), parse_timestamp(value));
        }
    }

    #[test]
    fn test_surrounding_whitespace_tolerated() {
        assert!(parse_timestamp(" 2025-04-28T13:39:10Z ").is_some());
    }
}
