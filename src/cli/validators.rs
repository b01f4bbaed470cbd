//! CLI argument validators.
//!
//! Shared validation functions for CLI argument parsing.

use crate::filter::normalize_timestamp;
use chrono::{DateTime, Utc};

/// Parse and validate confidence value (0.0-1.0).
pub fn parse_confidence(s: &str) -> Result<f64, String> {
    let value = parse_number(s)?;

    if !(0.0..=1.0).contains(&value) {
        return Err(format!(
            "confidence must be between 0.0 and 1.0, got {value}"
        ));
    }

    Ok(value)
}

/// Parse and validate a non-negative number of minutes.
pub fn parse_minutes(s: &str) -> Result<f64, String> {
    let value = parse_number(s)?;

    if value.is_nan() || value < 0.0 {
        return Err(format!("minutes must be non-negative, got {value}"));
    }

    Ok(value)
}

/// Parse and validate a detection rate limit (detections per minute).
///
/// Must be positive; `inf` disables the rate check.
pub fn parse_rate_limit(s: &str) -> Result<f64, String> {
    let value = parse_number(s)?;

    if value.is_nan() || value <= 0.0 {
        return Err(format!("rate limit must be positive, got {value}"));
    }

    Ok(value)
}

/// Parse a time-window bound in any timestamp encoding records use.
pub fn parse_time_bound(s: &str) -> Result<DateTime<Utc>, String> {
    normalize_timestamp(s).ok_or_else(|| format!("invalid date format: '{s}'"))
}

fn parse_number(s: &str) -> Result<f64, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))
}
