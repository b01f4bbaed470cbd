//! Classification records and their normalized form.

use crate::constants::fields::{
    CONFIDENCE_FIELDS, DEFAULT_CONFIDENCE, SPECIES_FIELDS, TIMESTAMP, UNKNOWN_SPECIES,
};
use crate::filter::timestamp::parse_timestamp;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// A classification record as delivered by the data-access layer.
///
/// Records are string-keyed mappings. The pipeline reads `timestamp`,
/// a species field and a confidence field; every other field is
/// passthrough and is never modified.
pub type ClassificationEvent = Map<String, Value>;

/// A record with its filter-relevant fields resolved once.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEvent {
    /// Position of the record in the pipeline input.
    pub index: usize,
    /// Parsed timestamp, or `None` when missing or unparseable.
    pub instant: Option<DateTime<Utc>>,
    /// Resolved species label.
    pub label: String,
    /// Resolved confidence score.
    pub confidence: f64,
}

impl NormalizedEvent {
    /// Resolve the timestamp, label and confidence of `event`.
    pub fn from_event(index: usize, event: &ClassificationEvent) -> Self {
        let instant = event
            .get(TIMESTAMP)
            .and_then(Value::as_str)
            .and_then(parse_timestamp);

        Self {
            index,
            instant,
            label: resolve_species(event),
            confidence: resolve_confidence(event),
        }
    }
}

/// A normalized event that carries a parsed timestamp.
///
/// Only these reach the temporal stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedEvent {
    /// Position of the record in the pipeline input.
    pub index: usize,
    /// Parsed timestamp.
    pub instant: DateTime<Utc>,
    /// Resolved species label.
    pub label: String,
}

impl TryFrom<NormalizedEvent> for TimedEvent {
    type Error = NormalizedEvent;

    fn try_from(event: NormalizedEvent) -> Result<Self, Self::Error> {
        match event.instant {
            Some(instant) => Ok(Self {
                index: event.index,
                instant,
                label: event.label,
            }),
            None => Err(event),
        }
    }
}

/// Resolve the species label using [`SPECIES_FIELDS`].
///
/// The first candidate holding a non-empty string wins; falls back to
/// `"Unknown"`.
pub fn resolve_species(event: &ClassificationEvent) -> String {
    SPECIES_FIELDS
        .iter()
        .find_map(|field| {
            event
                .get(*field)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .unwrap_or(UNKNOWN_SPECIES)
        .to_string()
}

/// Resolve the confidence score using [`CONFIDENCE_FIELDS`].
///
/// The first candidate holding a finite number wins. Numeric strings are
/// accepted since CSV exports carry every value as text. Falls back to 0.
pub fn resolve_confidence(event: &ClassificationEvent) -> f64 {
    CONFIDENCE_FIELDS
        .iter()
        .find_map(|field| event.get(*field).and_then(numeric_value))
        .unwrap_or(DEFAULT_CONFIDENCE)
}

fn numeric_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    number.is_finite().then_some(number)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(value: Value) -> ClassificationEvent {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_species_prefers_species_field() {
        let e = event(json!({"species": "bee", "predicted_class": "wasp"}));
        assert_eq!(resolve_species(&e), "bee");
    }

    #[test]
    fn test_species_falls_back_to_predicted_class() {
        let e = event(json!({"predicted_class": "wasp"}));
        assert_eq!(resolve_species(&e), "wasp");

        let e = event(json!({"species": null, "predicted_class": "wasp"}));
        assert_eq!(resolve_species(&e), "wasp");
    }

    #[test]
    fn test_species_defaults_to_unknown() {
        assert_eq!(resolve_species(&event(json!({}))), "Unknown");
        assert_eq!(resolve_species(&event(json!({"species": ""}))), "Unknown");
        assert_eq!(resolve_species(&event(json!({"species": 7}))), "Unknown");
    }

    #[test]
    fn test_confidence_prefers_species_confidence() {
        let e = event(json!({"species_confidence": 0.9, "confidence": 0.1}));
        assert_eq!(resolve_confidence(&e), 0.9);
    }

    #[test]
    fn test_confidence_falls_back_to_legacy_field() {
        let e = event(json!({"confidence": 0.2}));
        assert_eq!(resolve_confidence(&e), 0.2);

        let e = event(json!({"species_confidence": "n/a", "confidence": 0.2}));
        assert_eq!(resolve_confidence(&e), 0.2);
    }

    #[test]
    fn test_confidence_accepts_numeric_strings() {
        let e = event(json!({"species_confidence": " 0.75 "}));
        assert_eq!(resolve_confidence(&e), 0.75);
    }

    #[test]
    fn test_confidence_defaults_to_zero() {
        assert_eq!(resolve_confidence(&event(json!({}))), 0.0);
        assert_eq!(resolve_confidence(&event(json!({"confidence": "NaN"}))), 0.0);
    }

    #[test]
    fn test_from_event_without_timestamp() {
        let normalized = NormalizedEvent::from_event(4, &event(json!({"species": "bee"})));
        assert_eq!(normalized.index, 4);
        assert!(normalized.instant.is_none());
        assert_eq!(normalized.label, "bee");
    }

    #[test]
    fn test_from_event_non_string_timestamp() {
        let normalized = NormalizedEvent::from_event(0, &event(json!({"timestamp": 12345})));
        assert!(normalized.instant.is_none());
    }
}
