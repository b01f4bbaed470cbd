//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "garden-triage";

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "GARDEN_TRIAGE_CONFIG";

/// Record field names understood by the filtering pipeline.
pub mod fields {
    /// Field holding the event timestamp.
    pub const TIMESTAMP: &str = "timestamp";

    /// Candidate species label fields, in resolution order.
    pub const SPECIES_FIELDS: &[&str] = &["species", "predicted_class"];

    /// Candidate confidence fields, in resolution order.
    pub const CONFIDENCE_FIELDS: &[&str] = &["species_confidence", "confidence"];

    /// Label used when no species field resolves.
    pub const UNKNOWN_SPECIES: &str = "Unknown";

    /// Confidence used when no confidence field resolves.
    pub const DEFAULT_CONFIDENCE: f64 = 0.0;

    /// Field identifying the reporting device.
    pub const DEVICE_ID: &str = "device_id";
}

/// Session segmentation constants.
pub mod session {
    /// Inactivity gap that splits two sessions, in minutes.
    ///
    /// A gap of exactly this length keeps events in the same session.
    pub const SESSION_GAP_MINUTES: i64 = 60;

    /// Sessions with fewer raw events than this are always discarded.
    pub const MIN_SESSION_EVENTS: usize = 3;
}

/// Confidence threshold bounds.
pub mod confidence {
    /// Minimum valid confidence threshold.
    pub const MIN: f64 = 0.0;

    /// Maximum valid confidence threshold.
    pub const MAX: f64 = 1.0;
}

/// Default filter parameters used by the CLI and config file.
///
/// The library pipeline never applies these implicitly; every call to
/// [`crate::filter::apply_false_positive_filtering`] takes an explicit
/// [`crate::filter::FilterConfig`].
pub mod defaults {
    /// Default confidence threshold (fraction).
    pub const CONFIDENCE_THRESHOLD: f64 = 0.05;

    /// Default minimum spacing between same-species detections, in minutes.
    pub const SPECIES_SPACING_MINUTES: f64 = 5.0;

    /// Default maximum detections per minute within a session.
    pub const DETECTION_RATE_LIMIT: f64 = 50.0;

    /// Default minimum session duration, in minutes.
    pub const SESSION_MIN_DURATION_MINUTES: f64 = 1.0;
}

/// Field names used when a JSON document wraps records in an object.
pub mod input {
    /// Key of the record array in a paginated API response.
    pub const ITEMS_KEY: &str = "items";
}
