//! Configuration type definitions.

use crate::constants::defaults;
use crate::filter::FilterConfig;
use serde::{Deserialize, Serialize};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default filter parameters.
    #[serde(default)]
    pub filter: FilterDefaults,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Default filter parameters, used when not given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterDefaults {
    /// Minimum confidence threshold (0.0-1.0).
    pub confidence_threshold: f64,

    /// Minimum minutes between kept detections of the same species.
    pub species_spacing_minutes: f64,

    /// Maximum detections per minute within an accepted session.
    pub detection_rate_limit: f64,

    /// Minimum accepted session duration in minutes.
    pub session_min_duration_minutes: f64,
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            confidence_threshold: defaults::CONFIDENCE_THRESHOLD,
            species_spacing_minutes: defaults::SPECIES_SPACING_MINUTES,
            detection_rate_limit: defaults::DETECTION_RATE_LIMIT,
            session_min_duration_minutes: defaults::SESSION_MIN_DURATION_MINUTES,
        }
    }
}

impl From<FilterDefaults> for FilterConfig {
    fn from(defaults: FilterDefaults) -> Self {
        Self {
            confidence_threshold: defaults.confidence_threshold,
            species_spacing_minutes: defaults.species_spacing_minutes,
            detection_rate_limit: defaults.detection_rate_limit,
            session_min_duration_minutes: defaults.session_min_duration_minutes,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormat,

    /// Record field used to filter each device independently.
    pub group_by: Option<String>,
}

/// Supported record file formats.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A single JSON array of records.
    #[default]
    Json,
    /// One JSON object per line.
    Jsonl,
    /// CSV with a header row.
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Jsonl => write!(f, "jsonl"),
            Self::Csv => write!(f, "csv"),
        }
    }
}
