//! False-positive filtering pipeline.
//!
//! raw events -> confidence gate -> chronological sort -> session
//! segmentation/acceptance -> per-species debounce -> filtered events.
//!
//! Every stage after the confidence gate needs a timestamp, so events with
//! a missing or unparseable timestamp are dropped right after gating. The
//! pipeline never fails on malformed records; it degrades to fewer
//! surviving events.

use crate::error::{Error, Result};
use crate::filter::{
    ClassificationEvent, NormalizedEvent, TimedEvent, confidence_gate, debounce_species,
    filter_sessions,
};
use serde::Serialize;
use tracing::{debug, warn};

/// Tunable parameters for one pipeline invocation.
///
/// There are no defaults; callers must choose every value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilterConfig {
    /// Minimum confidence (inclusive) for an event to be considered.
    pub confidence_threshold: f64,
    /// Same-species repeats must be more than this many minutes apart.
    pub species_spacing_minutes: f64,
    /// Maximum detections per minute for a session to be accepted.
    pub detection_rate_limit: f64,
    /// Minimum session duration in minutes.
    pub session_min_duration_minutes: f64,
}

impl FilterConfig {
    /// Build a validated filter configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFilterParameter`] if the threshold is outside
    /// `0.0..=1.0`, the spacing or minimum duration is negative, the rate
    /// limit is not positive, or any value is NaN. An infinite rate limit
    /// is allowed and accepts zero-duration sessions.
    pub fn new(
        confidence_threshold: f64,
        species_spacing_minutes: f64,
        detection_rate_limit: f64,
        session_min_duration_minutes: f64,
    ) -> Result<Self> {
        let config = Self {
            confidence_threshold,
            species_spacing_minutes,
            detection_rate_limit,
            session_min_duration_minutes,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every parameter is within its valid range.
    pub fn validate(&self) -> Result<()> {
        use crate::constants::confidence;

        if !(confidence::MIN..=confidence::MAX).contains(&self.confidence_threshold) {
            return Err(invalid(
                "confidence_threshold",
                self.confidence_threshold,
                "must be between 0.0 and 1.0",
            ));
        }

        if self.species_spacing_minutes.is_nan() || self.species_spacing_minutes < 0.0 {
            return Err(invalid(
                "species_spacing_minutes",
                self.species_spacing_minutes,
                "must be non-negative",
            ));
        }

        if self.detection_rate_limit.is_nan() || self.detection_rate_limit <= 0.0 {
            return Err(invalid(
                "detection_rate_limit",
                self.detection_rate_limit,
                "must be positive",
            ));
        }

        if self.session_min_duration_minutes.is_nan() || self.session_min_duration_minutes < 0.0 {
            return Err(invalid(
                "session_min_duration_minutes",
                self.session_min_duration_minutes,
                "must be non-negative",
            ));
        }

        Ok(())
    }
}

fn invalid(name: &str, value: f64, reason: &str) -> Error {
    Error::InvalidFilterParameter {
        name: name.to_string(),
        value,
        reason: reason.to_string(),
    }
}

/// Per-stage counts from one pipeline invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    /// Records given to the pipeline.
    pub input: usize,
    /// Records at or above the confidence threshold.
    pub passed_confidence: usize,
    /// Gated records dropped for a missing or unparseable timestamp.
    pub unparseable_timestamps: usize,
    /// Sessions found among timestamped records.
    pub sessions_found: usize,
    /// Sessions that met the size, rate and duration criteria.
    pub sessions_accepted: usize,
    /// Records inside accepted sessions.
    pub in_accepted_sessions: usize,
    /// Records surviving the species debounce.
    pub output: usize,
}

impl FilterReport {
    /// Records removed by the pipeline.
    pub fn removed(&self) -> usize {
        self.input.saturating_sub(self.output)
    }

    /// Add another report's counts into this one.
    pub fn merge(&mut self, other: &Self) {
        self.input += other.input;
        self.passed_confidence += other.passed_confidence;
        self.unparseable_timestamps += other.unparseable_timestamps;
        self.sessions_found += other.sessions_found;
        self.sessions_accepted += other.sessions_accepted;
        self.in_accepted_sessions += other.in_accepted_sessions;
        self.output += other.output;
    }
}

/// Indices of surviving records plus the stage counts.
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    /// Input positions of surviving records, in chronological order.
    pub kept: Vec<usize>,
    /// Per-stage counts.
    pub report: FilterReport,
}

/// Run the pipeline and return the input positions of surviving records.
pub fn filter_indices(events: &[ClassificationEvent], config: &FilterConfig) -> FilterOutcome {
    let mut report = FilterReport {
        input: events.len(),
        ..FilterReport::default()
    };

    if events.is_empty() {
        return FilterOutcome {
            kept: Vec::new(),
            report,
        };
    }

    let normalized: Vec<NormalizedEvent> = events
        .iter()
        .enumerate()
        .map(|(index, event)| NormalizedEvent::from_event(index, event))
        .collect();

    let gated = confidence_gate(normalized, config.confidence_threshold);
    report.passed_confidence = gated.len();

    let mut timed = Vec::with_capacity(gated.len());
    for event in gated {
        match TimedEvent::try_from(event) {
            Ok(event) => timed.push(event),
            Err(event) => {
                report.unparseable_timestamps += 1;
                debug!("Dropping record {} without a usable timestamp", event.index);
            }
        }
    }

    if report.unparseable_timestamps > 0 {
        warn!(
            "{} record(s) dropped for missing or unparseable timestamps",
            report.unparseable_timestamps
        );
    }

    let sessions = filter_sessions(
        timed,
        config.detection_rate_limit,
        config.session_min_duration_minutes,
    );
    report.sessions_found = sessions.sessions_found;
    report.sessions_accepted = sessions.sessions_accepted;
    report.in_accepted_sessions = sessions.events.len();

    let survivors = debounce_species(sessions.events, config.species_spacing_minutes);
    report.output = survivors.len();

    debug!(
        "Filtered {} -> {} records ({} of {} sessions accepted)",
        report.input, report.output, report.sessions_accepted, report.sessions_found
    );

    FilterOutcome {
        kept: survivors.into_iter().map(|e| e.index).collect(),
        report,
    }
}

/// Remove likely false positives from a list of classification records.
///
/// Returns a subset of `events`, unmodified, in chronological order.
pub fn apply_false_positive_filtering(
    events: &[ClassificationEvent],
    config: &FilterConfig,
) -> Vec<ClassificationEvent> {
    filter_with_report(events, config).0
}

/// Like [`apply_false_positive_filtering`], also returning stage counts.
pub fn filter_with_report(
    events: &[ClassificationEvent],
    config: &FilterConfig,
) -> (Vec<ClassificationEvent>, FilterReport) {
    let outcome = filter_indices(events, config);
    let filtered = outcome
        .kept
        .iter()
        .map(|&index| events[index].clone())
        .collect();
    (filtered, outcome.report)
}
