//! False-positive filtering of classification events.
//!
//! Reconstructs plausible detection sessions from a noisy, irregularly
//! timestamped stream of classifications, suppressing calibration bursts
//! and rapid species re-triggers.

mod debounce;
mod event;
mod gate;
mod partition;
mod pipeline;
mod select;
mod session;
pub mod timestamp;

pub use debounce::debounce_species;
pub use event::{
    ClassificationEvent, NormalizedEvent, TimedEvent, resolve_confidence, resolve_species,
};
pub use gate::confidence_gate;
pub use partition::{filter_partitioned, partition_key};
pub use pipeline::{
    FilterConfig, FilterOutcome, FilterReport, apply_false_positive_filtering, filter_indices,
    filter_with_report,
};
pub use select::RecordSelection;
pub use session::{
    Session, SessionOutcome, SessionVerdict, filter_sessions, judge_session, minutes_between,
    segment_sessions,
};
pub use timestamp::{normalize_timestamp, parse_timestamp};
