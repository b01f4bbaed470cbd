//! Confidence gating.

use crate::filter::NormalizedEvent;

/// Keep events whose confidence is at least `threshold`.
///
/// The threshold is inclusive and input order is preserved.
pub fn confidence_gate(events: Vec<NormalizedEvent>, threshold: f64) -> Vec<NormalizedEvent> {
    events
        .into_iter()
        .filter(|event| event.confidence >= threshold)
        .collect()
}
