//! Per-species debouncing.

use crate::filter::TimedEvent;
use crate::filter::session::minutes_between;
use std::collections::BTreeMap;

/// Suppress same-species repeats spaced `spacing_minutes` or less apart.
///
/// Events are grouped by label and each group is walked in chronological
/// order. The first event of a group is always kept. A later event is kept
/// only when the gap since the immediately preceding event of the same
/// species is strictly greater than the spacing, whether or not that
/// preceding event was kept. Sustained activity therefore stays suppressed
/// until the species goes quiet for longer than the spacing.
///
/// Survivors are returned in chronological order, ties broken by input
/// index.
pub fn debounce_species(events: Vec<TimedEvent>, spacing_minutes: f64) -> Vec<TimedEvent> {
    let mut groups: BTreeMap<String, Vec<TimedEvent>> = BTreeMap::new();
    for event in events {
        groups.entry(event.label.clone()).or_default().push(event);
    }

    let mut kept = Vec::new();

    for (_label, mut group) in groups {
        group.sort_by_key(|e| (e.instant, e.index));

        let mut previous = None;
        for event in group {
            let keep = previous.is_none_or(|prev| minutes_between(prev, event.instant) > spacing_minutes);
            previous = Some(event.instant);

            if keep {
                kept.push(event);
            }
        }
    }

    kept.sort_by_key(|e| (e.instant, e.index));
    kept
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn event(index: usize, minutes: i64, label: &str) -> TimedEvent {
        TimedEvent {
            index,
            instant: Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap() + Duration::minutes(minutes),
            label: label.to_string(),
        }
    }

    fn indices(events: &[TimedEvent]) -> Vec<usize> {
        events.iter().map(|e| e.index).collect()
    }

    #[test]
    fn test_first_event_always_kept() {
        let kept = debounce_species(vec![event(0, 0, "bee")], 1000.0);
        assert_eq!(indices(&kept), vec![0]);
    }

    #[test]
    fn test_close_repeats_suppressed() {
        let events = (0..5).map(|i| event(i, i64::try_from(i).unwrap(), "bee")).collect();
        let kept = debounce_species(events, 5.0);
        assert_eq!(indices(&kept), vec![0]);
    }

    #[test]
    fn test_spacing_is_exclusive() {
        let kept = debounce_species(vec![event(0, 0, "bee"), event(1, 5, "bee")], 5.0);
        assert_eq!(indices(&kept), vec![0]);

        let kept = debounce_species(vec![event(0, 0, "bee"), event(1, 6, "bee")], 5.0);
        assert_eq!(indices(&kept), vec![0, 1]);
    }

    #[test]
    fn test_gap_measured_from_last_seen_event() {
        // Every gap is 4 minutes, so the chain never goes quiet for 5.
        let events = vec![
            event(0, 0, "bee"),
            event(1, 4, "bee"),
            event(2, 8, "bee"),
            event(3, 12, "bee"),
            event(4, 20, "bee"),
        ];
        let kept = debounce_species(events, 5.0);
        assert_eq!(indices(&kept), vec![0, 4]);
    }

    #[test]
    fn test_species_debounced_independently() {
        let events = vec![
            event(0, 0, "bee"),
            event(1, 1, "wasp"),
            event(2, 2, "bee"),
            event(3, 3, "wasp"),
        ];
        let kept = debounce_species(events, 5.0);
        assert_eq!(indices(&kept), vec![0, 1]);
    }

    #[test]
    fn test_output_is_chronological() {
        let events = vec![
            event(0, 30, "wasp"),
            event(1, 0, "bee"),
            event(2, 15, "ant"),
        ];
        let kept = debounce_species(events, 5.0);
        assert_eq!(indices(&kept), vec![1, 2, 0]);
    }

    #[test]
    fn test_zero_spacing_drops_exact_duplicates_only() {
        let events = vec![event(0, 0, "bee"), event(1, 0, "bee"), event(2, 1, "bee")];
        let kept = debounce_species(events, 0.0);
        assert_eq!(indices(&kept), vec![0, 2]);
    }
}
