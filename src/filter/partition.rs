//! Independent filtering per partition (e.g. per device).

use crate::filter::{ClassificationEvent, FilterConfig, FilterReport, filter_indices};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Partition key for `record`: the field's text, or `None` when the field
/// is missing or null.
pub fn partition_key(record: &ClassificationEvent, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Filter each partition of `events` independently.
///
/// Records are partitioned by the value of `field`; records lacking it
/// form one partition of their own. Each partition's output depends only
/// on its own records. Partitions are emitted in key order, the keyless
/// partition first, each in the pipeline's chronological order.
pub fn filter_partitioned(
    events: &[ClassificationEvent],
    field: &str,
    config: &FilterConfig,
) -> (Vec<ClassificationEvent>, FilterReport) {
    let mut partitions: BTreeMap<Option<String>, Vec<usize>> = BTreeMap::new();
    for (index, record) in events.iter().enumerate() {
        partitions
            .entry(partition_key(record, field))
            .or_default()
            .push(index);
    }

    let mut filtered = Vec::new();
    let mut report = FilterReport::default();

    for (key, indices) in partitions {
        let members: Vec<ClassificationEvent> =
            indices.iter().map(|&i| events[i].clone()).collect();
        let outcome = filter_indices(&members, config);

        debug!(
            "Partition {}={}: {} -> {} records",
            field,
            key.as_deref().unwrap_or("<none>"),
            outcome.report.input,
            outcome.report.output
        );

        report.merge(&outcome.report);
        filtered.extend(outcome.kept.into_iter().map(|i| members[i].clone()));
    }

    (filtered, report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partition_key() {
        let record = json!({"device_id": "d1", "slot": 3, "none": null});
        let record = record.as_object().unwrap();
        assert_eq!(partition_key(record, "device_id").as_deref(), Some("d1"));
        assert_eq!(partition_key(record, "slot").as_deref(), Some("3"));
        assert_eq!(partition_key(record, "none"), None);
        assert_eq!(partition_key(record, "missing"), None);
    }

    #[test]
    fn test_empty_input() {
        let config = FilterConfig::new(0.05, 5.0, 50.0, 1.0).unwrap();
        let (filtered, report) = filter_partitioned(&[], "device_id", &config);
        assert!(filtered.is_empty());
        assert_eq!(report, FilterReport::default());
    }
}
