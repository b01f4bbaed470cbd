//! Record selection by device and time window.
//!
//! Selection runs before the pipeline and narrows an export down to one
//! device and/or one period, the way the dashboard's filtered download did.

use crate::constants::fields::{DEVICE_ID, TIMESTAMP};
use crate::error::{Error, Result};
use crate::filter::timestamp::normalize_timestamp;
use crate::filter::{ClassificationEvent, partition_key};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Device and time-window criteria for records entering the pipeline.
///
/// Both bounds are inclusive. An unset criterion matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordSelection {
    /// Required value of the `device_id` field.
    pub device: Option<String>,
    /// Earliest timestamp kept.
    pub start: Option<DateTime<Utc>>,
    /// Latest timestamp kept.
    pub end: Option<DateTime<Utc>>,
}

impl RecordSelection {
    /// Build a selection, rejecting a window whose start is not strictly
    /// before its end.
    pub fn new(
        device: Option<String>,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        if let (Some(start), Some(end)) = (start, end)
            && start >= end
        {
            return Err(Error::InvalidTimeWindow { start, end });
        }

        Ok(Self {
            device: device.filter(|d| !d.trim().is_empty()),
            start,
            end,
        })
    }

    /// True when nothing is filtered out.
    pub fn is_unrestricted(&self) -> bool {
        self.device.is_none() && self.start.is_none() && self.end.is_none()
    }

    /// Whether `record` satisfies every criterion.
    ///
    /// With a window set, records without a parseable timestamp never
    /// match.
    pub fn matches(&self, record: &ClassificationEvent) -> bool {
        if let Some(device) = &self.device
            && partition_key(record, DEVICE_ID).as_deref() != Some(device.as_str())
        {
            return false;
        }

        if self.start.is_none() && self.end.is_none() {
            return true;
        }

        let Some(instant) = record
            .get(TIMESTAMP)
            .and_then(Value::as_str)
            .and_then(normalize_timestamp)
        else {
            return false;
        };

        self.start.is_none_or(|start| instant >= start) && self.end.is_none_or(|end| instant <= end)
    }

    /// Keep the records that match, in input order.
    pub fn apply(&self, records: Vec<ClassificationEvent>) -> Vec<ClassificationEvent> {
        if self.is_unrestricted() {
            return records;
        }

        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
