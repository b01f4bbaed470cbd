//! JSON run report.
//!
//! Records the parameters of a filter run alongside its stage counts,
//! per-species counts and a per-device summary with the date range each
//! device covered.

use crate::constants::fields::{DEVICE_ID, TIMESTAMP};
use crate::error::{Error, Result};
use crate::filter::{
    ClassificationEvent, FilterConfig, FilterReport, RecordSelection, normalize_timestamp,
    partition_key,
};
use crate::output::{SpeciesCount, species_counts};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

/// Summary of one filter run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Filter parameters in effect.
    pub parameters: FilterConfig,
    /// Device and time-window selection applied before filtering.
    pub selection: RecordSelection,
    /// Per-stage counts.
    pub counts: FilterReport,
    /// Raw and filtered counts per species.
    pub species: Vec<SpeciesCount>,
    /// Raw and filtered counts per device.
    pub devices: Vec<DeviceSummary>,
}

/// Counts and covered period for one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceSummary {
    /// Device identifier; `None` for records without one.
    pub device_id: Option<String>,
    /// Records entering the pipeline.
    pub raw: usize,
    /// Records surviving it.
    pub filtered: usize,
    /// Period spanned by the device's raw records.
    pub date_range: Option<DateRange>,
}

/// First and last timestamp of a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// Earliest timestamp.
    pub start: DateTime<Utc>,
    /// Latest timestamp.
    pub end: DateTime<Utc>,
    /// Whole days between the two.
    pub span_days: i64,
}

impl DateRange {
    fn widen(range: Option<Self>, instant: DateTime<Utc>) -> Self {
        let (start, end) = match range {
            Some(r) => (r.start.min(instant), r.end.max(instant)),
            None => (instant, instant),
        };

        Self {
            start,
            end,
            span_days: (end - start).num_days(),
        }
    }
}

impl RunReport {
    /// Build a report for records that went through the pipeline.
    pub fn new(
        parameters: FilterConfig,
        selection: RecordSelection,
        counts: FilterReport,
        raw: &[ClassificationEvent],
        filtered: &[ClassificationEvent],
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            parameters,
            selection,
            counts,
            species: species_counts(raw, filtered),
            devices: device_summaries(raw, filtered),
        }
    }
}

/// Per-device counts in device order, records without a device first.
pub fn device_summaries(
    raw: &[ClassificationEvent],
    filtered: &[ClassificationEvent],
) -> Vec<DeviceSummary> {
    let mut devices: BTreeMap<Option<String>, DeviceSummary> = BTreeMap::new();

    for record in raw {
        let device_id = partition_key(record, DEVICE_ID);
        let entry = devices
            .entry(device_id.clone())
            .or_insert_with(|| empty_summary(device_id));
        entry.raw += 1;

        if let Some(instant) = record
            .get(TIMESTAMP)
            .and_then(Value::as_str)
            .and_then(normalize_timestamp)
        {
            entry.date_range = Some(DateRange::widen(entry.date_range, instant));
        }
    }

    for record in filtered {
        let device_id = partition_key(record, DEVICE_ID);
        devices
            .entry(device_id.clone())
            .or_insert_with(|| empty_summary(device_id))
            .filtered += 1;
    }

    devices.into_values().collect()
}

fn empty_summary(device_id: Option<String>) -> DeviceSummary {
    DeviceSummary {
        device_id,
        raw: 0,
        filtered: 0,
        date_range: None,
    }
}

/// Write `report` as pretty-printed JSON to `path`.
pub fn write_run_report(report: &RunReport, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| Error::OutputCreate {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut writer = std::io::BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, report).map_err(|e| Error::ReportWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
