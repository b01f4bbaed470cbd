//! Output format writers.

mod csv;
mod json;
pub mod progress;
mod report;
mod summary;
mod writer;

pub use csv::CsvWriter;
pub use json::{JsonLinesWriter, JsonWriter};
pub use report::{DateRange, DeviceSummary, RunReport, device_summaries, write_run_report};
pub use summary::{SpeciesCount, describe_report, render_species_table, species_counts};
pub use writer::{OutputWriter, collect_columns};

use crate::config::OutputFormat;
use crate::error::Result;
use crate::filter::ClassificationEvent;
use std::io::Write;

/// Build a writer for `format` over `sink`.
pub fn create_writer<'a, W: Write + 'a>(
    format: OutputFormat,
    sink: W,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Jsonl => Box::new(JsonLinesWriter::new(sink)),
        OutputFormat::Csv => Box::new(CsvWriter::new(sink)),
    }
}

/// Write all records to `sink` in `format`.
pub fn write_records<W: Write>(
    records: &[ClassificationEvent],
    format: OutputFormat,
    sink: W,
) -> Result<()> {
    let mut writer = create_writer(format, sink);
    writer.write_header(&collect_columns(records))?;
    for record in records {
        writer.write_record(record)?;
    }
    writer.finalize()
}
