//! CSV output format writer.

use crate::error::{Error, Result};
use crate::filter::ClassificationEvent;
use crate::output::OutputWriter;
use serde_json::Value;
use std::io::Write;

/// CSV format output writer.
///
/// Columns are fixed by [`OutputWriter::write_header`]; fields a record
/// lacks are written as empty cells.
pub struct CsvWriter<W: Write> {
    writer: csv::Writer<W>,
    columns: Vec<String>,
}

impl<W: Write> CsvWriter<W> {
    /// Create a new CSV writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
            columns: Vec::new(),
        }
    }
}

impl<W: Write> OutputWriter for CsvWriter<W> {
    fn write_header(&mut self, columns: &[String]) -> Result<()> {
        self.columns = columns.to_vec();
        if self.columns.is_empty() {
            return Ok(());
        }

        self.writer
            .write_record(&self.columns)
            .map_err(|e| Error::CsvWrite { source: e })
    }

    fn write_record(&mut self, record: &ClassificationEvent) -> Result<()> {
        if self.columns.is_empty() {
            return Ok(());
        }

        let cells = self
            .columns
            .iter()
            .map(|column| record.get(column).map(cell_text).unwrap_or_default());

        self.writer
            .write_record(cells)
            .map_err(|e| Error::CsvWrite { source: e })
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Render a field value as CSV cell text.
///
/// Strings are written verbatim, null as an empty cell, and nested values
/// as compact JSON.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            value.to_string()
        }
    }
}
