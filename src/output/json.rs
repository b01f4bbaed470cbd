//! JSON and JSON Lines output writers.

use crate::error::{Error, Result};
use crate::filter::ClassificationEvent;
use crate::output::OutputWriter;
use std::io::Write;

/// Writes records as a single pretty-printed JSON array.
///
/// Records are buffered and written at finalize.
pub struct JsonWriter<W: Write> {
    writer: W,
    records: Vec<ClassificationEvent>,
}

impl<W: Write> JsonWriter<W> {
    /// Create a new JSON array writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records: Vec::new(),
        }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_header(&mut self, _columns: &[String]) -> Result<()> {
        // No header for JSON - written at finalize
        Ok(())
    }

    fn write_record(&mut self, record: &ClassificationEvent) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.records)
            .map_err(|e| Error::JsonWrite { source: e })?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes one compact JSON object per line.
pub struct JsonLinesWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesWriter<W> {
    /// Create a new JSON Lines writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonLinesWriter<W> {
    fn write_header(&mut self, _columns: &[String]) -> Result<()> {
        Ok(())
    }

    fn write_record(&mut self, record: &ClassificationEvent) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)
            .map_err(|e| Error::JsonWrite { source: e })?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
