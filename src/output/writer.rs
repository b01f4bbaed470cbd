//! Output writer trait definition.

use crate::error::Result;
use crate::filter::ClassificationEvent;

/// Trait for writing filtered classification records.
pub trait OutputWriter {
    /// Write the header (if applicable).
    ///
    /// `columns` is the union of record keys in first-seen order.
    fn write_header(&mut self, columns: &[String]) -> Result<()>;

    /// Write a single record.
    fn write_record(&mut self, record: &ClassificationEvent) -> Result<()>;

    /// Finalize the output (flush, close, etc.).
    fn finalize(&mut self) -> Result<()>;
}

/// Union of record keys, in the order they are first seen.
pub fn collect_columns(records: &[ClassificationEvent]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();

    for record in records {
        for key in record.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }

    columns
}
