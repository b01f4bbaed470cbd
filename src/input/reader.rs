//! Record file parsing.
//!
//! Reads exported classification records into string-keyed mappings.
//! Field values are preserved exactly as stored so they pass through the
//! filter untouched.

use crate::constants::input::ITEMS_KEY;
use crate::error::{Error, Result};
use crate::filter::ClassificationEvent;
use crate::input::InputFormat;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read all records from `path`.
///
/// `InputFormat::Auto` picks the format from the file extension.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is malformed, or holds
/// anything other than objects at record positions.
///
/// Returns `Ok(vec![])` for empty JSON Lines and header-only CSV files.
pub fn read_records(path: &Path, format: InputFormat) -> Result<Vec<ClassificationEvent>> {
    match format.resolve(path)? {
        InputFormat::Json | InputFormat::Auto => read_json(path),
        InputFormat::Jsonl => read_jsonl(path),
        InputFormat::Csv => read_csv(path),
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| Error::InputRead {
            path: path.to_path_buf(),
            source: e,
        })
}

/// JSON array of records, or an object carrying them under `items`.
fn read_json(path: &Path) -> Result<Vec<ClassificationEvent>> {
    let document: Value =
        serde_json::from_reader(open(path)?).map_err(|e| Error::JsonParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove(ITEMS_KEY) {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(Error::InvalidRecordFormat {
                    path: path.to_path_buf(),
                    message: format!("expected an array or an object with an '{ITEMS_KEY}' array"),
                });
            }
        },
        _ => {
            return Err(Error::InvalidRecordFormat {
                path: path.to_path_buf(),
                message: "expected an array of records".to_string(),
            });
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(record) => Ok(record),
            _ => Err(Error::InvalidRecordFormat {
                path: path.to_path_buf(),
                message: format!("record {i} is not an object"),
            }),
        })
        .collect()
}

/// One JSON object per line; blank lines are skipped.
fn read_jsonl(path: &Path) -> Result<Vec<ClassificationEvent>> {
    let mut records = Vec::new();

    for (line_num, line) in open(path)?.lines().enumerate() {
        let line = line.map_err(|e| Error::InputRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(&line) {
            Ok(Value::Object(record)) => records.push(record),
            Ok(_) => {
                return Err(Error::InvalidRecordFormat {
                    path: path.to_path_buf(),
                    message: format!("line {}: expected a JSON object", line_num + 1),
                });
            }
            Err(e) => {
                return Err(Error::InvalidRecordFormat {
                    path: path.to_path_buf(),
                    message: format!("line {}: {e}", line_num + 1),
                });
            }
        }
    }

    Ok(records)
}

/// CSV with a header row. Cells become string fields; empty cells are
/// omitted so that field fallbacks behave as for missing keys.
fn read_csv(path: &Path) -> Result<Vec<ClassificationEvent>> {
    let csv_error = |e| Error::CsvParse {
        path: path.to_path_buf(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(open(path)?);

    let headers = reader.headers().map_err(csv_error)?.clone();
    let mut records = Vec::new();

    for result in reader.records() {
        let row = result.map_err(csv_error)?;

        let record: ClassificationEvent = headers
            .iter()
            .zip(row.iter())
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(name, cell)| (name.to_string(), Value::String(cell.to_string())))
            .collect();

        records.push(record);
    }

    Ok(records)
}
