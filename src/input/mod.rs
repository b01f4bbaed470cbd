//! Classification record input.

mod reader;

pub use reader::read_records;

use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Record file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    /// Infer from the file extension.
    #[default]
    Auto,
    /// JSON array, or an object with an `items` array.
    Json,
    /// One JSON object per line.
    Jsonl,
    /// CSV with a header row.
    Csv,
}

impl InputFormat {
    /// Resolve `Auto` against a file name.
    pub fn resolve(self, path: &Path) -> Result<Self> {
        if self != Self::Auto {
            return Ok(self);
        }

        Self::from_extension(path).ok_or_else(|| Error::UnknownInputFormat {
            path: path.to_path_buf(),
        })
    }

    /// Format implied by the file extension, if recognized.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?;

        if ext.eq_ignore_ascii_case(OsStr::new("json")) {
            Some(Self::Json)
        } else if ext.eq_ignore_ascii_case(OsStr::new("jsonl"))
            || ext.eq_ignore_ascii_case(OsStr::new("ndjson"))
        {
            Some(Self::Jsonl)
        } else if ext.eq_ignore_ascii_case(OsStr::new("csv")) {
            Some(Self::Csv)
        } else {
            None
        }
    }
}

/// Collect record files from paths (files and directories).
///
/// Explicit files are kept as given. Directories are searched recursively
/// for files with a recognized extension, in sorted order so that record
/// order does not depend on directory listing order.
pub fn collect_input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let mut found = Vec::new();
            collect_record_files_recursive(path, &mut found)?;
            found.sort();
            files.extend(found);
        } else {
            warn!("Skipping non-existent path: {}", path.display());
        }
    }

    Ok(files)
}

fn collect_record_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            collect_record_files_recursive(&path, files)?;
        } else if InputFormat::from_extension(&path).is_some() {
            files.push(path);
        }
    }

    Ok(())
}
