//! Progress bar for reading record files.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Create a progress bar for reading multiple record files.
///
/// Returns `None` when disabled or when there is only one file to read.
pub fn create_file_progress(total_files: usize, enabled: bool) -> Option<ProgressBar> {
    if !enabled || total_files < 2 {
        return None;
    }

    let pb = ProgressBar::new(total_files as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░ "),
    );
    Some(pb)
}

/// Show the file currently being read.
pub fn set_current_file(pb: Option<&ProgressBar>, path: &Path) {
    if let Some(pb) = pb {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string());
        pb.set_message(name);
    }
}

/// Increment a progress bar.
pub fn inc_progress(pb: Option<&ProgressBar>) {
    if let Some(pb) = pb {
        pb.inc(1);
    }
}

/// Remove a finished progress bar from the terminal.
pub fn finish_progress(pb: Option<ProgressBar>) {
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_disabled_or_single_file() {
        assert!(create_file_progress(5, false).is_none());
        assert!(create_file_progress(1, true).is_none());
        assert!(create_file_progress(0, true).is_none());
    }

    #[test]
    fn test_progress_helpers_accept_none() {
        set_current_file(None, Path::new("a.json"));
        inc_progress(None);
        finish_progress(None);
    }

    #[test]
    fn test_progress_counts_files() {
        let pb = create_file_progress(3, true);
        assert!(pb.is_some());
        inc_progress(pb.as_ref());
        assert_eq!(pb.as_ref().map(ProgressBar::position), Some(1));
        finish_progress(pb);
    }
}
