//! Configuration file location.

use crate::constants::{APP_NAME, CONFIG_PATH_ENV};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Platform configuration directory for garden-triage.
///
/// - Linux: `~/.config/garden-triage/`
/// - macOS: `~/Library/Application Support/garden-triage/`
/// - Windows: `%APPDATA%\garden-triage\config\`
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(Error::ConfigDirNotFound)
}

/// Path of the config file.
///
/// `GARDEN_TRIAGE_CONFIG` overrides the platform location when set to a
/// non-empty path.
pub fn config_file_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    Ok(config_dir()?.join("config.toml"))
}
