//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::filter::FilterConfig;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_filter_defaults(config)?;
    validate_output(config)?;
    Ok(())
}

/// Validate default filter parameters.
fn validate_filter_defaults(config: &Config) -> Result<()> {
    FilterConfig::from(config.filter)
        .validate()
        .map_err(|e| Error::ConfigValidation {
            message: format!("[filter] {e}"),
        })
}

/// Validate output settings.
fn validate_output(config: &Config) -> Result<()> {
    if let Some(ref field) = config.output.group_by
        && field.trim().is_empty()
    {
        return Err(Error::ConfigValidation {
            message: "output.group_by must not be empty".to_string(),
        });
    }

    Ok(())
}
