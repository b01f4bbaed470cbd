//! Help message display for CLI.

#![allow(clippy::print_stdout)]

use crate::config::Config;

/// Print a short usage guide showing the defaults currently in effect.
pub fn print_smart_help(config: &Config) {
    println!("{}", smart_help_text(config));
}

fn smart_help_text(config: &Config) -> String {
    let f = &config.filter;
    format!(
        "Usage: garden-triage [FILES]... [OPTIONS]

Example: garden-triage classifications.json -c 0.25 -s 10 --species-summary

Current defaults:
  confidence threshold  {}
  species spacing       {} min
  rate limit            {} /min
  min session duration  {} min
  output format         {}

Run 'garden-triage config init' to create a config file, or 'garden-triage -h' for all options.",
        f.confidence_threshold,
        f.species_spacing_minutes,
        f.detection_rate_limit,
        f.session_min_duration_minutes,
        config.output.format,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_shows_effective_defaults() {
        let mut config = Config::default();
        config.filter.species_spacing_minutes = 12.0;
        let text = smart_help_text(&config);
        assert!(text.contains("species spacing       12 min"));
        assert!(text.contains("output format         json"));
    }
}
