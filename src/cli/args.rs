//! CLI argument definitions.

use crate::cli::validators::{parse_confidence, parse_minutes, parse_rate_limit, parse_time_bound};
use crate::config::OutputFormat;
use crate::input::InputFormat;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Filter false-positive classifications out of sensor-device records.
#[derive(Debug, Parser)]
#[command(name = "garden-triage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Record files or directories to filter (.json, .jsonl, .ndjson, .csv).
    pub inputs: Vec<PathBuf>,

    /// Filtering options.
    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show how timestamps are normalized.
    ParseTimestamp {
        /// Timestamp values to parse.
        #[arg(required = true)]
        values: Vec<String>,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init {
        /// Overwrite an existing configuration file.
        #[arg(long)]
        force: bool,
    },
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for filtering record files.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct FilterArgs {
    /// Minimum confidence threshold (0.0-1.0).
    #[arg(short = 'c', long, value_parser = parse_confidence, env = "GARDEN_TRIAGE_CONFIDENCE")]
    pub confidence: Option<f64>,

    /// Minimum minutes between kept detections of the same species.
    #[arg(short = 's', long, value_parser = parse_minutes, env = "GARDEN_TRIAGE_SPACING")]
    pub spacing: Option<f64>,

    /// Maximum detections per minute in an accepted session (`inf` to disable).
    #[arg(short = 'r', long, value_parser = parse_rate_limit, env = "GARDEN_TRIAGE_RATE_LIMIT")]
    pub rate_limit: Option<f64>,

    /// Minimum accepted session duration in minutes.
    #[arg(short = 'd', long, value_parser = parse_minutes, env = "GARDEN_TRIAGE_MIN_DURATION")]
    pub min_duration: Option<f64>,

    /// Output format.
    #[arg(short, long, value_enum, env = "GARDEN_TRIAGE_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Input format (default: from file extension).
    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    pub input_format: InputFormat,

    /// Output file (default: stdout).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Filter each value of this record field independently (e.g. `device_id`).
    #[arg(long, env = "GARDEN_TRIAGE_GROUP_BY")]
    pub group_by: Option<String>,

    /// Only filter records whose `device_id` equals this value.
    #[arg(long, value_name = "ID", env = "GARDEN_TRIAGE_DEVICE")]
    pub device: Option<String>,

    /// Only filter records at or after this time.
    #[arg(long, value_name = "TIMESTAMP", value_parser = parse_time_bound)]
    pub start: Option<DateTime<Utc>>,

    /// Only filter records at or before this time.
    #[arg(long, value_name = "TIMESTAMP", value_parser = parse_time_bound)]
    pub end: Option<DateTime<Utc>>,

    /// Write a JSON run report (parameters, counts, species, devices).
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Print raw and filtered counts per species to stderr.
    #[arg(long)]
    pub species_summary: bool,

    /// Disable the progress bar.
    #[arg(long)]
    pub no_progress: bool,

    /// Only log warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
