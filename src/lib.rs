//! garden-triage - false-positive filtering for sensor-device classifications.
//!
//! Camera-trap-like devices emit a noisy, irregularly timestamped stream of
//! species classifications. This crate reconstructs plausible detection
//! sessions from that stream, suppressing calibration bursts and rapid
//! species re-triggers. See [`filter::apply_false_positive_filtering`].

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod filter;
pub mod input;
pub mod output;

use clap::Parser;
use cli::{Cli, Command, FilterArgs};
use config::{Config, config_file_path, load_default_config, save_default_config};
use filter::{
    ClassificationEvent, FilterConfig, FilterReport, RecordSelection, filter_partitioned,
    filter_with_report, parse_timestamp,
};
use input::{collect_input_files, read_records};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

pub use error::{Error, Result};

/// Main entry point for the garden-triage CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.filter.verbose, cli.filter.quiet);

    // Load configuration
    let config = load_default_config()?;

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command, &config);
    }

    // Show help if no inputs provided
    if cli.inputs.is_empty() {
        cli::help::print_smart_help(&config);
        return Ok(());
    }

    filter_files(&cli.inputs, &cli.filter, &config)
}

/// Resolve filter parameters: CLI/env values first, then the config file.
pub fn resolve_filter_config(args: &FilterArgs, config: &Config) -> Result<FilterConfig> {
    let defaults = &config.filter;
    FilterConfig::new(
        args.confidence.unwrap_or(defaults.confidence_threshold),
        args.spacing.unwrap_or(defaults.species_spacing_minutes),
        args.rate_limit.unwrap_or(defaults.detection_rate_limit),
        args.min_duration
            .unwrap_or(defaults.session_min_duration_minutes),
    )
}

/// Read, filter and write the given record files.
fn filter_files(inputs: &[PathBuf], args: &FilterArgs, config: &Config) -> Result<()> {
    use crate::output::progress;

    let filter_config = resolve_filter_config(args, config)?;
    let selection = RecordSelection::new(args.device.clone(), args.start, args.end)?;

    let files = collect_input_files(inputs)?;
    if files.is_empty() {
        return Err(Error::NoInputFiles);
    }
    let format = args.format.unwrap_or(config.output.format);
    let group_by = args
        .group_by
        .as_deref()
        .or(config.output.group_by.as_deref())
        .filter(|field| !field.trim().is_empty());

    debug!("Filter parameters: {filter_config:?}");

    // Read all files into one record list
    let progress_enabled = !args.quiet && !args.no_progress;
    let file_progress = progress::create_file_progress(files.len(), progress_enabled);

    let mut records: Vec<ClassificationEvent> = Vec::new();
    for file in &files {
        progress::set_current_file(file_progress.as_ref(), file);
        let file_records = read_records(file, args.input_format)?;
        debug!("Read {} record(s) from {}", file_records.len(), file.display());
        records.extend(file_records);
        progress::inc_progress(file_progress.as_ref());
    }
    progress::finish_progress(file_progress);

    info!(
        "Loaded {} record(s) from {} file(s)",
        records.len(),
        files.len()
    );

    if !selection.is_unrestricted() {
        let loaded = records.len();
        records = selection.apply(records);
        info!(
            "Selected {} of {} record(s) by device/time window",
            records.len(),
            loaded
        );
    }

    let (filtered, report) = run_filter(&records, group_by, &filter_config);
    info!("{}", output::describe_report(&report));

    if args.species_summary {
        print_species_summary(&records, &filtered)?;
    }

    if let Some(path) = &args.report {
        let run_report =
            output::RunReport::new(filter_config, selection, report, &records, &filtered);
        output::write_run_report(&run_report, path)?;
        info!("Wrote run report to {}", path.display());
    }

    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|e| Error::OutputCreate {
                path: path.clone(),
                source: e,
            })?;
            output::write_records(&filtered, format, std::io::BufWriter::new(file))?;
            info!("Wrote {} record(s) to {}", filtered.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            output::write_records(&filtered, format, stdout.lock())?;
        }
    }

    Ok(())
}

/// Filter records as a whole, or per partition when `group_by` is set.
fn run_filter(
    records: &[ClassificationEvent],
    group_by: Option<&str>,
    config: &FilterConfig,
) -> (Vec<ClassificationEvent>, FilterReport) {
    match group_by {
        Some(field) => {
            info!("Filtering each '{field}' independently");
            filter_partitioned(records, field, config)
        }
        None => filter_with_report(records, config),
    }
}

fn print_species_summary(raw: &[ClassificationEvent], filtered: &[ClassificationEvent]) -> Result<()> {
    let rows = output::species_counts(raw, filtered);
    let mut stderr = std::io::stderr().lock();
    write!(stderr, "{}", output::render_species_table(&rows))?;
    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // Records may go to stdout, so logs always go to stderr.
    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_command(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action, config),
        Command::ParseTimestamp { values } => {
            handle_parse_timestamp_command(&values);
            Ok(())
        }
    }
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: cli::ConfigAction, config: &Config) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init { force } => {
            let path = config_file_path()?;
            if path.exists() && !force {
                println!("Configuration file already exists: {}", path.display());
                println!("Use 'garden-triage config init --force' to overwrite it.");
            } else {
                let saved_path = save_default_config(&Config::default())?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let text = toml::to_string_pretty(config)
                .map_err(|e| Error::ConfigSerialize { source: e })?;
            print!("{text}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

#[allow(clippy::print_stdout)]
fn handle_parse_timestamp_command(values: &[String]) {
    for value in values {
        match parse_timestamp(value) {
            Some(instant) => println!("{value}\t{}", instant.to_rfc3339()),
            None => println!("{value}\tunparseable"),
        }
    }
}
