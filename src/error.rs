//! Error types for garden-triage.

/// Result type alias for garden-triage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for garden-triage.
///
/// The filtering pipeline itself never returns these; malformed records
/// are dropped, not reported. Errors come from configuration, parameter
/// validation and file I/O around the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// A filter parameter is out of range.
    #[error("invalid {name}: {value} ({reason})")]
    InvalidFilterParameter {
        /// Parameter name.
        name: String,
        /// Rejected value.
        value: f64,
        /// Why the value was rejected.
        reason: String,
    },

    /// Time window bounds are equal or reversed.
    #[error("start time {start} must be before end time {end}")]
    InvalidTimeWindow {
        /// Requested window start.
        start: chrono::DateTime<chrono::Utc>,
        /// Requested window end.
        end: chrono::DateTime<chrono::Utc>,
    },

    /// No input files were given.
    #[error("no input files provided")]
    NoInputFiles,

    /// Failed to read an input file.
    #[error("failed to read input file '{path}'")]
    InputRead {
        /// Path to the input file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Input file is not valid JSON.
    #[error("failed to parse JSON records in '{path}'")]
    JsonParse {
        /// Path to the input file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Input file is not valid CSV.
    #[error("failed to parse CSV records in '{path}'")]
    CsvParse {
        /// Path to the input file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: csv::Error,
    },

    /// Input file has an unexpected shape.
    #[error("invalid record file '{path}': {message}")]
    InvalidRecordFormat {
        /// Path to the input file.
        path: std::path::PathBuf,
        /// Description of the format error.
        message: String,
    },

    /// Input format could not be inferred from the file name.
    #[error("cannot infer input format for '{path}' (use --input-format)")]
    UnknownInputFormat {
        /// Path to the input file.
        path: std::path::PathBuf,
    },

    /// Failed to create an output file.
    #[error("failed to create output file '{path}'")]
    OutputCreate {
        /// Path to the output file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize JSON output.
    #[error("failed to write JSON output")]
    JsonWrite {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write the run report.
    #[error("failed to write report '{path}'")]
    ReportWrite {
        /// Path to the report file.
        path: std::path::PathBuf,
        /// Underlying serialization or I/O error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write CSV output.
    #[error("failed to write CSV output")]
    CsvWrite {
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },
}
