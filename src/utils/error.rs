//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building an analysis configuration
///
/// Every variant names the offending field so callers can point at it.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Unknown reducer {name:?} for field {field} (expected mean, median or proximity_weighted)")]
    UnknownReducer { field: String, name: String },

    #[error("Unknown plot type {0:?} for field plot_type")]
    UnknownPlotType(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON config: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse TOML config: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl ConfigError {
    /// Name of the field the error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::MissingField(field) => Some(field.as_str()),
            ConfigError::InvalidField { field, .. } => Some(field.as_str()),
            ConfigError::UnknownReducer { field, .. } => Some(field.as_str()),
            ConfigError::UnknownPlotType(_) => Some("plot_type"),
            _ => None,
        }
    }
}

/// Errors that can occur while ingesting simulation runs
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Unit scaling magnitude is not set")]
    UnitScalingUnset,

    #[error("Cannot read input directory {path}: {source}")]
    UnreadableRoot {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot read run file {path}: {source}")]
    UnreadableSource {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Column {column:?} not found in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Malformed value {value:?} in {path} at line {line}")]
    MalformedValue {
        path: PathBuf,
        line: usize,
        value: String,
    },

    #[error("No simulation runs found under {0}")]
    NoRuns(PathBuf),

    #[error("Run identifier {0:?} is reserved for the meta-model")]
    ReservedIdentifier(String),
}

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("No series to plot")]
    EmptySeries,
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Top-level error for the analysis engine
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Plot(#[from] PlotError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("Meta-model requested but is_metamodel is disabled in the configuration")]
    MetaModelDisabled,
}
