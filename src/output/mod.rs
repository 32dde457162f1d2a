//! Output writers for plots, series and run summaries.
//!
//! This module handles writing data to disk in various formats:
//! - SVG plots
//! - CSV meta-model series
//! - Append-only text summaries

pub mod csv;
pub mod summary;
pub mod svg;

// Re-export main functions
pub use self::csv::write_series_csv;
pub use summary::{append_summary, AnalysisSummary, ModelSummary};
pub use svg::write_svg;

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create the parent directories of an output file if needed
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
