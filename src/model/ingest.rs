//! Load one simulation run from its columnar output.
//!
//! Each run directory holds `seed=<seed>/host.csv`. Only the `timestamp` and
//! metric columns are read. A run may emit several rows per timestamp (one per
//! host), so rows are summed per timestamp before scaling.

use super::run_model::RunModel;
use crate::config::AnalysisConfig;
use crate::utils::config::{META_MODEL_ID, SIMULATION_DATA_FILE, TIMESTAMP_COLUMN};
use crate::utils::error::IngestError;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Path of the data file for one run
///
/// **Public** - `<input_path>/<run_id>/seed=<seed>/host.csv`
pub fn run_data_path(config: &AnalysisConfig, run_id: &str) -> PathBuf {
    config
        .input_path
        .join(run_id)
        .join(format!("seed={}", config.seed))
        .join(SIMULATION_DATA_FILE)
}

/// List run directories under the input root, sorted by name
///
/// **Public** - the reserved meta-model directory and plain files are skipped
pub fn discover_runs(input_root: &Path) -> Result<Vec<String>, IngestError> {
    let entries = fs::read_dir(input_root).map_err(|source| IngestError::UnreadableRoot {
        path: input_root.to_path_buf(),
        source,
    })?;

    let mut runs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| IngestError::UnreadableRoot {
            path: input_root.to_path_buf(),
            source,
        })?;

        if !entry.path().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if name == META_MODEL_ID {
            warn!("Skipping reserved meta-model directory: {}", entry.path().display());
            continue;
        }

        runs.push(name);
    }

    runs.sort();
    Ok(runs)
}

/// Ingest one run
///
/// **Public** - main entry point for ingestion
///
/// # Arguments
/// * `config` - Validated analysis configuration
/// * `run_id` - Directory name of the run under the input root
///
/// # Errors
/// * `IngestError::UnitScalingUnset` - no scaling magnitude configured
/// * `IngestError::UnreadableSource` - data file missing or unreadable
/// * `IngestError::MissingColumn` / `MalformedValue` - bad file contents
pub fn ingest_run(config: &AnalysisConfig, run_id: &str) -> Result<RunModel, IngestError> {
    let scaling = config
        .unit_scaling_factor()
        .ok_or(IngestError::UnitScalingUnset)?;

    let path = run_data_path(config, run_id);
    debug!("Ingesting run {} from {}", run_id, path.display());

    let content = fs::read_to_string(&path).map_err(|source| IngestError::UnreadableSource {
        path: path.clone(),
        source,
    })?;

    let totals = sum_by_timestamp(&content, &config.metric, &path)?;

    let timestamps: Vec<i64> = totals.keys().copied().collect();
    let raw_series: Vec<f64> = totals.values().map(|v| v / scaling).collect();

    debug!("Run {}: {} distinct timestamps", run_id, timestamps.len());

    RunModel::new(run_id, timestamps, raw_series)
}

/// Parse CSV content and sum the metric column per timestamp
///
/// **Public** - exposed for reuse on in-memory data
pub fn sum_by_timestamp(
    content: &str,
    metric: &str,
    path: &Path,
) -> Result<BTreeMap<i64, f64>, IngestError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let header: Vec<String> = match lines.next() {
        Some((_, line)) => split_row(line),
        None => Vec::new(),
    };

    let column_index = |column: &str| {
        header
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| IngestError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            })
    };

    let timestamp_idx = column_index(TIMESTAMP_COLUMN)?;
    let metric_idx = column_index(metric)?;

    let mut totals = BTreeMap::new();
    for (line_no, line) in lines {
        let cells = split_row(line);
        let malformed = |value: &str| IngestError::MalformedValue {
            path: path.to_path_buf(),
            line: line_no + 1,
            value: value.to_string(),
        };

        let ts_cell = cells.get(timestamp_idx).map(String::as_str).unwrap_or("");
        let metric_cell = cells.get(metric_idx).map(String::as_str).unwrap_or("");

        let timestamp: i64 = ts_cell.parse().map_err(|_| malformed(ts_cell))?;
        let value: f64 = metric_cell
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .ok_or_else(|| malformed(metric_cell))?;

        *totals.entry(timestamp).or_insert(0.0) += value;
    }

    Ok(totals)
}

/// Split one CSV record into cells
///
/// Commas inside double quotes belong to the cell and `""` is an escaped quote.
/// Records never span lines.
fn split_row(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                cell.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(c),
        }
    }
    cells.push(cell.trim().to_string());

    cells
}
