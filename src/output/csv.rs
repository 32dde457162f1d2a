//! CSV series output writer.
//!
//! Writes `timestamp,<metric>` pairs, one row per sample.

use super::{ensure_parent_dir, validate_path};
use crate::utils::config::TIMESTAMP_COLUMN;
use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a timestamped series to a CSV file
///
/// **Public** - used for the meta-model export
///
/// # Arguments
/// * `metric` - Name of the value column
/// * `rows` - `(timestamp, value)` pairs in output order
/// * `output_path` - Path to output CSV file
pub fn write_series_csv(
    metric: &str,
    rows: &[(i64, f64)],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing {} rows to: {}", rows.len(), output_path.display());

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{},{}", TIMESTAMP_COLUMN, metric)?;
    for (timestamp, value) in rows {
        writeln!(writer, "{},{}", timestamp, value)?;
    }
    writer.flush()?;

    Ok(())
}
