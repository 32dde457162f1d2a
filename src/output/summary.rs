//! Append-only analysis summary.
//!
//! Every invocation appends one block to `analysis.txt` at the output root so
//! parameter sweeps leave a single readable log behind.

use super::{ensure_parent_dir, validate_path};
use crate::aggregator::SeriesStats;
use crate::config::PlotType;
use crate::utils::error::OutputError;
use log::info;
use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Per-model line of the summary
#[derive(Debug, Clone)]
pub struct ModelSummary {
    pub identifier: String,
    pub raw_len: usize,
    pub processed: SeriesStats,

    /// Final cumulative value, for the cumulative regimes
    pub cumulated: Option<f64>,
}

/// Metadata recorded for one analysis invocation
#[derive(Debug, Clone)]
pub struct AnalysisSummary {
    /// RFC 3339 timestamp
    pub generated_at: String,
    pub metric: String,
    pub unit: String,
    pub window_size: usize,
    pub plot_type: PlotType,

    /// Comparison horizon in samples
    pub samples: usize,
    pub runs: usize,
    pub elapsed_secs: f64,
    pub output_path: PathBuf,
    pub models: Vec<ModelSummary>,
}

impl AnalysisSummary {
    /// Render the summary block
    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "=== Analysis {} ===", self.generated_at);
        let _ = writeln!(out, "Metric:      {}", self.metric);
        let _ = writeln!(out, "Unit:        {}", self.unit);
        let _ = writeln!(out, "Window size: {}", self.window_size);
        let _ = writeln!(out, "Plot type:   {}", self.plot_type);
        let _ = writeln!(out, "Samples:     {}", self.samples);
        let _ = writeln!(out, "Runs:        {}", self.runs);
        let _ = writeln!(out, "Elapsed:     {:.3}s", self.elapsed_secs);
        let _ = writeln!(out, "Output:      {}", self.output_path.display());

        for model in &self.models {
            let _ = write!(
                out,
                "  [{}] raw={} processed={}",
                model.identifier, model.raw_len, model.processed.count
            );
            if model.processed.count > 0 {
                let _ = write!(
                    out,
                    " mean={:.3} range={:.3}",
                    model.processed.mean,
                    model.processed.range()
                );
            }
            if let Some(total) = model.cumulated {
                let _ = write!(out, " cumulated={:.2}", total);
            }
            out.push('\n');
        }

        out
    }
}

/// Append a summary block to the summary file
///
/// **Public** - the file is created if missing, never truncated
pub fn append_summary(summary: &AnalysisSummary, path: impl AsRef<Path>) -> Result<(), OutputError> {
    let path = path.as_ref();

    validate_path(path)?;
    ensure_parent_dir(path)?;

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(summary.render().as_bytes())?;
    file.write_all(b"\n")?;

    info!("Summary appended to: {}", path.display());
    Ok(())
}
