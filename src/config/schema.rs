//! Validated analysis configuration types.
//!
//! An [`AnalysisConfig`] is only ever produced by the loader, so every value
//! here already satisfies the configuration invariants.

use crate::aggregator::Reducer;
use crate::utils::config::unit_prefix;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Aggregation regime, fixed for the whole invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotType {
    /// Windowed series per run, expanded back to sample granularity
    #[default]
    TimeSeries,

    /// One running total per run, no windowing
    Cumulative,

    /// Running sum of the windowed series, scaled by window size
    CumulativeTimeSeries,
}

impl PlotType {
    pub fn name(&self) -> &'static str {
        match self {
            PlotType::TimeSeries => "time_series",
            PlotType::Cumulative => "cumulative",
            PlotType::CumulativeTimeSeries => "cumulative_time_series",
        }
    }
}

impl fmt::Display for PlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlotType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "time_series" => Ok(PlotType::TimeSeries),
            "cumulative" => Ok(PlotType::Cumulative),
            "cumulative_time_series" => Ok(PlotType::CumulativeTimeSeries),
            other => Err(other.to_string()),
        }
    }
}

/// One plot axis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisOptions {
    /// Axis label
    pub label: String,

    /// `(min, max)`; only set when both bounds were configured
    pub range: Option<(f64, f64)>,

    /// Number of ticks to draw
    pub ticks_count: Option<usize>,
}

/// Validated configuration for one analysis invocation
///
/// **Public** - passed explicitly through every pipeline stage
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Column analysed in every run
    pub metric: String,

    /// Samples per window
    pub window_size: usize,

    /// Reducer applied inside each window
    pub window_function: Reducer,

    /// Reducer applied across runs for the meta-model
    pub meta_function: Reducer,

    pub plot_type: PlotType,

    /// Render the multi-model plot
    pub is_multimodel: bool,

    /// Synthesize and export the meta-model
    pub is_metamodel: bool,

    /// Base display unit, e.g. "W"
    pub unit: String,

    /// Power of ten every raw value is divided by
    pub unit_scaling_magnitude: Option<i32>,

    pub plot_title: String,

    /// When set, the x axis is expressed in minutes
    pub samples_per_minute: Option<f64>,

    pub x_axis: AxisOptions,
    pub y_axis: AxisOptions,

    /// Selects the `seed=<seed>` directory inside each run
    pub seed: u64,

    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl AnalysisConfig {
    /// Factor raw values are divided by during ingestion
    pub fn unit_scaling_factor(&self) -> Option<f64> {
        self.unit_scaling_magnitude.map(|m| 10f64.powi(m))
    }

    /// Display unit with its SI prefix, e.g. "kW"
    pub fn display_unit(&self) -> String {
        let prefix = self.unit_scaling_magnitude.map(unit_prefix).unwrap_or("");
        format!("{}{}", prefix, self.unit)
    }

    /// Directory plot and meta-model files are written to
    pub fn metric_output_dir(&self) -> PathBuf {
        self.output_path.join(&self.metric)
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size.max(1);
        self
    }

    pub fn with_input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }
}
