//! Multi-model orchestration.
//!
//! The multi-model owns every run of one analysis invocation:
//! 1. `ingest()` loads each run directory in sorted order
//! 2. `compute_all()` derives the per-run series for the configured regime
//! 3. `generate()` synthesizes the meta-model (if enabled), renders the plot,
//!    exports the meta-model and appends the run summary
//!
//! All comparisons are clamped to `max_model_len`, the length of the shortest run.

use super::ingest::{discover_runs, ingest_run};
use super::metamodel::MetaModel;
use super::run_model::RunModel;
use crate::aggregator::{
    calculate_series_stats, cumulative_series, expand_series, round2, windowed_aggregation,
};
use crate::config::{AnalysisConfig, PlotType};
use crate::output::summary::{append_summary, AnalysisSummary, ModelSummary};
use crate::output::write_svg;
use crate::plot::{generate_plot, BarEntry, PlotConfig, PlotData, PlotSeries};
use crate::utils::config::{ANALYSIS_SUMMARY_FILE, META_MODEL_LABEL};
use crate::utils::error::{AnalysisError, IngestError};
use chrono::Utc;
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Files produced by one `generate()` call
#[derive(Debug, Clone, Default)]
pub struct AnalysisReport {
    /// Rendered plot, when the multi-model plot is enabled
    pub plot_path: Option<PathBuf>,

    /// Exported meta-model series, when the meta-model is enabled
    pub meta_model_path: Option<PathBuf>,

    /// Summary file the run was appended to
    pub summary_path: PathBuf,
}

/// Owner of all runs in one analysis invocation
///
/// **Public** - main entry point of the engine
#[derive(Debug)]
pub struct MultiModel {
    config: AnalysisConfig,
    models: Vec<RunModel>,
    timestamps: Vec<i64>,
    max_model_len: usize,
    started_at: Instant,
}

impl MultiModel {
    /// Create an empty multi-model
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            models: Vec::new(),
            timestamps: Vec::new(),
            max_model_len: 0,
            started_at: Instant::now(),
        }
    }

    /// Create a multi-model from runs that are already loaded
    ///
    /// **Public** - runs are ordered by identifier, as ingestion would order them
    ///
    /// # Errors
    /// * `IngestError::ReservedIdentifier` - a meta-model was passed in as a run
    pub fn from_models(
        config: AnalysisConfig,
        mut models: Vec<RunModel>,
    ) -> Result<Self, IngestError> {
        if let Some(meta) = models.iter().find(|model| model.is_meta()) {
            return Err(IngestError::ReservedIdentifier(meta.identifier().to_string()));
        }

        models.sort_by(|a, b| a.identifier().cmp(b.identifier()));

        let mut multi_model = Self::new(config);
        multi_model.models = models;
        multi_model.update_horizon();
        Ok(multi_model)
    }

    /// Ingest every run under the configured input root
    ///
    /// **Public** - replaces any runs already held
    ///
    /// # Errors
    /// * `IngestError::UnitScalingUnset` - checked before touching the filesystem
    /// * `IngestError::UnreadableRoot` - input root cannot be listed
    /// * `IngestError::NoRuns` - no run directories found
    /// * any error from ingesting a single run
    pub fn ingest(&mut self) -> Result<(), IngestError> {
        if self.config.unit_scaling_magnitude.is_none() {
            return Err(IngestError::UnitScalingUnset);
        }

        let runs = discover_runs(&self.config.input_path)?;
        if runs.is_empty() {
            return Err(IngestError::NoRuns(self.config.input_path.clone()));
        }

        info!(
            "Ingesting {} runs from {}",
            runs.len(),
            self.config.input_path.display()
        );

        let models = runs
            .iter()
            .map(|run_id| ingest_run(&self.config, run_id))
            .collect::<Result<Vec<_>, _>>()?;

        self.models = models;
        self.update_horizon();

        debug!(
            "Comparison horizon: {} samples, {} reference timestamps",
            self.max_model_len,
            self.timestamps.len()
        );

        Ok(())
    }

    /// Compute the derived series of every run for the configured regime
    ///
    /// **Public** - windowing is skipped for the cumulative regime
    pub fn compute_all(&mut self) {
        let horizon = self.max_model_len;
        let window_size = self.config.window_size;
        let window_function = self.config.window_function;
        let plot_type = self.config.plot_type;

        for model in self.models.iter_mut().filter(|m| !m.is_meta()) {
            match plot_type {
                PlotType::TimeSeries => {
                    let raw = &model.raw_series()[..horizon.min(model.raw_series().len())];
                    let processed = windowed_aggregation(raw, window_size, window_function);
                    model.set_processed_series(processed);
                }
                PlotType::CumulativeTimeSeries => {
                    let raw = &model.raw_series()[..horizon.min(model.raw_series().len())];
                    let processed = windowed_aggregation(raw, window_size, window_function);
                    model.set_cumulative_series(cumulative_series(&processed, window_size));
                    model.set_processed_series(processed);
                }
                PlotType::Cumulative => {
                    let total = round2(model.raw_series().iter().sum());
                    model.set_cumulated(total);
                }
            }

            if !model.processed_series().is_empty() {
                let stats = calculate_series_stats(model.processed_series());
                debug!("Run {}: {}", model.identifier(), stats.summary());
            }
        }

        debug!("Computed {} series for {} runs", plot_type, self.sibling_count());
    }

    /// Run the output stage: meta-model, plot, export and summary
    ///
    /// **Public** - call after `ingest()` (or `from_models`) and `compute_all()`
    pub fn generate(&mut self) -> Result<AnalysisReport, AnalysisError> {
        let output_dir = self.config.metric_output_dir();
        let mut report = AnalysisReport {
            summary_path: self.config.output_path.join(ANALYSIS_SUMMARY_FILE),
            ..Default::default()
        };

        if self.config.is_metamodel {
            let meta = MetaModel::new(self)?.compute();
            self.attach_meta_model(meta);
        }

        if self.config.is_multimodel {
            let svg = generate_plot(&self.plot_data(), Some(&self.plot_config()))?;
            let plot_path = output_dir.join(format!("multimodel_{}.svg", self.config.plot_type));
            write_svg(&svg, &plot_path)?;
            info!("✓ Plot written to: {}", plot_path.display());
            report.plot_path = Some(plot_path);
        }

        if self.config.is_metamodel {
            let meta_path = MetaModel::new(self)?.output()?;
            info!("✓ Meta-model written to: {}", meta_path.display());
            report.meta_model_path = Some(meta_path);
        }

        append_summary(&self.summary(), &report.summary_path)?;

        Ok(report)
    }

    /// Series to plot for the configured regime
    ///
    /// **Public** - the meta-model, when attached, is included like any other run
    pub fn plot_data(&self) -> PlotData {
        let window_size = self.config.window_size;

        match self.config.plot_type {
            PlotType::TimeSeries => {
                let horizon = self.min_len(|m| m.processed_series().len());
                PlotData::Lines(
                    self.models
                        .iter()
                        .map(|model| {
                            let values = expand_series(
                                &model.processed_series()[..horizon],
                                window_size,
                                self.max_model_len,
                            );
                            let points = values
                                .into_iter()
                                .enumerate()
                                .map(|(i, v)| (self.x_value(i), v))
                                .collect();
                            PlotSeries::new(legend_label(model), points, model.is_meta())
                        })
                        .collect(),
                )
            }
            PlotType::CumulativeTimeSeries => {
                let horizon = self.min_len(|m| m.cumulative_series().len());
                PlotData::Lines(
                    self.models
                        .iter()
                        .map(|model| {
                            let points = model.cumulative_series()[..horizon]
                                .iter()
                                .enumerate()
                                .map(|(i, &v)| (self.x_value(i * window_size), v))
                                .collect();
                            PlotSeries::new(legend_label(model), points, model.is_meta())
                        })
                        .collect(),
                )
            }
            PlotType::Cumulative => PlotData::Bars(
                self.models
                    .iter()
                    .map(|model| BarEntry {
                        label: legend_label(model),
                        value: model.cumulated().unwrap_or(0.0),
                        is_meta: model.is_meta(),
                    })
                    .collect(),
            ),
        }
    }

    /// Plot configuration derived from the analysis configuration
    pub fn plot_config(&self) -> PlotConfig {
        let mut config = PlotConfig::new()
            .with_x_axis(self.config.x_axis.clone())
            .with_y_axis(self.config.y_axis.clone());

        if !self.config.plot_title.is_empty() {
            config = config.with_title(self.config.plot_title.clone());
        }

        if config.y_axis.label.is_empty() {
            config.y_axis.label = format!("{} [{}]", self.config.metric, self.config.display_unit());
        }

        if config.x_axis.label.is_empty() {
            config.x_axis.label = if self.config.samples_per_minute.is_some() {
                "Time [min]".to_string()
            } else {
                "Samples".to_string()
            };
        }

        config
    }

    /// Build the summary record for this invocation
    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            generated_at: Utc::now().to_rfc3339(),
            metric: self.config.metric.clone(),
            unit: self.config.display_unit(),
            window_size: self.config.window_size,
            plot_type: self.config.plot_type,
            samples: self.max_model_len,
            runs: self.sibling_count(),
            elapsed_secs: self.started_at.elapsed().as_secs_f64(),
            output_path: self.config.metric_output_dir(),
            models: self
                .models
                .iter()
                .map(|model| ModelSummary {
                    identifier: model.identifier().to_string(),
                    raw_len: model.raw_series().len(),
                    processed: calculate_series_stats(model.processed_series()),
                    cumulated: model
                        .cumulated()
                        .or_else(|| model.cumulative_series().last().copied()),
                })
                .collect(),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// All runs, including the meta-model once attached
    pub fn models(&self) -> &[RunModel] {
        &self.models
    }

    /// Runs other than the meta-model
    pub fn siblings(&self) -> impl Iterator<Item = &RunModel> {
        self.models.iter().filter(|m| !m.is_meta())
    }

    pub fn meta_model(&self) -> Option<&RunModel> {
        self.models.iter().find(|m| m.is_meta())
    }

    /// Reference timestamps, taken from the run with the fewest of them
    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    /// Length of the shortest raw series
    pub fn max_model_len(&self) -> usize {
        self.max_model_len
    }

    pub fn window_size(&self) -> usize {
        self.config.window_size
    }

    /// Append the meta-model, replacing a previously attached one
    pub(crate) fn attach_meta_model(&mut self, meta: RunModel) {
        self.models.retain(|m| !m.is_meta());
        self.models.push(meta);
    }

    fn sibling_count(&self) -> usize {
        self.siblings().count()
    }

    fn update_horizon(&mut self) {
        self.max_model_len = self
            .siblings()
            .map(|m| m.raw_series().len())
            .min()
            .unwrap_or(0);

        // min_by_key keeps the first run on ties
        self.timestamps = self
            .siblings()
            .min_by_key(|m| m.timestamps().len())
            .map(|m| m.timestamps().to_vec())
            .unwrap_or_default();
    }

    fn min_len(&self, len: impl Fn(&RunModel) -> usize) -> usize {
        self.models.iter().map(len).min().unwrap_or(0)
    }

    fn x_value(&self, sample: usize) -> f64 {
        match self.config.samples_per_minute {
            Some(per_minute) => sample as f64 / per_minute,
            None => sample as f64,
        }
    }
}

fn legend_label(model: &RunModel) -> String {
    if model.is_meta() {
        META_MODEL_LABEL.to_string()
    } else {
        model.identifier().to_string()
    }
}
