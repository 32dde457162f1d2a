//! Meta-model synthesis.
//!
//! The meta-model is a synthetic run built by reducing, index by index, the
//! already computed series of every sibling run with the configured
//! `meta_function`. It never reads raw data again and never looks past the
//! shortest sibling.

use super::multimodel::MultiModel;
use super::run_model::RunModel;
use crate::aggregator::{cumulative_series, round2, Reducer};
use crate::config::PlotType;
use crate::output::write_series_csv;
use crate::utils::config::META_MODEL_FILE;
use crate::utils::error::{AnalysisError, OutputError};
use log::{debug, info};
use std::borrow::Cow;
use std::path::PathBuf;

/// Synthesizer bound to a populated multi-model
///
/// **Public** - construct with [`MetaModel::new`]
#[derive(Debug)]
pub struct MetaModel<'a> {
    multi_model: &'a MultiModel,
    function: Reducer,
}

impl<'a> MetaModel<'a> {
    /// Bind a synthesizer to a multi-model
    ///
    /// # Errors
    /// `AnalysisError::MetaModelDisabled` when the configuration does not enable the meta-model
    pub fn new(multi_model: &'a MultiModel) -> Result<Self, AnalysisError> {
        let config = multi_model.config();
        if !config.is_metamodel {
            return Err(AnalysisError::MetaModelDisabled);
        }

        Ok(Self {
            multi_model,
            function: config.meta_function,
        })
    }

    /// Compute the meta-model from the siblings' derived series
    ///
    /// **Public** - pure function of the sibling runs; calling it twice gives the same model
    pub fn compute(&self) -> RunModel {
        let plot_type = self.multi_model.config().plot_type;
        info!("Computing meta-model ({}, {})", plot_type, self.function);

        let meta = match plot_type {
            PlotType::TimeSeries => {
                let processed = self.reduce_per_index(|m| m.processed_series());
                RunModel::meta(processed, Vec::new(), None)
            }
            PlotType::CumulativeTimeSeries => {
                let processed = self.reduce_per_index(|m| m.processed_series());
                let cumulative = cumulative_series(&processed, self.multi_model.window_size());
                RunModel::meta(processed, cumulative, None)
            }
            PlotType::Cumulative => {
                // Per-index reduction summed over the horizon, not a reduction of run totals
                let per_index = self.reduce_per_index(|m| m.raw_series());
                let total = round2(per_index.iter().sum());
                RunModel::meta(per_index, Vec::new(), Some(total))
            }
        };

        debug!("Meta-model horizon: {} values", meta.processed_series().len());
        meta
    }

    /// Export the meta-model series paired with the reference timestamps
    ///
    /// **Public** - writes `<output>/<metric>/meta_model.csv`; uses the attached
    /// meta-model when present, otherwise computes one
    pub fn output(&self) -> Result<PathBuf, OutputError> {
        let meta = match self.multi_model.meta_model() {
            Some(meta) => Cow::Borrowed(meta),
            None => Cow::Owned(self.compute()),
        };

        let config = self.multi_model.config();
        let path = config.metric_output_dir().join(META_MODEL_FILE);

        let rows: Vec<(i64, f64)> = self
            .multi_model
            .timestamps()
            .iter()
            .copied()
            .zip(meta.processed_series().iter().copied())
            .collect();

        write_series_csv(&config.metric, &rows, &path)?;
        Ok(path)
    }

    fn reduce_per_index<F>(&self, series: F) -> Vec<f64>
    where
        F: Fn(&RunModel) -> &[f64],
    {
        let siblings: Vec<&[f64]> = self.multi_model.siblings().map(series).collect();
        let horizon = siblings.iter().map(|s| s.len()).min().unwrap_or(0);

        let mut column = Vec::with_capacity(siblings.len());
        (0..horizon)
            .map(|i| {
                column.clear();
                column.extend(siblings.iter().map(|s| s[i]));
                self.function.apply(&column)
            })
            .collect()
    }
}
