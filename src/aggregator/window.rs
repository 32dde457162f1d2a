//! Windowed aggregation of numeric series.
//!
//! A raw series is cut into consecutive windows of `window_size` samples and
//! each window is collapsed to one value by a [`Reducer`].
//!
//! Example: `[1, 2, 3, 4, 5]` with window 2 and `Mean` becomes `[1.5, 3.5, 5.0]`.
//! The trailing window keeps whatever samples are left; it is never padded or dropped.

use std::fmt;
use std::str::FromStr;

/// Statistical reducer applied to a window or to a cross-run slice
///
/// **Public** - selected once at configuration time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reducer {
    /// Arithmetic mean
    #[default]
    Mean,

    /// Median (average of the two middle values for even lengths)
    Median,

    /// Average weighted by closeness to the median: `w = 1 / (1 + |v - median|)`
    ProximityWeighted,
}

impl Reducer {
    /// Reduce a slice of values to a single value
    ///
    /// **Public** - used by windowing and by the meta-model
    ///
    /// Returns `NaN` for an empty slice.
    pub fn apply(&self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return f64::NAN;
        }

        match self {
            Reducer::Mean => mean(values),
            Reducer::Median => median(values),
            Reducer::ProximityWeighted => proximity_weighted(values),
        }
    }

    /// Canonical configuration name
    pub fn name(&self) -> &'static str {
        match self {
            Reducer::Mean => "mean",
            Reducer::Median => "median",
            Reducer::ProximityWeighted => "proximity_weighted",
        }
    }
}

impl fmt::Display for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Reducer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" => Ok(Reducer::Mean),
            "median" => Ok(Reducer::Median),
            "proximity_weighted" | "meta_equation1" => Ok(Reducer::ProximityWeighted),
            other => Err(other.to_string()),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn proximity_weighted(values: &[f64]) -> f64 {
    let center = median(values);

    let (weighted_sum, weight_total) = values.iter().fold((0.0, 0.0), |(sum, total), &v| {
        let weight = 1.0 / (1.0 + (v - center).abs());
        (sum + weight * v, total + weight)
    });

    weighted_sum / weight_total
}

/// Aggregate a series into windows of `window_size` samples
///
/// **Public** - main entry point for windowing
///
/// # Arguments
/// * `series` - Raw samples, in time order
/// * `window_size` - Samples per window (0 is treated as 1)
/// * `reducer` - How each window collapses to one value
///
/// # Returns
/// A series of length `ceil(series.len() / window_size)`.
/// With `window_size == 1` the input is returned unchanged.
pub fn windowed_aggregation(series: &[f64], window_size: usize, reducer: Reducer) -> Vec<f64> {
    if window_size <= 1 {
        return series.to_vec();
    }

    series
        .chunks(window_size)
        .map(|window| reducer.apply(window))
        .collect()
}

/// Running sum of a processed series, each partial sum scaled by the window size
///
/// **Public** - used for the cumulative time series regime
pub fn cumulative_series(processed: &[f64], window_size: usize) -> Vec<f64> {
    let scale = window_size.max(1) as f64;

    processed
        .iter()
        .scan(0.0, |running, &value| {
            *running += value;
            Some(*running * scale)
        })
        .collect()
}

/// Repeat every processed value `window_size` times, clamped to `horizon` samples
///
/// **Public** - brings windowed series back to sample granularity for display
pub fn expand_series(processed: &[f64], window_size: usize, horizon: usize) -> Vec<f64> {
    let repeat = window_size.max(1);

    processed
        .iter()
        .flat_map(|&value| std::iter::repeat(value).take(repeat))
        .take(horizon)
        .collect()
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
