//! Reduction of raw series into comparable, plottable form.
//!
//! This module provides:
//! - Windowed aggregation with a configurable reducer
//! - Cumulative and display-expanded series
//! - Summary statistics per series

pub mod metrics;
pub mod window;

// Re-export main types and functions
pub use metrics::{calculate_series_stats, SeriesStats};
pub use window::{cumulative_series, expand_series, round2, windowed_aggregation, Reducer};
