//! Plot rendering for multi-model results.
//!
//! This module converts finished numeric series into SVG charts and
//! plain-text tables. It never computes series itself.

pub mod generator;
pub mod text;

// Re-export main types
pub use generator::{generate_plot, BarEntry, PlotConfig, PlotData, PlotSeries};
pub use text::generate_text_summary;
