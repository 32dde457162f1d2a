//! M3SA - Multi-Model / Meta-Model Simulation Analysis
//!
//! Compares the output of several independent simulation runs:
//! each run is reduced to a common granularity with windowed aggregation,
//! and a synthetic "meta-model" is built from them with a pointwise
//! statistical reducer.
//!
//! ## Getting Started
//!
//! ```bash
//! cargo install m3sa
//! m3sa analyze --config analysis.toml --summary
//! ```
//!
//! Library use follows the same pipeline:
//!
//! ```ignore
//! let config = m3sa::config::load_config("analysis.toml")?;
//! let mut multi_model = m3sa::model::MultiModel::new(config);
//! multi_model.ingest()?;
//! multi_model.compute_all();
//! multi_model.generate()?;
//! ```

pub mod aggregator;
pub mod commands;
pub mod config;
pub mod model;
pub mod output;
pub mod plot;
pub mod utils;
