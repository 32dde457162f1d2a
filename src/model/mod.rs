//! Run models and the engine that combines them.
//!
//! This module handles:
//! - Ingesting each simulation run into a [`RunModel`]
//! - Deriving windowed and cumulative series across runs ([`MultiModel`])
//! - Synthesizing the cross-run meta-model ([`MetaModel`])

pub mod ingest;
pub mod metamodel;
pub mod multimodel;
pub mod run_model;

// Re-export main types
pub use ingest::{discover_runs, ingest_run, run_data_path};
pub use metamodel::MetaModel;
pub use multimodel::{AnalysisReport, MultiModel};
pub use run_model::RunModel;
