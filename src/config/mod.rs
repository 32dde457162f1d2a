//! Analysis configuration.
//!
//! This module handles:
//! - Deserializing raw key/value mappings (JSON objects, `.json` and `.toml` files)
//! - Validating required fields and reducer names
//! - Applying defaults for every optional field

pub mod loader;
pub mod schema;

// Re-export main types
pub use loader::{
    build_config, load_config, parse_config_str, validate_config, RawAnalysisConfig, RawConfig,
};
pub use schema::{AnalysisConfig, AxisOptions, PlotType};
