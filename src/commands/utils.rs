use crate::config::load_config;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Validate an analysis configuration file
pub fn validate_config_file(file_path: PathBuf) -> Result<()> {
    println!("Validating config: {}", file_path.display());

    let config = load_config(&file_path)
        .with_context(|| format!("Invalid configuration in {}", file_path.display()))?;

    println!("✓ Valid configuration");
    println!("  Metric: {}", config.metric);
    println!("  Plot type: {}", config.plot_type);
    println!("  Window: {} ({})", config.window_size, config.window_function);
    if config.is_metamodel {
        println!("  Meta-model: {}", config.meta_function);
    }
    println!("  Unit: {}", config.display_unit());
    println!("  Input: {}", config.input_path.display());
    println!("  Output: {}", config.output_path.display());

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("M3SA v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Multi-model and meta-model analysis of simulation output.");
}
