//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Loads and validates the analysis configuration
//! 2. Ingests every simulation run
//! 3. Computes the per-run series
//! 4. Generates plot, meta-model export and summary

use super::models::AnalyzeArgs;
use crate::config::{load_config, AnalysisConfig};
use crate::model::{AnalysisReport, MultiModel};
use crate::plot::generate_text_summary;
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Analyze command arguments
///
/// # Returns
/// Paths of the files written, or Err with context if any step fails
///
/// # Errors
/// * Invalid configuration
/// * Unreadable or malformed run data
/// * File write errors
///
/// # Example
/// ```ignore
/// let args = AnalyzeArgs {
///     config_path: PathBuf::from("analysis.toml"),
///     print_summary: true,
///     ..Default::default()
/// };
///
/// execute_analyze(args)?;
/// ```
pub fn execute_analyze(args: AnalyzeArgs) -> Result<AnalysisReport> {
    let start_time = Instant::now();

    // Step 1: Configuration
    info!("Step 1/4: Loading configuration from {}...", args.config_path.display());
    let config = load_config(&args.config_path).context("Failed to load analysis configuration")?;
    let config = apply_overrides(config, &args);

    debug!("Effective configuration: {:?}", config);
    info!(
        "Metric: {} | Plot: {} | Window: {}",
        config.metric, config.plot_type, config.window_size
    );

    let mut multi_model = MultiModel::new(config);

    // Step 2: Ingestion
    info!("Step 2/4: Ingesting simulation runs...");
    multi_model.ingest().context("Failed to ingest simulation runs")?;
    info!(
        "Ingested {} runs, comparison horizon {} samples",
        multi_model.models().len(),
        multi_model.max_model_len()
    );

    // Step 3: Derived series
    info!("Step 3/4: Computing aggregated series...");
    multi_model.compute_all();

    // Step 4: Outputs
    info!("Step 4/4: Generating outputs...");
    let report = multi_model.generate().context("Failed to generate analysis outputs")?;

    if args.print_summary {
        println!("\n{}", "=".repeat(83));
        println!("ANALYSIS SUMMARY");
        println!("{}", "=".repeat(83));
        println!("Metric:  {}", multi_model.config().metric);
        println!("Unit:    {}", multi_model.config().display_unit());
        println!("Horizon: {} samples", multi_model.max_model_len());
        println!("\n{}", generate_text_summary(multi_model.models()));
        println!("{}", "=".repeat(83));
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(report)
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.config_path.as_os_str().is_empty() {
        anyhow::bail!("Config path cannot be empty");
    }

    if !args.config_path.is_file() {
        anyhow::bail!("Config file not found: {}", args.config_path.display());
    }

    if args.window_size == Some(0) {
        anyhow::bail!("window_size must be greater than 0");
    }

    if let Some(input) = &args.input {
        if !input.is_dir() {
            anyhow::bail!("Input directory not found: {}", input.display());
        }
    }

    Ok(())
}

/// Apply command-line overrides on top of the file configuration
fn apply_overrides(mut config: AnalysisConfig, args: &AnalyzeArgs) -> AnalysisConfig {
    if let Some(input) = &args.input {
        config = config.with_input_path(input.clone());
    }
    if let Some(output) = &args.output {
        config = config.with_output_path(output.clone());
    }
    if let Some(window_size) = args.window_size {
        config = config.with_window_size(window_size);
    }
    config
}
