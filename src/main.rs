//! M3SA CLI
//!
//! Multi-model and meta-model analysis of simulation output.
//! Produces comparison plots, a meta-model series and a run summary.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use m3sa::commands::{
    display_version, execute_analyze, validate_args, validate_config_file, AnalyzeArgs,
};

/// M3SA - Multi-model analysis for simulation output
#[derive(Parser, Debug)]
#[command(name = "m3sa")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a directory of simulation runs
    Analyze {
        /// Analysis configuration file (.json or .toml)
        #[arg(short, long, env = "M3SA_CONFIG")]
        config: PathBuf,

        /// Directory containing one subdirectory per run
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory to write plots, exports and the summary to
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Samples per aggregation window
        #[arg(short, long)]
        window_size: Option<usize>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate an analysis configuration file
    Validate {
        /// Path to configuration file
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            config,
            input,
            output,
            window_size,
            summary,
        } => {
            let args = AnalyzeArgs {
                config_path: config,
                input,
                output,
                window_size,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            let report = execute_analyze(args)?;
            if let Some(path) = report.plot_path {
                println!("Plot: {}", path.display());
            }
            if let Some(path) = report.meta_model_path {
                println!("Meta-model: {}", path.display());
            }
            println!("Summary: {}", report.summary_path.display());
        }

        Commands::Validate { config } => {
            validate_config_file(config)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
