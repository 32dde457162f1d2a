use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Analysis configuration file (.json or .toml)
    pub config_path: PathBuf,

    /// Overrides `input_path` from the config file
    pub input: Option<PathBuf>,

    /// Overrides `output_path` from the config file
    pub output: Option<PathBuf>,

    /// Overrides `window_size` from the config file
    pub window_size: Option<usize>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("analysis.json"),
            input: None,
            output: None,
            window_size: None,
            print_summary: false,
        }
    }
}
