//! Constants shared across the analysis pipeline.
//!
//! Everything tunable per invocation lives in `AnalysisConfig`; only fixed
//! names and lookup tables belong here.

/// Identifier reserved for the synthesized meta-model
pub const META_MODEL_ID: &str = "M";

/// Legend label used for the meta-model in plots and summaries
pub const META_MODEL_LABEL: &str = "Meta-Model";

/// File each run exposes inside its `seed=<seed>` directory
pub const SIMULATION_DATA_FILE: &str = "host.csv";

/// Column holding the sample timestamp in every run file
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// File the meta-model series is exported to
pub const META_MODEL_FILE: &str = "meta_model.csv";

/// Append-only run summary, kept at the output root
pub const ANALYSIS_SUMMARY_FILE: &str = "analysis.txt";

/// Default plot dimensions in pixels
pub const DEFAULT_PLOT_WIDTH: usize = 1200;
pub const DEFAULT_PLOT_HEIGHT: usize = 600;

/// Default number of ticks per axis when none is configured
pub const DEFAULT_TICKS_COUNT: usize = 5;

// SI prefixes keyed by the power-of-ten scaling magnitude.
// A magnitude of 3 turns "W" into "kW".
pub const UNIT_PREFIXES: &[(i32, &str)] = &[
    (-9, "n"),
    (-6, "μ"),
    (-3, "m"),
    (0, ""),
    (3, "k"),
    (6, "M"),
    (9, "G"),
    (12, "T"),
];

/// Look up the SI prefix for a scaling magnitude
///
/// Returns an empty prefix for magnitudes outside the table.
pub fn unit_prefix(magnitude: i32) -> &'static str {
    UNIT_PREFIXES
        .iter()
        .find(|(m, _)| *m == magnitude)
        .map(|(_, prefix)| *prefix)
        .unwrap_or("")
}
