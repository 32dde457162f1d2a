//! Plain-text summary of a set of run models.

use crate::aggregator::calculate_series_stats;
use crate::model::RunModel;
use crate::utils::config::META_MODEL_LABEL;
use std::fmt::Write;

/// Generate a text table describing each model
///
/// **Public** - printed by `analyze --summary`
pub fn generate_text_summary(models: &[RunModel]) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<24} {:>8} {:>10} {:>12} {:>12} {:>12}",
        "Model", "Samples", "Windows", "Mean", "Max", "Cumulated"
    );
    let _ = writeln!(out, "{}", "-".repeat(83));

    for model in models {
        let label = if model.is_meta() {
            META_MODEL_LABEL
        } else {
            model.identifier()
        };
        let stats = calculate_series_stats(model.processed_series());
        let cumulated = model
            .cumulated()
            .or_else(|| model.cumulative_series().last().copied())
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "-".to_string());

        let _ = writeln!(
            out,
            "{:<24} {:>8} {:>10} {:>12.3} {:>12.3} {:>12}",
            truncate(label, 24),
            model.raw_series().len(),
            stats.count,
            stats.mean,
            stats.max,
            cumulated
        );
    }

    out
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width - 1).collect();
        format!("{}…", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_summary_lists_models() {
        let models = vec![
            RunModel::from_series("run-a", vec![1.0, 2.0]).unwrap(),
            RunModel::from_series("run-b", vec![3.0]).unwrap(),
        ];
        let text = generate_text_summary(&models);

        assert!(text.contains("run-a"));
        assert!(text.contains("run-b"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_truncate_long_label() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
