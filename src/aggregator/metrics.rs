//! Summary statistics over a numeric series.
//!
//! Used for the text summary and the appended analysis report, so a reader
//! can compare runs without opening the plot.

use super::window::Reducer;

/// Calculate summary statistics for a series
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `series` - Values to summarize (any order)
///
/// # Returns
/// Statistics about the series; all zero for an empty series
pub fn calculate_series_stats(series: &[f64]) -> SeriesStats {
    if series.is_empty() {
        return SeriesStats::default();
    }

    let total: f64 = series.iter().sum();
    let min = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    SeriesStats {
        count: series.len(),
        total,
        mean: total / series.len() as f64,
        median: Reducer::Median.apply(series),
        min,
        max,
    }
}

/// Series statistics
///
/// **Public** - returned from calculate_series_stats
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesStats {
    /// Number of values
    pub count: usize,

    /// Sum of all values
    pub total: f64,

    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

impl SeriesStats {
    /// Spread between the largest and smallest value
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and the analysis report
    pub fn summary(&self) -> String {
        format!(
            "Count: {} | Mean: {:.3} | Median: {:.3} | Min: {:.3} | Max: {:.3}",
            self.count, self.mean, self.median, self.min, self.max
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_series_stats() {
        let stats = calculate_series_stats(&[4.0, 1.0, 3.0, 2.0]);

        assert_eq!(stats.count, 4);
        assert_eq!(stats.total, 10.0);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.range(), 3.0);
    }

    #[test]
    fn test_series_stats_empty() {
        let stats = calculate_series_stats(&[]);
        assert_eq!(stats, SeriesStats::default());
    }

    #[test]
    fn test_summary_format() {
        let stats = calculate_series_stats(&[1.0]);
        assert_eq!(
            stats.summary(),
            "Count: 1 | Mean: 1.000 | Median: 1.000 | Min: 1.000 | Max: 1.000"
        );
    }
}
