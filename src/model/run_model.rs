//! One simulation run's output and the series derived from it.

use crate::utils::config::META_MODEL_ID;
use crate::utils::error::IngestError;

/// A single simulation run (or the synthesized meta-model)
///
/// **Public** - created by ingestion with only the raw series populated;
/// derived series are filled in once by the multi-model or the meta-model.
#[derive(Debug, Clone, PartialEq)]
pub struct RunModel {
    identifier: String,

    /// Distinct timestamps, ascending
    timestamps: Vec<i64>,

    /// One scaled value per timestamp
    raw_series: Vec<f64>,

    processed_series: Vec<f64>,
    cumulative_series: Vec<f64>,
    cumulated: Option<f64>,
}

impl RunModel {
    /// Create a run with only its raw data
    ///
    /// **Public** - constructor
    ///
    /// # Errors
    /// * `IngestError::ReservedIdentifier` - the identifier belongs to the meta-model
    pub fn new(
        identifier: impl Into<String>,
        timestamps: Vec<i64>,
        raw_series: Vec<f64>,
    ) -> Result<Self, IngestError> {
        let identifier = identifier.into();
        if identifier == META_MODEL_ID {
            return Err(IngestError::ReservedIdentifier(identifier));
        }

        Ok(Self {
            identifier,
            timestamps,
            raw_series,
            processed_series: Vec::new(),
            cumulative_series: Vec::new(),
            cumulated: None,
        })
    }

    /// Create a run whose timestamps are just sample indices
    pub fn from_series(
        identifier: impl Into<String>,
        raw_series: Vec<f64>,
    ) -> Result<Self, IngestError> {
        let timestamps = (0..raw_series.len() as i64).collect();
        Self::new(identifier, timestamps, raw_series)
    }

    pub(crate) fn meta(processed_series: Vec<f64>, cumulative_series: Vec<f64>, cumulated: Option<f64>) -> Self {
        Self {
            identifier: META_MODEL_ID.to_string(),
            timestamps: Vec::new(),
            raw_series: Vec::new(),
            processed_series,
            cumulative_series,
            cumulated,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// True for the synthesized meta-model
    pub fn is_meta(&self) -> bool {
        self.identifier == META_MODEL_ID
    }

    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    pub fn raw_series(&self) -> &[f64] {
        &self.raw_series
    }

    pub fn processed_series(&self) -> &[f64] {
        &self.processed_series
    }

    pub fn cumulative_series(&self) -> &[f64] {
        &self.cumulative_series
    }

    pub fn cumulated(&self) -> Option<f64> {
        self.cumulated
    }

    pub(crate) fn set_processed_series(&mut self, series: Vec<f64>) {
        self.processed_series = series;
    }

    pub(crate) fn set_cumulative_series(&mut self, series: Vec<f64>) {
        self.cumulative_series = series;
    }

    pub(crate) fn set_cumulated(&mut self, total: f64) {
        self.cumulated = Some(total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_derived_series() {
        let model = RunModel::new("run-a", vec![0, 60], vec![1.0, 2.0]).unwrap();

        assert_eq!(model.identifier(), "run-a");
        assert!(!model.is_meta());
        assert!(model.processed_series().is_empty());
        assert!(model.cumulative_series().is_empty());
        assert_eq!(model.cumulated(), None);
    }

    #[test]
    fn test_from_series_indexes_timestamps() {
        let model = RunModel::from_series("run-b", vec![5.0, 6.0, 7.0]).unwrap();
        assert_eq!(model.timestamps(), &[0, 1, 2]);
    }

    #[test]
    fn test_run_cannot_take_meta_identifier() {
        let err = RunModel::from_series(META_MODEL_ID, vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, IngestError::ReservedIdentifier(ref id) if id == META_MODEL_ID));

        assert!(RunModel::new("M", vec![0], vec![1.0]).is_err());
    }

    #[test]
    fn test_meta_uses_reserved_identifier() {
        let meta = RunModel::meta(vec![1.0], Vec::new(), None);
        assert!(meta.is_meta());
        assert_eq!(meta.identifier(), META_MODEL_ID);
    }
}
