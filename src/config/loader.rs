//! Build an [`AnalysisConfig`] from a raw key/value mapping.
//!
//! The mapping is deserialized into [`RawAnalysisConfig`], either from a JSON
//! object handed over directly or from a `.json` / `.toml` file. Validation
//! then runs on the typed struct in a fixed order so the first reported error
//! is deterministic:
//! 1. `metric` must be present
//! 2. `meta_function` must be present when the meta-model is enabled
//! 3. `meta_function` must name a known reducer
//! 4. remaining fields are range-checked and defaulted

use super::schema::{AnalysisConfig, AxisOptions, PlotType};
use crate::aggregator::Reducer;
use crate::utils::error::ConfigError;
use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Raw configuration mapping
pub type RawConfig = Map<String, Value>;

/// Configuration as written by the user, before validation
///
/// Every field is optional here; presence and ranges are checked by
/// [`build_config`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAnalysisConfig {
    pub metric: Option<String>,
    pub window_size: Option<i64>,
    pub window_function: Option<String>,
    pub meta_function: Option<String>,
    pub plot_type: Option<String>,

    #[serde(alias = "multimodel")]
    pub is_multimodel: Option<bool>,

    #[serde(alias = "metamodel")]
    pub is_metamodel: Option<bool>,

    #[serde(alias = "current_unit")]
    pub unit: Option<String>,

    pub unit_scaling_magnitude: Option<i64>,
    pub plot_title: Option<String>,
    pub samples_per_minute: Option<f64>,

    pub x_label: Option<String>,
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub x_ticks_count: Option<i64>,

    pub y_label: Option<String>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub y_ticks_count: Option<i64>,

    pub seed: Option<i64>,
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,

    /// Keys this crate does not use
    #[serde(flatten)]
    pub unknown: BTreeMap<String, Value>,
}

/// Validate a raw mapping and apply defaults
///
/// **Public** - main entry point for configuration
///
/// # Errors
/// * `ConfigError::JsonError` - a value has the wrong type
/// * any error of [`build_config`]
pub fn validate_config(raw: &RawConfig) -> Result<AnalysisConfig, ConfigError> {
    let raw: RawAnalysisConfig = serde_json::from_value(Value::Object(raw.clone()))?;
    build_config(raw)
}

/// Validate a deserialized configuration and apply defaults
///
/// **Public** - shared by the mapping, JSON and TOML entry points
///
/// # Errors
/// A [`ConfigError`] naming the first offending field.
pub fn build_config(raw: RawAnalysisConfig) -> Result<AnalysisConfig, ConfigError> {
    for key in raw.unknown.keys() {
        debug!("Ignoring unknown config key: {}", key);
    }

    let metric = match raw.metric {
        Some(metric) if !metric.trim().is_empty() => metric,
        _ => return Err(ConfigError::MissingField("metric".to_string())),
    };

    let is_metamodel = raw.is_metamodel.unwrap_or(false);
    if is_metamodel && raw.meta_function.is_none() {
        return Err(ConfigError::MissingField("meta_function".to_string()));
    }

    let meta_function = parse_reducer("meta_function", raw.meta_function)?;
    let window_function = parse_reducer("window_function", raw.window_function)?;

    let window_size = match raw.window_size {
        None => 1,
        Some(w) if w >= 1 => w as usize,
        Some(w) => {
            return Err(out_of_range(
                "window_size",
                format!("must be at least 1, got {}", w),
            ))
        }
    };

    let plot_type = match raw.plot_type {
        None => PlotType::default(),
        Some(name) => name.parse::<PlotType>().map_err(ConfigError::UnknownPlotType)?,
    };

    let unit_scaling_magnitude = match raw.unit_scaling_magnitude {
        None => None,
        Some(m) => Some(i32::try_from(m).map_err(|_| {
            out_of_range("unit_scaling_magnitude", format!("{} is out of range", m))
        })?),
    };

    let samples_per_minute = match raw.samples_per_minute {
        Some(s) if s <= 0.0 => return Err(out_of_range("samples_per_minute", "must be positive")),
        other => other,
    };

    let seed = match raw.seed {
        None => 0,
        Some(s) if s >= 0 => s as u64,
        Some(s) => return Err(out_of_range("seed", format!("must not be negative, got {}", s))),
    };

    let x_axis = build_axis("x", raw.x_label, raw.x_min, raw.x_max, raw.x_ticks_count)?;
    let y_axis = build_axis("y", raw.y_label, raw.y_min, raw.y_max, raw.y_ticks_count)?;

    Ok(AnalysisConfig {
        metric,
        window_size,
        window_function,
        meta_function,
        plot_type,
        is_multimodel: raw.is_multimodel.unwrap_or(true),
        is_metamodel,
        unit: raw.unit.unwrap_or_default(),
        unit_scaling_magnitude,
        plot_title: raw.plot_title.unwrap_or_default(),
        samples_per_minute,
        x_axis,
        y_axis,
        seed,
        input_path: raw.input_path.unwrap_or_else(|| PathBuf::from(".")),
        output_path: raw.output_path.unwrap_or_else(|| PathBuf::from(".")),
    })
}

/// Parse configuration text in the given format
///
/// **Public** - `is_toml` selects TOML, otherwise JSON
pub fn parse_config_str(content: &str, is_toml: bool) -> Result<AnalysisConfig, ConfigError> {
    let raw: RawAnalysisConfig = if is_toml {
        toml::from_str(content)?
    } else {
        serde_json::from_str(content)?
    };

    build_config(raw)
}

/// Load and validate a configuration file
///
/// **Public** - format is picked from the extension (`.toml`, anything else is JSON)
///
/// # Example
/// ```ignore
/// let config = load_config("analysis.toml")?;
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AnalysisConfig, ConfigError> {
    let path = path.as_ref();
    debug!("Loading analysis config from: {}", path.display());

    let content = fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    parse_config_str(&content, is_toml)
}

fn parse_reducer(field: &str, name: Option<String>) -> Result<Reducer, ConfigError> {
    match name {
        None => Ok(Reducer::default()),
        Some(name) => name
            .parse::<Reducer>()
            .map_err(|_| ConfigError::UnknownReducer {
                field: field.to_string(),
                name,
            }),
    }
}

fn build_axis(
    axis: &str,
    label: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
    ticks_count: Option<i64>,
) -> Result<AxisOptions, ConfigError> {
    let range = match (min, max) {
        (Some(min), Some(max)) => Some((min, max)),
        _ => None,
    };

    let ticks_count = match ticks_count {
        None => None,
        Some(t) if t >= 1 => Some(t as usize),
        Some(t) => {
            return Err(out_of_range(
                &format!("{}_ticks_count", axis),
                format!("must be at least 1, got {}", t),
            ))
        }
    };

    Ok(AxisOptions {
        label: label.unwrap_or_default(),
        range,
        ticks_count,
    })
}

fn out_of_range(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidField {
        field: field.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawConfig {
        match value {
            Value::Object(map) => map,
            _ => panic!("test config must be an object"),
        }
    }

    #[test]
    fn test_defaults_applied() {
        let config = validate_config(&raw(json!({ "metric": "power_draw" }))).unwrap();

        assert_eq!(config.metric, "power_draw");
        assert_eq!(config.window_size, 1);
        assert_eq!(config.window_function, Reducer::Mean);
        assert_eq!(config.meta_function, Reducer::Mean);
        assert_eq!(config.plot_type, PlotType::TimeSeries);
        assert_eq!(config.seed, 0);
        assert_eq!(config.x_axis, AxisOptions::default());
        assert!(config.is_multimodel);
        assert!(!config.is_metamodel);
    }

    #[test]
    fn test_missing_metric() {
        let err = validate_config(&raw(json!({ "window_size": 4 }))).unwrap_err();
        assert_eq!(err.field(), Some("metric"));
    }

    #[test]
    fn test_metric_checked_before_meta_function() {
        let err = validate_config(&raw(json!({ "is_metamodel": true }))).unwrap_err();
        assert_eq!(err.field(), Some("metric"));
    }

    #[test]
    fn test_axis_range_needs_both_bounds() {
        let config = validate_config(&raw(json!({
            "metric": "m",
            "x_min": 0.0,
            "y_min": 1.0,
            "y_max": 5,
            "y_ticks_count": 3
        })))
        .unwrap();

        assert_eq!(config.x_axis.range, None);
        assert_eq!(config.y_axis.range, Some((1.0, 5.0)));
        assert_eq!(config.y_axis.ticks_count, Some(3));
    }

    #[test]
    fn test_window_size_zero_rejected() {
        let err = validate_config(&raw(json!({ "metric": "m", "window_size": 0 }))).unwrap_err();
        assert_eq!(err.field(), Some("window_size"));
    }

    #[test]
    fn test_window_size_wrong_type_rejected() {
        let err =
            validate_config(&raw(json!({ "metric": "m", "window_size": "ten" }))).unwrap_err();
        assert!(matches!(err, ConfigError::JsonError(_)));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = validate_config(&raw(json!({
            "metric": "m",
            "colour_scheme": "dark",
            "legacy": { "nested": [1, 2] }
        })))
        .unwrap();

        assert_eq!(config.metric, "m");
    }

    #[test]
    fn test_build_config_from_typed_struct() {
        let raw = RawAnalysisConfig {
            metric: Some("cpu_usage".to_string()),
            window_size: Some(4),
            y_min: Some(0.0),
            y_max: Some(1.0),
            ..Default::default()
        };

        let config = build_config(raw).unwrap();
        assert_eq!(config.window_size, 4);
        assert_eq!(config.y_axis.range, Some((0.0, 1.0)));
    }

    #[test]
    fn test_toml_aliases_and_integer_bounds() {
        let config = parse_config_str(
            r#"
metric = "power_draw"
metamodel = true
meta_function = "mean"
current_unit = "W"
x_min = 0
x_max = 600
"#,
            true,
        )
        .unwrap();

        assert!(config.is_metamodel);
        assert_eq!(config.unit, "W");
        assert_eq!(config.x_axis.range, Some((0.0, 600.0)));
    }

    #[test]
    fn test_aliases_accepted() {
        let config = validate_config(&raw(json!({
            "metric": "m",
            "multimodel": false,
            "metamodel": true,
            "meta_function": "median",
            "current_unit": "W",
            "unit_scaling_magnitude": 3
        })))
        .unwrap();

        assert!(!config.is_multimodel);
        assert!(config.is_metamodel);
        assert_eq!(config.meta_function, Reducer::Median);
        assert_eq!(config.display_unit(), "kW");
        assert_eq!(config.unit_scaling_factor(), Some(1000.0));
    }

    #[test]
    fn test_toml_config() {
        let config = parse_config_str(
            r#"
metric = "carbon_emission"
window_size = 10
plot_type = "cumulative_time_series"
"#,
            true,
        )
        .unwrap();

        assert_eq!(config.window_size, 10);
        assert_eq!(config.plot_type, PlotType::CumulativeTimeSeries);
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(parse_config_str("[1, 2]", false).is_err());
    }
}
