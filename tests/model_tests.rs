use m3sa::config::{validate_config, AnalysisConfig};
use m3sa::model::{MetaModel, MultiModel, RunModel};
use m3sa::plot::PlotData;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use std::path::Path;

fn write_run(root: &Path, run: &str, rows: &[(i64, f64)]) {
    let dir = root.join(run).join("seed=0");
    fs::create_dir_all(&dir).unwrap();

    let mut csv = String::from("timestamp,host_id,power_draw\n");
    for (ts, value) in rows {
        // Two hosts per timestamp, summed during ingestion
        csv.push_str(&format!("{},h1,{}\n{},h2,{}\n", ts, value / 2.0, ts, value / 2.0));
    }
    fs::write(dir.join("host.csv"), csv).unwrap();
}

fn series_rows(len: usize) -> Vec<(i64, f64)> {
    (0..len).map(|i| (i as i64 * 30_000, (i + 1) as f64)).collect()
}

fn config(root: &Path, extra: serde_json::Value) -> AnalysisConfig {
    let mut raw = json!({
        "metric": "power_draw",
        "unit": "W",
        "unit_scaling_magnitude": 0,
        "input_path": root.join("runs").to_str().unwrap(),
        "output_path": root.join("out").to_str().unwrap(),
    });
    for (key, value) in extra.as_object().unwrap() {
        raw[key] = value.clone();
    }
    validate_config(raw.as_object().unwrap()).unwrap()
}

fn setup_runs(root: &Path, lengths: &[(&str, usize)]) {
    for (run, len) in lengths {
        write_run(&root.join("runs"), run, &series_rows(*len));
    }
}

#[test]
fn test_ingest_horizon_is_shortest_run() {
    let temp_dir = tempfile::tempdir().unwrap();
    setup_runs(temp_dir.path(), &[("a", 10), ("b", 7), ("c", 9)]);

    let mut multi_model = MultiModel::new(config(temp_dir.path(), json!({})));
    multi_model.ingest().unwrap();

    assert_eq!(multi_model.max_model_len(), 7);
    assert_eq!(multi_model.timestamps().len(), 7);
    let ids: Vec<&str> = multi_model.models().iter().map(|m| m.identifier()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(&multi_model.models()[0].raw_series()[..3], &[1.0, 2.0, 3.0]);
}

#[test]
fn test_no_derived_series_exceeds_horizon() {
    let temp_dir = tempfile::tempdir().unwrap();
    setup_runs(temp_dir.path(), &[("a", 10), ("b", 7), ("c", 9)]);

    for plot_type in ["time_series", "cumulative_time_series"] {
        for window_size in [1usize, 2, 3, 7, 8] {
            let mut multi_model = MultiModel::new(config(
                temp_dir.path(),
                json!({
                    "plot_type": plot_type,
                    "window_size": window_size,
                    "is_metamodel": true,
                    "meta_function": "mean"
                }),
            ));
            multi_model.ingest().unwrap();
            multi_model.compute_all();

            let limit = (7 + window_size - 1) / window_size;
            let meta = MetaModel::new(&multi_model).unwrap().compute();

            for model in multi_model.models().iter().chain(std::iter::once(&meta)) {
                assert!(model.processed_series().len() <= limit);
                assert!(model.cumulative_series().len() <= limit);
            }
            assert_eq!(meta.processed_series().len(), limit);
        }
    }
}

#[test]
fn test_reserved_meta_directory_skipped() {
    let temp_dir = tempfile::tempdir().unwrap();
    setup_runs(temp_dir.path(), &[("a", 3), ("M", 1), ("b", 3)]);

    let mut multi_model = MultiModel::new(config(temp_dir.path(), json!({})));
    multi_model.ingest().unwrap();

    assert_eq!(multi_model.models().len(), 2);
    assert_eq!(multi_model.max_model_len(), 3);
}

#[test]
fn test_ingest_fails_without_runs() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(temp_dir.path().join("runs")).unwrap();

    let mut multi_model = MultiModel::new(config(temp_dir.path(), json!({})));
    assert!(multi_model.ingest().is_err());
    assert!(multi_model.models().is_empty());
}

#[test]
fn test_ingest_fails_on_broken_run() {
    let temp_dir = tempfile::tempdir().unwrap();
    setup_runs(temp_dir.path(), &[("a", 3)]);
    fs::create_dir_all(temp_dir.path().join("runs/b")).unwrap();

    let mut multi_model = MultiModel::new(config(temp_dir.path(), json!({})));
    assert!(multi_model.ingest().is_err());
    assert!(multi_model.models().is_empty());
}

#[test]
fn test_meta_model_is_deterministic() {
    let models = vec![
        RunModel::from_series("x", vec![1.0, 4.0, 2.0, 8.0]).unwrap(),
        RunModel::from_series("y", vec![3.0, 0.0, 2.0, 1.0]).unwrap(),
        RunModel::from_series("z", vec![2.0, 2.0, 9.0, 5.0]).unwrap(),
    ];
    let temp_dir = tempfile::tempdir().unwrap();
    let config = config(
        temp_dir.path(),
        json!({ "window_size": 2, "is_metamodel": true, "meta_function": "median" }),
    );

    let mut multi_model = MultiModel::from_models(config, models).unwrap();
    multi_model.compute_all();

    let first = MetaModel::new(&multi_model).unwrap().compute();
    let second = MetaModel::new(&multi_model).unwrap().compute();

    assert_eq!(first, second);
    // windows: x=[2.5,5.0] y=[1.5,1.5] z=[2.0,7.0]
    assert_eq!(first.processed_series(), &[2.0, 5.0]);
}

#[test]
fn test_generate_time_series_with_meta_model() {
    let temp_dir = tempfile::tempdir().unwrap();
    setup_runs(temp_dir.path(), &[("a", 6), ("b", 4)]);

    let mut multi_model = MultiModel::new(config(
        temp_dir.path(),
        json!({ "window_size": 2, "is_metamodel": true, "meta_function": "mean" }),
    ));
    multi_model.ingest().unwrap();
    multi_model.compute_all();
    let report = multi_model.generate().unwrap();

    let meta = multi_model.meta_model().unwrap();
    assert_eq!(meta.processed_series(), &[1.5, 3.5]);
    assert_eq!(multi_model.models().last().unwrap().identifier(), "M");

    let plot_path = report.plot_path.unwrap();
    assert!(plot_path.ends_with("power_draw/multimodel_time_series.svg"));
    let svg = fs::read_to_string(&plot_path).unwrap();
    assert!(svg.contains("Meta-Model"));

    let csv = fs::read_to_string(report.meta_model_path.unwrap()).unwrap();
    assert_eq!(csv, "timestamp,power_draw\n0,1.5\n30000,3.5\n");

    let summary = fs::read_to_string(&report.summary_path).unwrap();
    assert!(summary.contains("Metric:      power_draw"));
    assert!(summary.contains("Window size: 2"));
    assert!(summary.contains("Samples:     4"));
}

#[test]
fn test_generate_twice_keeps_single_meta_model() {
    let temp_dir = tempfile::tempdir().unwrap();
    setup_runs(temp_dir.path(), &[("a", 3), ("b", 3)]);

    let mut multi_model = MultiModel::new(config(
        temp_dir.path(),
        json!({ "is_metamodel": true, "meta_function": "mean" }),
    ));
    multi_model.ingest().unwrap();
    multi_model.compute_all();
    let first = multi_model.generate().unwrap();
    let meta_before = multi_model.meta_model().cloned();
    multi_model.generate().unwrap();

    assert_eq!(multi_model.models().len(), 3);
    assert_eq!(multi_model.meta_model().cloned(), meta_before);

    let summary = fs::read_to_string(first.summary_path).unwrap();
    assert_eq!(summary.matches("=== Analysis").count(), 2);
}

#[test]
fn test_generate_cumulative_bars() {
    let temp_dir = tempfile::tempdir().unwrap();
    setup_runs(temp_dir.path(), &[("a", 3), ("b", 4)]);

    let mut multi_model = MultiModel::new(config(
        temp_dir.path(),
        json!({ "plot_type": "cumulative", "is_metamodel": true, "meta_function": "mean" }),
    ));
    multi_model.ingest().unwrap();
    multi_model.compute_all();
    multi_model.generate().unwrap();

    let totals: Vec<Option<f64>> = multi_model.models().iter().map(|m| m.cumulated()).collect();
    // a = 1+2+3, b = 1+2+3+4, meta sums per-index means over the first 3 samples
    assert_eq!(totals, vec![Some(6.0), Some(10.0), Some(6.0)]);

    match multi_model.plot_data() {
        PlotData::Bars(bars) => assert_eq!(bars.len(), 3),
        PlotData::Lines(_) => panic!("expected bars for the cumulative regime"),
    }
}

#[test]
fn test_generate_without_multimodel_skips_plot() {
    let temp_dir = tempfile::tempdir().unwrap();
    setup_runs(temp_dir.path(), &[("a", 3), ("b", 3)]);

    let mut multi_model = MultiModel::new(config(
        temp_dir.path(),
        json!({ "is_multimodel": false, "is_metamodel": true, "meta_function": "mean" }),
    ));
    multi_model.ingest().unwrap();
    multi_model.compute_all();
    let report = multi_model.generate().unwrap();

    assert!(report.plot_path.is_none());
    assert!(report.meta_model_path.unwrap().exists());
}

#[test]
fn test_run_named_like_meta_model_rejected() {
    assert!(RunModel::from_series("M", vec![1.0, 2.0]).is_err());

    let temp_dir = tempfile::tempdir().unwrap();
    let runs = vec![RunModel::from_series("a", vec![3.0, 4.0]).unwrap()];
    let multi_model = MultiModel::from_models(config(temp_dir.path(), json!({})), runs).unwrap();
    assert_eq!(multi_model.siblings().count(), 1);
}

#[test]
fn test_meta_model_requires_metamodel_flag() {
    let temp_dir = tempfile::tempdir().unwrap();
    let multi_model = MultiModel::from_models(
        config(temp_dir.path(), json!({})),
        vec![RunModel::from_series("a", vec![1.0]).unwrap()],
    )
    .unwrap();

    assert!(MetaModel::new(&multi_model).is_err());
}
