use m3sa::output::{validate_path, write_series_csv, write_svg};
use m3sa::plot::{generate_plot, PlotConfig, PlotData, PlotSeries};
use std::path::Path;
use tempfile::NamedTempFile;

#[test]
fn test_validate_output_path_empty() {
    let result = validate_path(Path::new(""));
    assert!(result.is_err());
}

#[test]
fn test_validate_output_path_directory() {
    // Try to write to a directory path
    let temp_dir = tempfile::tempdir().unwrap();
    let result = validate_path(temp_dir.path());
    assert!(result.is_err());
}

#[test]
fn test_csv_write_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested_path = temp_dir.path().join("nested/dirs/meta_model.csv");

    write_series_csv("power_draw", &[(0, 1.0)], &nested_path).unwrap();

    assert!(nested_path.exists());
}

#[test]
fn test_write_generated_plot() {
    let temp_file = NamedTempFile::new().unwrap();
    let data = PlotData::Lines(vec![PlotSeries::new(
        "run-a",
        vec![(0.0, 1.0), (1.0, 3.0), (2.0, 2.0)],
        false,
    )]);
    let mut config = PlotConfig::new().with_title("Power draw");
    config.y_axis.range = Some((0.0, 4.0));
    config.y_axis.ticks_count = Some(3);

    let svg = generate_plot(&data, Some(&config)).unwrap();
    write_svg(&svg, temp_file.path()).unwrap();

    let written = std::fs::read_to_string(temp_file.path()).unwrap();
    assert_eq!(written, svg);
    assert!(written.contains("Power draw"));
    assert!(written.contains(">2</text>"));
}

#[test]
fn test_svg_write_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested_path = temp_dir.path().join("nested/dirs/plot.svg");
    let valid_svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"></svg>"#;

    write_svg(valid_svg, &nested_path).unwrap();

    assert!(nested_path.exists());
}
