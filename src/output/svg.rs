//! SVG plot output writer.

use super::{ensure_parent_dir, validate_path};
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write SVG content to a file
///
/// **Public** - main entry point for SVG output
///
/// # Arguments
/// * `svg_content` - SVG string from the plot generator
/// * `output_path` - Path to output SVG file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
///
/// # Example
/// ```ignore
/// let svg = generate_plot(&multi_model.plot_data(), None)?;
/// write_svg(&svg, "power_draw/multimodel_time_series.svg")?;
/// ```
pub fn write_svg(svg_content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing SVG to: {}", output_path.display());

    validate_path(output_path)?;

    if let Some(ext) = output_path.extension() {
        if ext != "svg" {
            debug!("Warning: File does not have .svg extension: {}", output_path.display());
        }
    }

    ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(svg_content.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    let file_size = svg_content.len();
    info!(
        "SVG written successfully ({} bytes, {:.2} KB)",
        file_size,
        file_size as f64 / 1024.0
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    const VALID_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"></svg>"#;

    #[test]
    fn test_write_svg() {
        let temp_file = NamedTempFile::new().unwrap();
        write_svg(VALID_SVG, temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(content, VALID_SVG);
    }

    #[test]
    fn test_write_svg_rejects_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(write_svg(VALID_SVG, temp_dir.path()).is_err());
    }
}
