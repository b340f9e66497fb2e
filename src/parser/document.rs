//! JSON readers for outline drawings and settings.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Settings;
use crate::error::{CamError, Result};
use crate::model::{Drawing, GeometrySource};

/// Read a file, mapping a missing or blank file to the matching error.
fn read_document(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(CamError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(CamError::EmptyFile {
            path: path.to_path_buf(),
        });
    }
    Ok(content)
}

fn decode<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
    serde_json::from_str(content).map_err(|e| CamError::InvalidDocument {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Parse a drawing from JSON text.
///
/// `path` is only used for error reporting.
pub fn parse_drawing(path: &Path, content: &str) -> Result<Drawing> {
    decode(path, content)
}

/// Load an outline drawing from a JSON document.
///
/// A drawing without a name takes the file stem.
pub fn parse_drawing_file(path: &Path) -> Result<Drawing> {
    let content = read_document(path)?;
    let mut drawing = parse_drawing(path, &content)?;

    if drawing.name.is_empty() {
        drawing.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("part")
            .to_string();
    }

    debug!(
        "Loaded drawing '{}': {} primitives, bounds {:?}",
        drawing.name,
        drawing.primitives.len(),
        drawing.bounding_box()
    );
    Ok(drawing)
}

/// Load a settings document. Missing fields keep their defaults.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = read_document(path)?;
    let settings: Settings = decode(path, &content)?;
    debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::io::Write;

    fn temp_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file() {
        let err = parse_drawing_file(Path::new("/nonexistent/part.json")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::FileNotFound);
    }

    #[test]
    fn test_blank_file() {
        let file = temp_file("  \n\t\n");
        let err = load_settings(file.path()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmptyFile);
    }

    #[test]
    fn test_malformed_document() {
        let file = temp_file(r#"{ "primitives": [ {"type": "spline"} ] }"#);
        let err = parse_drawing_file(file.path()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidDocument);
    }

    #[test]
    fn test_name_from_file_stem() {
        let file = temp_file(
            r#"{ "primitives": [
                {"type": "circle", "center": {"x": 0, "y": 0}, "radius": 5}
            ] }"#,
        );
        let drawing = parse_drawing_file(file.path()).unwrap();
        let stem = file.path().file_stem().unwrap().to_str().unwrap();
        assert_eq!(drawing.name, stem);
        assert_eq!(drawing.count_kind("circle"), 1);
    }

    #[test]
    fn test_explicit_name_kept() {
        let drawing = parse_drawing(
            Path::new("x.json"),
            r#"{ "name": "bullnose", "primitives": [] }"#,
        )
        .unwrap();
        assert_eq!(drawing.name, "bullnose");
        assert!(drawing.primitives.is_empty());
    }
}
