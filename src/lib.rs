//! slabcam - Outline-to-G-code conversion for 5-axis stone saws.
//!
//! This library turns a 2-D outline drawing into blade toolpaths and posts
//! them as G-code for Osai or Breton controllers. A drawing is probed
//! column by column for its highest profile point, the samples are planned
//! into roughing and smoothing paths, and one motion algorithm writes the
//! program in the selected dialect.
//!
//! # Example
//!
//! ```no_run
//! use slabcam::{convert_drawing, Settings};
//! use std::path::Path;
//!
//! let program = convert_drawing(Path::new("bullnose.json"), &Settings::default(), true).unwrap();
//! program.save(Path::new("bullnose.json")).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod planner;
pub mod probe;
pub mod validation;

// Re-exports for convenience
pub use config::{MachineSettings, Settings, TableOrientation, ToolSettings, ToolpathSettings};
pub use error::{CamError, ErrorCode, Result};
pub use generator::{generate_from_passes, generate_program, Dialect, GenerationParams, Program};
pub use model::{Drawing, GeometrySource, Path, Point2, Primitive, Stage};
pub use parser::{load_settings, parse_drawing_file};
pub use planner::{build_roughing, build_smoothing, generate_path, PassList};
pub use probe::{sample_outline, SampleSpan, VerticalProbe};
pub use validation::{validate_drawing, validate_settings, ValidationResult};

/// Plan the passes for a drawing: one roughing pass, then a smoothing pass
/// when `smoothing` is set.
pub fn plan_passes<S>(source: &S, settings: &Settings, smoothing: bool) -> Result<PassList>
where
    S: GeometrySource + ?Sized,
{
    let mut passes = PassList::new();
    passes.add(build_roughing(source, settings)?);
    if smoothing {
        passes.add(build_smoothing(source, settings)?);
    }
    Ok(passes)
}

/// Convert a drawing document to a G-code program.
///
/// Full pipeline:
/// 1. Parse the drawing
/// 2. Validate settings and geometry
/// 3. Plan roughing (and optionally smoothing) paths
/// 4. Generate the program in the configured dialect
pub fn convert_drawing(
    input_path: &std::path::Path,
    settings: &Settings,
    smoothing: bool,
) -> Result<Program> {
    let drawing = parse_drawing_file(input_path)?;

    let mut validation = validate_settings(settings);
    validation.merge(validate_drawing(&drawing));
    for warning in &validation.warnings {
        tracing::warn!("{}", warning);
    }
    if !validation.passed {
        return Err(CamError::ValidationFailed(validation.errors.join("; ")));
    }

    let passes = plan_passes(&drawing, settings, smoothing)?;
    let params = GenerationParams::from_settings(settings, drawing.name.as_str());
    generate_from_passes(&passes, &params)
}
