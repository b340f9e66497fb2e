//! Program generation: roughing columns and the serpentine smoothing raster.

use std::path::{Path as FsPath, PathBuf};

use tracing::{debug, info};

use super::dialect::{Dialect, HeaderInfo};
use super::gcode::GcodeWriter;
use crate::config::float_cmp::step_count;
use crate::config::Settings;
use crate::error::{CamError, Result};
use crate::model::Point2;
use crate::planner::PassList;

/// Rotary/tilt words for the default table orientation.
const ORIENT_FRONT: &str = "C-90 A0";

/// Rotary/tilt words when X and Y are inverted.
const ORIENT_SIDE: &str = "C0 A0";

/// Read-only parameters for one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub program_name: String,
    pub blade_width: f64,
    pub blade_diameter: f64,
    /// Traverse start (machine Y).
    pub traverse_start: f64,
    /// Traverse end (machine Y).
    pub traverse_end: f64,
    /// Distance between smoothing stripes.
    pub stripe_step: f64,
    pub z_clearance: f64,
    pub z_max: f64,
    pub plunge_feed: f64,
    /// Roughing cut feed along the traverse.
    pub cut_feed: f64,
    /// Smoothing feed along the profile.
    pub lateral_feed: f64,
    pub spindle_rpm: u32,
    pub invert_xy: bool,
    pub dialect: Dialect,
}

impl GenerationParams {
    /// Build parameters from a settings document.
    pub fn from_settings(settings: &Settings, program_name: impl Into<String>) -> Self {
        let machine = &settings.machine_settings;
        let tool = &settings.tool_settings;
        let tp = &settings.toolpath_settings;
        Self {
            program_name: program_name.into(),
            blade_width: tool.blade_width,
            blade_diameter: tool.blade_diameter,
            traverse_start: tp.start,
            traverse_end: tp.end,
            stripe_step: settings.stripe_step(),
            z_clearance: machine.z_clearance,
            z_max: machine.z_max,
            plunge_feed: tp.plunge_feed,
            cut_feed: tp.roughing_feedrate,
            lateral_feed: tp.smoothing_feedrate,
            spindle_rpm: machine.spindle_rpm,
            invert_xy: machine.table_orientation.inverts_xy(),
            dialect: machine.controller,
        }
    }

    fn orientation(&self) -> &'static str {
        if self.invert_xy {
            ORIENT_SIDE
        } else {
            ORIENT_FRONT
        }
    }

    /// Traverse positions of the smoothing stripes, from start toward end.
    ///
    /// Stripes sit at `start + i * step` (step signed toward the end) up to
    /// the last one that does not pass the end.
    pub fn stripe_positions(&self) -> Result<Vec<f64>> {
        let step = self.stripe_step.abs();
        if !step.is_finite() || step == 0.0 {
            return Err(CamError::InvalidParameter {
                name: "smoothing_step".to_string(),
                value: self.stripe_step,
            });
        }
        let signed = if self.traverse_start > self.traverse_end {
            -step
        } else {
            step
        };
        let span = (self.traverse_end - self.traverse_start).abs();
        let count = step_count(span, step).ok_or_else(|| CamError::InvalidParameter {
            name: "smoothing_step".to_string(),
            value: self.stripe_step,
        })?;
        Ok((0..count)
            .map(|i| self.traverse_start + i as f64 * signed)
            .collect())
    }
}

/// A generated machine program.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub dialect: Dialect,
    pub lines: Vec<String>,
}

impl Program {
    /// Program text, lines joined with newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// `path` with the dialect's extension.
    pub fn output_path(&self, path: &FsPath) -> PathBuf {
        path.with_extension(self.dialect.extension())
    }

    /// Write the program to `path` with its extension replaced by the
    /// dialect's, and return the path written.
    pub fn save(&self, path: &FsPath) -> Result<PathBuf> {
        let out = self.output_path(path);
        std::fs::write(&out, self.text())?;
        Ok(out)
    }
}

/// Generate a program from roughing points and optional smoothing points.
///
/// Points are (x, depth) pairs. Fails before producing any output when there
/// are no roughing points. An absent or empty smoothing sequence is skipped.
pub fn generate_program(
    roughing: &[Point2],
    smoothing: Option<&[Point2]>,
    params: &GenerationParams,
) -> Result<Program> {
    if roughing.is_empty() {
        return Err(CamError::MissingRoughingPath);
    }
    let smoothing = smoothing.filter(|pts| !pts.is_empty());
    let stripes = match smoothing {
        Some(_) => params.stripe_positions()?,
        None => Vec::new(),
    };

    let dialect = params.dialect;
    let mut writer = GcodeWriter::new(dialect, params.invert_xy);

    let header = HeaderInfo {
        program_name: &params.program_name,
        roughing_cuts: roughing.len(),
        blade_width: params.blade_width,
        blade_diameter: params.blade_diameter,
        invert_xy: params.invert_xy,
        spindle_rpm: params.spindle_rpm,
    };
    writer.write_all(dialect.header(&header, params.z_max));

    write_roughing(&mut writer, roughing, params);
    if let Some(points) = smoothing {
        write_smoothing(&mut writer, points, &stripes, params);
    }

    writer.write_all(dialect.footer());

    let lines = writer.into_lines();
    info!(
        "{} program: {} roughing cuts, {} smoothing stripes, {} lines",
        dialect,
        roughing.len(),
        stripes.len(),
        lines.len()
    );
    Ok(Program { dialect, lines })
}

/// Generate a program from a pass list.
pub fn generate_from_passes(passes: &PassList, params: &GenerationParams) -> Result<Program> {
    let gathered = passes.gather();
    generate_program(&gathered.roughing, gathered.smoothing, params)
}

/// One plunge-and-traverse cut per point.
fn write_roughing(writer: &mut GcodeWriter, points: &[Point2], params: &GenerationParams) {
    let orient = params.orientation();
    for (idx, p) in points.iter().enumerate() {
        writer.write_comment(&format!(
            "---- Rough #{} ----------------------------------------",
            idx + 1
        ));
        writer.retract(params.z_clearance);
        writer.rapid(Some(p.x), Some(params.traverse_start), None, Some(orient));
        writer.linear(None, None, Some(p.y), params.plunge_feed);
        writer.linear(None, Some(params.traverse_end), None, params.cut_feed);
    }
    writer.retract_max(params.z_max);
}

/// Serpentine raster: one stripe per traverse position, alternating
/// direction, staying at depth between stripes.
fn write_smoothing(
    writer: &mut GcodeWriter,
    points: &[Point2],
    stripes: &[f64],
    params: &GenerationParams,
) {
    let prec = params.dialect.decimals();
    writer.write_comment("==========================================================");
    writer.write_comment(" SMOOTHING PASSES");
    writer.write_comment("==========================================================");

    for (i, &y) in stripes.iter().enumerate() {
        let forward = i % 2 == 0;
        let seq: Vec<Point2> = if forward {
            points.to_vec()
        } else {
            points.iter().rev().copied().collect()
        };
        let first = seq[0];

        writer.write_comment(&format!(
            "---- stripe Y={:.prec$}  dir={} ----",
            y,
            if forward { "fwd" } else { "rev" },
            prec = prec
        ));

        if i == 0 {
            writer.retract(params.z_clearance);
            writer.rapid(Some(first.x), Some(y), None, Some(params.orientation()));
            writer.linear(None, None, Some(first.y), params.plunge_feed);
        } else {
            writer.rapid(Some(first.x), Some(y), None, None);
        }
        writer.linear(None, Some(y), None, params.cut_feed);

        for p in &seq {
            writer.linear(Some(p.x), None, Some(p.y), params.lateral_feed);
        }

        // Step over at depth
        if let Some(&next) = stripes.get(i + 1) {
            writer.linear(None, Some(next), None, params.plunge_feed);
        }
    }
    debug!("Smoothing raster: {} stripes", stripes.len());

    writer.write_comment("---- end smoothing ----");
    writer.retract(params.z_clearance);
    writer.retract_max(params.z_max);
}
