//! Stage path planning: roughing and smoothing paths from a geometry source.

use tracing::{debug, info};

use crate::config::{Settings, COLINEAR_TOL};
use crate::error::{CamError, Result};
use crate::model::{GeometrySource, Path, Point2, Stage};
use crate::probe::{sample_outline, SampleSpan, VerticalProbe};

/// Build a path for the requested stage.
pub fn generate_path<S>(source: &S, settings: &Settings, stage: Stage) -> Result<Path>
where
    S: GeometrySource + ?Sized,
{
    match stage {
        Stage::Roughing => build_roughing(source, settings),
        Stage::Smoothing => build_smoothing(source, settings),
    }
}

/// Build the roughing path.
///
/// Samples one blade width beyond the geometry on both sides at the roughing
/// stepover, then offsets every height by the roughing stock allowance.
pub fn build_roughing<S>(source: &S, settings: &Settings) -> Result<Path>
where
    S: GeometrySource + ?Sized,
{
    let tp = &settings.toolpath_settings;
    let step = positive("roughing_stepover", tp.roughing_stepover)?;
    let blade_w = settings.tool_settings.blade_width;

    let Some(bbox) = source.bounding_box() else {
        return Err(empty(Stage::Roughing));
    };

    let span = SampleSpan {
        xmin: bbox.min_x - blade_w,
        xmax: bbox.max_x + blade_w,
        blade_width: blade_w,
        x_step: step,
        lateral_offsets: tp.probe_offsets,
    };

    if span.columns().is_none() {
        return Err(too_fine("roughing_stepover", step));
    }

    let probe = VerticalProbe::new(source.primitives());
    let mut points = sample_outline(&probe, &span);
    apply_stock(&mut points, tp.stock_allowance);

    info!("Roughing: {} cuts at stepover {}", points.len(), step);
    Path::new(Stage::Roughing, points)
}

/// Build the smoothing path.
///
/// Samples from one blade width before the geometry up to its right edge at
/// the smoothing resolution, offsets by the smoothing stock and drops
/// colinear interior points.
pub fn build_smoothing<S>(source: &S, settings: &Settings) -> Result<Path>
where
    S: GeometrySource + ?Sized,
{
    let tp = &settings.toolpath_settings;
    let step = positive("smoothing_resolution", tp.smoothing_resolution)?;
    let blade_w = settings.tool_settings.blade_width;

    let Some(bbox) = source.bounding_box() else {
        return Err(empty(Stage::Smoothing));
    };

    let span = SampleSpan {
        xmin: bbox.min_x - blade_w,
        xmax: bbox.max_x,
        blade_width: blade_w,
        x_step: step,
        lateral_offsets: tp.probe_offsets,
    };

    if span.columns().is_none() {
        return Err(too_fine("smoothing_resolution", step));
    }

    let probe = VerticalProbe::new(source.primitives());
    let mut points = sample_outline(&probe, &span);
    apply_stock(&mut points, tp.smoothing_stock);

    let sampled = points.len();
    let points = reduce_colinear(&points, COLINEAR_TOL);
    info!(
        "Smoothing: {} points ({} sampled) at resolution {}",
        points.len(),
        sampled,
        step
    );

    Path::new(Stage::Smoothing, points)
}

/// Drop interior points that are colinear with their neighbours.
///
/// Single left-to-right pass: each candidate is tested against the last
/// kept point and the next raw point, so straight runs collapse to their
/// ends. First and last points are always kept.
pub fn reduce_colinear(points: &[Point2], tol: f64) -> Vec<Point2> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut keep = Vec::with_capacity(points.len());
    keep.push(points[0]);
    for window in points.windows(2).skip(1) {
        let (p1, p2) = (window[0], window[1]);
        let p0 = keep[keep.len() - 1];
        if !is_colinear(p0, p1, p2, tol) {
            keep.push(p1);
        }
    }
    keep.push(points[points.len() - 1]);

    debug!("Colinear reduction: {} -> {}", points.len(), keep.len());
    keep
}

/// Twice the triangle area spanned by three points is within `tol`.
fn is_colinear(p0: Point2, p1: Point2, p2: Point2, tol: f64) -> bool {
    let area = ((p1.x - p0.x) * (p2.y - p0.y) - (p1.y - p0.y) * (p2.x - p0.x)).abs();
    area <= tol
}

fn apply_stock(points: &mut [Point2], stock: f64) {
    if stock != 0.0 {
        points.iter_mut().for_each(|p| p.y += stock);
    }
}

fn positive(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CamError::InvalidParameter {
            name: name.to_string(),
            value,
        })
    }
}

fn too_fine(name: &str, value: f64) -> CamError {
    CamError::InvalidParameter {
        name: name.to_string(),
        value,
    }
}

fn empty(stage: Stage) -> CamError {
    CamError::EmptyGeometryResult {
        stage: stage.to_string(),
    }
}
