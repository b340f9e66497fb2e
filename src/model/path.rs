//! Sampled toolpath points and stage-labelled paths.

use serde::{Deserialize, Serialize};

use crate::error::{CamError, Result};

/// A 2-D point. In a sampled path `y` is the probed profile height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Machining stage a path is planned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Per-column plunge and traverse.
    Roughing,
    /// Serpentine finishing raster.
    Smoothing,
}

impl Stage {
    /// Minimum number of points a path of this stage needs.
    pub fn min_points(&self) -> usize {
        match self {
            Stage::Roughing => 1,
            Stage::Smoothing => 2,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Roughing => write!(f, "roughing"),
            Stage::Smoothing => write!(f, "smoothing"),
        }
    }
}

/// A sampled toolpath: ordered points plus a stage label.
///
/// Points keep sampling order (ascending x). A path always holds at least
/// as many points as its stage requires.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    stage: Stage,
    points: Vec<Point2>,
}

impl Path {
    /// Create a path, rejecting sequences too short for the stage.
    pub fn new(stage: Stage, points: Vec<Point2>) -> Result<Self> {
        if points.is_empty() {
            return Err(CamError::EmptyGeometryResult {
                stage: stage.to_string(),
            });
        }
        if points.len() < stage.min_points() {
            return Err(CamError::InsufficientPoints {
                stage: stage.to_string(),
                required: stage.min_points(),
                found: points.len(),
            });
        }
        Ok(Self { stage, points })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the path has no points; never true once constructed.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
