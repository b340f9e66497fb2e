//! Vertical probe: highest profile height at a horizontal position.

use tracing::debug;

use super::intersect::{y_arc, y_circle, y_polyline, y_segment};
use crate::model::{Arc, Circle, Polyline, Primitive, Segment};

/// Answers "what is the highest intersection height at x?" over a borrowed
/// primitive set.
///
/// Primitives are partitioned by kind and queried in the fixed order
/// arcs, circles, polylines, segments. The first kind that intersects at all
/// decides the answer, even if a later kind would reach higher.
#[derive(Debug, Default, Clone)]
pub struct VerticalProbe<'a> {
    arcs: Vec<&'a Arc>,
    circles: Vec<&'a Circle>,
    polylines: Vec<&'a Polyline>,
    segments: Vec<&'a Segment>,
}

impl<'a> VerticalProbe<'a> {
    /// Create a probe over the given primitives.
    pub fn new<I>(primitives: I) -> Self
    where
        I: IntoIterator<Item = &'a Primitive>,
    {
        let mut probe = Self::default();
        probe.rebuild(primitives);
        probe
    }

    /// Repartition the probe from a new primitive collection.
    pub fn rebuild<I>(&mut self, primitives: I)
    where
        I: IntoIterator<Item = &'a Primitive>,
    {
        self.arcs.clear();
        self.circles.clear();
        self.polylines.clear();
        self.segments.clear();

        for primitive in primitives {
            match primitive {
                Primitive::Arc(a) => self.arcs.push(a),
                Primitive::Circle(c) => self.circles.push(c),
                Primitive::Polyline(p) => self.polylines.push(p),
                Primitive::Segment(s) => self.segments.push(s),
            }
        }

        debug!(
            "Probe buckets: {} arcs, {} circles, {} polylines, {} segments",
            self.arcs.len(),
            self.circles.len(),
            self.polylines.len(),
            self.segments.len()
        );
    }

    /// Total number of primitives held by the probe.
    pub fn len(&self) -> usize {
        self.arcs.len() + self.circles.len() + self.polylines.len() + self.segments.len()
    }

    /// Check if the probe holds no primitives.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest intersection height at `x`, or `None` when nothing is hit.
    pub fn highest_y(&self, x: f64) -> Option<f64> {
        bucket_max(&self.arcs, |a| y_arc(a, x))
            .or_else(|| bucket_max(&self.circles, |c| y_circle(c, x)))
            .or_else(|| bucket_max(&self.polylines, |p| y_polyline(p, x)))
            .or_else(|| bucket_max(&self.segments, |s| y_segment(s, x)))
    }
}

fn bucket_max<T>(bucket: &[&T], solve: impl Fn(&T) -> Option<f64>) -> Option<f64> {
    bucket.iter().filter_map(|item| solve(item)).reduce(f64::max)
}
