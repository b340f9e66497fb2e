//! 2-D drawing primitives: segments, circles, arcs and bulged polylines.

use serde::{Deserialize, Serialize};

use super::bounds::BoundingBox;
use super::path::Point2;
use crate::config::angle::{normalize_degrees, polar_degrees};
use crate::config::BULGE_EPS;

/// Direction in which an arc sweeps from its start angle to its end angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winding {
    /// Counter-clockwise (positive orientation).
    #[default]
    Ccw,
    /// Clockwise (negative orientation).
    Cw,
}

impl Winding {
    /// Derive winding from the sign of the primitive's extrusion Z.
    ///
    /// A mirrored entity (extrusion pointing down) sweeps clockwise when
    /// viewed from above.
    pub fn from_extrusion(z: f64) -> Self {
        if z >= 0.0 {
            Winding::Ccw
        } else {
            Winding::Cw
        }
    }
}

/// Straight line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            start: Point2::new(x1, y1),
            end: Point2::new(x2, y2),
        }
    }

    /// Get the length of this segment.
    pub fn length(&self) -> f64 {
        (self.end.x - self.start.x).hypot(self.end.y - self.start.y)
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_point(self.start).with_point(self.end)
    }
}

/// Full circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2,
    pub radius: f64,
}

impl Circle {
    pub fn new(cx: f64, cy: f64, radius: f64) -> Self {
        Self {
            center: Point2::new(cx, cy),
            radius,
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        let r = self.radius.max(0.0);
        BoundingBox::new(
            self.center.x - r,
            self.center.y - r,
            self.center.x + r,
            self.center.y + r,
        )
    }
}

/// Circular arc between two polar angles (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub center: Point2,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    #[serde(default)]
    pub winding: Winding,
}

impl Arc {
    /// Create a counter-clockwise arc.
    pub fn new(cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            center: Point2::new(cx, cy),
            radius,
            start_angle,
            end_angle,
            winding: Winding::Ccw,
        }
    }

    /// Set the sweep direction.
    pub fn with_winding(mut self, winding: Winding) -> Self {
        self.winding = winding;
        self
    }

    /// Check whether a polar angle (degrees) lies on this arc.
    ///
    /// Angles are normalized to [0, 360). A clockwise arc is tested as the
    /// counter-clockwise arc running from its end angle to its start angle.
    pub fn contains_angle(&self, a: f64) -> bool {
        match self.winding {
            Winding::Ccw => on_ccw_span(a, self.start_angle, self.end_angle),
            Winding::Cw => on_ccw_span(a, self.end_angle, self.start_angle),
        }
    }

    /// Point on the circle at the given polar angle (degrees).
    pub fn point_at(&self, degrees: f64) -> Point2 {
        let rad = degrees.to_radians();
        Point2::new(
            self.center.x + self.radius * rad.cos(),
            self.center.y + self.radius * rad.sin(),
        )
    }

    pub fn bounds(&self) -> BoundingBox {
        if self.radius <= 0.0 {
            return BoundingBox::from_point(self.center);
        }
        let mut bbox = BoundingBox::from_point(self.point_at(self.start_angle))
            .with_point(self.point_at(self.end_angle));
        // Axis extremes reached inside the sweep
        for quadrant in [0.0, 90.0, 180.0, 270.0] {
            if self.contains_angle(quadrant) {
                bbox = bbox.with_point(self.point_at(quadrant));
            }
        }
        bbox
    }
}

fn on_ccw_span(a: f64, start: f64, end: f64) -> bool {
    let a = normalize_degrees(a);
    let start = normalize_degrees(start);
    let end = normalize_degrees(end);
    if start <= end {
        start <= a && a <= end
    } else {
        a >= start || a <= end
    }
}

/// Polyline vertex with the bulge of the span that starts at it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    /// Tangent of a quarter of the included angle; positive sweeps CCW.
    #[serde(default)]
    pub bulge: f64,
}

impl Vertex {
    pub fn new(x: f64, y: f64, bulge: f64) -> Self {
        Self { x, y, bulge }
    }

    fn point(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// Lightweight polyline with optional bulged (arc) spans.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    pub vertices: Vec<Vertex>,
    #[serde(default)]
    pub closed: bool,
}

impl Polyline {
    /// Create an open polyline from straight (x, y) vertices.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        Self {
            vertices: points
                .iter()
                .map(|&(x, y)| Vertex::new(x, y, 0.0))
                .collect(),
            closed: false,
        }
    }

    /// Expand into segment and arc sub-primitives.
    ///
    /// The expansion is produced lazily from the current vertices on every
    /// call; nothing is cached on the polyline.
    pub fn spans(&self) -> impl Iterator<Item = Primitive> + '_ {
        let n = self.vertices.len();
        let span_count = match (n, self.closed) {
            (0 | 1, _) => 0,
            (_, true) => n,
            (_, false) => n - 1,
        };
        (0..span_count).map(move |i| {
            let v0 = self.vertices[i];
            let v1 = self.vertices[(i + 1) % n];
            span_primitive(v0, v1)
        })
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        let mut spans = self.spans().filter_map(|p| p.bounds());
        match spans.next() {
            Some(first) => Some(spans.fold(first, BoundingBox::union)),
            None => self
                .vertices
                .first()
                .map(|v| BoundingBox::from_point(v.point())),
        }
    }
}

/// Convert one polyline span into a segment or an arc.
fn span_primitive(v0: Vertex, v1: Vertex) -> Primitive {
    let (p0, p1) = (v0.point(), v1.point());
    let bulge = v0.bulge;
    let chord = (p1.x - p0.x).hypot(p1.y - p0.y);

    if bulge.abs() < BULGE_EPS || chord == 0.0 {
        return Primitive::Segment(Segment {
            start: p0,
            end: p1,
        });
    }

    // Centre sits on the chord's left normal for positive bulge (< 180°)
    let mid = Point2::new((p0.x + p1.x) / 2.0, (p0.y + p1.y) / 2.0);
    let (nx, ny) = (-(p1.y - p0.y) / chord, (p1.x - p0.x) / chord);
    let offset = chord * (1.0 - bulge * bulge) / (4.0 * bulge);
    let center = Point2::new(mid.x + nx * offset, mid.y + ny * offset);
    let radius = chord * (1.0 + bulge * bulge) / (4.0 * bulge.abs());

    let winding = if bulge > 0.0 { Winding::Ccw } else { Winding::Cw };
    Primitive::Arc(Arc {
        center,
        radius,
        start_angle: polar_degrees(p0.x - center.x, p0.y - center.y),
        end_angle: polar_degrees(p1.x - center.x, p1.y - center.y),
        winding,
    })
}

/// A drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Primitive {
    Segment(Segment),
    Circle(Circle),
    Arc(Arc),
    Polyline(Polyline),
}

impl Primitive {
    /// Primitive kind name as used in geometry documents.
    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Segment(_) => "segment",
            Primitive::Circle(_) => "circle",
            Primitive::Arc(_) => "arc",
            Primitive::Polyline(_) => "polyline",
        }
    }

    /// Axis-aligned extents; `None` for an empty polyline.
    pub fn bounds(&self) -> Option<BoundingBox> {
        match self {
            Primitive::Segment(s) => Some(s.bounds()),
            Primitive::Circle(c) => Some(c.bounds()),
            Primitive::Arc(a) => Some(a.bounds()),
            Primitive::Polyline(p) => p.bounds(),
        }
    }
}

impl From<Segment> for Primitive {
    fn from(s: Segment) -> Self {
        Primitive::Segment(s)
    }
}

impl From<Circle> for Primitive {
    fn from(c: Circle) -> Self {
        Primitive::Circle(c)
    }
}

impl From<Arc> for Primitive {
    fn from(a: Arc) -> Self {
        Primitive::Arc(a)
    }
}

impl From<Polyline> for Primitive {
    fn from(p: Polyline) -> Self {
        Primitive::Polyline(p)
    }
}
