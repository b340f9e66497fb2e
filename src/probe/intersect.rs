//! Vertical-line intersection against single primitives.
//!
//! Every solver is total: degenerate input (non-positive radius, zero-length
//! segment) yields `None` rather than an error.

use crate::config::angle::polar_degrees;
use crate::config::float_cmp::{in_range, is_close};
use crate::model::{Arc, Circle, Polyline, Primitive, Segment};

/// Highest y at which the vertical line through `x` meets `primitive`.
pub fn y_at(primitive: &Primitive, x: f64) -> Option<f64> {
    match primitive {
        Primitive::Segment(s) => y_segment(s, x),
        Primitive::Circle(c) => y_circle(c, x),
        Primitive::Arc(a) => y_arc(a, x),
        Primitive::Polyline(p) => y_polyline(p, x),
    }
}

/// Segment intersection by linear interpolation.
///
/// A vertical segment only answers on its own line, with its higher end.
pub fn y_segment(s: &Segment, x: f64) -> Option<f64> {
    let (x1, y1, x2, y2) = (s.start.x, s.start.y, s.end.x, s.end.y);
    if s.start == s.end {
        return None;
    }
    if is_close(x1, x2) {
        return is_close(x, x1).then(|| y1.max(y2));
    }
    if !in_range(x, x1.min(x2), x1.max(x2)) {
        return None;
    }
    let t = (x - x1) / (x2 - x1);
    Some(y1 + t * (y2 - y1))
}

/// Upper half of the circle only: the blade rides over the top.
pub fn y_circle(c: &Circle, x: f64) -> Option<f64> {
    let dx = x - c.center.x;
    if c.radius <= 0.0 || dx.abs() > c.radius {
        return None;
    }
    Some(c.center.y + (c.radius * c.radius - dx * dx).sqrt())
}

/// Both circle crossings, kept only where they fall on the arc's sweep.
pub fn y_arc(a: &Arc, x: f64) -> Option<f64> {
    let dx = x - a.center.x;
    if a.radius <= 0.0 || dx.abs() > a.radius {
        return None;
    }
    let dy = (a.radius * a.radius - dx * dx).sqrt();
    [dy, -dy]
        .into_iter()
        .filter(|&h| a.contains_angle(polar_degrees(dx, h)))
        .map(|h| a.center.y + h)
        .reduce(f64::max)
}

/// Maximum over the polyline's expanded spans.
pub fn y_polyline(p: &Polyline, x: f64) -> Option<f64> {
    p.spans().filter_map(|span| y_at(&span, x)).reduce(f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Vertex, Winding};
    use approx::assert_relative_eq;

    // ==================== Segment tests ====================

    #[test]
    fn test_segment_interpolation() {
        let s = Segment::new(0.0, 0.0, 10.0, 20.0);
        assert_relative_eq!(y_segment(&s, 5.0).unwrap(), 10.0);
        assert_relative_eq!(y_segment(&s, 0.0).unwrap(), 0.0);
        assert_relative_eq!(y_segment(&s, 10.0).unwrap(), 20.0);
    }

    #[test]
    fn test_segment_reversed_endpoints() {
        let s = Segment::new(10.0, 20.0, 0.0, 0.0);
        assert_relative_eq!(y_segment(&s, 2.5).unwrap(), 5.0);
    }

    #[test]
    fn test_segment_outside_span() {
        let s = Segment::new(0.0, 0.0, 10.0, 20.0);
        assert!(y_segment(&s, -0.001).is_none());
        assert!(y_segment(&s, 10.001).is_none());
    }

    #[test]
    fn test_vertical_segment_returns_higher_end() {
        let s = Segment::new(4.0, 12.0, 4.0, 3.0);
        assert_eq!(y_segment(&s, 4.0), Some(12.0));
        assert!(y_segment(&s, 4.1).is_none());
    }

    #[test]
    fn test_zero_length_segment() {
        let s = Segment::new(1.0, 1.0, 1.0, 1.0);
        assert!(y_segment(&s, 1.0).is_none());
    }

    // ==================== Circle tests ====================

    #[test]
    fn test_circle_upper_half() {
        let c = Circle::new(0.0, 0.0, 5.0);
        assert_relative_eq!(y_circle(&c, 0.0).unwrap(), 5.0);
        assert_relative_eq!(y_circle(&c, 3.0).unwrap(), 4.0);
        assert_relative_eq!(y_circle(&c, -3.0).unwrap(), 4.0);
        assert_relative_eq!(y_circle(&c, 5.0).unwrap(), 0.0);
        assert!(y_circle(&c, 5.0001).is_none());
    }

    #[test]
    fn test_degenerate_circle() {
        assert!(y_circle(&Circle::new(0.0, 0.0, 0.0), 0.0).is_none());
        assert!(y_circle(&Circle::new(0.0, 0.0, -1.0), 0.0).is_none());
    }

    // ==================== Arc tests ====================

    #[test]
    fn test_upper_arc_top() {
        let a = Arc::new(0.0, 0.0, 5.0, 0.0, 180.0);
        assert_relative_eq!(y_arc(&a, 0.0).unwrap(), 5.0);
        assert!(y_arc(&a, -5.0001).is_none());
    }

    #[test]
    fn test_lower_arc_returns_lower_crossing() {
        let a = Arc::new(0.0, 0.0, 5.0, 180.0, 360.0);
        assert_relative_eq!(y_arc(&a, 3.0).unwrap(), -4.0);
    }

    #[test]
    fn test_quarter_arc_misses_other_side() {
        // First quadrant only
        let a = Arc::new(0.0, 0.0, 5.0, 0.0, 90.0);
        assert_relative_eq!(y_arc(&a, 3.0).unwrap(), 4.0);
        assert!(y_arc(&a, -3.0).is_none());
    }

    #[test]
    fn test_clockwise_arc() {
        // CW from 90 down to 0 covers the first quadrant as well
        let a = Arc::new(0.0, 0.0, 5.0, 90.0, 0.0).with_winding(Winding::Cw);
        assert_relative_eq!(y_arc(&a, 3.0).unwrap(), 4.0);
        assert!(y_arc(&a, -3.0).is_none());
    }

    // ==================== Polyline tests ====================

    #[test]
    fn test_polyline_max_over_spans() {
        // Zig-zag that crosses x=5 twice
        let p = Polyline::from_points(&[(0.0, 0.0), (10.0, 10.0), (0.0, 2.0)]);
        assert_relative_eq!(y_polyline(&p, 5.0).unwrap(), 6.0);
    }

    #[test]
    fn test_polyline_bulge_dome() {
        // Negative bulge of 1 from (-5,0) to (5,0): dome of radius 5 above the chord
        let p = Polyline {
            vertices: vec![Vertex::new(-5.0, 0.0, -1.0), Vertex::new(5.0, 0.0, 0.0)],
            closed: false,
        };
        assert_relative_eq!(y_polyline(&p, 0.0).unwrap(), 5.0, epsilon = 1e-9);
        assert_relative_eq!(y_polyline(&p, 3.0).unwrap(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_polyline() {
        assert!(y_polyline(&Polyline::default(), 0.0).is_none());
    }
}
