//! Geometry sources: the primitive collection a toolpath is planned from.

use serde::{Deserialize, Serialize};

use super::bounds::BoundingBox;
use super::primitive::Primitive;

/// Supplies drawing primitives and their extents.
///
/// Implementations own the primitives; probing only borrows them.
pub trait GeometrySource {
    /// Primitives in drawing order.
    fn primitives(&self) -> &[Primitive];

    /// Extents of all primitives, `None` when there is nothing to measure.
    fn bounding_box(&self) -> Option<BoundingBox> {
        self.primitives()
            .iter()
            .filter_map(Primitive::bounds)
            .reduce(BoundingBox::union)
    }
}

/// A loaded outline drawing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    /// Drawing name (file stem when loaded from disk).
    #[serde(default)]
    pub name: String,
    pub primitives: Vec<Primitive>,
}

impl Drawing {
    pub fn new(primitives: Vec<Primitive>) -> Self {
        Self {
            name: String::new(),
            primitives,
        }
    }

    /// Append a primitive.
    pub fn push(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    /// Count primitives of a given kind.
    pub fn count_kind(&self, kind: &str) -> usize {
        self.primitives.iter().filter(|p| p.kind() == kind).count()
    }
}

impl GeometrySource for Drawing {
    fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }
}

impl GeometrySource for [Primitive] {
    fn primitives(&self) -> &[Primitive] {
        self
    }
}

impl GeometrySource for Vec<Primitive> {
    fn primitives(&self) -> &[Primitive] {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Arc, Circle, Segment};

    #[test]
    fn test_empty_drawing_has_no_bounds() {
        assert!(Drawing::default().bounding_box().is_none());
    }

    #[test]
    fn test_bounds_union_of_primitives() {
        let mut drawing = Drawing::default();
        drawing.push(Segment::new(-5.0, 0.0, 5.0, 2.0));
        drawing.push(Circle::new(20.0, 0.0, 1.0));
        drawing.push(Arc::new(0.0, 0.0, 3.0, 0.0, 180.0));

        let bbox = drawing.bounding_box().unwrap();
        assert_eq!(bbox.min_x, -5.0);
        assert_eq!(bbox.max_x, 21.0);
        assert_eq!(bbox.min_y, -1.0);
        assert_eq!(bbox.max_y, 3.0);
        assert_eq!(drawing.count_kind("circle"), 1);
    }
}
