//! Data model types for outline drawings and toolpaths.

mod bounds;
mod drawing;
mod path;
mod primitive;

pub use bounds::BoundingBox;
pub use drawing::{Drawing, GeometrySource};
pub use path::{Path, Point2, Stage};
pub use primitive::{Arc, Circle, Polyline, Primitive, Segment, Vertex, Winding};
