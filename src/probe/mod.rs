//! Vertical probing and outline sampling.

mod intersect;
mod sampler;
mod vertical;

pub use intersect::y_at;
pub use sampler::{sample_outline, SampleSpan};
pub use vertical::VerticalProbe;
