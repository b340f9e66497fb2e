//! Toolpath planning for roughing and smoothing stages.

mod passes;
mod paths;

pub use passes::{GatheredPasses, PassList};
pub use paths::{build_roughing, build_smoothing, generate_path, reduce_colinear};
