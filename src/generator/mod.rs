//! G-code program generator.

mod dialect;
mod gcode;
mod program;

pub use dialect::{Dialect, HeaderInfo};
pub use gcode::{format_feed, GcodeWriter};
pub use program::{generate_from_passes, generate_program, GenerationParams, Program};
