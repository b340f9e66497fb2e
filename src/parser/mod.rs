//! Drawing and settings document readers.

mod document;

pub use document::{load_settings, parse_drawing, parse_drawing_file};
