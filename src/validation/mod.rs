//! Settings and drawing validation.

mod validate;

pub use validate::*;
