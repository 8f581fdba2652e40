//! Text measurement helpers and the line wrapper.

pub mod wrapper;

pub use wrapper::{WrapError, wrap_text};
