pub mod color;
pub mod dimension;
pub mod font;
pub mod geometry;

pub use color::Color;
pub use dimension::{Length, PageSize, POINTS_PER_MM, mm_to_pt};
pub use font::FontProgram;
pub use geometry::{Point, Rect, Size};
