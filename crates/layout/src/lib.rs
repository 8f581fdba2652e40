//! Measurement and geometry for card layout.
//!
//! - [`fonts`]: the [`TextMeasurer`] capability and the faces that implement it.
//! - [`text`]: greedy, measurement-driven line wrapping with a hard line cap.
//! - [`grid`]: slot rectangles on a sheet.

pub mod fonts;
pub mod grid;
pub mod text;

pub use self::fonts::{
    FontError, StandardFont, TextMeasurer, TrueTypeMetrics, Typeface, encode_win_ansi,
    win_ansi_byte, win_ansi_char,
};
pub use self::grid::{GridSpec, SlotCoord};
pub use self::text::wrapper::MAX_LINES;
pub use self::text::{WrapError, wrap_text};

// Re-export geometry types so callers need not depend on the types crate directly
pub use quizcards_types::geometry::{Point, Rect, Size};
