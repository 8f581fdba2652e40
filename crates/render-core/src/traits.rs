use crate::error::RenderError;
use quizcards_types::{Color, FontProgram, Point, Rect, Size};
use std::sync::Arc;

/// The two faces a card uses: body text, and the bold face for headers and badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontKey {
    Body,
    Bold,
}

/// Where the glyphs of a face come from.
#[derive(Debug, Clone, PartialEq)]
pub enum FontSource {
    /// A standard PDF font, referenced by base-font name only.
    Standard(String),
    /// A TrueType program carried inside the document.
    Embedded(Arc<FontProgram>),
}

impl FontSource {
    pub fn base_font(&self) -> &str {
        match self {
            FontSource::Standard(name) => name,
            FontSource::Embedded(program) => &program.postscript_name,
        }
    }

    /// True when both sources embed the very same program.
    pub fn same_program(&self, other: &FontSource) -> bool {
        matches!((self, other), (FontSource::Embedded(a), FontSource::Embedded(b)) if Arc::ptr_eq(a, b))
    }
}

/// Document-level metadata handed to the backend before the first page.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub producer: String,
    /// Face referenced for [`FontKey::Body`].
    pub body_font: FontSource,
    /// Face referenced for [`FontKey::Bold`].
    pub bold_font: FontSource,
}

/// Drawing primitives for one page.
///
/// Coordinates use a top-left origin with y growing downwards, in points.
/// Text is positioned by the left end of its baseline.
pub trait PageCanvas {
    fn size(&self) -> Size;

    fn save_state(&mut self);

    fn restore_state(&mut self);

    /// Rotates everything drawn afterwards (until the matching restore) by
    /// `degrees` clockwise about `center`.
    fn rotate_about(&mut self, center: Point, degrees: f32);

    fn fill_ellipse(&mut self, bounds: Rect, color: Color);

    fn stroke_rounded_rect(&mut self, bounds: Rect, radius: f32, line_width: f32, color: Color);

    fn draw_text(&mut self, text: &str, origin: Point, font: FontKey, size: f32, color: Color);
}

/// A trait for document renderers, abstracting the output format.
///
/// Pages are produced one at a time: `begin_page` hands out a canvas, the
/// caller draws into it, and `end_page` commits it in order.
pub trait DocumentRenderer {
    type Page: PageCanvas;
    type Output;

    fn begin_document(&mut self, info: &DocumentInfo) -> Result<(), RenderError>;

    fn begin_page(&mut self, size: Size) -> Result<Self::Page, RenderError>;

    fn end_page(&mut self, page: Self::Page) -> Result<(), RenderError>;

    fn finish(self) -> Result<Self::Output, RenderError>;
}
