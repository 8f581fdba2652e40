//! A backend that records drawing calls instead of producing bytes.
//!
//! Used to test composition and card drawing independently of any PDF library.

use crate::error::RenderError;
use crate::traits::{DocumentInfo, DocumentRenderer, FontKey, PageCanvas};
use quizcards_types::{Color, Point, Rect, Size};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    SaveState,
    RestoreState,
    Rotate {
        center: Point,
        degrees: f32,
    },
    FillEllipse {
        bounds: Rect,
        color: Color,
    },
    StrokeRoundedRect {
        bounds: Rect,
        radius: f32,
        line_width: f32,
        color: Color,
    },
    Text {
        text: String,
        origin: Point,
        font: FontKey,
        size: f32,
        color: Color,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub size: Size,
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ops: Vec::new(),
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn ellipses(&self) -> impl Iterator<Item = (&Rect, &Color)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillEllipse { bounds, color } => Some((bounds, color)),
            _ => None,
        })
    }

    pub fn rotations(&self) -> impl Iterator<Item = (&Point, f32)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Rotate { center, degrees } => Some((center, *degrees)),
            _ => None,
        })
    }

    pub fn card_frames(&self) -> impl Iterator<Item = &Rect> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::StrokeRoundedRect { bounds, .. } => Some(bounds),
            _ => None,
        })
    }
}

impl PageCanvas for RecordingCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn save_state(&mut self) {
        self.ops.push(DrawOp::SaveState);
    }

    fn restore_state(&mut self) {
        self.ops.push(DrawOp::RestoreState);
    }

    fn rotate_about(&mut self, center: Point, degrees: f32) {
        self.ops.push(DrawOp::Rotate { center, degrees });
    }

    fn fill_ellipse(&mut self, bounds: Rect, color: Color) {
        self.ops.push(DrawOp::FillEllipse { bounds, color });
    }

    fn stroke_rounded_rect(&mut self, bounds: Rect, radius: f32, line_width: f32, color: Color) {
        self.ops.push(DrawOp::StrokeRoundedRect {
            bounds,
            radius,
            line_width,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, font: FontKey, size: f32, color: Color) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            origin,
            font,
            size,
            color,
        });
    }
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    info: Option<DocumentInfo>,
    pages: Vec<RecordingCanvas>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentRenderer for RecordingRenderer {
    type Page = RecordingCanvas;
    type Output = Vec<RecordingCanvas>;

    fn begin_document(&mut self, info: &DocumentInfo) -> Result<(), RenderError> {
        if self.info.is_some() {
            return Err(RenderError::State("document already begun".into()));
        }
        self.info = Some(info.clone());
        Ok(())
    }

    fn begin_page(&mut self, size: Size) -> Result<Self::Page, RenderError> {
        if self.info.is_none() {
            return Err(RenderError::State("page begun before the document".into()));
        }
        Ok(RecordingCanvas::new(size))
    }

    fn end_page(&mut self, page: Self::Page) -> Result<(), RenderError> {
        self.pages.push(page);
        Ok(())
    }

    fn finish(self) -> Result<Self::Output, RenderError> {
        if self.info.is_none() {
            return Err(RenderError::State("document was never begun".into()));
        }
        Ok(self.pages)
    }
}
