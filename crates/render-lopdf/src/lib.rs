//! Streaming PDF backend for card documents.
//!
//! Implements the render-core traits on top of `lopdf`: each page's content
//! stream and page dictionary are written as soon as the page ends, and the
//! page tree, catalog and cross-reference table are written by `finish`.

mod canvas;
mod renderer;
mod writer;

pub use canvas::LopdfPage;
pub use renderer::LopdfRenderer;
pub use writer::StreamingPdfWriter;
