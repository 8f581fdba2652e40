//! Core rendering abstractions for card documents.
//!
//! This crate provides the seams between card layout and an output format:
//! - `PageCanvas`: the drawing primitives a card needs
//! - `DocumentRenderer`: page sequencing and finalisation
//! - `RecordingRenderer`: an in-memory backend for tests and diagnostics

mod error;
pub mod recording;
mod traits;
pub mod utils;

pub use error::RenderError;
pub use recording::{DrawOp, RecordingCanvas, RecordingRenderer};
pub use traits::{DocumentInfo, DocumentRenderer, FontKey, FontSource, PageCanvas};
