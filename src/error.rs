use crate::model::Field;
use quizcards_layout::FontError;
use quizcards_render_core::RenderError;
use thiserror::Error;

/// A problem with the quiz content itself. Retrying with the same input fails
/// the same way; the message is meant for whoever wrote the rows.
///
/// Card indices are 0-based within their level; messages print them 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    #[error("No quiz rows were supplied")]
    EmptyInput,

    #[error("Level '{level}' has {count} question(s); each card needs exactly 6, so the count must be a multiple of 6")]
    IncompleteCard { level: String, count: usize },

    #[error("Level '{level}' card {card}: subject '{subject}' is used more than once", card = .card_index + 1)]
    DuplicateSubject {
        level: String,
        card_index: usize,
        subject: String,
    },

    #[error("Level '{level}' card {card}: {field} is empty", card = .card_index + 1)]
    EmptyField {
        level: String,
        card_index: usize,
        field: Field,
    },

    #[error("Level '{level}' card {card}: {field} is {actual} characters long, the limit is {limit}", card = .card_index + 1)]
    FieldTooLong {
        level: String,
        card_index: usize,
        field: Field,
        limit: usize,
        actual: usize,
    },

    #[error("Level '{level}' card {card}: {field} {position} does not fit in two lines", card = .card_index + 1, position = .slot + 1)]
    TextOverflow {
        level: String,
        card_index: usize,
        field: Field,
        slot: usize,
    },
}

/// An invalid layout configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Grid must have at least one column and one row, got {cols}x{rows}")]
    EmptyGrid { cols: usize, rows: usize },

    #[error("'{name}' must be greater than zero, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("'{name}' must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("Palette must have exactly 6 colors, got {0}")]
    PaletteSize(usize),

    #[error("Layout leaves no room for {0}")]
    NoRoom(&'static str),
}

/// A comprehensive error type for the card generation pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid card content: {0}")]
    Content(#[from] CardError),

    #[error("Invalid layout configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Font loading failed: {0}")]
    Font(#[from] FontError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    /// True when the input rows are at fault rather than the environment.
    pub fn is_content_error(&self) -> bool {
        matches!(self, PipelineError::Content(_))
    }
}
