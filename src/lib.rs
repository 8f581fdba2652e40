//! Duplex quiz-card imposition.
//!
//! Rows of `(level, subject, question, answer)` are grouped by level, checked,
//! and packed six to a card. Cards are imposed on a grid of sheet slots, with
//! questions on the front page of each sheet and answers on the back page,
//! arranged so that each card's answers sit behind its questions after duplex
//! printing and cutting.
//!
//! ```no_run
//! use quizcards::{PipelineBuilder, PrintMode, RawRow};
//!
//! # fn main() -> Result<(), quizcards::PipelineError> {
//! let pipeline = PipelineBuilder::new()
//!     .with_print_mode(PrintMode::DuplexLongEdge)
//!     .build()?;
//! let rows: Vec<RawRow> = quizcards::rows_from_json(&std::fs::read_to_string("rows.json")?)?;
//! let pdf = pipeline.generate_rows(rows)?;
//! std::fs::write("cards.pdf", pdf)?;
//! # Ok(())
//! # }
//! ```

pub mod composer;
pub mod config;
pub mod document;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod renderer;
pub mod validator;

pub use composer::{DuplexComposer, Placement, PrintMode, Sheet, back_slot};
pub use config::{FieldLimits, LayoutConfig};
pub use document::DocumentWriter;
pub use error::{CardError, ConfigError, PipelineError};
pub use model::{Card, Field, LevelGroup, Question, RawRow, group_by_level, rows_from_json};
pub use pipeline::{CardPipeline, PipelineBuilder};
pub use renderer::{CardFace, CardFonts, CardRenderer, Face};
pub use validator::validate;
