//! The public entry point: rows in, PDF bytes out.

use crate::composer::PrintMode;
use crate::config::LayoutConfig;
use crate::document::DocumentWriter;
use crate::error::PipelineError;
use crate::model::{LevelGroup, RawRow, group_by_level};
use crate::renderer::CardFonts;
use crate::validator::validate;
use quizcards_layout::Typeface;
use quizcards_render_lopdf::LopdfRenderer;
use std::fs;
use std::io::{self, Cursor, Seek, Write};
use std::path::{Path, PathBuf};

const DEFAULT_TITLE: &str = "Quiz Cards";

/// A builder for creating a `CardPipeline`.
pub struct PipelineBuilder {
    config: LayoutConfig,
    mode: PrintMode,
    font_path: Option<PathBuf>,
    title: String,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self {
            config: LayoutConfig::default(),
            mode: PrintMode::default(),
            font_path: None,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads the layout from a JSON file; omitted fields keep their defaults.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            PipelineError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read layout config from '{}': {}", path.display(), e),
            ))
        })?;
        self.config = LayoutConfig::from_json(&source)?;
        Ok(self)
    }

    pub fn with_print_mode(mut self, mode: PrintMode) -> Self {
        self.mode = mode;
        self
    }

    /// Measures text with this TrueType/OpenType file instead of the built-in
    /// Helvetica metrics. The PDF references the face by its PostScript name.
    pub fn with_font_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.font_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Validates the configuration, loads fonts and creates the `CardPipeline`.
    pub fn build(self) -> Result<CardPipeline, PipelineError> {
        self.config.validate()?;
        let fonts = match &self.font_path {
            Some(path) => {
                let face = Typeface::from_file(path)?;
                log::info!("Using font '{}' from {}", face.postscript_name(), path.display());
                CardFonts::single(face)
            }
            None => CardFonts::default(),
        };
        Ok(CardPipeline {
            config: self.config,
            mode: self.mode,
            fonts,
            title: self.title,
        })
    }
}

/// A configured generator. Holds no per-run state, so one instance can serve
/// any number of runs.
#[derive(Debug, Clone)]
pub struct CardPipeline {
    config: LayoutConfig,
    mode: PrintMode,
    fonts: CardFonts,
    title: String,
}

impl CardPipeline {
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn print_mode(&self) -> PrintMode {
        self.mode
    }

    /// Validates and renders the groups into PDF bytes.
    pub fn generate(&self, groups: &[LevelGroup]) -> Result<Vec<u8>, PipelineError> {
        Ok(self.generate_to_writer(groups, Cursor::new(Vec::new()))?.into_inner())
    }

    /// Groups flat rows by level, then behaves like [`generate`](Self::generate).
    pub fn generate_rows(&self, rows: Vec<RawRow>) -> Result<Vec<u8>, PipelineError> {
        self.generate(&group_by_level(rows))
    }

    /// Renders into `writer` and hands it back once the document is complete.
    ///
    /// Content errors are detected before anything is written. I/O errors part
    /// way through can leave `writer` holding a truncated document.
    pub fn generate_to_writer<W: Write + Seek>(&self, groups: &[LevelGroup], writer: W) -> Result<W, PipelineError> {
        let cards = validate(groups, &self.config.limits)?;
        log::debug!("Validated {} card(s) from {} level(s)", cards.len(), groups.len());
        DocumentWriter::new(&self.config, &self.fonts, self.mode, &self.title)
            .write(&cards, LopdfRenderer::new(writer))
    }

    /// Writes the PDF to `path`. Nothing is created unless rendering succeeds.
    pub fn generate_to_file<P: AsRef<Path>>(&self, groups: &[LevelGroup], path: P) -> Result<(), PipelineError> {
        let bytes = self.generate(groups)?;
        fs::write(path.as_ref(), bytes)?;
        log::info!("Wrote {}", path.as_ref().display());
        Ok(())
    }
}
