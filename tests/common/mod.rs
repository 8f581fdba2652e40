pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use quizcards::{PipelineBuilder, PipelineError, PrintMode, RawRow};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text shown on a 1-based page, one entry per `Tj`.
    pub fn page_texts(&self, page: u32) -> Vec<String> {
        pdf_assertions::shown_strings(&self.doc, page)
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Run the default pipeline in `mode` over flat rows.
pub fn generate(rows: Vec<RawRow>, mode: PrintMode) -> Result<Vec<u8>, PipelineError> {
    PipelineBuilder::new()
        .with_print_mode(mode)
        .build()?
        .generate_rows(rows)
}

/// Like [`generate`], but loads the bytes for inspection.
pub fn generate_pdf(rows: Vec<RawRow>, mode: PrintMode) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    GeneratedPdf::from_bytes(generate(rows, mode)?)
}
