//! Font metrics for line wrapping.
//!
//! Wrapping decisions use real glyph advances, never character counts. Two
//! sources are supported:
//! - the standard PDF Helvetica faces, measured from their AFM width tables so
//!   the measured width matches what a viewer draws for the non-embedded font;
//! - a user-supplied TrueType/OpenType file, whose advances are tabled per
//!   WinAnsi code when it is loaded and embedded in the PDF with those widths.
//!
//! Both sit behind [`TextMeasurer`], so wrapping logic can be tested with a
//! deterministic fake.

use quizcards_types::FontProgram;
use quizcards_types::font::{FIRST_CHAR, LAST_CHAR};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use ttf_parser::GlyphId;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("Failed to read font file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Font data could not be parsed: {0}")]
    Parse(String),
}

/// Measures the advance width of a run of text, in points.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size: f32) -> f32;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        (**self).measure(text, font_size)
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for Arc<T> {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        (**self).measure(text, font_size)
    }
}

/// The punctuation WinAnsi places in 0x80..=0x9F.
const WIN_ANSI_SPECIALS: [(char, u8); 12] = [
    ('€', 0x80),
    ('‚', 0x82),
    ('„', 0x84),
    ('…', 0x85),
    ('‘', 0x91),
    ('’', 0x92),
    ('“', 0x93),
    ('”', 0x94),
    ('•', 0x95),
    ('–', 0x96),
    ('—', 0x97),
    ('™', 0x99),
];

/// Maps a character to its WinAnsiEncoding byte, if the encoding has one.
///
/// The PDF backend writes text with this encoding and the font metrics are
/// indexed by it, so both sides agree on which glyph is drawn.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match c {
            '\t' | '\n' | '\r' => Some(b' '),
            _ => WIN_ANSI_SPECIALS
                .iter()
                .find(|(special, _)| *special == c)
                .map(|(_, byte)| *byte),
        },
    }
}

/// The character a WinAnsi byte draws; `None` for control and unassigned codes.
pub fn win_ansi_char(byte: u8) -> Option<char> {
    match byte {
        0x20..=0x7E | 0xA0..=0xFF => Some(byte as char),
        _ => WIN_ANSI_SPECIALS
            .iter()
            .find(|(_, code)| *code == byte)
            .map(|(c, _)| *c),
    }
}

/// Encodes text as WinAnsi bytes; unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(|c| win_ansi_byte(c).unwrap_or(b'?')).collect()
}

/// Advance widths in 1/1000 em, from the Adobe AFM files of the base-14 fonts.
struct AfmWidths {
    /// Codes 0x20..=0x7E.
    ascii: [u16; 95],
    /// Codes 0xA0..=0xFF.
    latin1: [u16; 96],
    /// The punctuation WinAnsi places in 0x80..=0x9F.
    specials: [(u8, u16); 12],
}

impl AfmWidths {
    fn advance(&self, byte: u8) -> u16 {
        match byte {
            0x20..=0x7E => self.ascii[(byte - 0x20) as usize],
            0xA0..=0xFF => self.latin1[(byte - 0xA0) as usize],
            _ => self
                .specials
                .iter()
                .find(|(code, _)| *code == byte)
                .map(|(_, w)| *w)
                .unwrap_or(self.ascii[(b'?' - 0x20) as usize]),
        }
    }
}

#[rustfmt::skip]
static HELVETICA: AfmWidths = AfmWidths {
    ascii: [
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
        1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
        667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
        333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
        556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
    ],
    latin1: [
        278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
        400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
        667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
        556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
    ],
    specials: [
        (0x80, 556), (0x82, 222), (0x84, 333), (0x85, 1000), (0x91, 222), (0x92, 222),
        (0x93, 333), (0x94, 333), (0x95, 350), (0x96, 556), (0x97, 1000), (0x99, 1000),
    ],
};

#[rustfmt::skip]
static HELVETICA_BOLD: AfmWidths = AfmWidths {
    ascii: [
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
        975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
        667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
        333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
        611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
    ],
    latin1: [
        278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
        400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
        722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
        556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
        611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
    ],
    specials: [
        (0x80, 556), (0x82, 278), (0x84, 500), (0x85, 1000), (0x91, 278), (0x92, 278),
        (0x93, 500), (0x94, 500), (0x95, 350), (0x96, 556), (0x97, 1000), (0x99, 1000),
    ],
};

/// The standard (non-embedded) PDF faces the renderer can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    pub fn postscript_name(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    fn widths(self) -> &'static AfmWidths {
        match self {
            StandardFont::Helvetica => &HELVETICA,
            StandardFont::HelveticaBold => &HELVETICA_BOLD,
        }
    }
}

impl TextMeasurer for StandardFont {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        let widths = self.widths();
        let units: u32 = encode_win_ansi(text)
            .into_iter()
            .map(|b| widths.advance(b) as u32)
            .sum();
        units as f32 * font_size / 1000.0
    }
}

/// Metrics read from a TrueType/OpenType font file.
///
/// The face is parsed once, when loaded; advances are kept per WinAnsi code in
/// the [`FontProgram`] that the PDF backend embeds.
#[derive(Debug, Clone)]
pub struct TrueTypeMetrics {
    program: Arc<FontProgram>,
}

impl TrueTypeMetrics {
    /// Parses `data` as a font face and tables its metrics.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FontError> {
        let data = Arc::new(data);
        let face = ttf_parser::Face::parse(&data, 0).map_err(|e| FontError::Parse(e.to_string()))?;
        if face.tables().glyf.is_none() {
            return Err(FontError::Parse(
                "only fonts with TrueType (glyf) outlines can be embedded".to_string(),
            ));
        }
        let units_per_em = f32::from(face.units_per_em().max(1));
        let scale = |units: f32| (units * 1000.0 / units_per_em).round() as i32;

        let notdef = face.glyph_hor_advance(GlyphId(0)).unwrap_or(0);
        let widths = (FIRST_CHAR..=LAST_CHAR)
            .map(|byte| {
                let advance = win_ansi_char(byte)
                    .and_then(|c| face.glyph_index(c))
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
                    .unwrap_or(notdef);
                scale(f32::from(advance)).clamp(0, i32::from(u16::MAX)) as u16
            })
            .collect();

        let name = face
            .names()
            .into_iter()
            .filter(|n| n.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
            .find_map(|n| n.to_string())
            .map(|name| pdf_font_name(&name))
            .unwrap_or_default();
        let postscript_name = if name.is_empty() { "CustomFont".to_string() } else { name };

        let bbox = face.global_bounding_box();
        let ascent = scale(f32::from(face.ascender()));
        let mut flags = FontProgram::NONSYMBOLIC;
        if face.is_monospaced() {
            flags |= FontProgram::FIXED_PITCH;
        }
        if face.is_italic() {
            flags |= FontProgram::ITALIC;
        }

        let program = FontProgram {
            postscript_name,
            data: Arc::clone(&data),
            widths,
            ascent,
            descent: scale(f32::from(face.descender())),
            cap_height: face.capital_height().map_or(ascent, |h| scale(f32::from(h))),
            bbox: [
                scale(f32::from(bbox.x_min)),
                scale(f32::from(bbox.y_min)),
                scale(f32::from(bbox.x_max)),
                scale(f32::from(bbox.y_max)),
            ],
            italic_angle: face.italic_angle(),
            stem_v: if face.is_bold() { 120 } else { 80 },
            flags,
        };
        Ok(Self {
            program: Arc::new(program),
        })
    }

    pub fn from_program(program: Arc<FontProgram>) -> Self {
        Self { program }
    }

    pub fn program(&self) -> &Arc<FontProgram> {
        &self.program
    }
}

impl TextMeasurer for TrueTypeMetrics {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = encode_win_ansi(text)
            .into_iter()
            .map(|b| u32::from(self.program.width(b)))
            .sum();
        units as f32 * font_size / 1000.0
    }
}

/// Keeps the characters a PDF name can carry without escaping.
fn pdf_font_name(name: &str) -> String {
    name.chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' => Some(c),
            _ => None,
        })
        .collect()
}

/// A measurable face together with the base-font name the PDF references.
#[derive(Clone)]
pub struct Typeface {
    postscript_name: String,
    metrics: Arc<dyn TextMeasurer + Send + Sync>,
    program: Option<Arc<FontProgram>>,
}

impl fmt::Debug for Typeface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typeface")
            .field("postscript_name", &self.postscript_name)
            .field("embedded", &self.program.is_some())
            .finish()
    }
}

impl Typeface {
    pub fn standard(font: StandardFont) -> Self {
        Self {
            postscript_name: font.postscript_name().to_string(),
            metrics: Arc::new(font),
            program: None,
        }
    }

    pub fn helvetica() -> Self {
        Self::standard(StandardFont::Helvetica)
    }

    pub fn helvetica_bold() -> Self {
        Self::standard(StandardFont::HelveticaBold)
    }

    /// Wraps any measurer; used for custom metrics and test doubles.
    pub fn custom(
        postscript_name: impl Into<String>,
        metrics: Arc<dyn TextMeasurer + Send + Sync>,
    ) -> Self {
        Self {
            postscript_name: postscript_name.into(),
            metrics,
            program: None,
        }
    }

    /// A face backed by an embeddable font file.
    pub fn from_ttf_bytes(data: Vec<u8>) -> Result<Self, FontError> {
        Ok(Self::embedded(TrueTypeMetrics::from_bytes(data)?))
    }

    pub fn embedded(metrics: TrueTypeMetrics) -> Self {
        let program = Arc::clone(metrics.program());
        log::debug!(
            "Loaded TrueType face '{}' ({} bytes)",
            program.postscript_name,
            program.data.len()
        );
        Self {
            postscript_name: program.postscript_name.clone(),
            metrics: Arc::new(metrics),
            program: Some(program),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FontError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ttf_bytes(data)
    }

    pub fn postscript_name(&self) -> &str {
        &self.postscript_name
    }

    /// The font program to embed, or `None` for a standard face.
    pub fn program(&self) -> Option<&Arc<FontProgram>> {
        self.program.as_ref()
    }
}

impl TextMeasurer for Typeface {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        self.metrics.measure(text, font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helvetica_widths_match_afm() {
        // "Hi" = H(722) + i(222)
        let w = StandardFont::Helvetica.measure("Hi", 10.0);
        assert!((w - 9.44).abs() < 1e-4);
        // Bold i is wider than regular i.
        let b = StandardFont::HelveticaBold.measure("Hi", 10.0);
        assert!((b - 10.0).abs() < 1e-4);
    }

    #[test]
    fn width_scales_with_size() {
        let small = StandardFont::Helvetica.measure("Quiz", 9.0);
        let large = StandardFont::Helvetica.measure("Quiz", 18.0);
        assert!((large - 2.0 * small).abs() < 1e-4);
    }

    #[test]
    fn unmappable_characters_measure_as_substitute() {
        let question = StandardFont::Helvetica.measure("?", 12.0);
        assert!((StandardFont::Helvetica.measure("漢", 12.0) - question).abs() < 1e-4);
        assert_eq!(encode_win_ansi("a漢"), b"a?".to_vec());
    }

    #[test]
    fn typographic_quotes_are_encoded() {
        assert_eq!(encode_win_ansi("it’s"), vec![b'i', b't', 0x92, b's']);
        assert_eq!(encode_win_ansi("é"), vec![0xE9]);
        let apostrophe = StandardFont::Helvetica.measure("’", 1000.0);
        assert!((apostrophe - 222.0).abs() < 1e-3);
    }

    #[test]
    fn typeface_reports_base_font_name() {
        assert_eq!(Typeface::helvetica().postscript_name(), "Helvetica");
        assert_eq!(Typeface::helvetica_bold().postscript_name(), "Helvetica-Bold");
    }

    #[test]
    fn win_ansi_bytes_and_chars_are_inverse() {
        for byte in 0x20..=0xFFu8 {
            if let Some(c) = win_ansi_char(byte) {
                assert_eq!(win_ansi_byte(c), Some(byte), "{c:?}");
            }
        }
        assert_eq!(win_ansi_char(0x81), None);
        assert_eq!(win_ansi_char(0x97), Some('—'));
    }

    fn program() -> FontProgram {
        FontProgram {
            postscript_name: "Test-Regular".into(),
            data: Arc::new(b"glyf".to_vec()),
            widths: (FIRST_CHAR..=LAST_CHAR)
                .map(|code| if code == b'?' { 400 } else { 500 + u16::from(code) })
                .collect(),
            ascent: 800,
            descent: -200,
            cap_height: 700,
            bbox: [0, -200, 1000, 800],
            italic_angle: 0.0,
            stem_v: 80,
            flags: FontProgram::NONSYMBOLIC,
        }
    }

    #[test]
    fn truetype_widths_come_from_the_embedded_table() {
        let metrics = TrueTypeMetrics::from_program(Arc::new(program()));
        // 'A' (0x41) = 565, 'é' (0xE9) = 733
        assert!((metrics.measure("Aé", 10.0) - 12.98).abs() < 1e-4);
        // Unmappable characters take the width of the '?' the PDF shows.
        assert!((metrics.measure("漢", 10.0) - 4.0).abs() < 1e-4);
        assert!((metrics.measure("Quiz", 18.0) - 2.0 * metrics.measure("Quiz", 9.0)).abs() < 1e-4);
    }

    #[test]
    fn embedded_typeface_exposes_its_program() {
        let face = Typeface::embedded(TrueTypeMetrics::from_program(Arc::new(program())));
        assert_eq!(face.postscript_name(), "Test-Regular");
        let embedded = face.program().unwrap();
        assert_eq!(embedded.data.as_slice(), b"glyf");
        assert!(Typeface::helvetica().program().is_none());
    }

    #[test]
    fn font_names_are_made_pdf_safe() {
        assert_eq!(pdf_font_name("Open Sans(Bold)/x"), "Open-SansBoldx");
        assert_eq!(pdf_font_name("Inter_Var-Italic"), "Inter_Var-Italic");
    }

    #[test]
    fn garbage_font_data_is_rejected() {
        let err = Typeface::from_ttf_bytes(b"definitely not a font".to_vec()).unwrap_err();
        assert!(matches!(err, FontError::Parse(_)));
    }

    #[test]
    fn missing_font_file_is_io_error() {
        let err = Typeface::from_file("/nonexistent/quizcards/font.ttf").unwrap_err();
        assert!(matches!(err, FontError::Io { .. }));
    }
}
