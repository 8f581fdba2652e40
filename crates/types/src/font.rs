//! An embeddable TrueType font program and the metrics a PDF font needs.

use std::fmt;
use std::sync::Arc;

/// First WinAnsi code covered by [`FontProgram::widths`].
pub const FIRST_CHAR: u8 = 32;
/// Last WinAnsi code covered by [`FontProgram::widths`].
pub const LAST_CHAR: u8 = 255;

/// A TrueType font file together with the metrics written into its PDF font
/// dictionary and descriptor.
///
/// Metrics are in 1/1000 em glyph space. `widths` holds one advance per
/// WinAnsi code from [`FIRST_CHAR`] to [`LAST_CHAR`]; text measurement and the
/// PDF `Widths` array both read it, so wrapped and printed widths agree.
#[derive(Clone, PartialEq)]
pub struct FontProgram {
    pub postscript_name: String,
    pub data: Arc<Vec<u8>>,
    pub widths: Vec<u16>,
    pub ascent: i32,
    pub descent: i32,
    pub cap_height: i32,
    /// `[x_min, y_min, x_max, y_max]`.
    pub bbox: [i32; 4],
    pub italic_angle: f32,
    pub stem_v: i32,
    pub flags: u32,
}

impl FontProgram {
    pub const FIXED_PITCH: u32 = 1;
    pub const NONSYMBOLIC: u32 = 1 << 5;
    pub const ITALIC: u32 = 1 << 6;

    /// Advance of WinAnsi code `byte`; codes outside the table measure zero.
    pub fn width(&self, byte: u8) -> u16 {
        byte.checked_sub(FIRST_CHAR)
            .and_then(|index| self.widths.get(index as usize))
            .copied()
            .unwrap_or(0)
    }
}

impl fmt::Debug for FontProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontProgram")
            .field("postscript_name", &self.postscript_name)
            .field("data_len", &self.data.len())
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program() -> FontProgram {
        FontProgram {
            postscript_name: "Test-Regular".into(),
            data: Arc::new(vec![0; 16]),
            widths: (FIRST_CHAR..=LAST_CHAR).map(|code| code as u16 * 2).collect(),
            ascent: 800,
            descent: -200,
            cap_height: 700,
            bbox: [-50, -200, 1000, 900],
            italic_angle: 0.0,
            stem_v: 80,
            flags: FontProgram::NONSYMBOLIC,
        }
    }

    #[test]
    fn widths_are_indexed_from_the_first_code() {
        let font = program();
        assert_eq!(font.widths.len(), 224);
        assert_eq!(font.width(b' '), 64);
        assert_eq!(font.width(0xFF), 510);
        assert_eq!(font.width(b'\n'), 0);
    }

    #[test]
    fn debug_output_omits_font_bytes() {
        let text = format!("{:?}", program());
        assert!(text.contains("Test-Regular"));
        assert!(text.contains("data_len: 16"));
    }
}
