use crate::canvas::{LopdfPage, font_resource_name};
use crate::writer::StreamingPdfWriter;
use lopdf::{Dictionary, Object, Stream, StringFormat, dictionary};
use quizcards_render_core::{DocumentInfo, DocumentRenderer, FontKey, FontSource, PageCanvas, RenderError};
use quizcards_types::Size;
use quizcards_types::font::{FIRST_CHAR, LAST_CHAR};
use std::io::{Seek, Write};

const PDF_VERSION: &str = "1.7";

/// A PDF renderer that streams finished pages to `W` through lopdf objects.
pub struct LopdfRenderer<W: Write + Seek> {
    output: Option<W>,
    writer: Option<StreamingPdfWriter<W>>,
}

impl<W: Write + Seek> LopdfRenderer<W> {
    pub fn new(output: W) -> Self {
        Self {
            output: Some(output),
            writer: None,
        }
    }

    fn writer_mut(&mut self) -> Result<&mut StreamingPdfWriter<W>, RenderError> {
        self.writer
            .as_mut()
            .ok_or_else(|| RenderError::State("Document not started".into()))
    }
}

/// Writes the objects behind one font resource and returns the value the
/// resource dictionary holds for it.
fn write_font<W: Write + Seek>(
    writer: &mut StreamingPdfWriter<W>,
    source: &FontSource,
) -> Result<Object, RenderError> {
    let program = match source {
        FontSource::Standard(base_font) => {
            return Ok(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => base_font.as_str(),
                "Encoding" => "WinAnsiEncoding",
            }
            .into());
        }
        FontSource::Embedded(program) => program,
    };

    let file_id = writer.write_object(
        Stream::new(
            dictionary! { "Length1" => program.data.len() as i64 },
            program.data.to_vec(),
        )
        .into(),
    )?;
    let [x_min, y_min, x_max, y_max] = program.bbox;
    let descriptor_id = writer.write_object(
        dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => program.postscript_name.as_str(),
            "Flags" => program.flags,
            "FontBBox" => vec![x_min.into(), y_min.into(), x_max.into(), y_max.into()],
            "ItalicAngle" => program.italic_angle,
            "Ascent" => program.ascent,
            "Descent" => program.descent,
            "CapHeight" => program.cap_height,
            "StemV" => program.stem_v,
            "FontFile2" => file_id,
        }
        .into(),
    )?;
    let font_id = writer.write_object(
        dictionary! {
            "Type" => "Font",
            "Subtype" => "TrueType",
            "BaseFont" => program.postscript_name.as_str(),
            "FirstChar" => FIRST_CHAR,
            "LastChar" => LAST_CHAR,
            "Widths" => program.widths.iter().map(|w| Object::from(*w)).collect::<Vec<_>>(),
            "FontDescriptor" => descriptor_id,
            "Encoding" => "WinAnsiEncoding",
        }
        .into(),
    )?;
    log::debug!(
        "Embedded TrueType font '{}' ({} bytes)",
        program.postscript_name,
        program.data.len()
    );
    Ok(Object::Reference(font_id))
}

/// Writes both faces, sharing the objects when they embed the same program.
fn write_fonts<W: Write + Seek>(
    writer: &mut StreamingPdfWriter<W>,
    info: &DocumentInfo,
) -> Result<Dictionary, RenderError> {
    let body = write_font(writer, &info.body_font)?;
    let bold = if info.bold_font.same_program(&info.body_font) {
        body.clone()
    } else {
        write_font(writer, &info.bold_font)?
    };
    Ok(dictionary! {
        font_resource_name(FontKey::Body) => body,
        font_resource_name(FontKey::Bold) => bold,
    })
}

/// A PDF text string: a literal when ASCII, otherwise UTF-16BE behind a byte-order mark.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let bytes = [0xFE, 0xFF]
        .into_iter()
        .chain(text.encode_utf16().flat_map(u16::to_be_bytes))
        .collect();
    Object::String(bytes, StringFormat::Hexadecimal)
}

impl<W: Write + Seek> DocumentRenderer for LopdfRenderer<W> {
    type Page = LopdfPage;
    type Output = W;

    fn begin_document(&mut self, info: &DocumentInfo) -> Result<(), RenderError> {
        let output = self
            .output
            .take()
            .ok_or_else(|| RenderError::State("Document already started".into()))?;
        let info_dict = dictionary! {
            "Title" => text_string(&info.title),
            "Producer" => text_string(&info.producer),
        };
        let mut writer = StreamingPdfWriter::new(output, PDF_VERSION, info_dict)?;
        let fonts = write_fonts(&mut writer, info)?;
        writer.set_fonts(fonts);
        self.writer = Some(writer);
        log::debug!(
            "Started PDF document '{}' (fonts: {}, {})",
            info.title,
            info.body_font.base_font(),
            info.bold_font.base_font()
        );
        Ok(())
    }

    fn begin_page(&mut self, size: Size) -> Result<Self::Page, RenderError> {
        self.writer_mut()?;
        Ok(LopdfPage::new(size))
    }

    fn end_page(&mut self, page: Self::Page) -> Result<(), RenderError> {
        let size = page.size();
        let writer = self.writer_mut()?;
        let content_id = writer.write_content_stream(page.into_content())?;
        writer.write_page(content_id, size.width, size.height)?;
        log::trace!("Wrote page {}", writer.page_count());
        Ok(())
    }

    fn finish(self) -> Result<Self::Output, RenderError> {
        let writer = self
            .writer
            .ok_or_else(|| RenderError::State("Document not started".into()))?;
        let pages = writer.page_count();
        let output = writer.finish()?;
        log::debug!("Finished PDF with {} page(s)", pages);
        Ok(output)
    }
}
