//! Lays out and draws a single card face.
//!
//! Layout and drawing are separate steps so that every face of a run can be
//! wrapped, and any overflow reported, before the first page is begun.

use crate::config::LayoutConfig;
use crate::error::CardError;
use crate::model::{Card, Field};
use quizcards_layout::{MAX_LINES, TextMeasurer, Typeface, wrap_text};
use quizcards_render_core::{FontKey, FontSource, PageCanvas};
use std::sync::Arc;
use quizcards_types::{Color, Point, Rect};

/// Cap height of the Helvetica faces as a fraction of the font size, used to
/// centre glyphs vertically on a point.
const CAP_HEIGHT: f32 = 0.718;

/// The body face and its bold companion for headers and badges.
#[derive(Debug, Clone)]
pub struct CardFonts {
    pub body: Typeface,
    pub bold: Typeface,
}

impl Default for CardFonts {
    fn default() -> Self {
        Self {
            body: Typeface::helvetica(),
            bold: Typeface::helvetica_bold(),
        }
    }
}

impl CardFonts {
    /// Uses one face for both roles, as when a single font file is supplied.
    pub fn single(face: Typeface) -> Self {
        Self {
            body: face.clone(),
            bold: face,
        }
    }

    pub fn face(&self, key: FontKey) -> &Typeface {
        match key {
            FontKey::Body => &self.body,
            FontKey::Bold => &self.bold,
        }
    }

    /// How the document references the face behind `key`.
    pub fn source(&self, key: FontKey) -> FontSource {
        let face = self.face(key);
        match face.program() {
            Some(program) => FontSource::Embedded(Arc::clone(program)),
            None => FontSource::Standard(face.postscript_name().to_string()),
        }
    }
}

/// Which side of a card is being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Questions,
    Answers,
}

impl Face {
    fn field(self) -> Field {
        match self {
            Face::Questions => Field::Question,
            Face::Answers => Field::Answer,
        }
    }
}

/// One badge row of a laid-out face.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotText {
    pub badge: String,
    pub lines: Vec<String>,
}

/// A card face with all text already wrapped; drawing it cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub struct CardFace {
    pub header: String,
    pub slots: Vec<SlotText>,
}

pub struct CardRenderer<'a> {
    config: &'a LayoutConfig,
    fonts: &'a CardFonts,
}

impl<'a> CardRenderer<'a> {
    pub fn new(config: &'a LayoutConfig, fonts: &'a CardFonts) -> Self {
        Self { config, fonts }
    }

    /// Wraps the six texts of one face at the body size within the text budget.
    pub fn layout(&self, card: &Card, face: Face) -> Result<CardFace, CardError> {
        let field = face.field();
        let max_width = self.config.text_width();
        let header = match face {
            Face::Questions => card.level.clone(),
            Face::Answers => format!("{} - ANSWERS", card.level),
        };

        let slots = card
            .questions
            .iter()
            .enumerate()
            .map(|(slot, question)| {
                let text = match face {
                    Face::Questions => &question.text,
                    Face::Answers => &question.answer,
                };
                // A non-positive width fits nothing, so it reports as overflow too.
                let lines = wrap_text(
                    text,
                    &self.fonts.body,
                    self.config.body_font_size,
                    max_width,
                    MAX_LINES,
                )
                .map_err(|_| CardError::TextOverflow {
                    level: card.level.clone(),
                    card_index: card.index,
                    field,
                    slot,
                })?;
                Ok(SlotText {
                    badge: question.badge_label().to_string(),
                    lines,
                })
            })
            .collect::<Result<Vec<_>, CardError>>()?;

        Ok(CardFace { header, slots })
    }

    /// Draws `face` into `rect`. When `rotated`, the card is drawn as usual
    /// and turned a half turn about the centre of `rect`.
    pub fn draw<C: PageCanvas + ?Sized>(&self, canvas: &mut C, face: &CardFace, rect: Rect, rotated: bool) {
        if rotated {
            canvas.save_state();
            canvas.rotate_about(rect.center(), 180.0);
            self.draw_upright(canvas, face, rect);
            canvas.restore_state();
        } else {
            self.draw_upright(canvas, face, rect);
        }
    }

    fn draw_upright<C: PageCanvas + ?Sized>(&self, canvas: &mut C, face: &CardFace, rect: Rect) {
        let cfg = self.config;
        let padding = cfg.padding.as_pt();

        canvas.stroke_rounded_rect(
            rect,
            cfg.corner_radius.as_pt(),
            cfg.border_width.as_pt(),
            Color::BLACK,
        );
        canvas.draw_text(
            &face.header,
            Point::new(rect.x + padding, rect.y + padding + cfg.header_font_size),
            FontKey::Bold,
            cfg.header_font_size,
            Color::BLACK,
        );

        let rows_top = rect.y + padding + cfg.header_height.as_pt();
        let slot_height = cfg.slot_height();
        for (slot, text) in face.slots.iter().enumerate() {
            let center_y = rows_top + (slot as f32 + 0.5) * slot_height;
            let badge = Rect::new(
                rect.x + padding,
                center_y - cfg.badge_height.as_pt() / 2.0,
                cfg.badge_width.as_pt(),
                cfg.badge_height.as_pt(),
            );
            self.draw_badge(canvas, badge, &text.badge, cfg.palette_color(slot));
            self.draw_lines(
                canvas,
                &text.lines,
                badge.right() + cfg.badge_margin.as_pt(),
                center_y,
            );
        }
    }

    fn draw_badge<C: PageCanvas + ?Sized>(&self, canvas: &mut C, bounds: Rect, label: &str, color: Color) {
        canvas.fill_ellipse(bounds, color);

        let size = self.config.badge_font_size;
        let width = self.fonts.bold.measure(label, size);
        let center = bounds.center();
        canvas.draw_text(
            label,
            Point::new(center.x - width / 2.0, center.y + size * CAP_HEIGHT / 2.0),
            FontKey::Bold,
            size,
            Color::WHITE,
        );
    }

    /// Draws the wrapped lines as a block centred vertically on `center_y`.
    fn draw_lines<C: PageCanvas + ?Sized>(&self, canvas: &mut C, lines: &[String], x: f32, center_y: f32) {
        let size = self.config.body_font_size;
        let advance = self.config.line_advance();
        let block_top = center_y - lines.len() as f32 * advance / 2.0;
        for (i, line) in lines.iter().enumerate() {
            let baseline = block_top + (i as f32 + 0.5) * advance + size * CAP_HEIGHT / 2.0;
            canvas.draw_text(line, Point::new(x, baseline), FontKey::Body, size, Color::BLACK);
        }
    }
}
