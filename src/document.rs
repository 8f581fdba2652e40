//! Page sequencing: sheets in order, each front followed by its back.

use crate::composer::{DuplexComposer, Placement, PrintMode};
use crate::config::LayoutConfig;
use crate::error::PipelineError;
use crate::model::Card;
use crate::renderer::{CardFace, CardFonts, CardRenderer, Face};
use quizcards_render_core::{DocumentInfo, DocumentRenderer, FontKey, PageCanvas};

/// Fully laid-out faces of one card.
struct LaidOutCard {
    front: CardFace,
    back: Option<CardFace>,
}

pub struct DocumentWriter<'a> {
    config: &'a LayoutConfig,
    fonts: &'a CardFonts,
    mode: PrintMode,
    title: &'a str,
}

impl<'a> DocumentWriter<'a> {
    pub fn new(config: &'a LayoutConfig, fonts: &'a CardFonts, mode: PrintMode, title: &'a str) -> Self {
        Self {
            config,
            fonts,
            mode,
            title,
        }
    }

    /// Number of pages `card_count` cards produce in this writer's mode.
    pub fn page_count(&self, card_count: usize) -> usize {
        let sheets = card_count.div_ceil(self.config.cards_per_sheet().max(1));
        if self.mode.is_duplex() { 2 * sheets } else { sheets }
    }

    /// Renders `cards` through `renderer` and returns its output.
    ///
    /// Every face is laid out before the document is begun, so a card that
    /// does not fit leaves the renderer untouched.
    pub fn write<R: DocumentRenderer>(&self, cards: &[Card], mut renderer: R) -> Result<R::Output, PipelineError> {
        let card_renderer = CardRenderer::new(self.config, self.fonts);
        let laid_out = cards
            .iter()
            .map(|card| {
                let front = card_renderer.layout(card, Face::Questions)?;
                // Answers must fit in every mode; they are only kept when printed.
                let back = card_renderer.layout(card, Face::Answers)?;
                Ok(LaidOutCard {
                    front,
                    back: self.mode.is_duplex().then_some(back),
                })
            })
            .collect::<Result<Vec<_>, PipelineError>>()?;

        let sheets = DuplexComposer::new(self.config, self.mode).compose(cards.len());
        let per_sheet = self.config.cards_per_sheet();
        if let Some(last) = sheets.last()
            && last.front.len() < per_sheet
        {
            log::warn!(
                "Last sheet holds {} of {} cards; the remaining slots are left blank",
                last.front.len(),
                per_sheet
            );
        }

        renderer.begin_document(&DocumentInfo {
            title: self.title.to_string(),
            producer: concat!("quizcards ", env!("CARGO_PKG_VERSION")).to_string(),
            body_font: self.fonts.source(FontKey::Body),
            bold_font: self.fonts.source(FontKey::Bold),
        })?;

        let page_size = self.config.page();
        for (sheet_number, sheet) in sheets.iter().enumerate() {
            let mut page = renderer.begin_page(page_size)?;
            self.draw_side(&card_renderer, &mut page, &sheet.front, |card| Some(&card.front), &laid_out);
            renderer.end_page(page)?;

            if let Some(back) = &sheet.back {
                let mut page = renderer.begin_page(page_size)?;
                self.draw_side(&card_renderer, &mut page, back, |card| card.back.as_ref(), &laid_out);
                renderer.end_page(page)?;
            }
            log::debug!("Sheet {}: {} card(s)", sheet_number + 1, sheet.front.len());
        }

        log::info!(
            "Rendered {} card(s) on {} sheet(s), {} page(s), mode {}",
            cards.len(),
            sheets.len(),
            self.page_count(cards.len()),
            self.mode
        );
        Ok(renderer.finish()?)
    }

    fn draw_side<C, F>(
        &self,
        card_renderer: &CardRenderer<'_>,
        page: &mut C,
        placements: &[Placement],
        face_of: F,
        laid_out: &[LaidOutCard],
    ) where
        C: PageCanvas,
        F: Fn(&LaidOutCard) -> Option<&CardFace>,
    {
        for placement in placements {
            if let Some(face) = laid_out.get(placement.card_index).and_then(&face_of) {
                card_renderer.draw(page, face, placement.rect, placement.rotated);
            }
        }
    }
}
