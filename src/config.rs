//! Layout parameters for a card run.
//!
//! Every field has a default, so a JSON file only needs the values it
//! changes. Lengths are points, or strings with a unit (`"10mm"`).

use crate::error::ConfigError;
use crate::model::{Field, QUESTIONS_PER_CARD};
use quizcards_layout::GridSpec;
use quizcards_types::{Color, Length, PageSize, Size};
use serde::{Deserialize, Serialize};

/// Maximum characters per field, counted after cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldLimits {
    pub level: usize,
    pub subject: usize,
    pub question: usize,
    pub answer: usize,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            level: 20,
            subject: 3,
            question: 170,
            answer: 120,
        }
    }
}

impl FieldLimits {
    pub fn limit(&self, field: Field) -> usize {
        match field {
            Field::Level => self.level,
            Field::Subject => self.subject,
            Field::Question => self.question,
            Field::Answer => self.answer,
        }
    }
}

pub fn default_palette() -> Vec<Color> {
    vec![
        Color::rgb(0xFF, 0xD7, 0x00),
        Color::rgb(0x22, 0x8B, 0x22),
        Color::rgb(0xFF, 0x69, 0xB4),
        Color::rgb(0x8B, 0x45, 0x13),
        Color::rgb(0x00, 0x66, 0xCC),
        Color::rgb(0xFF, 0x8C, 0x00),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_size: PageSize,
    pub cols: usize,
    pub rows: usize,
    pub margin: Length,
    pub gutter_x: Length,
    pub gutter_y: Length,
    pub padding: Length,
    pub header_height: Length,
    pub corner_radius: Length,
    pub border_width: Length,
    pub badge_width: Length,
    pub badge_height: Length,
    pub badge_margin: Length,
    pub body_font_size: f32,
    pub header_font_size: f32,
    pub badge_font_size: f32,
    /// Line advance as a multiple of the body font size.
    pub line_height: f32,
    pub limits: FieldLimits,
    /// Shift applied to every back-page card, for printers that misregister
    /// the reverse side. Positive `y` moves down the page.
    pub back_offset_x: Length,
    pub back_offset_y: Length,
    /// Badge colors by question slot.
    pub palette: Vec<Color>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            cols: 2,
            rows: 4,
            margin: Length::mm(10.0),
            gutter_x: Length::mm(4.0),
            gutter_y: Length::mm(4.0),
            padding: Length::mm(5.0),
            header_height: Length::mm(8.0),
            corner_radius: Length::mm(3.0),
            border_width: Length::pt(1.0),
            badge_width: Length::mm(10.0),
            badge_height: Length::mm(6.0),
            badge_margin: Length::mm(2.0),
            body_font_size: 9.0,
            header_font_size: 10.0,
            badge_font_size: 7.0,
            line_height: 1.2,
            limits: FieldLimits::default(),
            back_offset_x: Length::pt(0.0),
            back_offset_y: Length::pt(0.0),
            palette: default_palette(),
        }
    }
}

impl LayoutConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn page(&self) -> Size {
        let (width, height) = self.page_size.dimensions_pt();
        Size::new(width, height)
    }

    pub fn grid(&self) -> GridSpec {
        GridSpec {
            page: self.page(),
            cols: self.cols,
            rows: self.rows,
            margin: self.margin.as_pt(),
            gutter_x: self.gutter_x.as_pt(),
            gutter_y: self.gutter_y.as_pt(),
        }
    }

    pub fn cards_per_sheet(&self) -> usize {
        self.cols * self.rows
    }

    pub fn card_size(&self) -> Size {
        self.grid().cell_size()
    }

    /// Width available to question and answer text beside the badges.
    pub fn text_width(&self) -> f32 {
        self.card_size().width
            - 2.0 * self.padding.as_pt()
            - self.badge_width.as_pt()
            - self.badge_margin.as_pt()
    }

    /// Height of one of the six badge rows below the header.
    pub fn slot_height(&self) -> f32 {
        (self.card_size().height - 2.0 * self.padding.as_pt() - self.header_height.as_pt())
            / QUESTIONS_PER_CARD as f32
    }

    pub fn line_advance(&self) -> f32 {
        self.body_font_size * self.line_height
    }

    pub fn palette_color(&self, slot: usize) -> Color {
        self.palette.get(slot).copied().unwrap_or(Color::BLACK)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyGrid {
                cols: self.cols,
                rows: self.rows,
            });
        }
        if self.palette.len() != QUESTIONS_PER_CARD {
            return Err(ConfigError::PaletteSize(self.palette.len()));
        }

        let page = self.page();
        for (name, value) in [
            ("page width", page.width),
            ("page height", page.height),
            ("body_font_size", self.body_font_size),
            ("header_font_size", self.header_font_size),
            ("badge_font_size", self.badge_font_size),
            ("line_height", self.line_height),
            ("badge_width", self.badge_width.as_pt()),
            ("badge_height", self.badge_height.as_pt()),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        for (name, value) in [
            ("margin", self.margin.as_pt()),
            ("gutter_x", self.gutter_x.as_pt()),
            ("gutter_y", self.gutter_y.as_pt()),
            ("padding", self.padding.as_pt()),
            ("header_height", self.header_height.as_pt()),
            ("corner_radius", self.corner_radius.as_pt()),
            ("border_width", self.border_width.as_pt()),
            ("badge_margin", self.badge_margin.as_pt()),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }

        if self.card_size().is_empty() {
            return Err(ConfigError::NoRoom("the card grid"));
        }
        if self.text_width() <= 0.0 {
            return Err(ConfigError::NoRoom("question text beside the badges"));
        }
        if self.slot_height() <= 0.0 {
            return Err(ConfigError::NoRoom("the badge rows below the header"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizcards_types::mm_to_pt;

    #[test]
    fn defaults_are_valid_and_give_eight_cards() {
        let config = LayoutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cards_per_sheet(), 8);
        assert_eq!(config.palette_color(0), Color::rgb(0xFF, 0xD7, 0x00));
    }

    #[test]
    fn text_width_subtracts_padding_and_badge() {
        let config = LayoutConfig::default();
        let expected = config.card_size().width - mm_to_pt(10.0 + 10.0 + 2.0);
        assert!((config.text_width() - expected).abs() < 1e-3);
    }

    #[test]
    fn json_overrides_only_named_fields() {
        let config = LayoutConfig::from_json(
            r##"{"cols": 3, "margin": "5mm", "back_offset_y": 1.5, "palette": ["#000", "#111", "#222", "#333", "#444", "#555"]}"##,
        )
        .unwrap();
        assert_eq!(config.cols, 3);
        assert_eq!(config.rows, 4);
        assert!((config.margin.as_pt() - mm_to_pt(5.0)).abs() < 1e-4);
        assert_eq!(config.back_offset_y, Length::pt(1.5));
        assert_eq!(config.palette[1], Color::gray(0x11));
        assert_eq!(config.limits, FieldLimits::default());
    }

    #[test]
    fn rejects_bad_grids_and_palettes() {
        let config = LayoutConfig {
            cols: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyGrid { cols: 0, rows: 4 }));

        let config = LayoutConfig {
            palette: default_palette()[..5].to_vec(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::PaletteSize(5)));
    }

    #[test]
    fn rejects_geometry_without_room_for_text() {
        let config = LayoutConfig {
            cols: 12,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoRoom(_))));

        let config = LayoutConfig {
            body_font_size: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { name: "body_font_size", .. })
        ));
    }
}
