//! Imposition: which card goes in which sheet slot, on which side, and how.
//!
//! Back pages are laid out so that after duplex printing each card's answers
//! land behind its questions. For a long-edge flip the sheet turns over top to
//! bottom, so rows are mirrored and each card is given a half turn; for a
//! short-edge flip it turns over left to right, so columns are mirrored and
//! cards stay upright.

use crate::config::LayoutConfig;
use quizcards_layout::{GridSpec, SlotCoord};
use quizcards_types::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PrintMode {
    #[default]
    #[serde(rename = "duplex_long", alias = "duplex-long", alias = "long")]
    DuplexLongEdge,
    #[serde(rename = "duplex_short", alias = "duplex-short", alias = "short")]
    DuplexShortEdge,
    #[serde(rename = "single", alias = "single_sided", alias = "single-sided", alias = "simplex")]
    SingleSided,
}

impl PrintMode {
    pub fn is_duplex(self) -> bool {
        !matches!(self, PrintMode::SingleSided)
    }

    /// Whether cards on the back page are drawn with a half turn.
    pub fn rotates_back(self) -> bool {
        matches!(self, PrintMode::DuplexLongEdge)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PrintMode::DuplexLongEdge => "duplex_long",
            PrintMode::DuplexShortEdge => "duplex_short",
            PrintMode::SingleSided => "single",
        }
    }
}

impl fmt::Display for PrintMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrintMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "duplex_long" | "long" | "duplex_long_edge" | "duplex" => Ok(PrintMode::DuplexLongEdge),
            "duplex_short" | "short" | "duplex_short_edge" => Ok(PrintMode::DuplexShortEdge),
            "single" | "single_sided" | "simplex" => Ok(PrintMode::SingleSided),
            _ => Err(format!(
                "Unknown print mode '{}', expected duplex_long, duplex_short or single",
                s
            )),
        }
    }
}

/// The sheet slot that backs `slot` on the reverse side, or `None` when the
/// mode has no back page or `slot` is off the grid.
///
/// Applying the mapping twice gives back the original slot.
pub fn back_slot(mode: PrintMode, grid: &GridSpec, slot: usize) -> Option<usize> {
    let SlotCoord { row, col } = grid.slot_coords(slot)?;
    let mirrored = match mode {
        PrintMode::DuplexLongEdge => SlotCoord {
            row: grid.rows - 1 - row,
            col,
        },
        PrintMode::DuplexShortEdge => SlotCoord {
            row,
            col: grid.cols - 1 - col,
        },
        PrintMode::SingleSided => return None,
    };
    grid.slot_index(mirrored)
}

/// One card drawn at one sheet slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Index into the run's card list.
    pub card_index: usize,
    pub slot: usize,
    pub rect: Rect,
    pub rotated: bool,
}

/// One physical sheet: its front page and, when duplex, its back page.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub front: Vec<Placement>,
    pub back: Option<Vec<Placement>>,
}

pub struct DuplexComposer<'a> {
    config: &'a LayoutConfig,
    mode: PrintMode,
}

impl<'a> DuplexComposer<'a> {
    pub fn new(config: &'a LayoutConfig, mode: PrintMode) -> Self {
        Self { config, mode }
    }

    /// Batches `card_count` cards into sheets. The last sheet may be partly
    /// filled; its unused slots stay blank on both sides.
    pub fn compose(&self, card_count: usize) -> Vec<Sheet> {
        let grid = self.config.grid();
        let per_sheet = grid.slots();
        if per_sheet == 0 {
            return Vec::new();
        }
        let back_offset = (self.config.back_offset_x.as_pt(), self.config.back_offset_y.as_pt());

        (0..card_count)
            .step_by(per_sheet)
            .map(|first| {
                let batch = first..card_count.min(first + per_sheet);
                let front = batch
                    .clone()
                    .filter_map(|card_index| {
                        let slot = card_index - first;
                        Some(Placement {
                            card_index,
                            slot,
                            rect: grid.slot_rect(slot)?,
                            rotated: false,
                        })
                    })
                    .collect();

                let back = self.mode.is_duplex().then(|| {
                    batch
                        .filter_map(|card_index| {
                            let slot = back_slot(self.mode, &grid, card_index - first)?;
                            Some(Placement {
                                card_index,
                                slot,
                                rect: grid.slot_rect(slot)?.translate(back_offset.0, back_offset.1),
                                rotated: self.mode.rotates_back(),
                            })
                        })
                        .collect()
                });

                Sheet { front, back }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizcards_types::Length;

    fn grid() -> GridSpec {
        LayoutConfig::default().grid()
    }

    #[test]
    fn long_edge_mirrors_rows_and_keeps_columns() {
        let g = grid();
        // 2x4: slot 0 (row 0, col 0) backs onto slot 6 (row 3, col 0).
        assert_eq!(back_slot(PrintMode::DuplexLongEdge, &g, 0), Some(6));
        assert_eq!(back_slot(PrintMode::DuplexLongEdge, &g, 1), Some(7));
        assert_eq!(back_slot(PrintMode::DuplexLongEdge, &g, 3), Some(5));
    }

    #[test]
    fn short_edge_mirrors_columns_and_keeps_rows() {
        let g = grid();
        assert_eq!(back_slot(PrintMode::DuplexShortEdge, &g, 0), Some(1));
        assert_eq!(back_slot(PrintMode::DuplexShortEdge, &g, 4), Some(5));
    }

    #[test]
    fn back_mapping_is_an_involution() {
        for g in [grid(), GridSpec { cols: 3, rows: 5, ..grid() }] {
            for mode in [PrintMode::DuplexLongEdge, PrintMode::DuplexShortEdge] {
                for slot in 0..g.slots() {
                    let back = back_slot(mode, &g, slot).unwrap();
                    assert_eq!(back_slot(mode, &g, back), Some(slot));
                }
            }
        }
    }

    #[test]
    fn single_sided_and_off_grid_have_no_back() {
        let g = grid();
        assert_eq!(back_slot(PrintMode::SingleSided, &g, 0), None);
        assert_eq!(back_slot(PrintMode::DuplexLongEdge, &g, 8), None);
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!("duplex_long".parse::<PrintMode>(), Ok(PrintMode::DuplexLongEdge));
        assert_eq!("Duplex-Short".parse::<PrintMode>(), Ok(PrintMode::DuplexShortEdge));
        assert_eq!("single".parse::<PrintMode>(), Ok(PrintMode::SingleSided));
        assert!("sideways".parse::<PrintMode>().is_err());
        let mode: PrintMode = serde_json::from_str("\"duplex-long\"").unwrap();
        assert_eq!(mode, PrintMode::DuplexLongEdge);
        assert_eq!(serde_json::to_string(&PrintMode::SingleSided).unwrap(), "\"single\"");
    }

    #[test]
    fn nine_cards_make_two_sheets_with_a_partial_last() {
        let config = LayoutConfig::default();
        let sheets = DuplexComposer::new(&config, PrintMode::DuplexLongEdge).compose(9);
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].front.len(), 8);
        assert_eq!(sheets[1].front.len(), 1);

        let back = sheets[1].back.as_ref().unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].card_index, 8);
        assert_eq!(back[0].slot, 6);
        assert!(back[0].rotated);
        assert!(!sheets[1].front[0].rotated);
    }

    #[test]
    fn short_edge_backs_are_upright() {
        let config = LayoutConfig::default();
        let sheets = DuplexComposer::new(&config, PrintMode::DuplexShortEdge).compose(3);
        let back = sheets[0].back.as_ref().unwrap();
        assert!(back.iter().all(|p| !p.rotated));
        let slots: Vec<usize> = back.iter().map(|p| p.slot).collect();
        assert_eq!(slots, vec![1, 0, 3]);
    }

    #[test]
    fn single_sided_has_fronts_only() {
        let config = LayoutConfig::default();
        let sheets = DuplexComposer::new(&config, PrintMode::SingleSided).compose(17);
        assert_eq!(sheets.len(), 3);
        assert!(sheets.iter().all(|s| s.back.is_none()));
    }

    #[test]
    fn back_offsets_shift_every_back_card() {
        let config = LayoutConfig {
            back_offset_x: Length::pt(2.0),
            back_offset_y: Length::pt(-3.0),
            ..Default::default()
        };
        let grid = config.grid();
        let sheets = DuplexComposer::new(&config, PrintMode::DuplexLongEdge).compose(8);
        for placement in sheets[0].back.as_ref().unwrap() {
            let base = grid.slot_rect(placement.slot).unwrap();
            assert_eq!(placement.rect, base.translate(2.0, -3.0));
        }
        for placement in &sheets[0].front {
            assert_eq!(Some(placement.rect), grid.slot_rect(placement.slot));
        }
    }

    #[test]
    fn no_cards_no_sheets() {
        let config = LayoutConfig::default();
        assert!(DuplexComposer::new(&config, PrintMode::DuplexLongEdge).compose(0).is_empty());
    }
}
