//! Card grid geometry.
//!
//! Slots are numbered in reading order: left to right, top to bottom. Row 0 is
//! the topmost row and column 0 the leftmost. Rectangles use the top-left page
//! origin.

use quizcards_types::{Rect, Size};

/// Row/column position of a slot on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotCoord {
    pub row: usize,
    pub col: usize,
}

/// The rectangular grid cards are placed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub page: Size,
    pub cols: usize,
    pub rows: usize,
    pub margin: f32,
    pub gutter_x: f32,
    pub gutter_y: f32,
}

impl GridSpec {
    pub fn slots(&self) -> usize {
        self.cols * self.rows
    }

    /// Extent of one cell: the page minus margins and gutters, shared evenly.
    pub fn cell_size(&self) -> Size {
        if self.cols == 0 || self.rows == 0 {
            return Size::zero();
        }
        let usable_w = self.page.width - 2.0 * self.margin - self.gutter_x * (self.cols - 1) as f32;
        let usable_h = self.page.height - 2.0 * self.margin - self.gutter_y * (self.rows - 1) as f32;
        Size::new(usable_w / self.cols as f32, usable_h / self.rows as f32)
    }

    pub fn slot_coords(&self, index: usize) -> Option<SlotCoord> {
        (index < self.slots()).then(|| SlotCoord {
            row: index / self.cols,
            col: index % self.cols,
        })
    }

    pub fn slot_index(&self, coord: SlotCoord) -> Option<usize> {
        (coord.row < self.rows && coord.col < self.cols).then(|| coord.row * self.cols + coord.col)
    }

    /// The rectangle of slot `index`, or `None` if the index is off the grid.
    pub fn slot_rect(&self, index: usize) -> Option<Rect> {
        let coord = self.slot_coords(index)?;
        let cell = self.cell_size();
        Some(Rect::new(
            self.margin + coord.col as f32 * (cell.width + self.gutter_x),
            self.margin + coord.row as f32 * (cell.height + self.gutter_y),
            cell.width,
            cell.height,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridSpec {
        GridSpec {
            page: Size::new(210.0, 300.0),
            cols: 2,
            rows: 4,
            margin: 10.0,
            gutter_x: 10.0,
            gutter_y: 20.0,
        }
    }

    #[test]
    fn cell_size_subtracts_margins_and_gutters() {
        // (210 - 20 - 10) / 2 = 90, (300 - 20 - 60) / 4 = 55
        assert_eq!(grid().cell_size(), Size::new(90.0, 55.0));
    }

    #[test]
    fn slots_follow_reading_order() {
        let g = grid();
        assert_eq!(g.slot_coords(0), Some(SlotCoord { row: 0, col: 0 }));
        assert_eq!(g.slot_coords(1), Some(SlotCoord { row: 0, col: 1 }));
        assert_eq!(g.slot_coords(2), Some(SlotCoord { row: 1, col: 0 }));
        assert_eq!(g.slot_coords(7), Some(SlotCoord { row: 3, col: 1 }));
        assert_eq!(g.slot_coords(8), None);
    }

    #[test]
    fn index_and_coords_round_trip() {
        let g = grid();
        for i in 0..g.slots() {
            let coord = g.slot_coords(i).unwrap();
            assert_eq!(g.slot_index(coord), Some(i));
        }
        assert_eq!(g.slot_index(SlotCoord { row: 4, col: 0 }), None);
        assert_eq!(g.slot_index(SlotCoord { row: 0, col: 2 }), None);
    }

    #[test]
    fn slot_rects_are_uniformly_spaced() {
        let g = grid();
        assert_eq!(g.slot_rect(0), Some(Rect::new(10.0, 10.0, 90.0, 55.0)));
        assert_eq!(g.slot_rect(1), Some(Rect::new(110.0, 10.0, 90.0, 55.0)));
        assert_eq!(g.slot_rect(2), Some(Rect::new(10.0, 85.0, 90.0, 55.0)));
        let last = g.slot_rect(7).unwrap();
        assert!((last.right() - 200.0).abs() < 1e-4);
        assert!((last.bottom() - 290.0).abs() < 1e-4);
        assert_eq!(g.slot_rect(8), None);
    }

    #[test]
    fn empty_grid_has_no_slots() {
        let g = GridSpec { cols: 0, ..grid() };
        assert_eq!(g.slots(), 0);
        assert_eq!(g.cell_size(), Size::zero());
        assert_eq!(g.slot_rect(0), None);
    }
}
