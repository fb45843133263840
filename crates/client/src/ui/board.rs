//! The 64-cell board grid and its renderer.

use chess_core::glyph::glyph_for_symbol;
use chess_core::{Placement, BOARD_CELLS};

/// One addressable cell. The index never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub index: usize,
    glyph: Option<char>,
}

impl Cell {
    pub fn glyph(&self) -> Option<char> {
        self.glyph
    }
}

#[derive(Debug, Clone)]
pub struct BoardGrid {
    cells: Vec<Cell>,
}

impl Default for BoardGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardGrid {
    pub fn new() -> Self {
        let cells = (0..BOARD_CELLS).map(|index| Cell { index, glyph: None }).collect();
        Self { cells }
    }

    /// Redraw from a FEN. All glyphs are cleared first; a position that
    /// cannot be parsed is logged and leaves the board blank.
    pub fn render(&mut self, position: &str) {
        self.clear();

        let placement = match Placement::parse(position) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(position, error = %e, "Could not draw position");
                return;
            }
        };

        for (index, symbol) in placement.occupied() {
            self.cells[index].glyph = glyph_for_symbol(symbol);
        }
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.glyph = None;
        }
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn glyph_at(&self, index: usize) -> Option<char> {
        self.cell(index).and_then(Cell::glyph)
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|c| c.glyph.is_some()).count()
    }

    /// Cells in screen order: row 0 is rank 8, column 0 is the a-file.
    pub fn screen_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(8).rev()
    }
}

/// Board index shown at a screen position.
pub fn index_at_screen(row: usize, col: usize) -> usize {
    col + 8 * (7 - row)
}
