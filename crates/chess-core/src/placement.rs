//! Piece placement parsed from the first field of a FEN string.
//!
//! Only the layout is read; side to move, castling rights and counters are
//! ignored. Nothing here knows the rules of chess.

use crate::square::BOARD_CELLS;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("position string is empty")]
    Empty,

    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank row {row} covers {files} files instead of 8")]
    RankWidth { row: usize, files: usize },
}

/// Symbols on each of the 64 cells, indexed `file + 8 * rank`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    cells: [Option<char>; BOARD_CELLS],
}

impl Placement {
    /// Parse a FEN (or bare placement field). Rows are given rank 8 first,
    /// so row `k` lands on rank `7 - k`. A digit skips that many files and
    /// any other symbol occupies one file, whether or not it names a piece.
    pub fn parse(fen: &str) -> Result<Self, PlacementError> {
        let field = fen.split_whitespace().next().ok_or(PlacementError::Empty)?;

        let rows: Vec<&str> = field.split('/').collect();
        if rows.len() != 8 {
            return Err(PlacementError::RankCount(rows.len()));
        }

        let mut cells = [None; BOARD_CELLS];
        for (row, symbols) in rows.iter().enumerate() {
            let rank = 7 - row;
            let mut file = 0usize;
            for c in symbols.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                if file >= 8 {
                    return Err(PlacementError::RankWidth { row, files: file + 1 });
                }
                cells[file + 8 * rank] = Some(c);
                file += 1;
            }
            if file != 8 {
                return Err(PlacementError::RankWidth { row, files: file });
            }
        }

        Ok(Self { cells })
    }

    pub fn symbol_at(&self, index: usize) -> Option<char> {
        self.cells.get(index).copied().flatten()
    }

    /// Occupied cells as `(index, symbol)`, lowest index first.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, char)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|c| (i, c)))
    }
}
