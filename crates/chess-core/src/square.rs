//! Linear board index <-> algebraic square name.
//!
//! Index layout is `file + 8 * rank` with rank 0 being rank 1, which is the
//! same layout `shakmaty::Square` uses internally.

use shakmaty::{File, Rank, Square};

/// Number of cells on the board.
pub const BOARD_CELLS: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordError {
    #[error("board index {0} is outside 0..64")]
    IndexOutOfRange(usize),

    #[error("invalid square name: {0:?}")]
    InvalidSquare(String),
}

/// Square for a linear index.
pub fn square_at(index: usize) -> Result<Square, CoordError> {
    if index >= BOARD_CELLS {
        return Err(CoordError::IndexOutOfRange(index));
    }
    Ok(Square::new(index as u32))
}

/// `12` -> `"e2"`.
pub fn index_to_algebraic(index: usize) -> Result<String, CoordError> {
    square_at(index).map(|sq| sq.to_string())
}

/// `"e2"` -> `12`. Anything that is not exactly a lower-case file letter
/// followed by a rank digit is rejected.
pub fn algebraic_to_index(name: &str) -> Result<usize, CoordError> {
    match name.as_bytes() {
        &[file @ b'a'..=b'h', rank @ b'1'..=b'8'] => {
            let sq = Square::from_coords(
                File::new(u32::from(file - b'a')),
                Rank::new(u32::from(rank - b'1')),
            );
            Ok(sq as usize)
        }
        _ => Err(CoordError::InvalidSquare(name.to_string())),
    }
}
