//! Board-side helpers shared by the webchess client: square names, FEN
//! placement and piece glyphs.

pub mod glyph;
pub mod placement;
pub mod square;

pub use placement::{Placement, PlacementError};
pub use square::{algebraic_to_index, index_to_algebraic, CoordError, BOARD_CELLS};
