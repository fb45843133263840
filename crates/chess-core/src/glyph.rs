//! Piece glyphs for the board grid.

use shakmaty::{Color, Piece, Role};

/// Unicode glyph for a piece. Fixed 12-entry table.
pub fn glyph(piece: Piece) -> char {
    match (piece.color, piece.role) {
        (Color::White, Role::King) => '♔',
        (Color::White, Role::Queen) => '♕',
        (Color::White, Role::Rook) => '♖',
        (Color::White, Role::Bishop) => '♗',
        (Color::White, Role::Knight) => '♘',
        (Color::White, Role::Pawn) => '♙',
        (Color::Black, Role::King) => '♚',
        (Color::Black, Role::Queen) => '♛',
        (Color::Black, Role::Rook) => '♜',
        (Color::Black, Role::Bishop) => '♝',
        (Color::Black, Role::Knight) => '♞',
        (Color::Black, Role::Pawn) => '♟',
    }
}

/// Glyph for a FEN piece letter (`K`, `q`, ...). Unknown symbols have none.
pub fn glyph_for_symbol(symbol: char) -> Option<char> {
    Piece::from_char(symbol).map(glyph)
}
