//! Two-click move entry: pick an origin, then pick a destination.
//!
//! Every selection gets a fresh token. The legal-move response for a
//! selection carries that token back and is dropped when the user has moved
//! on, so a late answer can never paint hints for the wrong piece.

use chess_core::algebraic_to_index;
use shakmaty::Role;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Unselected,
    Selected {
        origin: usize,
        /// Server move strings for `origin`, empty until the fetch returns
        moves: Vec<String>,
        token: u64,
    },
}

/// What a click on a cell turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Click {
    /// New origin; legal moves must be fetched under `token`.
    Select { origin: usize, token: u64 },
    /// Legal destination hit; send this move.
    Submit { uci: String },
    /// Anything else while selected.
    Deselect,
}

#[derive(Debug, Default)]
pub struct Selector {
    selection: Selection,
    last_token: u64,
}

impl Selector {
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn origin(&self) -> Option<usize> {
        match self.selection {
            Selection::Selected { origin, .. } => Some(origin),
            Selection::Unselected => None,
        }
    }

    /// Destination cells of the current selection, possibly repeated.
    pub fn destinations(&self) -> Vec<usize> {
        match &self.selection {
            Selection::Selected { moves, .. } => {
                moves.iter().filter_map(|m| destination_of(m)).collect()
            }
            Selection::Unselected => Vec::new(),
        }
    }

    /// Session gating happens before this is called.
    pub fn click(&mut self, index: usize, promotion: Role) -> Click {
        match std::mem::take(&mut self.selection) {
            Selection::Unselected => {
                self.last_token += 1;
                let token = self.last_token;
                self.selection = Selection::Selected {
                    origin: index,
                    moves: Vec::new(),
                    token,
                };
                Click::Select {
                    origin: index,
                    token,
                }
            }
            Selection::Selected { moves, .. } => match choose_move(&moves, index, promotion) {
                Some(uci) => Click::Submit {
                    uci: uci.to_string(),
                },
                None => Click::Deselect,
            },
        }
    }

    /// Store the fetched moves if `token` still names the live selection.
    /// Returns the destinations to hint, or None for a stale response.
    pub fn apply_moves(&mut self, token: u64, fetched: Vec<String>) -> Option<Vec<usize>> {
        match &mut self.selection {
            Selection::Selected {
                token: current,
                moves,
                ..
            } if *current == token => {
                *moves = fetched;
                Some(self.destinations())
            }
            _ => {
                tracing::debug!(token, "Dropping stale legal-move response");
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.selection = Selection::Unselected;
    }
}

/// Destination cell of a move string like `e2e4` or `e7e8q`.
pub fn destination_of(uci: &str) -> Option<usize> {
    uci.get(2..4).and_then(|sq| algebraic_to_index(sq).ok())
}

/// Pick the move to send for a click on `dest`. A plain four-character move
/// wins; among promotions the preferred piece wins; otherwise the first one.
fn choose_move(moves: &[String], dest: usize, promotion: Role) -> Option<&str> {
    let candidates: Vec<&str> = moves
        .iter()
        .map(String::as_str)
        .filter(|m| destination_of(m) == Some(dest))
        .collect();

    candidates
        .iter()
        .find(|m| m.len() == 4)
        .or_else(|| {
            candidates
                .iter()
                .find(|m| m.chars().nth(4) == Some(promotion.char()))
        })
        .or_else(|| candidates.first())
        .copied()
}
