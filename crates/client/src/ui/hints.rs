//! Destination markers drawn over the board.

use chess_core::BOARD_CELLS;

#[derive(Debug, Clone)]
pub struct HintOverlay {
    marked: [bool; BOARD_CELLS],
}

impl Default for HintOverlay {
    fn default() -> Self {
        Self {
            marked: [false; BOARD_CELLS],
        }
    }
}

impl HintOverlay {
    /// Replace the current markers. Repeated destinations get one marker.
    pub fn show_hints<I>(&mut self, destinations: I)
    where
        I: IntoIterator<Item = usize>,
    {
        self.clear_hints();
        for index in destinations {
            if let Some(slot) = self.marked.get_mut(index) {
                *slot = true;
            }
        }
    }

    /// Returns how many markers were removed; zero is fine.
    pub fn clear_hints(&mut self) -> usize {
        let removed = self.count();
        self.marked = [false; BOARD_CELLS];
        removed
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.marked.get(index).copied().unwrap_or(false)
    }

    pub fn count(&self) -> usize {
        self.marked.iter().filter(|m| **m).count()
    }
}
