//! Game log text shown under the board.

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Default)]
pub struct LogPanel {
    text: String,
    updated_at: Option<DateTime<Local>>,
}

impl LogPanel {
    /// Full replace; no diffing against the previous content.
    pub fn replace(&mut self, text: String) {
        self.text = text;
        self.updated_at = Some(Local::now());
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn updated_at(&self) -> Option<DateTime<Local>> {
        self.updated_at
    }

    /// The last `height` lines, i.e. the panel scrolled to the bottom.
    pub fn tail(&self, height: usize) -> Vec<&str> {
        let lines: Vec<&str> = self.text.lines().collect();
        let start = lines.len().saturating_sub(height);
        lines[start..].to_vec()
    }
}
