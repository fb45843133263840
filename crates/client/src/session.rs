//! Game lifecycle: Idle <-> Active.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown difficulty {s:?} (easy, medium, hard)"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active,
}

/// Owns the lifecycle flag, the player name and the difficulty.
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    player: Option<String>,
    difficulty: Difficulty,
}

impl Session {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            state: SessionState::Idle,
            player: None,
            difficulty,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn player(&self) -> Option<&str> {
        self.player.as_deref()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Difficulty can only be edited between games.
    pub fn difficulty_locked(&self) -> bool {
        self.is_active()
    }

    /// Blank names are refused with an alert. Otherwise the session goes
    /// Active at once and `/start` is issued; the board refresh follows the
    /// server's answer.
    pub fn start(&mut self, name: &str) -> Vec<Command> {
        let name = name.trim();
        if name.is_empty() {
            return vec![Command::Alert("Please enter your name".to_string())];
        }

        tracing::info!(player = name, difficulty = %self.difficulty, "Starting game");
        self.player = Some(name.to_string());
        self.state = SessionState::Active;
        vec![Command::StartGame {
            player: name.to_string(),
        }]
    }

    /// First half of ending a game: ask before touching anything.
    pub fn request_end(&self) -> Vec<Command> {
        match self.state {
            SessionState::Idle => vec![Command::Alert("No game in progress".to_string())],
            SessionState::Active => {
                vec![Command::Confirm("End the current game?".to_string())]
            }
        }
    }

    pub fn confirm_end(&mut self, confirmed: bool) -> Vec<Command> {
        if !confirmed || self.state == SessionState::Idle {
            return Vec::new();
        }

        tracing::info!("Game ended by player");
        self.state = SessionState::Idle;
        vec![Command::EndGame]
    }

    /// The server reported the game over; no confirmation involved.
    pub fn finish(&mut self, result: &str) -> Vec<Command> {
        tracing::info!(result, "Game finished");
        self.state = SessionState::Idle;
        vec![
            Command::Alert(format!("Game over!\n{}", result.trim_end())),
            Command::FetchState,
            Command::FetchLogs,
        ]
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Vec<Command> {
        if self.difficulty_locked() {
            return vec![Command::Alert(
                "Difficulty can only be changed before a game starts".to_string(),
            )];
        }
        self.difficulty = difficulty;
        Vec::new()
    }
}
