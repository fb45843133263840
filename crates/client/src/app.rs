//! Application state and its transition function.
//!
//! `App::handle` never performs I/O. It updates state and returns the
//! commands the runtime has to carry out; completed requests come back in
//! as new events.

use chess_core::index_to_algebraic;
use shakmaty::Role;

use crate::clients::{GameState, MoveOutcome};
use crate::config::Config;
use crate::selection::{Click, Selector};
use crate::session::{Difficulty, Session, SessionState};
use crate::ui::board::BoardGrid;
use crate::ui::hints::HintOverlay;
use crate::ui::log_panel::LogPanel;

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    StartGame {
        player: String,
    },
    EndGame,
    FetchState,
    FetchValidMoves {
        square: String,
        token: u64,
    },
    SubmitMove {
        uci: String,
        difficulty: Difficulty,
        player: String,
    },
    FetchLogs,
    /// Blocking message for the user.
    Alert(String),
    /// Yes/no question; the answer comes back as `Event::EndConfirmed`.
    Confirm(String),
}

/// User input and request completions.
#[derive(Debug, Clone)]
pub enum Event {
    StartRequested { name: String },
    EndRequested,
    EndConfirmed(bool),
    DifficultyChanged(Difficulty),
    PromotionChanged(Role),
    CellClicked(usize),
    RefreshLogs,

    GameStarted,
    GameEnded,
    StateLoaded(GameState),
    MovesLoaded { token: u64, moves: Vec<String> },
    MoveResolved(MoveOutcome),
    LogsLoaded(String),
    RequestFailed { endpoint: &'static str, error: String },
}

#[derive(Debug)]
pub struct App {
    session: Session,
    selector: Selector,
    board: BoardGrid,
    hints: HintOverlay,
    log: LogPanel,
    promotion: Role,
    default_player: Option<String>,
    turn: Option<String>,
    game_over: bool,
    status: Option<String>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            session: Session::new(config.difficulty),
            selector: Selector::default(),
            board: BoardGrid::new(),
            hints: HintOverlay::default(),
            log: LogPanel::default(),
            promotion: Role::Queen,
            default_player: config.player.clone(),
            turn: None,
            game_over: false,
            status: None,
        }
    }

    /// Work to do once at load: draw the board and fill the log.
    pub fn boot(&self) -> Vec<Command> {
        vec![Command::FetchState, Command::FetchLogs]
    }

    pub fn handle(&mut self, event: Event) -> Vec<Command> {
        match event {
            Event::StartRequested { name } => {
                let name = if name.trim().is_empty() {
                    self.default_player.clone().unwrap_or_default()
                } else {
                    name
                };
                let cmds = self.session.start(&name);
                if self.session.is_active() {
                    self.clear_selection();
                    self.status = None;
                }
                cmds
            }
            Event::EndRequested => self.session.request_end(),
            Event::EndConfirmed(confirmed) => {
                let cmds = self.session.confirm_end(confirmed);
                if !cmds.is_empty() {
                    self.clear_selection();
                }
                cmds
            }
            Event::DifficultyChanged(difficulty) => {
                let cmds = self.session.set_difficulty(difficulty);
                if cmds.is_empty() {
                    self.status = Some(format!("Difficulty set to {difficulty}"));
                }
                cmds
            }
            Event::PromotionChanged(role) => {
                self.promotion = role;
                self.status = Some(format!("Pawns will promote to {role:?}"));
                Vec::new()
            }
            Event::CellClicked(index) => self.click(index),
            Event::RefreshLogs => vec![Command::FetchLogs],

            Event::GameStarted => vec![Command::FetchState],
            Event::GameEnded => vec![Command::FetchState, Command::FetchLogs],
            Event::StateLoaded(state) => {
                self.board.render(&state.fen);
                self.turn = state.turn;
                self.game_over = state.game_over;
                Vec::new()
            }
            Event::MovesLoaded { token, moves } => {
                if let Some(destinations) = self.selector.apply_moves(token, moves) {
                    self.hints.show_hints(destinations);
                }
                Vec::new()
            }
            Event::MoveResolved(outcome) => self.move_resolved(outcome),
            Event::LogsLoaded(text) => {
                self.log.replace(text);
                Vec::new()
            }
            Event::RequestFailed { endpoint, error } => {
                tracing::warn!(endpoint, error = %error, "Request failed");
                self.status = Some(format!("Request to {endpoint} failed: {error}"));
                // The server may have changed state anyway; redraw from it.
                match endpoint {
                    "/start" => vec![Command::FetchState],
                    "/end" => vec![Command::FetchState, Command::FetchLogs],
                    _ => Vec::new(),
                }
            }
        }
    }

    fn click(&mut self, index: usize) -> Vec<Command> {
        if !self.session.is_active() {
            tracing::debug!(index, "Click ignored, no game running");
            return Vec::new();
        }
        let square = match index_to_algebraic(index) {
            Ok(sq) => sq,
            Err(e) => {
                tracing::warn!(error = %e, "Click outside the board");
                return Vec::new();
            }
        };

        match self.selector.click(index, self.promotion) {
            Click::Select { token, .. } => {
                self.hints.clear_hints();
                vec![Command::FetchValidMoves { square, token }]
            }
            Click::Submit { uci } => {
                self.hints.clear_hints();
                vec![Command::SubmitMove {
                    uci,
                    difficulty: self.session.difficulty(),
                    player: self.session.player().unwrap_or_default().to_string(),
                }]
            }
            Click::Deselect => {
                self.hints.clear_hints();
                Vec::new()
            }
        }
    }

    fn move_resolved(&mut self, outcome: MoveOutcome) -> Vec<Command> {
        match outcome {
            MoveOutcome::Finished { result } => {
                self.clear_selection();
                self.status = None;
                self.session.finish(&result)
            }
            MoveOutcome::Ok { ai } => {
                self.status = ai.map(|mv| format!("Computer played {mv}"));
                vec![Command::FetchState]
            }
            MoveOutcome::Illegal => {
                self.status = Some("Illegal move".to_string());
                vec![Command::FetchState]
            }
            MoveOutcome::Rejected { message } => {
                self.status = Some(message);
                vec![Command::FetchState]
            }
        }
    }

    fn clear_selection(&mut self) {
        self.selector.clear();
        self.hints.clear_hints();
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn board(&self) -> &BoardGrid {
        &self.board
    }

    pub fn hints(&self) -> &HintOverlay {
        &self.hints
    }

    pub fn log(&self) -> &LogPanel {
        &self.log
    }

    pub fn promotion(&self) -> Role {
        self.promotion
    }

    pub fn turn(&self) -> Option<&str> {
        self.turn.as_deref()
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Selection;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn app() -> App {
        let config = Config::from_lookup(|_| None).unwrap();
        App::new(&config)
    }

    fn started() -> App {
        let mut app = app();
        app.handle(Event::StartRequested {
            name: "Alice".to_string(),
        });
        app
    }

    #[test]
    fn test_boot_loads_board_and_log() {
        assert_eq!(app().boot(), vec![Command::FetchState, Command::FetchLogs]);
    }

    #[test]
    fn test_clicks_ignored_while_idle() {
        let mut app = app();
        for index in [0, 12, 63] {
            assert!(app.handle(Event::CellClicked(index)).is_empty());
        }
        assert_eq!(app.selector().selection(), &Selection::Unselected);
    }

    #[test]
    fn test_start_uses_default_player() {
        let config = Config::from_lookup(|key| {
            (key == "WEBCHESS_PLAYER").then(|| "Dana".to_string())
        })
        .unwrap();
        let mut app = App::new(&config);
        let cmds = app.handle(Event::StartRequested {
            name: String::new(),
        });
        assert_eq!(
            cmds,
            vec![Command::StartGame {
                player: "Dana".to_string()
            }]
        );
    }

    #[test]
    fn test_start_then_refresh_board() {
        let mut app = app();
        let cmds = app.handle(Event::StartRequested {
            name: "Alice".to_string(),
        });
        assert_eq!(
            cmds,
            vec![Command::StartGame {
                player: "Alice".to_string()
            }]
        );
        assert_eq!(app.session_state(), SessionState::Active);
        assert!(app.session().difficulty_locked());
        assert_eq!(app.handle(Event::GameStarted), vec![Command::FetchState]);
    }

    #[test]
    fn test_move_cycle() {
        let mut app = started();
        app.handle(Event::StateLoaded(GameState {
            fen: START.to_string(),
            turn: Some("white".to_string()),
            game_over: false,
            player: Some("Alice".to_string()),
        }));
        assert_eq!(app.board().piece_count(), 32);

        let cmds = app.handle(Event::CellClicked(12));
        let token = match cmds.as_slice() {
            [Command::FetchValidMoves { square, token }] => {
                assert_eq!(square, "e2");
                *token
            }
            other => panic!("unexpected {other:?}"),
        };

        app.handle(Event::MovesLoaded {
            token,
            moves: vec!["e2e3".to_string(), "e2e4".to_string()],
        });
        assert_eq!(app.hints().count(), 2);
        assert!(app.hints().is_marked(28));

        let cmds = app.handle(Event::CellClicked(28));
        assert_eq!(
            cmds,
            vec![Command::SubmitMove {
                uci: "e2e4".to_string(),
                difficulty: Difficulty::Medium,
                player: "Alice".to_string(),
            }]
        );
        assert_eq!(app.hints().count(), 0);
        assert_eq!(app.selector().selection(), &Selection::Unselected);

        let cmds = app.handle(Event::MoveResolved(MoveOutcome::Ok {
            ai: Some("e7e5".to_string()),
        }));
        assert_eq!(cmds, vec![Command::FetchState]);
        assert_eq!(app.status(), Some("Computer played e7e5"));
        assert_eq!(app.session_state(), SessionState::Active);
    }

    #[test]
    fn test_deselect_clears_hints() {
        let mut app = started();
        let token = match app.handle(Event::CellClicked(6)).as_slice() {
            [Command::FetchValidMoves { token, .. }] => *token,
            other => panic!("unexpected {other:?}"),
        };
        app.handle(Event::MovesLoaded {
            token,
            moves: vec!["g1f3".to_string(), "g1h3".to_string()],
        });
        assert_eq!(app.hints().count(), 2);

        assert!(app.handle(Event::CellClicked(36)).is_empty());
        assert_eq!(app.hints().count(), 0);
        assert_eq!(app.selector().origin(), None);
    }

    #[test]
    fn test_late_moves_for_old_selection_are_ignored() {
        let mut app = started();
        let old = match app.handle(Event::CellClicked(12)).as_slice() {
            [Command::FetchValidMoves { token, .. }] => *token,
            other => panic!("unexpected {other:?}"),
        };
        app.handle(Event::CellClicked(0));
        app.handle(Event::CellClicked(6));

        app.handle(Event::MovesLoaded {
            token: old,
            moves: vec!["e2e4".to_string()],
        });
        assert_eq!(app.hints().count(), 0);
        assert_eq!(app.selector().origin(), Some(6));
    }

    #[test]
    fn test_finished_game_goes_idle() {
        let mut app = started();
        let cmds = app.handle(Event::MoveResolved(MoveOutcome::Finished {
            result: "White wins".to_string(),
        }));
        assert!(matches!(&cmds[0], Command::Alert(text) if text.contains("White wins")));
        assert!(cmds.contains(&Command::FetchLogs));
        assert_eq!(app.session_state(), SessionState::Idle);
        assert!(!app.session().difficulty_locked());
    }

    #[test]
    fn test_end_flow() {
        let mut app = started();
        assert!(matches!(
            app.handle(Event::EndRequested).as_slice(),
            [Command::Confirm(_)]
        ));
        assert!(app.handle(Event::EndConfirmed(false)).is_empty());
        assert_eq!(app.session_state(), SessionState::Active);

        assert_eq!(app.handle(Event::EndConfirmed(true)), vec![Command::EndGame]);
        assert_eq!(app.session_state(), SessionState::Idle);
        assert_eq!(
            app.handle(Event::GameEnded),
            vec![Command::FetchState, Command::FetchLogs]
        );
    }

    #[test]
    fn test_illegal_and_failed_requests_show_status() {
        let mut app = started();
        assert_eq!(
            app.handle(Event::MoveResolved(MoveOutcome::Illegal)),
            vec![Command::FetchState]
        );
        assert_eq!(app.status(), Some("Illegal move"));

        app.handle(Event::RequestFailed {
            endpoint: "/logs",
            error: "connection refused".to_string(),
        });
        assert!(app.status().unwrap().contains("/logs"));
        assert_eq!(app.session_state(), SessionState::Active);
    }

    #[test]
    fn test_failed_start_or_end_still_refreshes() {
        let mut app = started();
        assert_eq!(
            app.handle(Event::RequestFailed {
                endpoint: "/start",
                error: "connection refused".to_string(),
            }),
            vec![Command::FetchState]
        );
        assert_eq!(
            app.handle(Event::RequestFailed {
                endpoint: "/end",
                error: "500 Internal Server Error".to_string(),
            }),
            vec![Command::FetchState, Command::FetchLogs]
        );
        assert!(app
            .handle(Event::RequestFailed {
                endpoint: "/get_state",
                error: "connection refused".to_string(),
            })
            .is_empty());
    }

    #[test]
    fn test_difficulty_only_while_idle() {
        let mut app = app();
        assert!(app.handle(Event::DifficultyChanged(Difficulty::Hard)).is_empty());
        assert_eq!(app.session().difficulty(), Difficulty::Hard);

        app.handle(Event::StartRequested {
            name: "Eve".to_string(),
        });
        assert!(matches!(
            app.handle(Event::DifficultyChanged(Difficulty::Easy)).as_slice(),
            [Command::Alert(_)]
        ));
        assert_eq!(app.session().difficulty(), Difficulty::Hard);
    }

    #[test]
    fn test_promotion_preference_reaches_submission() {
        let mut app = started();
        app.handle(Event::PromotionChanged(Role::Knight));
        let token = match app.handle(Event::CellClicked(52)).as_slice() {
            [Command::FetchValidMoves { token, .. }] => *token,
            other => panic!("unexpected {other:?}"),
        };
        app.handle(Event::MovesLoaded {
            token,
            moves: ["e7e8q", "e7e8r", "e7e8b", "e7e8n"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
        });
        assert_eq!(app.hints().count(), 1);
        match app.handle(Event::CellClicked(60)).as_slice() {
            [Command::SubmitMove { uci, .. }] => assert_eq!(uci, "e7e8n"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
