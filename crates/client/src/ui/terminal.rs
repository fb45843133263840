//! Line-oriented terminal front end.
//!
//! The board is redrawn after every handled event. Cells are clicked by
//! typing a square (`e2`) or a linear index (`12`).

use std::io::{self, Stdout, Write};

use chess_core::algebraic_to_index;
use shakmaty::Role;

use crate::app::{App, Event};
use crate::runtime::{Frontend, Input};
use crate::session::SessionState;

const HELP: &str = "\
Commands:
  start <name>        start a new game
  end                 end the running game
  difficulty <level>  easy, medium or hard (between games only)
  promote <piece>     q, r, b or n for pawn promotion
  logs                reload the game log now
  e2 / 12             click a cell by square name or index
  help                this text
  quit                leave";

#[derive(Debug)]
enum Parsed {
    Event(Event),
    Help,
    Quit,
    Blank,
}

pub struct Terminal<W> {
    out: W,
    log_lines: usize,
    clear_screen: bool,
    /// Alerts stay on screen until the next line of input.
    alerts: Vec<String>,
    /// Open yes/no question; the next line answers it.
    prompt: Option<String>,
}

impl Terminal<Stdout> {
    pub fn stdout(log_lines: usize) -> Self {
        Self {
            out: io::stdout(),
            log_lines,
            clear_screen: true,
            alerts: Vec::new(),
            prompt: None,
        }
    }
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W, log_lines: usize) -> Self {
        Self {
            out,
            log_lines,
            clear_screen: false,
            alerts: Vec::new(),
            prompt: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::warn!(error = %e, "Terminal write failed");
        }
    }
}

impl<W: Write> Frontend for Terminal<W> {
    fn alert(&mut self, message: &str) {
        self.alerts.extend(message.lines().map(str::to_string));
    }

    fn confirm(&mut self, prompt: &str) {
        self.prompt = Some(prompt.to_string());
    }

    fn draw(&mut self, app: &App) {
        let mut screen = String::new();
        if self.clear_screen {
            screen.push_str("\x1b[2J\x1b[H");
        }
        screen.push_str(&render_screen(app, self.log_lines));
        for alert in &self.alerts {
            screen.push_str(&format!("!! {alert}\n"));
        }
        match &self.prompt {
            Some(prompt) => screen.push_str(&format!("{prompt} [y/N] ")),
            None => screen.push_str("> "),
        }
        self.write(&screen);
    }

    fn interpret(&mut self, line: &str) -> Input {
        self.alerts.clear();
        if self.prompt.take().is_some() {
            let answer = line.trim().to_ascii_lowercase();
            return match answer.as_str() {
                "quit" | "exit" => Input::Quit,
                "y" | "yes" => Input::Event(Event::EndConfirmed(true)),
                _ => Input::Event(Event::EndConfirmed(false)),
            };
        }

        match parse_line(line) {
            Ok(Parsed::Event(event)) => Input::Event(event),
            Ok(Parsed::Help) => {
                self.write(&format!("{HELP}\n> "));
                Input::Handled
            }
            Ok(Parsed::Quit) => Input::Quit,
            Ok(Parsed::Blank) => Input::Handled,
            Err(message) => {
                self.write(&format!("{message}\n> "));
                Input::Handled
            }
        }
    }
}

fn parse_line(line: &str) -> Result<Parsed, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let word = word.to_ascii_lowercase();

    let event = match word.as_str() {
        "" => return Ok(Parsed::Blank),
        "help" | "?" => return Ok(Parsed::Help),
        "quit" | "exit" => return Ok(Parsed::Quit),
        "start" => Event::StartRequested {
            name: rest.to_string(),
        },
        "end" => Event::EndRequested,
        "logs" => Event::RefreshLogs,
        "difficulty" | "level" => Event::DifficultyChanged(rest.parse()?),
        "promote" => Event::PromotionChanged(parse_promotion(rest)?),
        cell => Event::CellClicked(parse_cell(cell)?),
    };
    Ok(Parsed::Event(event))
}

fn parse_promotion(piece: &str) -> Result<Role, String> {
    let role = match piece.to_ascii_lowercase().as_str() {
        "q" | "queen" => Role::Queen,
        "r" | "rook" => Role::Rook,
        "b" | "bishop" => Role::Bishop,
        "n" | "knight" => Role::Knight,
        _ => return Err(format!("cannot promote to {piece:?} (q, r, b, n)")),
    };
    Ok(role)
}

fn parse_cell(word: &str) -> Result<usize, String> {
    if let Ok(index) = word.parse::<usize>() {
        return if index < 64 {
            Ok(index)
        } else {
            Err(format!("cell {index} is not on the board (0-63)"))
        };
    }
    algebraic_to_index(word).map_err(|_| format!("unknown command {word:?}, try help"))
}

/// Board, status lines and the bottom of the log as plain text.
pub fn render_screen(app: &App, log_lines: usize) -> String {
    let board = app.board();
    let hints = app.hints();
    let origin = app.selector().origin();

    let mut out = String::from("    a  b  c  d  e  f  g  h\n");
    for (row, cells) in board.screen_rows().enumerate() {
        out.push_str(&format!(" {} ", 8 - row));
        for cell in cells {
            let glyph = cell.glyph();
            let text = if origin == Some(cell.index) {
                format!("({})", glyph.unwrap_or(' '))
            } else if hints.is_marked(cell.index) {
                match glyph {
                    Some(g) => format!("[{g}]"),
                    None => " * ".to_string(),
                }
            } else {
                format!(" {} ", glyph.unwrap_or('·'))
            };
            out.push_str(&text);
        }
        out.push_str(&format!(" {}\n", 8 - row));
    }
    out.push_str("    a  b  c  d  e  f  g  h\n\n");

    let session = app.session();
    let state = match session.state() {
        SessionState::Idle => "not running",
        SessionState::Active => "running",
    };
    let lock = if session.difficulty_locked() { " (locked)" } else { "" };
    out.push_str(&format!(
        "Player: {} | Game: {} | Difficulty: {}{} | Promote: {:?}\n",
        session.player().unwrap_or("-"),
        state,
        session.difficulty(),
        lock,
        app.promotion(),
    ));
    if let Some(turn) = app.turn() {
        let over = if app.game_over() { " (game over)" } else { "" };
        out.push_str(&format!("To move: {turn}{over}\n"));
    }
    if let Some(status) = app.status() {
        out.push_str(&format!("{status}\n"));
    }

    let log = app.log();
    match log.updated_at() {
        Some(at) => out.push_str(&format!("\n-- Log (updated {}) --\n", at.format("%H:%M:%S"))),
        None => out.push_str("\n-- Log --\n"),
    }
    for line in log.tail(log_lines) {
        out.push_str(line);
        out.push('\n');
    }
    out
}
