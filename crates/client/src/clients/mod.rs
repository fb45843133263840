pub mod game_server;

pub use game_server::{GameServerClient, GameState, MoveOutcome};
