use std::env;
use std::time::Duration;

use crate::error::ClientError;
use crate::session::Difficulty;

#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the game server, without a trailing slash
    pub server_url: String,

    /// Name used by a bare `start`
    pub player: Option<String>,

    pub difficulty: Difficulty,

    /// Period of the `/logs` poll
    pub log_poll_interval: Duration,

    /// Log lines kept visible under the board
    pub log_lines: usize,

    /// None waits on the server indefinitely
    pub request_timeout: Option<Duration>,

    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_url = lookup("WEBCHESS_SERVER_URL")
            .unwrap_or_else(|| "http://127.0.0.1:5000".to_string())
            .trim_end_matches('/')
            .to_string();

        let player = lookup("WEBCHESS_PLAYER")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        let difficulty = match lookup("WEBCHESS_DIFFICULTY") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Unknown WEBCHESS_DIFFICULTY, using medium");
                Difficulty::Medium
            }),
            None => Difficulty::Medium,
        };

        let poll_secs: u64 = lookup("WEBCHESS_LOG_POLL_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        if poll_secs == 0 {
            return Err(ClientError::Config(
                "WEBCHESS_LOG_POLL_SECS must be at least 1".to_string(),
            ));
        }

        let log_lines = lookup("WEBCHESS_LOG_LINES")
            .and_then(|v| v.parse().ok())
            .unwrap_or(12);

        let request_timeout = lookup("WEBCHESS_REQUEST_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let user_agent =
            lookup("WEBCHESS_USER_AGENT").unwrap_or_else(|| "WebChess/1.0".to_string());

        Ok(Self {
            server_url,
            player,
            difficulty,
            log_poll_interval: Duration::from_secs(poll_secs),
            log_lines,
            request_timeout,
            user_agent,
        })
    }
}
