use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::Config;
use crate::error::ClientError;
use crate::session::Difficulty;

/// `/get_state` body. Only `fen` is required.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GameState {
    pub fen: String,
    #[serde(default)]
    pub turn: Option<String>,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub player: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ValidMoves {
    #[serde(default)]
    moves: Vec<String>,
}

#[derive(Debug, Serialize)]
struct MoveRequest<'a> {
    #[serde(rename = "move")]
    uci: &'a str,
    difficulty: Difficulty,
    player: &'a str,
}

/// `/player_move` body.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveResponse {
    pub status: String,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub ai: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// What the server made of a submitted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Accepted; `ai` is the engine's reply when it made one.
    Ok { ai: Option<String> },
    Finished { result: String },
    Illegal,
    Rejected { message: String },
}

impl From<MoveResponse> for MoveOutcome {
    fn from(resp: MoveResponse) -> Self {
        match resp.status.as_str() {
            "finished" => MoveOutcome::Finished {
                result: resp.result.unwrap_or_default(),
            },
            "illegal" => MoveOutcome::Illegal,
            "ok" => MoveOutcome::Ok { ai: resp.ai },
            "error" => MoveOutcome::Rejected {
                message: resp.message.unwrap_or_else(|| "Server error".to_string()),
            },
            other => {
                tracing::debug!(status = other, "Unrecognised move status, treating as ok");
                MoveOutcome::Ok { ai: resp.ai }
            }
        }
    }
}

/// Thin wrapper over the game server's HTTP contract.
#[derive(Debug, Clone)]
pub struct GameServerClient {
    client: Client,
    base_url: String,
}

impl GameServerClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.server_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn start(&self, player: &str) -> Result<(), ClientError> {
        let resp = self
            .client
            .post(self.url("/start"))
            .json(&json!({ "player": player }))
            .send()
            .await?;
        check(resp, "/start").await?;
        Ok(())
    }

    pub async fn end(&self) -> Result<(), ClientError> {
        let resp = self.client.post(self.url("/end")).send().await?;
        check(resp, "/end").await?;
        Ok(())
    }

    pub async fn state(&self) -> Result<GameState, ClientError> {
        let resp = self.client.get(self.url("/get_state")).send().await?;
        Ok(check(resp, "/get_state").await?.json().await?)
    }

    /// Legal moves from one square, as the server's move strings.
    pub async fn valid_moves(&self, square: &str) -> Result<Vec<String>, ClientError> {
        let resp = self
            .client
            .get(self.url(&format!("/valid_moves/{square}")))
            .send()
            .await?;
        let body: ValidMoves = check(resp, "/valid_moves").await?.json().await?;
        Ok(body.moves)
    }

    pub async fn player_move(
        &self,
        uci: &str,
        difficulty: Difficulty,
        player: &str,
    ) -> Result<MoveOutcome, ClientError> {
        let resp = self
            .client
            .post(self.url("/player_move"))
            .json(&MoveRequest {
                uci,
                difficulty,
                player,
            })
            .send()
            .await?;
        let body: MoveResponse = check(resp, "/player_move").await?.json().await?;
        Ok(body.into())
    }

    pub async fn logs(&self) -> Result<String, ClientError> {
        let resp = self.client.get(self.url("/logs")).send().await?;
        Ok(check(resp, "/logs").await?.text().await?)
    }
}

async fn check(resp: Response, endpoint: &'static str) -> Result<Response, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ClientError::Status { endpoint, status });
    }
    tracing::debug!(endpoint, %status, "Server replied");
    Ok(resp)
}
