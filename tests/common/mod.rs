//! Shared helpers: an in-process stand-in for the game server and a front
//! end that records what the user would have seen.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use webchess_client::app::{App, Event};
use webchess_client::clients::GameServerClient;
use webchess_client::config::Config;
use webchess_client::poller::LogPoller;
use webchess_client::runtime::{Frontend, Input, Runtime};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
pub const AFTER_E4_E5: &str = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";

/// One request as the mock saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub body: Value,
}

/// Canned answers. Edit between steps to script a game.
#[derive(Debug, Clone)]
pub struct Script {
    pub fen: String,
    pub moves: HashMap<String, Vec<String>>,
    pub move_reply: Value,
    pub logs: String,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            fen: START_FEN.to_string(),
            moves: HashMap::new(),
            move_reply: json!({ "status": "ok" }),
            logs: "No games yet.".to_string(),
        }
    }
}

#[derive(Clone, Default)]
pub struct MockServer {
    pub script: Arc<Mutex<Script>>,
    pub requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockServer {
    /// Bind on an ephemeral port and serve in the background.
    pub async fn spawn() -> (Self, String) {
        let server = MockServer::default();
        let app = Router::new()
            .route("/start", post(start))
            .route("/end", post(end))
            .route("/get_state", get(get_state))
            .route("/valid_moves/{square}", get(valid_moves))
            .route("/player_move", post(player_move))
            .route("/logs", get(logs))
            .with_state(server.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (server, format!("http://{addr}"))
    }

    pub fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }

    fn record(&self, method: &'static str, path: String, body: Value) {
        self.requests.lock().unwrap().push(Recorded { method, path, body });
    }
}

async fn start(State(s): State<MockServer>, Json(body): Json<Value>) -> Json<Value> {
    s.record("POST", "/start".into(), body.clone());
    let fen = {
        let mut script = s.script();
        script.fen = START_FEN.to_string();
        script.fen.clone()
    };
    Json(json!({ "status": "started", "player": body["player"], "fen": fen }))
}

async fn end(State(s): State<MockServer>) -> Json<Value> {
    s.record("POST", "/end".into(), Value::Null);
    Json(json!({ "status": "reset", "fen": START_FEN }))
}

async fn get_state(State(s): State<MockServer>) -> Json<Value> {
    s.record("GET", "/get_state".into(), Value::Null);
    let fen = s.script().fen.clone();
    Json(json!({ "fen": fen, "turn": "white", "game_over": false, "player": null }))
}

async fn valid_moves(State(s): State<MockServer>, Path(square): Path<String>) -> Json<Value> {
    s.record("GET", format!("/valid_moves/{square}"), Value::Null);
    let moves = s.script().moves.get(&square).cloned().unwrap_or_default();
    Json(json!({ "moves": moves }))
}

async fn player_move(State(s): State<MockServer>, Json(body): Json<Value>) -> Json<Value> {
    s.record("POST", "/player_move".into(), body);
    let reply = s.script().move_reply.clone();
    Json(reply)
}

async fn logs(State(s): State<MockServer>) -> String {
    s.record("GET", "/logs".into(), Value::Null);
    s.script().logs.clone()
}

/// Front end that keeps alerts and prompts instead of printing them.
#[derive(Debug, Default)]
pub struct RecordingFrontend {
    pub alerts: Vec<String>,
    pub prompts: Vec<String>,
    pub draws: usize,
}

impl Frontend for RecordingFrontend {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, prompt: &str) {
        self.prompts.push(prompt.to_string());
    }

    fn draw(&mut self, _app: &App) {
        self.draws += 1;
    }

    fn interpret(&mut self, _line: &str) -> Input {
        Input::Handled
    }
}

pub fn config(base_url: &str) -> Config {
    let base_url = base_url.to_string();
    Config::from_lookup(move |key| (key == "WEBCHESS_SERVER_URL").then(|| base_url.clone()))
        .expect("Failed to build config")
}

/// Runtime wired to a fresh mock server.
pub async fn runtime() -> (MockServer, Runtime<RecordingFrontend>) {
    let (server, base_url) = MockServer::spawn().await;
    let config = config(&base_url);
    let api = GameServerClient::new(&config).expect("Failed to build client");
    let runtime = Runtime::new(
        App::new(&config),
        api,
        RecordingFrontend::default(),
        LogPoller::new(config.log_poll_interval),
    );
    (server, runtime)
}

/// Dispatch an event and handle every request it sets off, until the
/// runtime has been quiet for a moment.
pub async fn send(rt: &mut Runtime<RecordingFrontend>, event: Event) {
    rt.dispatch(event);
    settle(rt).await;
}

pub async fn settle(rt: &mut Runtime<RecordingFrontend>) {
    while let Ok(true) = tokio::time::timeout(Duration::from_millis(300), rt.step()).await {}
}
