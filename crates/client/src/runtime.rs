//! Event loop: turns `Command`s into network calls and front-end output,
//! and feeds completions back into `App` one at a time.

use std::future::Future;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::app::{App, Command, Event};
use crate::clients::GameServerClient;
use crate::error::ClientError;
use crate::poller::LogPoller;

/// What a line of user input amounted to.
#[derive(Debug, Clone)]
pub enum Input {
    Event(Event),
    /// Fully handled by the front end (help text, parse errors, blank lines).
    Handled,
    Quit,
}

/// Everything the user sees and types.
pub trait Frontend {
    fn alert(&mut self, message: &str);

    /// Show a yes/no question. The answer arrives through `interpret` as
    /// `Event::EndConfirmed`.
    fn confirm(&mut self, prompt: &str);

    fn draw(&mut self, app: &App);

    fn interpret(&mut self, line: &str) -> Input;
}

pub struct Runtime<F> {
    app: App,
    api: GameServerClient,
    frontend: F,
    poller: LogPoller,
    tx: UnboundedSender<Event>,
    rx: UnboundedReceiver<Event>,
}

impl<F: Frontend> Runtime<F> {
    pub fn new(app: App, api: GameServerClient, frontend: F, poller: LogPoller) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            app,
            api,
            frontend,
            poller,
            tx,
            rx,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn boot(&mut self) {
        let cmds = self.app.boot();
        self.execute_all(cmds);
        self.frontend.draw(&self.app);
    }

    /// Run one event through the app, carry out its commands, redraw.
    pub fn dispatch(&mut self, event: Event) {
        let cmds = self.app.handle(event);
        self.execute_all(cmds);
        self.frontend.draw(&self.app);
    }

    /// Wait for the next completed request and dispatch it.
    pub async fn step(&mut self) -> bool {
        match self.rx.recv().await {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Main loop over user input, request completions and the log poll.
    /// Returns when the input ends or the user quits.
    pub async fn run<R>(&mut self, input: R) -> Result<(), ClientError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut ticker = self.poller.ticker();
        self.boot();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    match self.frontend.interpret(&line) {
                        Input::Event(event) => self.dispatch(event),
                        Input::Handled => {}
                        Input::Quit => break,
                    }
                }
                Some(event) = self.rx.recv() => self.dispatch(event),
                _ = ticker.tick() => self.dispatch(Event::RefreshLogs),
            }
        }

        tracing::info!("Input closed, leaving");
        Ok(())
    }

    fn execute_all(&mut self, cmds: Vec<Command>) {
        for cmd in cmds {
            self.execute(cmd);
        }
    }

    fn execute(&mut self, cmd: Command) {
        let api = self.api.clone();
        match cmd {
            Command::Alert(message) => self.frontend.alert(&message),
            Command::Confirm(prompt) => self.frontend.confirm(&prompt),
            Command::StartGame { player } => self.spawn("/start", async move {
                api.start(&player).await?;
                Ok::<_, ClientError>(Event::GameStarted)
            }),
            Command::EndGame => self.spawn("/end", async move {
                api.end().await?;
                Ok::<_, ClientError>(Event::GameEnded)
            }),
            Command::FetchState => self.spawn("/get_state", async move {
                Ok::<_, ClientError>(Event::StateLoaded(api.state().await?))
            }),
            Command::FetchValidMoves { square, token } => {
                self.spawn("/valid_moves", async move {
                    let moves = api.valid_moves(&square).await?;
                    Ok::<_, ClientError>(Event::MovesLoaded { token, moves })
                })
            }
            Command::SubmitMove {
                uci,
                difficulty,
                player,
            } => self.spawn("/player_move", async move {
                let outcome = api.player_move(&uci, difficulty, &player).await?;
                Ok::<_, ClientError>(Event::MoveResolved(outcome))
            }),
            Command::FetchLogs => self.spawn("/logs", async move {
                Ok::<_, ClientError>(Event::LogsLoaded(api.logs().await?))
            }),
        }
    }

    /// Run a request off the loop; its result comes back as an event.
    fn spawn<Fut>(&self, endpoint: &'static str, request: Fut)
    where
        Fut: Future<Output = Result<Event, ClientError>> + Send + 'static,
    {
        tracing::debug!(endpoint, "Request sent");
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let event = match request.await {
                Ok(event) => event,
                Err(e) => Event::RequestFailed {
                    endpoint,
                    error: e.to_string(),
                },
            };
            // The receiver lives as long as the runtime.
            let _ = tx.send(event);
        });
    }
}
