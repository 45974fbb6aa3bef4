//! Session actor and runtime bridge.
//!
//! The actor task owns the [`Game`]. Commands arrive over an mpsc channel,
//! each with a oneshot for the reply, so they are applied strictly one at a
//! time. New sessions are generated on a blocking worker and installed in a
//! single step once complete: until then the previous session (if any)
//! keeps answering.
//!
//! A timed session gets a [`Ticker`]. The ticker is stopped when the
//! session is reset, finishes, or the actor shuts down.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tokio::runtime::Runtime;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::core::rng::RandomSource;
use crate::core::{BoardView, GameSummary, Session};
use crate::engine::{Clock, Game, GameResponse};
use crate::ticker::Ticker;
use crate::types::{Category, Difficulty, GameCommand, TICK_MS};

const REQUEST_CAPACITY: usize = 32;
const TICK_CAPACITY: usize = 4;
const SUMMARY_CAPACITY: usize = 8;

/// Command delivered to the actor.
#[derive(Debug)]
pub struct Request {
    pub command: GameCommand,
    pub reply: oneshot::Sender<GameResponse>,
}

#[derive(Debug)]
enum Message {
    Command(Request),
    Load {
        session: Box<Session>,
        reply: oneshot::Sender<Result<BoardView>>,
    },
    Snapshot {
        reply: oneshot::Sender<Option<Session>>,
    },
    TickerRunning {
        reply: oneshot::Sender<bool>,
    },
}

/// Async handle to a running actor. Cheap to clone.
///
/// The actor exits once every handle is dropped.
#[derive(Debug, Clone)]
pub struct GameHandle {
    tx: mpsc::Sender<Message>,
    summaries: broadcast::Sender<GameSummary>,
}

impl GameHandle {
    /// Apply one command and wait for its reply
    pub async fn send(&self, command: GameCommand) -> Result<GameResponse> {
        let (reply, rx) = oneshot::channel();
        self.post(Message::Command(Request { command, reply }))
            .await?;
        rx.await.context("game actor dropped the request")
    }

    /// Resume a stored session
    pub async fn load_session(&self, session: Session) -> Result<BoardView> {
        let (reply, rx) = oneshot::channel();
        self.post(Message::Load {
            session: Box::new(session),
            reply,
        })
        .await?;
        rx.await.context("game actor dropped the request")?
    }

    /// Current session with its clock stopped, for persistence
    pub async fn snapshot(&self) -> Result<Option<Session>> {
        let (reply, rx) = oneshot::channel();
        self.post(Message::Snapshot { reply }).await?;
        rx.await.context("game actor dropped the request")
    }

    pub async fn ticker_running(&self) -> Result<bool> {
        let (reply, rx) = oneshot::channel();
        self.post(Message::TickerRunning { reply }).await?;
        rx.await.context("game actor dropped the request")
    }

    /// Summaries of every game that ends from now on (completion or timeout)
    pub fn subscribe(&self) -> broadcast::Receiver<GameSummary> {
        self.summaries.subscribe()
    }

    async fn post(&self, message: Message) -> Result<()> {
        self.tx
            .send(message)
            .await
            .map_err(|_| anyhow!("game actor has shut down"))
    }
}

/// Spawn the actor on the current runtime.
///
/// The join handle yields the game back once every [`GameHandle`] is gone.
pub fn spawn_game<R, C>(game: Game<R, C>, tick_period: Duration) -> (GameHandle, JoinHandle<Game<R, C>>)
where
    R: RandomSource + Send + 'static,
    C: Clock + Send + 'static,
{
    let (tx, requests) = mpsc::channel(REQUEST_CAPACITY);
    let (tick_tx, ticks) = mpsc::channel(TICK_CAPACITY);
    let (summaries, _) = broadcast::channel(SUMMARY_CAPACITY);

    let actor = Actor {
        game,
        requests,
        tick_tx,
        ticks,
        ticker: None,
        tick_period,
        summaries: summaries.clone(),
    };
    let join = tokio::spawn(actor.run());

    (GameHandle { tx, summaries }, join)
}

struct Actor<R, C> {
    game: Game<R, C>,
    requests: mpsc::Receiver<Message>,
    tick_tx: mpsc::Sender<GameCommand>,
    ticks: mpsc::Receiver<GameCommand>,
    ticker: Option<Ticker>,
    tick_period: Duration,
    summaries: broadcast::Sender<GameSummary>,
}

impl<R, C> Actor<R, C>
where
    R: RandomSource + Send + 'static,
    C: Clock + Send + 'static,
{
    async fn run(mut self) -> Game<R, C> {
        loop {
            tokio::select! {
                message = self.requests.recv() => match message {
                    Some(message) => self.handle(message).await,
                    None => break,
                },
                Some(command) = self.ticks.recv() => {
                    let response = self.game.dispatch(command);
                    self.after(&response);
                }
            }
        }

        self.stop_ticker();
        tracing::debug!("game actor stopped");
        self.game
    }

    async fn handle(&mut self, message: Message) {
        match message {
            Message::Command(Request { command, reply }) => {
                let response = match command {
                    GameCommand::NewGame {
                        category,
                        difficulty,
                        time_limit,
                    } => self.new_game(category, difficulty, time_limit).await,
                    command => self.game.dispatch(command),
                };
                self.after(&response);
                let _ = reply.send(response);
            }
            Message::Load { session, reply } => {
                let result = self.game.load_session(*session).map_err(anyhow::Error::from);
                if result.is_ok() {
                    self.restart_ticker();
                }
                let _ = reply.send(result);
            }
            Message::Snapshot { reply } => {
                let _ = reply.send(self.game.session_snapshot());
            }
            Message::TickerRunning { reply } => {
                let running = self.ticker.as_ref().is_some_and(Ticker::is_running);
                let _ = reply.send(running);
            }
        }
    }

    async fn new_game(&mut self, category: Category, difficulty: Difficulty, time_limit: u32) -> GameResponse {
        let mut rng = self.game.fork_rng();
        let now = self.game.now_ms();
        let generated = tokio::task::spawn_blocking(move || {
            Session::generate(category, difficulty, time_limit, &mut rng, now)
        })
        .await;

        let board = match generated {
            Ok(session) => self.game.install(session),
            Err(err) => {
                tracing::error!(%err, "background generation failed, generating inline");
                self.game.initialize_game(category, difficulty, time_limit)
            }
        };
        self.restart_ticker();
        GameResponse::Board(board)
    }

    /// Publish game-over summaries and stop ticking once there is nothing to time.
    fn after(&mut self, response: &GameResponse) {
        let summary = match response {
            GameResponse::Tick { summary: Some(summary) } => Some(summary),
            GameResponse::SelectionEnded { found: Some(found) } => found.summary.as_ref(),
            _ => None,
        };
        if let Some(summary) = summary {
            // No subscribers is fine
            let _ = self.summaries.send(summary.clone());
        }

        if self.game.session().is_none() || self.game.is_finished() {
            self.stop_ticker();
        }
    }

    fn restart_ticker(&mut self) {
        self.stop_ticker();
        let timed = self
            .game
            .session()
            .is_some_and(|s| s.time_limit() > 0 && !s.is_finished());
        if timed {
            self.ticker = Some(Ticker::spawn(self.tick_period, self.tick_tx.clone()));
        }
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
            // Drop ticks already queued by the old ticker
            while self.ticks.try_recv().is_ok() {}
            tracing::trace!("ticker stopped");
        }
    }
}

/// Synchronous front end for blocking presentation loops.
///
/// Owns its own tokio runtime; every call blocks until the actor replies.
pub struct SyncAdapter {
    rt: Runtime,
    handle: GameHandle,
    summaries: broadcast::Receiver<GameSummary>,
}

impl SyncAdapter {
    /// Start the actor for `game`, ticking every [`TICK_MS`]
    pub fn start<R, C>(game: Game<R, C>) -> Result<Self>
    where
        R: RandomSource + Send + 'static,
        C: Clock + Send + 'static,
    {
        Self::with_tick_period(game, Duration::from_millis(TICK_MS))
    }

    pub fn with_tick_period<R, C>(game: Game<R, C>, tick_period: Duration) -> Result<Self>
    where
        R: RandomSource + Send + 'static,
        C: Clock + Send + 'static,
    {
        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let (handle, _join) = rt.block_on(async { spawn_game(game, tick_period) });
        let summaries = handle.subscribe();
        Ok(Self {
            rt,
            handle,
            summaries,
        })
    }

    pub fn send(&self, command: GameCommand) -> Result<GameResponse> {
        self.rt.block_on(self.handle.send(command))
    }

    pub fn load_session(&self, session: Session) -> Result<BoardView> {
        self.rt.block_on(self.handle.load_session(session))
    }

    pub fn snapshot(&self) -> Result<Option<Session>> {
        self.rt.block_on(self.handle.snapshot())
    }

    /// Next game-over summary, if one arrived since the last call
    pub fn try_recv_summary(&mut self) -> Option<GameSummary> {
        loop {
            match self.summaries.try_recv() {
                Ok(summary) => return Some(summary),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "missed game summaries");
                }
                Err(_) => return None,
            }
        }
    }

    pub fn handle(&self) -> &GameHandle {
        &self.handle
    }
}
