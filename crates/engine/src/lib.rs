//! Engine module - the game controller
//!
//! [`Game`] owns the random source, the clock and at most one [`Session`].
//! Every public operation reads the clock once and forwards the reading to
//! the session, so the session itself stays pure.
//!
//! # Operations
//!
//! | Operation           | Command                   | Result |
//! |---------------------|---------------------------|--------|
//! | `initialize_game`   | `NewGame`                 | fresh board, replaces any session |
//! | `start_selection`   | `StartSelection`          | accepted? |
//! | `update_selection`  | `UpdateSelection`         | current path |
//! | `end_selection`     | `EndSelection`            | found word, if any |
//! | `toggle_pause`      | `TogglePause`             | paused? |
//! | `game_state`        | `GetState`                | state view |
//! | `hint`              | `GetHint`                 | hint for an unfound word |
//! | `tick`              | `Tick`                    | summary on timeout |
//! | `reset`             | `Reset`                   | no session |
//!
//! Without a session every operation is a harmless no-op.

pub mod clock;

use serde::{Deserialize, Serialize};

use word_search_core::rng::{RandomSource, SimpleRng};
use word_search_core::{
    BoardView, FoundWord, GameStateView, GameSummary, Hint, Session, SessionError,
};
use word_search_types::{Category, Difficulty, GameCommand, Position};

pub use clock::{Clock, ManualClock, SystemClock};
pub use word_search_core as core;
pub use word_search_types as types;

/// Reply to one [`GameCommand`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameResponse {
    Board(BoardView),
    SelectionStarted { accepted: bool },
    Path { positions: Vec<Position> },
    SelectionEnded { found: Option<FoundWord> },
    #[serde(rename_all = "camelCase")]
    Paused { is_paused: bool },
    State { state: Option<GameStateView> },
    Hint { hint: Option<Hint> },
    Tick { summary: Option<GameSummary> },
    Reset,
}

/// Game controller
pub struct Game<R = SimpleRng, C = SystemClock> {
    rng: R,
    clock: C,
    session: Option<Session>,
}

impl Game<SimpleRng, SystemClock> {
    /// Seeded game on the wall clock
    pub fn with_seed(seed: u32) -> Self {
        Self::new(SimpleRng::new(seed), SystemClock::new())
    }
}

impl<R: RandomSource, C: Clock> Game<R, C> {
    pub fn new(rng: R, clock: C) -> Self {
        Self {
            rng,
            clock,
            session: None,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Generate a new session, replacing the current one
    pub fn initialize_game(
        &mut self,
        category: Category,
        difficulty: Difficulty,
        time_limit: u32,
    ) -> BoardView {
        let now = self.clock.now_ms();
        let session = Session::generate(category, difficulty, time_limit, &mut self.rng, now);
        self.install(session)
    }

    /// Independent generator for building a session off the controller.
    ///
    /// Draws one value from the controller's source, so generation stays
    /// reproducible for a given seed.
    pub fn fork_rng(&mut self) -> SimpleRng {
        SimpleRng::new(self.rng.next_u32())
    }

    /// Make `session` the current one
    pub fn install(&mut self, session: Session) -> BoardView {
        let board = session.board();
        tracing::info!(
            category = session.category().as_str(),
            difficulty = session.difficulty().as_str(),
            words = session.words().len(),
            time_limit = session.time_limit(),
            "new game"
        );
        self.session = Some(session);
        board
    }

    pub fn start_selection(&mut self, row: i32, col: i32) -> bool {
        self.session
            .as_mut()
            .is_some_and(|s| s.start_selection(row, col))
    }

    pub fn update_selection(&mut self, row: i32, col: i32) -> Vec<Position> {
        self.session
            .as_mut()
            .map(|s| s.update_selection(row, col).to_vec())
            .unwrap_or_default()
    }

    pub fn end_selection(&mut self) -> Option<FoundWord> {
        let now = self.clock.now_ms();
        self.session.as_mut()?.end_selection(now)
    }

    /// Returns the new paused state; `false` without a session
    pub fn toggle_pause(&mut self) -> bool {
        let now = self.clock.now_ms();
        self.session
            .as_mut()
            .is_some_and(|s| s.toggle_pause(now))
    }

    pub fn game_state(&self) -> Option<GameStateView> {
        let now = self.clock.now_ms();
        self.session.as_ref().map(|s| s.state(now))
    }

    pub fn hint(&mut self, index: usize) -> Option<Hint> {
        self.session.as_mut()?.hint(index)
    }

    pub fn tick(&mut self) -> Option<GameSummary> {
        let now = self.clock.now_ms();
        self.session.as_mut()?.tick(now)
    }

    pub fn reset(&mut self) {
        if self.session.take().is_some() {
            tracing::debug!("session reset");
        }
    }

    /// Completed or timed out
    pub fn is_finished(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_finished)
    }

    /// Resume a stored session; the current one is kept on failure
    pub fn load_session(&mut self, session: Session) -> Result<BoardView, SessionError> {
        let restored = session.restore(self.clock.now_ms())?;
        Ok(self.install(restored))
    }

    /// Copy of the current session with its clock stopped, for persistence
    pub fn session_snapshot(&self) -> Option<Session> {
        let now = self.clock.now_ms();
        self.session.as_ref().map(|s| s.snapshot(now))
    }

    /// Route a command to its operation
    pub fn dispatch(&mut self, command: GameCommand) -> GameResponse {
        tracing::trace!(command = command.as_str(), "dispatch");
        match command {
            GameCommand::NewGame {
                category,
                difficulty,
                time_limit,
            } => GameResponse::Board(self.initialize_game(category, difficulty, time_limit)),
            GameCommand::StartSelection { row, col } => GameResponse::SelectionStarted {
                accepted: self.start_selection(row, col),
            },
            GameCommand::UpdateSelection { row, col } => GameResponse::Path {
                positions: self.update_selection(row, col),
            },
            GameCommand::EndSelection => GameResponse::SelectionEnded {
                found: self.end_selection(),
            },
            GameCommand::TogglePause => GameResponse::Paused {
                is_paused: self.toggle_pause(),
            },
            GameCommand::GetState => GameResponse::State {
                state: self.game_state(),
            },
            GameCommand::GetHint { index } => GameResponse::Hint {
                hint: self.hint(index),
            },
            GameCommand::Tick => GameResponse::Tick {
                summary: self.tick(),
            },
            GameCommand::Reset => {
                self.reset();
                GameResponse::Reset
            }
        }
    }
}
