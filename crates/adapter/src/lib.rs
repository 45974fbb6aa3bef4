//! Adapter module - async runtime bridge for the game controller
//!
//! This crate runs a [`Game`](word_search_engine::Game) inside a tokio
//! actor so that presentation layers can drive it from anywhere:
//!
//! 1. **Actor**: one task owns the game; commands are applied in order
//! 2. **Generation**: new boards are built on a blocking worker, then
//!    installed in one step
//! 3. **Timer**: a [`Ticker`] polls for timeouts every `TICK_MS` while a
//!    timed session is running, and is torn down with the session
//! 4. **Summaries**: completions and timeouts are broadcast to subscribers
//!
//! # Front ends
//!
//! - [`GameHandle`]: async, cloneable
//! - [`SyncAdapter`]: owns a runtime, blocks on each call; for plain loops
//!
//! # Example
//!
//! ```no_run
//! use word_search_adapter::{SyncAdapter, engine::Game};
//! use word_search_adapter::types::{Category, Difficulty, GameCommand};
//!
//! let adapter = SyncAdapter::start(Game::with_seed(1)).unwrap();
//! adapter.send(GameCommand::NewGame {
//!     category: Category::Science,
//!     difficulty: Difficulty::Medium,
//!     time_limit: 300,
//! }).unwrap();
//! ```

pub mod runtime;
pub mod ticker;

pub use word_search_core as core;
pub use word_search_engine as engine;
pub use word_search_types as types;

pub use runtime::{spawn_game, GameHandle, Request, SyncAdapter};
pub use ticker::Ticker;
