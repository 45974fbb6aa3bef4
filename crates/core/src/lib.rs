//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the word search rules: grid generation, word
//! placement, drag selection, scoring and the session state machine.
//! It has **zero dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed and clock readings produce identical games
//! - **Testable**: Randomness and time are injected, never read globally
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`catalog`]: Fixed word lists per category
//! - [`grid`]: Square letter grid and random fill
//! - [`placer`]: Random-retry word placement with letter crossings
//! - [`rng`]: Seeded LCG and the [`RandomSource`] seam
//! - [`scoring`]: Word points, time bonus and completion bonus
//! - [`selection`]: Ray-constrained drag paths and word matching
//! - [`session`]: One play-through and its Active/Paused/Completed/TimedOut machine
//! - [`snapshot`]: Owned read-only views for the presentation layer
//!
//! # Example
//!
//! ```
//! use word_search_core::{Session, SimpleRng};
//! use word_search_types::{Category, Difficulty};
//!
//! let mut rng = SimpleRng::new(12345);
//! let mut session = Session::generate(Category::Animals, Difficulty::Easy, 0, &mut rng, 0);
//!
//! // Drag across the first placed word
//! let word = session.placed_words()[0].clone();
//! let (first, last) = (word.first().unwrap(), word.last().unwrap());
//! session.start_selection(first.row as i32, first.col as i32);
//! session.update_selection(last.row as i32, last.col as i32);
//!
//! let found = session.end_selection(1_000).unwrap();
//! assert_eq!(found.placed.word, word.word);
//! assert!(session.score() > 0);
//! ```
//!
//! # Timing
//!
//! The session never reads a clock. Every time-dependent call takes the
//! current reading in milliseconds; the engine supplies it from a
//! [`Clock`](https://docs.rs/word-search-engine) and polls
//! [`Session::tick`](session::Session::tick) every [`TICK_MS`](types::TICK_MS).

pub mod catalog;
pub mod grid;
pub mod placer;
pub mod rng;
pub mod scoring;
pub mod selection;
pub mod session;
pub mod snapshot;

pub use word_search_types as types;

// Re-export commonly used types for convenience
pub use grid::{fill_empty, Cell, Grid, GridError};
pub use placer::{can_place, place_at, place_with_replacements, place_word, place_words, PlacedWord};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use scoring::{completion_bonus, time_bonus, word_score};
pub use selection::{match_path, Selection, SelectionPath};
pub use session::{Session, SessionError, SessionStatus};
pub use snapshot::{BoardView, FoundWord, GameStateView, GameSummary, Hint, Outcome};
