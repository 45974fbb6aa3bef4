//! Read-only views handed to the presentation layer
//!
//! These are owned copies: holding one never borrows the session, and two
//! views taken at the same clock reading compare equal.

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::placer::PlacedWord;
use crate::types::{Category, Difficulty, Direction, Position};

/// What a freshly generated game looks like
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub grid: Grid,
    pub words: Vec<String>,
    pub size: usize,
}

/// Full state of a session at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateView {
    pub grid: Grid,
    pub words: Vec<String>,
    pub found_words: Vec<String>,
    pub score: u32,
    pub category: Category,
    pub difficulty: Difficulty,
    pub is_completed: bool,
    pub is_timed_out: bool,
    pub is_paused: bool,
    /// Seconds; 0 means untimed
    pub time_limit: u32,
    /// Elapsed seconds, frozen while paused and after the game ends
    pub current_time: f64,
    /// Percentage of words found, 0..=100
    pub progress: f64,
}

impl GameStateView {
    pub fn playable(&self) -> bool {
        !self.is_completed && !self.is_timed_out && !self.is_paused
    }
}

/// Endpoints of a word the player asked help for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub word: String,
    pub first_letter: Position,
    pub last_letter: Position,
    pub direction: Direction,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Completed,
    TimedOut,
}

/// Report produced exactly once, on completion or timeout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub outcome: Outcome,
    pub category: Category,
    pub difficulty: Difficulty,
    pub final_score: u32,
    /// 0 on timeout
    pub completion_bonus: u32,
    pub elapsed_secs: f64,
    pub words_found: usize,
    pub total_words: usize,
    /// The words found, in the order they were found
    #[serde(default)]
    pub found_words: Vec<String>,
    pub hints_used: u32,
    pub mistakes: u32,
}

impl GameSummary {
    pub fn completed(&self) -> bool {
        self.outcome == Outcome::Completed
    }
}

/// A successful selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoundWord {
    pub placed: PlacedWord,
    /// Points this find added (before any completion bonus)
    pub points: u32,
    /// Set when this find completed the game
    pub summary: Option<GameSummary>,
}
