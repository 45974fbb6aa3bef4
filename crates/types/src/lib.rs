//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no I/O, making them usable in any context
//! (core logic, persistence, runtime bridge, terminal runner).
//!
//! # Difficulty Presets
//!
//! | Difficulty | Grid | Words | Time bonus | Multiplier |
//! |------------|------|-------|------------|------------|
//! | easy       | 10   | 8     | 50         | 1.0        |
//! | medium     | 12   | 10    | 75         | 1.5        |
//! | hard       | 15   | 12    | 100        | 2.0        |
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 100 | Period of the timeout poll |
//! | `MAX_PLACEMENT_ATTEMPTS` | 100 | Random placement tries per word |
//!
//! # Examples
//!
//! ```
//! use word_search_types::{Category, Difficulty, Direction, GameCommand};
//!
//! let difficulty = Difficulty::from_str("Hard").unwrap();
//! assert_eq!(difficulty.grid_size(), 15);
//! assert_eq!(difficulty.word_count(), 12);
//!
//! assert_eq!(Category::from_str("animals"), Some(Category::Animals));
//!
//! assert_eq!(Direction::from_step(0, 1), Some(Direction::Horizontal));
//! assert_eq!(Direction::Horizontal.reverse(), Direction::HorizontalReverse);
//!
//! let cmd = GameCommand::StartSelection { row: 2, col: 2 };
//! assert_eq!(cmd.as_str(), "startSelection");
//! ```

use serde::{Deserialize, Serialize};

/// Fixed timestep of the timeout poll in milliseconds
pub const TICK_MS: u64 = 100;

/// Random placement attempts per word before it is skipped
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

/// Largest grid any difficulty produces (hard)
///
/// Also bounds the length of a selection path.
pub const MAX_GRID_SIZE: usize = 15;

/// Filler alphabet for cells not covered by a placed word
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Base points per letter of a found word
pub const POINTS_PER_LETTER: u32 = 10;

/// Completion bonus as a fraction of the accumulated score (20%)
pub const COMPLETION_BONUS_RATIO: f64 = 0.2;

/// Milliseconds per second
pub const MS_PER_SEC: u64 = 1000;

/// A cell coordinate on the grid
///
/// `row` grows downward, `col` grows to the right, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step `steps` cells along `direction`, returning `None` outside a
    /// `size`×`size` grid.
    pub fn offset(self, direction: Direction, steps: usize, size: usize) -> Option<Self> {
        let (dr, dc) = direction.step();
        let row = self.row as isize + dr as isize * steps as isize;
        let col = self.col as isize + dc as isize * steps as isize;
        if row < 0 || col < 0 || row >= size as isize || col >= size as isize {
            return None;
        }
        Some(Self::new(row as usize, col as usize))
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// The eight straight lines a word can run along
///
/// Order matters: placement draws a uniform index into [`Direction::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Left to right
    Horizontal,
    /// Right to left
    HorizontalReverse,
    /// Top to bottom
    Vertical,
    /// Bottom to top
    VerticalReverse,
    /// Toward the bottom-right corner
    DiagonalDown,
    /// Toward the top-left corner
    DiagonalUp,
    /// Toward the top-right corner
    DiagonalUpRight,
    /// Toward the bottom-left corner
    DiagonalDownLeft,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Horizontal,
        Direction::HorizontalReverse,
        Direction::Vertical,
        Direction::VerticalReverse,
        Direction::DiagonalDown,
        Direction::DiagonalUp,
        Direction::DiagonalUpRight,
        Direction::DiagonalDownLeft,
    ];

    /// Unit step as `(row delta, col delta)`
    pub const fn step(self) -> (i8, i8) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::HorizontalReverse => (0, -1),
            Direction::Vertical => (1, 0),
            Direction::VerticalReverse => (-1, 0),
            Direction::DiagonalDown => (1, 1),
            Direction::DiagonalUp => (-1, -1),
            Direction::DiagonalUpRight => (-1, 1),
            Direction::DiagonalDownLeft => (1, -1),
        }
    }

    /// Look up the direction for a unit step; `None` for `(0, 0)` or
    /// components outside `-1..=1`.
    pub fn from_step(dr: i8, dc: i8) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.step() == (dr, dc))
    }

    /// The direction pointing the opposite way
    pub fn reverse(self) -> Self {
        match self {
            Direction::Horizontal => Direction::HorizontalReverse,
            Direction::HorizontalReverse => Direction::Horizontal,
            Direction::Vertical => Direction::VerticalReverse,
            Direction::VerticalReverse => Direction::Vertical,
            Direction::DiagonalDown => Direction::DiagonalUp,
            Direction::DiagonalUp => Direction::DiagonalDown,
            Direction::DiagonalUpRight => Direction::DiagonalDownLeft,
            Direction::DiagonalDownLeft => Direction::DiagonalUpRight,
        }
    }

    /// Symbolic name used in hints and saved files
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Horizontal => "horizontal",
            Direction::HorizontalReverse => "horizontal-reverse",
            Direction::Vertical => "vertical",
            Direction::VerticalReverse => "vertical-reverse",
            Direction::DiagonalDown => "diagonal-down",
            Direction::DiagonalUp => "diagonal-up",
            Direction::DiagonalUpRight => "diagonal-up-right",
            Direction::DiagonalDownLeft => "diagonal-down-left",
        }
    }
}

/// Difficulty preset
///
/// Fixes grid size, target word count, score multiplier and time bonus for
/// the whole session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Side length of the square grid
    pub fn grid_size(&self) -> usize {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 12,
            Difficulty::Hard => MAX_GRID_SIZE,
        }
    }

    /// Number of words drawn from the category
    pub fn word_count(&self) -> usize {
        match self {
            Difficulty::Easy => 8,
            Difficulty::Medium => 10,
            Difficulty::Hard => 12,
        }
    }

    /// Maximum time bonus for a word found instantly
    pub fn time_bonus(&self) -> u32 {
        match self {
            Difficulty::Easy => 50,
            Difficulty::Medium => 75,
            Difficulty::Hard => 100,
        }
    }

    /// Multiplier applied to the base letter score
    pub fn multiplier(&self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.5,
            Difficulty::Hard => 2.0,
        }
    }

    /// Parse difficulty from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Themed vocabulary a session draws its words from
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Animals,
    Countries,
    Science,
    Sports,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Animals,
        Category::Countries,
        Category::Science,
        Category::Sports,
    ];

    /// Parse category from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use word_search_types::Category;
    ///
    /// assert_eq!(Category::from_str("SPORTS"), Some(Category::Sports));
    /// assert_eq!(Category::from_str("cooking"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "animals" => Some(Category::Animals),
            "countries" => Some(Category::Countries),
            "science" => Some(Category::Science),
            "sports" => Some(Category::Sports),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Animals => "animals",
            Category::Countries => "countries",
            Category::Science => "science",
            Category::Sports => "sports",
        }
    }
}

/// Commands a presentation layer sends to the engine
///
/// Each variant maps to exactly one public engine operation. The serde form
/// is `{"type":"startSelection","row":2,"col":2}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameCommand {
    /// Generate a fresh session, replacing any current one
    #[serde(rename_all = "camelCase")]
    NewGame {
        category: Category,
        difficulty: Difficulty,
        /// Seconds; 0 means untimed
        time_limit: u32,
    },
    /// Begin a drag at a cell
    StartSelection { row: i32, col: i32 },
    /// Move the drag end; targets may lie outside the grid
    UpdateSelection { row: i32, col: i32 },
    /// Release the drag and validate it
    EndSelection,
    /// Flip between active and paused
    TogglePause,
    /// Read-only view of the session
    GetState,
    /// Reveal the endpoints of an unfound word
    GetHint { index: usize },
    /// Periodic timeout poll
    Tick,
    /// Drop the current session
    Reset,
}

impl GameCommand {
    /// camelCase command name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::NewGame { .. } => "newGame",
            GameCommand::StartSelection { .. } => "startSelection",
            GameCommand::UpdateSelection { .. } => "updateSelection",
            GameCommand::EndSelection => "endSelection",
            GameCommand::TogglePause => "togglePause",
            GameCommand::GetState => "getState",
            GameCommand::GetHint { .. } => "getHint",
            GameCommand::Tick => "tick",
            GameCommand::Reset => "reset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_presets() {
        assert_eq!(Difficulty::Easy.grid_size(), 10);
        assert_eq!(Difficulty::Medium.grid_size(), 12);
        assert_eq!(Difficulty::Hard.grid_size(), 15);

        assert_eq!(Difficulty::Easy.word_count(), 8);
        assert_eq!(Difficulty::Medium.word_count(), 10);
        assert_eq!(Difficulty::Hard.word_count(), 12);

        assert_eq!(Difficulty::Easy.time_bonus(), 50);
        assert_eq!(Difficulty::Medium.time_bonus(), 75);
        assert_eq!(Difficulty::Hard.time_bonus(), 100);

        for d in Difficulty::ALL {
            assert!(d.grid_size() <= MAX_GRID_SIZE);
        }
    }

    #[test]
    fn directions_are_unique_unit_steps() {
        for (i, a) in Direction::ALL.iter().enumerate() {
            let (dr, dc) = a.step();
            assert!((dr, dc) != (0, 0));
            assert!(dr.abs() <= 1 && dc.abs() <= 1);
            for b in &Direction::ALL[i + 1..] {
                assert_ne!(a.step(), b.step());
            }
        }
    }

    #[test]
    fn direction_reverse_negates_step() {
        for d in Direction::ALL {
            let (dr, dc) = d.step();
            assert_eq!(d.reverse().step(), (-dr, -dc));
            assert_eq!(d.reverse().reverse(), d);
        }
        assert_eq!(Direction::from_step(0, 0), None);
        assert_eq!(Direction::from_step(2, 0), None);
    }

    #[test]
    fn position_offset_stays_in_bounds() {
        let p = Position::new(0, 0);
        assert_eq!(p.offset(Direction::DiagonalDown, 3, 10), Some(Position::new(3, 3)));
        assert_eq!(p.offset(Direction::HorizontalReverse, 1, 10), None);
        assert_eq!(p.offset(Direction::Horizontal, 10, 10), None);
        assert_eq!(p.offset(Direction::Horizontal, 9, 10), Some(Position::new(0, 9)));
    }

    #[test]
    fn serde_names_match_symbolic_names() {
        for d in Direction::ALL {
            let json = serde_json::to_string(&d).unwrap();
            assert_eq!(json, format!("\"{}\"", d.as_str()));
        }
        assert_eq!(serde_json::to_string(&Category::Science).unwrap(), "\"science\"");
        assert_eq!(serde_json::to_string(&Difficulty::Medium).unwrap(), "\"medium\"");
    }

    #[test]
    fn command_wire_format() {
        let cmd: GameCommand =
            serde_json::from_str(r#"{"type":"newGame","category":"sports","difficulty":"hard","timeLimit":60}"#)
                .unwrap();
        assert_eq!(
            cmd,
            GameCommand::NewGame {
                category: Category::Sports,
                difficulty: Difficulty::Hard,
                time_limit: 60
            }
        );

        let cmd: GameCommand = serde_json::from_str(r#"{"type":"endSelection"}"#).unwrap();
        assert_eq!(cmd, GameCommand::EndSelection);
    }
}
