//! Session module - one play-through of a word search
//!
//! The session owns the grid, the word list and every placed word; nothing
//! else mutates them. It also runs the game's state machine:
//!
//! ```text
//!            toggle_pause              all words found
//!   Active <-------------> Paused    Active ----------> Completed
//!     |                                |
//!     +-- tick with elapsed >= limit --+-> TimedOut
//! ```
//!
//! Completed and TimedOut are terminal: selections and pause toggles are
//! ignored from then on.
//!
//! All methods that depend on time take the current clock reading in
//! milliseconds instead of reading a clock, so a session is deterministic
//! under test. Elapsed time is `stopped_at.unwrap_or(now) - start_time`:
//! pausing records `stopped_at`, resuming shifts `start_time` forward by
//! the pause length, and the terminal transitions freeze `stopped_at`.

use serde::{Deserialize, Serialize};

use crate::catalog::WordPool;
use crate::grid::{fill_empty, Grid};
use crate::placer::{place_with_replacements, PlacedWord};
use crate::rng::RandomSource;
use crate::scoring::{completion_bonus, word_score};
use crate::selection::{match_path, Selection};
use crate::snapshot::{BoardView, FoundWord, GameStateView, GameSummary, Hint, Outcome};
use crate::types::{Category, Difficulty, Position, MAX_GRID_SIZE, MS_PER_SEC};

/// Lifecycle state derived from the session flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    Active,
    Paused,
    Completed,
    TimedOut,
}

/// A stored session that breaks the engine's invariants
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("grid is {actual}x{actual}, {difficulty:?} needs {expected}x{expected}")]
    GridSizeMismatch {
        difficulty: Difficulty,
        expected: usize,
        actual: usize,
    },

    #[error("cell ({row}, {col}) has no letter")]
    EmptyCell { row: usize, col: usize },

    #[error("placed word {word} does not match the grid at ({row}, {col})")]
    LetterMismatch { word: String, row: usize, col: usize },

    #[error("placed word {word} is not a straight run of its letters")]
    MalformedPlacement { word: String },

    #[error("placed word {word} has id {id} but sits at index {index}")]
    WordIdMismatch { word: String, id: usize, index: usize },

    #[error("word list does not match the placed words")]
    WordListMismatch,

    #[error("found word {word} is not in the word list")]
    UnknownFoundWord { word: String },

    #[error("found word {word} is listed twice")]
    DuplicateFoundWord { word: String },

    #[error("completion flag disagrees with {found} of {total} words found")]
    CompletionMismatch { found: usize, total: usize },

    #[error("session is both completed and timed out")]
    ConflictingOutcome,

    #[error("paused or finished session has no stop time")]
    MissingStopTime,
}

/// One complete play-through's mutable state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    category: Category,
    difficulty: Difficulty,
    grid: Grid,
    words: Vec<String>,
    found_words: Vec<String>,
    placed_words: Vec<PlacedWord>,
    score: u32,
    /// Seconds; 0 means untimed
    time_limit: u32,
    /// Clock reading (ms) the game started at, shifted forward by pauses
    start_time: u64,
    /// Clock reading (ms) the clock stopped at: pause or game end
    #[serde(default)]
    stopped_at: Option<u64>,
    is_paused: bool,
    is_completed: bool,
    #[serde(default)]
    is_timed_out: bool,
    /// Added once, when the last word is found
    #[serde(default)]
    completion_bonus: u32,
    #[serde(default)]
    hints_used: u32,
    /// Drags of two or more cells that matched nothing
    #[serde(default)]
    mistakes: u32,
    #[serde(skip)]
    selection: Option<Selection>,
}

impl Session {
    /// Generate a new session: draw words, place them, fill the rest.
    ///
    /// A word that cannot be placed is swapped for another word of the same
    /// category, so the word list has the difficulty's word count and equals
    /// the placed words. It only comes up short if the category runs out.
    pub fn generate<R: RandomSource>(
        category: Category,
        difficulty: Difficulty,
        time_limit: u32,
        rng: &mut R,
        now_ms: u64,
    ) -> Self {
        let mut pool = WordPool::new(category);
        let candidates = pool.take(difficulty.word_count(), rng);
        let mut grid = Grid::new(difficulty.grid_size());
        let placed_words = place_with_replacements(&candidates, &mut pool, &mut grid, rng);
        fill_empty(&mut grid, rng);

        tracing::debug!(
            category = category.as_str(),
            difficulty = difficulty.as_str(),
            requested = candidates.len(),
            placed = placed_words.len(),
            "generated session"
        );

        Self::assemble(category, difficulty, grid, placed_words, time_limit, now_ms)
    }

    /// Build a session around an already filled grid and its placed words.
    pub fn from_parts(
        category: Category,
        difficulty: Difficulty,
        grid: Grid,
        placed_words: Vec<PlacedWord>,
        time_limit: u32,
        now_ms: u64,
    ) -> Result<Self, SessionError> {
        let session = Self::assemble(category, difficulty, grid, placed_words, time_limit, now_ms);
        session.validate()?;
        Ok(session)
    }

    fn assemble(
        category: Category,
        difficulty: Difficulty,
        grid: Grid,
        placed_words: Vec<PlacedWord>,
        time_limit: u32,
        now_ms: u64,
    ) -> Self {
        let words = placed_words.iter().map(|p| p.word.clone()).collect();
        Self {
            category,
            difficulty,
            grid,
            words,
            found_words: Vec::new(),
            placed_words,
            score: 0,
            time_limit,
            start_time: now_ms,
            stopped_at: None,
            is_paused: false,
            is_completed: false,
            is_timed_out: false,
            completion_bonus: 0,
            hints_used: 0,
            mistakes: 0,
            selection: None,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn found_words(&self) -> &[String] {
        &self.found_words
    }

    pub fn placed_words(&self) -> &[PlacedWord] {
        &self.placed_words
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_limit(&self) -> u32 {
        self.time_limit
    }

    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn is_timed_out(&self) -> bool {
        self.is_timed_out
    }

    /// Completed or timed out
    pub fn is_finished(&self) -> bool {
        self.is_completed || self.is_timed_out
    }

    pub fn status(&self) -> SessionStatus {
        if self.is_completed {
            SessionStatus::Completed
        } else if self.is_timed_out {
            SessionStatus::TimedOut
        } else if self.is_paused {
            SessionStatus::Paused
        } else {
            SessionStatus::Active
        }
    }

    pub fn is_found(&self, word: &str) -> bool {
        self.found_words.iter().any(|w| w == word)
    }

    /// The drag in progress, if any
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Milliseconds of play so far
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        self.stopped_at.unwrap_or(now_ms).saturating_sub(self.start_time)
    }

    pub fn board(&self) -> BoardView {
        BoardView {
            grid: self.grid.clone(),
            words: self.words.clone(),
            size: self.grid.size(),
        }
    }

    /// Begin a drag at (row, col).
    ///
    /// Rejected while paused, after the game ended, or off the grid.
    pub fn start_selection(&mut self, row: i32, col: i32) -> bool {
        if self.status() != SessionStatus::Active || !self.grid.contains(row, col) {
            return false;
        }
        self.selection = Some(Selection::new(Position::new(row as usize, col as usize)));
        true
    }

    /// Move the drag end to (row, col) and return the current path.
    ///
    /// Empty when no drag is in progress or the game is not active.
    pub fn update_selection(&mut self, row: i32, col: i32) -> &[Position] {
        if self.status() != SessionStatus::Active {
            return &[];
        }
        let size = self.grid.size();
        match self.selection.as_mut() {
            Some(selection) => {
                selection.update(row as i64, col as i64, size);
                selection.path()
            }
            None => &[],
        }
    }

    /// Release the drag and validate it against the placed words.
    pub fn end_selection(&mut self, now_ms: u64) -> Option<FoundWord> {
        let selection = self.selection.take()?;
        let path = selection.path();
        if path.len() < 2 {
            return None;
        }

        let letters = self.grid.word_along(path);
        let matched = match_path(&letters, path, &self.placed_words, |w| self.is_found(w)).cloned();

        let Some(placed) = matched else {
            self.mistakes += 1;
            tracing::trace!(letters = letters.as_str(), "selection matched nothing");
            return None;
        };

        let points = word_score(
            placed.word.chars().count(),
            self.difficulty,
            self.time_limit,
            self.elapsed_ms(now_ms),
        );
        self.score = self.score.saturating_add(points);
        self.found_words.push(placed.word.clone());
        tracing::debug!(word = placed.word.as_str(), points, score = self.score, "word found");

        let summary = (self.found_words.len() == self.words.len()).then(|| self.complete(now_ms));

        Some(FoundWord {
            placed,
            points,
            summary,
        })
    }

    fn complete(&mut self, now_ms: u64) -> GameSummary {
        let bonus = completion_bonus(self.score);
        self.score = self.score.saturating_add(bonus);
        self.completion_bonus = bonus;
        self.is_completed = true;
        self.is_paused = false;
        self.stopped_at = Some(now_ms);
        self.selection = None;

        let summary = self.summarize(Outcome::Completed, bonus);
        tracing::info!(
            score = summary.final_score,
            bonus,
            secs = summary.elapsed_secs,
            "game completed"
        );
        summary
    }

    fn summarize(&self, outcome: Outcome, completion_bonus: u32) -> GameSummary {
        GameSummary {
            outcome,
            category: self.category,
            difficulty: self.difficulty,
            final_score: self.score,
            completion_bonus,
            elapsed_secs: self.elapsed_ms(self.start_time) as f64 / MS_PER_SEC as f64,
            words_found: self.found_words.len(),
            total_words: self.words.len(),
            found_words: self.found_words.clone(),
            hints_used: self.hints_used,
            mistakes: self.mistakes,
        }
    }

    /// Report for a finished session; `None` while still in play
    pub fn summary(&self) -> Option<GameSummary> {
        if self.is_completed {
            Some(self.summarize(Outcome::Completed, self.completion_bonus))
        } else if self.is_timed_out {
            Some(self.summarize(Outcome::TimedOut, 0))
        } else {
            None
        }
    }

    /// Flip between Active and Paused; returns the new paused state.
    ///
    /// Finished sessions stay as they are.
    pub fn toggle_pause(&mut self, now_ms: u64) -> bool {
        if self.is_finished() {
            return self.is_paused;
        }

        if self.is_paused {
            let paused_for = self
                .stopped_at
                .map_or(0, |at| now_ms.saturating_sub(at));
            self.start_time = self.start_time.saturating_add(paused_for);
            self.stopped_at = None;
            self.is_paused = false;
            tracing::debug!(paused_for, "resumed");
        } else {
            self.stopped_at = Some(now_ms);
            self.is_paused = true;
            self.selection = None;
            tracing::debug!(elapsed = self.elapsed_ms(now_ms), "paused");
        }

        self.is_paused
    }

    /// Timeout poll. Returns the summary on the tick that times the game out.
    pub fn tick(&mut self, now_ms: u64) -> Option<GameSummary> {
        if self.status() != SessionStatus::Active || self.time_limit == 0 {
            return None;
        }
        if self.elapsed_ms(now_ms) < self.time_limit as u64 * MS_PER_SEC {
            return None;
        }

        self.is_timed_out = true;
        self.stopped_at = Some(now_ms);
        self.selection = None;

        let summary = self.summarize(Outcome::TimedOut, 0);
        tracing::info!(
            score = summary.final_score,
            found = summary.words_found,
            total = summary.total_words,
            "game timed out"
        );
        Some(summary)
    }

    /// Read-only view at clock reading `now_ms`
    pub fn state(&self, now_ms: u64) -> GameStateView {
        let progress = if self.words.is_empty() {
            0.0
        } else {
            self.found_words.len() as f64 / self.words.len() as f64 * 100.0
        };

        GameStateView {
            grid: self.grid.clone(),
            words: self.words.clone(),
            found_words: self.found_words.clone(),
            score: self.score,
            category: self.category,
            difficulty: self.difficulty,
            is_completed: self.is_completed,
            is_timed_out: self.is_timed_out,
            is_paused: self.is_paused,
            time_limit: self.time_limit,
            current_time: self.elapsed_ms(now_ms) as f64 / MS_PER_SEC as f64,
            progress,
        }
    }

    /// Endpoints and direction of the word at `index`, unless already found.
    pub fn hint(&mut self, index: usize) -> Option<Hint> {
        let placed = self.placed_words.get(index)?;
        if self.is_found(&placed.word) {
            return None;
        }

        let hint = Hint {
            word: placed.word.clone(),
            first_letter: placed.first()?,
            last_letter: placed.last()?,
            direction: placed.direction,
        };
        self.hints_used += 1;
        Some(hint)
    }

    /// Copy for persistence with the clock stopped at `now_ms`.
    pub fn snapshot(&self, now_ms: u64) -> Session {
        let mut copy = self.clone();
        copy.selection = None;
        copy.stopped_at = Some(self.stopped_at.unwrap_or(now_ms));
        copy
    }

    /// Bring a stored session back into play at `now_ms`.
    ///
    /// Validates it, then shifts the start time so elapsed time is what it
    /// was when the snapshot was taken.
    pub fn restore(mut self, now_ms: u64) -> Result<Session, SessionError> {
        self.validate()?;
        self.selection = None;

        if self.is_finished() {
            return Ok(self);
        }

        if self.stopped_at.is_some() {
            let elapsed = self.elapsed_ms(now_ms);
            self.start_time = now_ms.saturating_sub(elapsed);
            self.stopped_at = if self.is_paused { Some(now_ms) } else { None };
        }
        Ok(self)
    }

    /// Check the structural invariants of a (possibly deserialized) session.
    pub fn validate(&self) -> Result<(), SessionError> {
        let expected = self.difficulty.grid_size();
        let actual = self.grid.size();
        if actual != expected || actual > MAX_GRID_SIZE {
            return Err(SessionError::GridSizeMismatch {
                difficulty: self.difficulty,
                expected,
                actual,
            });
        }

        if let Some(cell) = self.grid.cells().find(|c| c.is_empty()) {
            return Err(SessionError::EmptyCell {
                row: cell.row,
                col: cell.col,
            });
        }

        for (index, placed) in self.placed_words.iter().enumerate() {
            if placed.id != index {
                return Err(SessionError::WordIdMismatch {
                    word: placed.word.clone(),
                    id: placed.id,
                    index,
                });
            }
            validate_placement(&self.grid, placed)?;
        }

        if self.words.len() != self.placed_words.len()
            || self.words.iter().zip(&self.placed_words).any(|(w, p)| *w != p.word)
        {
            return Err(SessionError::WordListMismatch);
        }

        for (i, word) in self.found_words.iter().enumerate() {
            if !self.words.contains(word) {
                return Err(SessionError::UnknownFoundWord { word: word.clone() });
            }
            if self.found_words[..i].contains(word) {
                return Err(SessionError::DuplicateFoundWord { word: word.clone() });
            }
        }

        // A board without words has nothing left to find but was never won
        let all_found = !self.words.is_empty() && self.found_words.len() == self.words.len();
        if self.is_completed != all_found {
            return Err(SessionError::CompletionMismatch {
                found: self.found_words.len(),
                total: self.words.len(),
            });
        }
        if self.is_completed && self.is_timed_out {
            return Err(SessionError::ConflictingOutcome);
        }
        if (self.is_paused || self.is_finished()) && self.stopped_at.is_none() {
            return Err(SessionError::MissingStopTime);
        }

        Ok(())
    }
}

fn validate_placement(grid: &Grid, placed: &PlacedWord) -> Result<(), SessionError> {
    let malformed = || SessionError::MalformedPlacement {
        word: placed.word.clone(),
    };

    if placed.positions.len() != placed.word.chars().count() || placed.is_empty() {
        return Err(malformed());
    }
    if placed.first() != Some(placed.start) {
        return Err(malformed());
    }

    for (i, (&pos, ch)) in placed.positions.iter().zip(placed.word.chars()).enumerate() {
        if placed.start.offset(placed.direction, i, grid.size()) != Some(pos) {
            return Err(malformed());
        }
        if grid.letter_at(pos) != Some(ch) {
            return Err(SessionError::LetterMismatch {
                word: placed.word.clone(),
                row: pos.row,
                col: pos.col,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::placer::place_at;
    use crate::rng::{ScriptedRng, SimpleRng};
    use crate::types::Direction;

    const T0: u64 = 1_000_000;

    /// Easy board with GATO at (2,2) → and OSO at (5,0) ↓, rest filled with 'Z'.
    fn fixture(time_limit: u32) -> Session {
        let mut grid = Grid::new(Difficulty::Easy.grid_size());
        let gato = place_at(&mut grid, "GATO", Position::new(2, 2), Direction::Horizontal, 0).unwrap();
        let oso = place_at(&mut grid, "OSO", Position::new(5, 0), Direction::Vertical, 1).unwrap();
        fill_empty(&mut grid, &mut ScriptedRng::new(vec![25]));
        Session::from_parts(
            Category::Animals,
            Difficulty::Easy,
            grid,
            vec![gato, oso],
            time_limit,
            T0,
        )
        .unwrap()
    }

    fn select(s: &mut Session, from: (i32, i32), to: (i32, i32), now: u64) -> Option<FoundWord> {
        assert!(s.start_selection(from.0, from.1));
        s.update_selection(to.0, to.1);
        s.end_selection(now)
    }

    #[test]
    fn test_generate_easy_animals() {
        let mut rng = SimpleRng::new(12345);
        let s = Session::generate(Category::Animals, Difficulty::Easy, 0, &mut rng, T0);

        assert_eq!(s.grid().size(), 10);
        assert_eq!(s.words().len(), 8);
        assert_eq!(s.words().len(), s.placed_words().len());
        for w in s.words() {
            assert!(catalog::words(Category::Animals).contains(&w.as_str()));
        }
        for cell in s.grid().cells() {
            assert!(cell.letter.is_some_and(|c| c.is_uppercase()));
        }
        for p in s.placed_words() {
            assert_eq!(s.grid().word_along(&p.positions), p.word);
        }
        assert_eq!(s.status(), SessionStatus::Active);
        s.validate().unwrap();
    }

    #[test]
    fn test_generate_keeps_word_count_across_seeds() {
        for seed in 1..40 {
            for category in Category::ALL {
                for difficulty in Difficulty::ALL {
                    let s = Session::generate(category, difficulty, 0, &mut SimpleRng::new(seed), T0);
                    assert_eq!(s.words().len(), difficulty.word_count(), "{category:?} {difficulty:?} seed {seed}");
                    s.validate().unwrap();
                }
            }
        }
    }

    #[test]
    fn test_wordless_board_is_valid_and_active() {
        let mut grid = Grid::new(10);
        fill_empty(&mut grid, &mut SimpleRng::new(4));
        let s = Session::from_parts(Category::Science, Difficulty::Easy, grid, Vec::new(), 0, T0).unwrap();

        assert_eq!(s.status(), SessionStatus::Active);
        assert!(s.summary().is_none());
        let restored = s.snapshot(T0 + 5_000).restore(T0 + 9_000).unwrap();
        assert_eq!(restored.elapsed_ms(T0 + 9_000), 5_000);
    }

    #[test]
    fn test_generate_is_deterministic_per_seed() {
        let a = Session::generate(Category::Sports, Difficulty::Hard, 0, &mut SimpleRng::new(9), T0);
        let b = Session::generate(Category::Sports, Difficulty::Hard, 0, &mut SimpleRng::new(9), T0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_select_gato_forward() {
        let mut s = fixture(0);
        assert!(s.start_selection(2, 2));
        let path = s.update_selection(2, 5).to_vec();
        assert_eq!(
            path,
            vec![
                Position::new(2, 2),
                Position::new(2, 3),
                Position::new(2, 4),
                Position::new(2, 5)
            ]
        );

        let found = s.end_selection(T0 + 1_000).unwrap();
        assert_eq!(found.placed.word, "GATO");
        assert_eq!(found.points, 40);
        assert!(found.summary.is_none());
        assert_eq!(s.found_words(), &["GATO".to_string()]);
        assert_eq!(s.score(), 40);
        assert!(s.selection().is_none());
    }

    #[test]
    fn test_select_reversed_matches() {
        let mut s = fixture(0);
        let found = select(&mut s, (2, 5), (2, 2), T0).unwrap();
        assert_eq!(found.placed.word, "GATO");
    }

    #[test]
    fn test_word_cannot_be_found_twice() {
        let mut s = fixture(0);
        assert!(select(&mut s, (2, 2), (2, 5), T0).is_some());
        assert!(select(&mut s, (2, 2), (2, 5), T0).is_none());
        assert_eq!(s.found_words().len(), 1);
        assert_eq!(s.score(), 40);
    }

    #[test]
    fn test_partial_or_overlong_selection_misses() {
        let mut s = fixture(0);
        assert!(select(&mut s, (2, 2), (2, 4), T0).is_none());
        assert!(select(&mut s, (2, 2), (2, 6), T0).is_none());
        assert_eq!(s.mistakes(), 2);
        assert!(s.found_words().is_empty());
    }

    #[test]
    fn test_single_cell_selection_is_discarded() {
        let mut s = fixture(0);
        assert!(select(&mut s, (2, 2), (2, 2), T0).is_none());
        assert_eq!(s.mistakes(), 0);
    }

    #[test]
    fn test_off_ray_update_keeps_prior_path() {
        let mut s = fixture(0);
        assert!(s.start_selection(0, 0));
        assert_eq!(s.update_selection(3, 1), &[Position::new(0, 0)]);

        let diag = s.update_selection(2, 2).to_vec();
        assert_eq!(diag.len(), 3);
        assert_eq!(s.update_selection(3, 1), diag.as_slice());
    }

    #[test]
    fn test_start_selection_rejects_off_grid() {
        let mut s = fixture(0);
        assert!(!s.start_selection(-1, 0));
        assert!(!s.start_selection(0, 10));
        assert!(s.update_selection(1, 1).is_empty());
        assert!(s.end_selection(T0).is_none());
    }

    #[test]
    fn test_completion_applies_bonus_once() {
        let mut s = fixture(0);
        select(&mut s, (2, 2), (2, 5), T0 + 1_000).unwrap();
        let last = select(&mut s, (7, 0), (5, 0), T0 + 30_000).unwrap();

        let summary = last.summary.unwrap();
        assert_eq!(summary.outcome, Outcome::Completed);
        // 40 + 30, then 20%
        assert_eq!(summary.completion_bonus, 14);
        assert_eq!(summary.final_score, 84);
        assert_eq!(summary.words_found, 2);
        assert_eq!(summary.total_words, 2);
        assert_eq!(summary.elapsed_secs, 30.0);
        assert_eq!(s.score(), 84);
        assert_eq!(s.status(), SessionStatus::Completed);

        // Terminal: nothing else moves
        assert!(!s.start_selection(2, 2));
        assert!(!s.toggle_pause(T0 + 40_000));
        assert!(s.tick(T0 + 90_000_000).is_none());
        assert_eq!(s.elapsed_ms(T0 + 100_000), 30_000);
        assert_eq!(s.summary(), Some(summary));
    }

    #[test]
    fn test_pause_freezes_elapsed_and_blocks_selection() {
        let mut s = fixture(0);
        assert!(s.start_selection(2, 2));
        assert!(s.toggle_pause(T0 + 5_000));
        assert!(s.selection().is_none());
        assert!(!s.start_selection(2, 2));
        assert!(s.update_selection(2, 5).is_empty());

        assert_eq!(s.elapsed_ms(T0 + 60_000), 5_000);

        assert!(!s.toggle_pause(T0 + 65_000));
        assert_eq!(s.elapsed_ms(T0 + 65_000), 5_000);
        assert_eq!(s.elapsed_ms(T0 + 66_000), 6_000);
    }

    #[test]
    fn test_pause_resume_without_gap_keeps_time() {
        let mut s = fixture(0);
        let before = s.state(T0 + 2_500).current_time;
        s.toggle_pause(T0 + 2_500);
        s.toggle_pause(T0 + 2_500);
        assert_eq!(s.state(T0 + 2_500).current_time, before);
    }

    #[test]
    fn test_time_bonus_ignores_pause_length() {
        let mut a = fixture(60);
        let mut b = fixture(60);

        b.toggle_pause(T0 + 10_000);
        b.toggle_pause(T0 + 50_000);

        let pa = select(&mut a, (2, 2), (2, 5), T0 + 15_000).unwrap().points;
        let pb = select(&mut b, (2, 2), (2, 5), T0 + 55_000).unwrap().points;
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_timeout_is_terminal() {
        let mut s = fixture(60);
        assert!(s.tick(T0 + 59_900).is_none());

        let summary = s.tick(T0 + 60_000).unwrap();
        assert_eq!(summary.outcome, Outcome::TimedOut);
        assert_eq!(summary.completion_bonus, 0);
        assert_eq!(s.status(), SessionStatus::TimedOut);
        assert!(!s.is_completed());

        assert!(!s.start_selection(2, 2));
        assert!(s.tick(T0 + 70_000).is_none());
        assert_eq!(s.summary().map(|x| x.outcome), Some(Outcome::TimedOut));
    }

    #[test]
    fn test_tick_is_noop_while_paused_or_untimed() {
        let mut untimed = fixture(0);
        assert!(untimed.tick(u64::MAX / 2).is_none());

        let mut paused = fixture(60);
        paused.toggle_pause(T0 + 1_000);
        assert!(paused.tick(T0 + 120_000).is_none());
        assert_eq!(paused.status(), SessionStatus::Paused);
    }

    #[test]
    fn test_state_is_idempotent() {
        let mut s = fixture(0);
        select(&mut s, (2, 2), (2, 5), T0 + 1_000);
        let a = s.state(T0 + 3_000);
        let b = s.state(T0 + 3_000);
        assert_eq!(a, b);
        assert_eq!(a.progress, 50.0);
        assert_eq!(a.current_time, 3.0);
        assert_eq!(a.found_words, vec!["GATO".to_string()]);
    }

    #[test]
    fn test_hint_reveals_unfound_words_only() {
        let mut s = fixture(0);
        let hint = s.hint(1).unwrap();
        assert_eq!(hint.word, "OSO");
        assert_eq!(hint.first_letter, Position::new(5, 0));
        assert_eq!(hint.last_letter, Position::new(7, 0));
        assert_eq!(hint.direction, Direction::Vertical);
        assert_eq!(s.hints_used(), 1);

        select(&mut s, (2, 2), (2, 5), T0);
        assert!(s.hint(0).is_none());
        assert!(s.hint(9).is_none());
        assert_eq!(s.hints_used(), 1);
    }

    #[test]
    fn test_snapshot_restore_preserves_elapsed() {
        let mut s = fixture(120);
        select(&mut s, (2, 2), (2, 5), T0 + 1_000);

        let snap = s.snapshot(T0 + 20_000);
        let json = serde_json::to_string(&snap).unwrap();
        let loaded: Session = serde_json::from_str(&json).unwrap();
        let restored = loaded.restore(T0 + 500_000).unwrap();

        assert_eq!(restored.elapsed_ms(T0 + 500_000), 20_000);
        assert_eq!(restored.status(), SessionStatus::Active);
        assert_eq!(restored.found_words(), s.found_words());
        assert_eq!(restored.score(), s.score());
    }

    #[test]
    fn test_restore_keeps_paused_sessions_paused() {
        let mut s = fixture(0);
        s.toggle_pause(T0 + 7_000);
        let restored = s.snapshot(T0 + 9_000).restore(T0 + 100_000).unwrap();
        assert!(restored.is_paused());
        assert_eq!(restored.elapsed_ms(T0 + 200_000), 7_000);

        let mut restored = restored;
        restored.toggle_pause(T0 + 200_000);
        assert_eq!(restored.elapsed_ms(T0 + 201_000), 8_000);
    }

    #[test]
    fn test_restore_onto_an_earlier_clock() {
        let s = fixture(0);
        let restored = s.snapshot(T0 + 30_000).restore(40_000).unwrap();
        assert_eq!(restored.elapsed_ms(40_000), 30_000);
        assert_eq!(restored.elapsed_ms(41_000), 31_000);
    }

    #[test]
    fn test_validate_rejects_tampered_grid() {
        let s = fixture(0);
        let mut json = serde_json::to_value(&s).unwrap();
        json["grid"][2][2]["letter"] = serde_json::json!("X");
        let tampered: Session = serde_json::from_value(json).unwrap();
        assert!(matches!(
            tampered.validate(),
            Err(SessionError::LetterMismatch { row: 2, col: 2, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_found_word() {
        let s = fixture(0);
        let mut json = serde_json::to_value(&s).unwrap();
        json["foundWords"] = serde_json::json!(["PERRO"]);
        let tampered: Session = serde_json::from_value(json).unwrap();
        assert!(matches!(
            tampered.validate(),
            Err(SessionError::UnknownFoundWord { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_wrong_size() {
        let s = fixture(0);
        let mut json = serde_json::to_value(&s).unwrap();
        json["difficulty"] = serde_json::json!("hard");
        let tampered: Session = serde_json::from_value(json).unwrap();
        assert!(matches!(
            tampered.restore(T0),
            Err(SessionError::GridSizeMismatch { expected: 15, actual: 10, .. })
        ));
    }
}
