//! Lifetime statistics.
//!
//! Update rules per recorded game:
//! - played count and total time always grow
//! - a completed game adds its score, extends the streak and may set the
//!   best/worst score and fastest completion
//! - anything else resets the current streak
//! - the average is over completed games only
//! - worst score, fastest completion and best times use 0 for "unset"
//! - the words-found history keeps the newest 100 entries

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use word_search_core::{GameSummary, Session};
use word_search_types::{Category, Difficulty};

pub const HISTORY_LIMIT: usize = 100;

/// What a finished game contributes to statistics and achievements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub category: Category,
    pub difficulty: Difficulty,
    pub score: u32,
    /// Whole seconds
    pub time_elapsed: u64,
    pub completed: bool,
    pub words_found: Vec<String>,
    /// No hints used
    pub perfect_game: bool,
    pub no_mistakes: bool,
}

impl GameResult {
    /// Result of a finished session; `None` while it is still in play
    pub fn from_session(session: &Session) -> Option<Self> {
        session.summary().map(|summary| Self::from_summary(&summary))
    }

    /// Result carried by the summary a session emits when it ends
    pub fn from_summary(summary: &GameSummary) -> Self {
        Self {
            category: summary.category,
            difficulty: summary.difficulty,
            score: summary.final_score,
            time_elapsed: summary.elapsed_secs.round() as u64,
            completed: summary.completed(),
            words_found: summary.found_words.clone(),
            perfect_game: summary.hints_used == 0,
            no_mistakes: summary.mistakes == 0,
        }
    }
}

/// Per category or per difficulty record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeStats {
    pub played: u32,
    pub completed: u32,
    pub best_score: u32,
    /// Seconds; 0 means unset
    pub best_time: u64,
}

impl ModeStats {
    fn record(&mut self, result: &GameResult) {
        self.played += 1;
        if result.completed {
            self.completed += 1;
            self.best_score = self.best_score.max(result.score);
            if self.best_time == 0 || result.time_elapsed < self.best_time {
                self.best_time = result.time_elapsed;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub date: DateTime<Utc>,
    pub category: Category,
    pub difficulty: Difficulty,
    pub words: Vec<String>,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
    pub games_played: u32,
    pub games_completed: u32,
    pub total_score: u64,
    /// Seconds across every game
    pub total_time: u64,
    pub average_score: u32,
    pub best_score: u32,
    pub worst_score: u32,
    pub longest_streak: u32,
    pub current_streak: u32,
    pub fastest_completion: u64,
    pub category_stats: BTreeMap<Category, ModeStats>,
    pub difficulty_stats: BTreeMap<Difficulty, ModeStats>,
    pub words_found_history: Vec<HistoryEntry>,
    pub last_played: Option<DateTime<Utc>>,
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            games_played: 0,
            games_completed: 0,
            total_score: 0,
            total_time: 0,
            average_score: 0,
            best_score: 0,
            worst_score: 0,
            longest_streak: 0,
            current_streak: 0,
            fastest_completion: 0,
            category_stats: Category::ALL.iter().map(|&c| (c, ModeStats::default())).collect(),
            difficulty_stats: Difficulty::ALL.iter().map(|&d| (d, ModeStats::default())).collect(),
            words_found_history: Vec::new(),
            last_played: None,
        }
    }
}

impl Statistics {
    pub fn record(&mut self, result: &GameResult, now: DateTime<Utc>) {
        self.games_played += 1;
        self.total_time += result.time_elapsed;
        self.last_played = Some(now);

        if result.completed {
            self.games_completed += 1;
            self.total_score += result.score as u64;
            self.current_streak += 1;
            self.best_score = self.best_score.max(result.score);
            if self.worst_score == 0 || result.score < self.worst_score {
                self.worst_score = result.score;
            }
            self.longest_streak = self.longest_streak.max(self.current_streak);
            if self.fastest_completion == 0 || result.time_elapsed < self.fastest_completion {
                self.fastest_completion = result.time_elapsed;
            }
        } else {
            self.current_streak = 0;
        }

        if self.games_completed > 0 {
            self.average_score =
                (self.total_score as f64 / self.games_completed as f64).round() as u32;
        }

        self.category_stats.entry(result.category).or_default().record(result);
        self.difficulty_stats.entry(result.difficulty).or_default().record(result);

        if !result.words_found.is_empty() {
            self.words_found_history.push(HistoryEntry {
                date: now,
                category: result.category,
                difficulty: result.difficulty,
                words: result.words_found.clone(),
                score: result.score,
            });
            if self.words_found_history.len() > HISTORY_LIMIT {
                let excess = self.words_found_history.len() - HISTORY_LIMIT;
                self.words_found_history.drain(..excess);
            }
        }
    }

    /// Completed over played, as a percentage
    pub fn completion_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.games_completed as f64 / self.games_played as f64 * 100.0
        }
    }
}
