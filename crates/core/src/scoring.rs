//! Scoring module - points per found word and the completion bonus
//!
//! - Base: `letters × 10 × multiplier` (1 / 1.5 / 2 for easy/medium/hard).
//! - Time bonus: the fraction of the time limit still remaining, scaled by
//!   the difficulty constant (50 / 75 / 100), rounded. Always 0 untimed.
//! - Word score: `round(base + time bonus)`.
//! - Completion: a flat 20% of the accumulated score, rounded.

use crate::types::{Difficulty, COMPLETION_BONUS_RATIO, MS_PER_SEC, POINTS_PER_LETTER};

/// Time bonus for a find made after `elapsed_ms` of a `time_limit_secs` game
pub fn time_bonus(difficulty: Difficulty, time_limit_secs: u32, elapsed_ms: u64) -> u32 {
    if time_limit_secs == 0 {
        return 0;
    }
    let limit_ms = time_limit_secs as u64 * MS_PER_SEC;
    let remaining_ms = limit_ms.saturating_sub(elapsed_ms);
    let fraction = remaining_ms as f64 / limit_ms as f64;
    (fraction * difficulty.time_bonus() as f64).round() as u32
}

/// Points for finding a word of `letters` characters
pub fn word_score(letters: usize, difficulty: Difficulty, time_limit_secs: u32, elapsed_ms: u64) -> u32 {
    let base = letters as f64 * POINTS_PER_LETTER as f64 * difficulty.multiplier();
    let bonus = time_bonus(difficulty, time_limit_secs, elapsed_ms);
    (base + bonus as f64).round() as u32
}

/// Bonus added once when every word has been found
pub fn completion_bonus(score: u32) -> u32 {
    (score as f64 * COMPLETION_BONUS_RATIO).round() as u32
}
