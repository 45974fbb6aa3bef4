//! Achievement flags and the unlock rules.
//!
//! Only completed games unlock anything. Streak achievements read the
//! statistics after the game was recorded.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use word_search_types::{Category, Difficulty};

use crate::statistics::{GameResult, Statistics};

/// Completion under this many seconds earns speed demon
pub const SPEED_DEMON_SECS: u64 = 120;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streaks {
    pub streak5: bool,
    pub streak10: bool,
    pub streak25: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub score1000: bool,
    pub score5000: bool,
    pub score10000: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Special {
    pub no_mistakes: bool,
    pub all_categories: bool,
    pub master: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Achievements {
    pub first_win: bool,
    pub speed_demon: bool,
    /// Completed without hints
    pub perfect_score: bool,
    pub categories: BTreeMap<Category, bool>,
    pub difficulties: BTreeMap<Difficulty, bool>,
    pub streaks: Streaks,
    pub scores: Scores,
    pub special: Special,
}

impl Default for Achievements {
    fn default() -> Self {
        Self {
            first_win: false,
            speed_demon: false,
            perfect_score: false,
            categories: Category::ALL.iter().map(|&c| (c, false)).collect(),
            difficulties: Difficulty::ALL.iter().map(|&d| (d, false)).collect(),
            streaks: Streaks::default(),
            scores: Scores::default(),
            special: Special::default(),
        }
    }
}

/// A newly unlocked achievement, for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
}

impl Achievement {
    fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>, icon: &str) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            icon: icon.to_string(),
        }
    }
}

/// Set `flag` and report it if it was not set yet
fn unlock(flag: &mut bool, unlocked: &mut Vec<Achievement>, achievement: impl FnOnce() -> Achievement) {
    if !*flag {
        *flag = true;
        unlocked.push(achievement());
    }
}

impl Achievements {
    pub fn all_categories_done(&self) -> bool {
        Category::ALL.iter().all(|c| self.categories.get(c) == Some(&true))
    }

    pub fn all_difficulties_done(&self) -> bool {
        Difficulty::ALL.iter().all(|d| self.difficulties.get(d) == Some(&true))
    }

    /// Apply `result` and return what it newly unlocked, in display order
    pub fn check_and_unlock(&mut self, result: &GameResult, stats: &Statistics) -> Vec<Achievement> {
        let mut unlocked = Vec::new();
        if !result.completed {
            return unlocked;
        }

        unlock(&mut self.first_win, &mut unlocked, || {
            Achievement::new("firstWin", "First Win", "Complete your first word search", "trophy")
        });

        if result.time_elapsed < SPEED_DEMON_SECS {
            unlock(&mut self.speed_demon, &mut unlocked, || {
                Achievement::new("speedDemon", "Speed Demon", "Complete a puzzle in under 2 minutes", "bolt")
            });
        }

        if result.perfect_game {
            unlock(&mut self.perfect_score, &mut unlocked, || {
                Achievement::new("perfectScore", "Perfect Score", "Complete a puzzle without hints", "star")
            });
        }

        if result.no_mistakes {
            unlock(&mut self.special.no_mistakes, &mut unlocked, || {
                Achievement::new(
                    "noMistakes",
                    "Flawless",
                    "Complete a puzzle without a wrong selection",
                    "check-circle",
                )
            });
        }

        let category = result.category.as_str();
        unlock(self.categories.entry(result.category).or_default(), &mut unlocked, || {
            Achievement::new(
                format!("category_{category}"),
                format!("{category} master"),
                format!("Complete a {category} puzzle"),
                "bookmark",
            )
        });

        let difficulty = result.difficulty;
        unlock(self.difficulties.entry(difficulty).or_default(), &mut unlocked, || {
            let title = match difficulty {
                Difficulty::Easy => "Beginner",
                Difficulty::Medium => "Intermediate",
                Difficulty::Hard => "Expert",
            };
            Achievement::new(
                format!("difficulty_{}", difficulty.as_str()),
                title,
                format!("Complete a puzzle on {}", difficulty.as_str()),
                "medal",
            )
        });

        let streak = stats.current_streak;
        if streak >= 5 {
            unlock(&mut self.streaks.streak5, &mut unlocked, || {
                Achievement::new("streak5", "Streak of 5", "Complete 5 puzzles in a row", "fire")
            });
        }
        if streak >= 10 {
            unlock(&mut self.streaks.streak10, &mut unlocked, || {
                Achievement::new("streak10", "Streak of 10", "Complete 10 puzzles in a row", "fire")
            });
        }
        if streak >= 25 {
            unlock(&mut self.streaks.streak25, &mut unlocked, || {
                Achievement::new("streak25", "Legendary Streak", "Complete 25 puzzles in a row", "crown")
            });
        }

        let score = result.score;
        if score >= 1_000 {
            unlock(&mut self.scores.score1000, &mut unlocked, || {
                Achievement::new("score1000", "A Thousand Points", "Score 1000 points in one puzzle", "target")
            });
        }
        if score >= 5_000 {
            unlock(&mut self.scores.score5000, &mut unlocked, || {
                Achievement::new("score5000", "Five Thousand Points", "Score 5000 points in one puzzle", "bullseye")
            });
        }
        if score >= 10_000 {
            unlock(&mut self.scores.score10000, &mut unlocked, || {
                Achievement::new("score10000", "Ten Thousand Points", "Score 10000 points in one puzzle", "gem")
            });
        }

        let all_categories = self.all_categories_done();
        if all_categories {
            unlock(&mut self.special.all_categories, &mut unlocked, || {
                Achievement::new("allCategories", "Explorer", "Complete a puzzle in every category", "compass")
            });
        }
        if all_categories && self.all_difficulties_done() {
            unlock(&mut self.special.master, &mut unlocked, || {
                Achievement::new("master", "Grand Master", "Complete every category and every difficulty", "crown")
            });
        }

        unlocked
    }
}
