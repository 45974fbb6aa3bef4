use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use word_search_types::{Category, Difficulty};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub player_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default = "first_level")]
    pub level: u32,
    #[serde(default)]
    pub experience: u64,
    /// Seconds
    #[serde(default)]
    pub total_play_time: u64,
    #[serde(default)]
    pub favorite_category: Category,
    #[serde(default)]
    pub preferred_difficulty: Difficulty,
}

fn first_level() -> u32 {
    1
}

impl UserProfile {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            player_name: "Jugador".to_string(),
            created_at: now,
            level: first_level(),
            experience: 0,
            total_play_time: 0,
            favorite_category: Category::Animals,
            preferred_difficulty: Difficulty::Easy,
        }
    }
}
