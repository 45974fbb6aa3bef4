use serde::{Deserialize, Serialize};

use word_search_types::{Category, Difficulty};

/// Player preferences; also the defaults for new games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub category: Category,
    pub difficulty: Difficulty,
    /// Seconds; 0 means untimed
    pub time_limit: u32,
    pub sound_enabled: bool,
    pub animations_enabled: bool,
    pub theme: String,
    pub language: String,
    pub auto_save: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            category: Category::Animals,
            difficulty: Difficulty::Easy,
            time_limit: 0,
            sound_enabled: true,
            animations_enabled: true,
            theme: "default".to_string(),
            language: "es".to_string(),
            auto_save: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let s: Settings = serde_json::from_str(r#"{"difficulty":"hard","timeLimit":300}"#).unwrap();
        assert_eq!(s.difficulty, Difficulty::Hard);
        assert_eq!(s.time_limit, 300);
        assert_eq!(s.category, Category::Animals);
        assert!(s.auto_save);
    }
}
