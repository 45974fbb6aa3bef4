//! Storage module - local persistence for everything outside a session
//!
//! [`GameStorage`] keeps five JSON values in a [`KeyValueStore`]:
//!
//! | Key            | Value |
//! |----------------|-------|
//! | `settings`     | [`Settings`] |
//! | `statistics`   | [`Statistics`] |
//! | `achievements` | [`Achievements`] |
//! | `saved_games`  | up to [`MAX_SAVED_GAMES`] [`SavedGame`]s, oldest first |
//! | `user_profile` | [`UserProfile`] |
//!
//! Opening a storage writes defaults for keys that are missing or no longer
//! parse. After that every call reads the store fresh and writes back only
//! on success; a failed call leaves stored data untouched.
//!
//! Timestamps are passed in as `now` so callers and tests control them.
//!
//! # Finishing a game
//!
//! ```
//! use chrono::Utc;
//! use word_search_storage::{GameStorage, MemoryStore};
//!
//! let storage = GameStorage::open(MemoryStore::new(), Utc::now()).unwrap();
//! assert_eq!(storage.statistics().unwrap().games_played, 0);
//! ```

pub mod achievements;
pub mod error;
pub mod file;
pub mod profile;
pub mod saved_games;
pub mod settings;
pub mod statistics;
pub mod store;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use word_search_core::Session;

pub use achievements::{Achievement, Achievements};
pub use error::StorageError;
pub use file::{load_session_file, save_session_file};
pub use profile::UserProfile;
pub use saved_games::{SavedGame, MAX_SAVED_GAMES};
pub use settings::Settings;
pub use statistics::{GameResult, HistoryEntry, ModeStats, Statistics};
pub use store::{FileStore, KeyValueStore, MemoryStore, StorageKey};

/// Version tag written into export bundles
pub const EXPORT_VERSION: &str = "1.0.0";

/// Export/import payload; saved games are not part of it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportBundle {
    pub settings: Option<Settings>,
    pub statistics: Option<Statistics>,
    pub achievements: Option<Achievements>,
    pub user_profile: Option<UserProfile>,
    pub exported_at: Option<DateTime<Utc>>,
    pub version: Option<String>,
}

/// Bytes used per key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageUsage {
    pub total: u64,
    pub breakdown: BTreeMap<String, u64>,
    pub total_formatted: String,
}

pub struct GameStorage<S> {
    store: S,
}

impl<S: KeyValueStore> GameStorage<S> {
    /// Wrap `store`, writing defaults for missing or unreadable keys
    pub fn open(store: S, now: DateTime<Utc>) -> Result<Self, StorageError> {
        let mut storage = Self { store };
        storage.write_defaults(now)?;
        Ok(storage)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn write_defaults(&mut self, now: DateTime<Utc>) -> Result<(), StorageError> {
        self.ensure(StorageKey::Settings, Settings::default)?;
        self.ensure(StorageKey::Statistics, Statistics::default)?;
        self.ensure(StorageKey::Achievements, Achievements::default)?;
        self.ensure(StorageKey::SavedGames, Vec::<SavedGame>::new)?;
        self.ensure(StorageKey::UserProfile, || UserProfile::new(now))?;
        Ok(())
    }

    fn ensure<T, F>(&mut self, key: StorageKey, default: F) -> Result<(), StorageError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.read::<T>(key) {
            Ok(Some(_)) => Ok(()),
            Ok(None) => self.write(key, &default()),
            Err(StorageError::Corrupt { key: name, source }) => {
                tracing::warn!(key = name.as_str(), error = %source, "replacing unreadable data with defaults");
                self.write(key, &default())
            }
            Err(e) => Err(e),
        }
    }

    fn read<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>, StorageError> {
        let Some(text) = self.store.get(key.as_str())? else {
            return Ok(None);
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.as_str().to_string(),
                source,
            })
    }

    fn encode<T: Serialize>(key: StorageKey, value: &T) -> Result<String, StorageError> {
        serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: key.as_str().to_string(),
            source,
        })
    }

    fn write<T: Serialize>(&mut self, key: StorageKey, value: &T) -> Result<(), StorageError> {
        let text = Self::encode(key, value)?;
        self.store.set(key.as_str(), &text)
    }

    fn read_or_default<T: DeserializeOwned + Default>(&self, key: StorageKey) -> Result<T, StorageError> {
        Ok(self.read(key)?.unwrap_or_default())
    }

    // Settings

    pub fn settings(&self) -> Result<Settings, StorageError> {
        self.read_or_default(StorageKey::Settings)
    }

    pub fn save_settings(&mut self, settings: &Settings) -> Result<(), StorageError> {
        self.write(StorageKey::Settings, settings)
    }

    pub fn update_settings<F>(&mut self, update: F) -> Result<Settings, StorageError>
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.settings()?;
        update(&mut settings);
        self.save_settings(&settings)?;
        Ok(settings)
    }

    // Statistics and achievements

    pub fn statistics(&self) -> Result<Statistics, StorageError> {
        self.read_or_default(StorageKey::Statistics)
    }

    pub fn record_game(&mut self, result: &GameResult, now: DateTime<Utc>) -> Result<Statistics, StorageError> {
        let mut stats = self.statistics()?;
        stats.record(result, now);
        self.write(StorageKey::Statistics, &stats)?;
        tracing::debug!(
            played = stats.games_played,
            completed = stats.games_completed,
            streak = stats.current_streak,
            "statistics updated"
        );
        Ok(stats)
    }

    pub fn achievements(&self) -> Result<Achievements, StorageError> {
        self.read_or_default(StorageKey::Achievements)
    }

    /// Unlock what `result` earns against the stored statistics.
    ///
    /// Call after [`record_game`](Self::record_game) so streaks include it.
    pub fn check_and_unlock(&mut self, result: &GameResult) -> Result<Vec<Achievement>, StorageError> {
        let stats = self.statistics()?;
        let mut achievements = self.achievements()?;
        let unlocked = achievements.check_and_unlock(result, &stats);
        if !unlocked.is_empty() {
            self.write(StorageKey::Achievements, &achievements)?;
            for a in &unlocked {
                tracing::info!(id = a.id.as_str(), "achievement unlocked");
            }
        }
        Ok(unlocked)
    }

    /// Record a finished game and return the achievements it unlocked
    pub fn finish_game(&mut self, result: &GameResult, now: DateTime<Utc>) -> Result<Vec<Achievement>, StorageError> {
        self.record_game(result, now)?;
        self.check_and_unlock(result)
    }

    // Saved games

    pub fn saved_games(&self) -> Result<Vec<SavedGame>, StorageError> {
        self.read_or_default(StorageKey::SavedGames)
    }

    /// Store a snapshot in a new slot and return its id
    pub fn save_game(
        &mut self,
        session: Session,
        name: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<i64, StorageError> {
        let mut games = self.saved_games()?;
        let id = saved_games::push_saved_game(&mut games, session, name, now);
        self.write(StorageKey::SavedGames, &games)?;
        Ok(id)
    }

    /// The session stored under `id`, validated
    pub fn load_game(&self, id: i64) -> Result<Session, StorageError> {
        let session = self
            .saved_games()?
            .into_iter()
            .find(|g| g.id == id)
            .map(|g| g.game_state)
            .ok_or(StorageError::GameNotFound { id })?;
        session.validate()?;
        Ok(session)
    }

    /// Returns whether a slot was removed
    pub fn delete_game(&mut self, id: i64) -> Result<bool, StorageError> {
        let mut games = self.saved_games()?;
        let before = games.len();
        games.retain(|g| g.id != id);
        if games.len() == before {
            return Ok(false);
        }
        self.write(StorageKey::SavedGames, &games)?;
        Ok(true)
    }

    // Profile

    pub fn profile(&self) -> Result<UserProfile, StorageError> {
        Ok(self
            .read(StorageKey::UserProfile)?
            .unwrap_or_else(|| UserProfile::new(DateTime::<Utc>::default())))
    }

    pub fn update_profile<F>(&mut self, update: F) -> Result<UserProfile, StorageError>
    where
        F: FnOnce(&mut UserProfile),
    {
        let mut profile = self.profile()?;
        update(&mut profile);
        self.write(StorageKey::UserProfile, &profile)?;
        Ok(profile)
    }

    // Utilities

    /// Pretty JSON bundle of settings, statistics, achievements and profile
    pub fn export_data(&self, now: DateTime<Utc>) -> Result<String, StorageError> {
        let bundle = ExportBundle {
            settings: Some(self.settings()?),
            statistics: Some(self.statistics()?),
            achievements: Some(self.achievements()?),
            user_profile: Some(self.profile()?),
            exported_at: Some(now),
            version: Some(EXPORT_VERSION.to_string()),
        };
        serde_json::to_string_pretty(&bundle).map_err(|source| StorageError::Encode {
            key: "export".to_string(),
            source,
        })
    }

    /// Replace the sections present in `json`.
    ///
    /// The whole bundle is parsed and encoded before anything is written.
    pub fn import_data(&mut self, json: &str) -> Result<(), StorageError> {
        let bundle: ExportBundle = serde_json::from_str(json).map_err(StorageError::InvalidImport)?;

        let mut writes = Vec::new();
        if let Some(settings) = &bundle.settings {
            writes.push((StorageKey::Settings, Self::encode(StorageKey::Settings, settings)?));
        }
        if let Some(statistics) = &bundle.statistics {
            writes.push((StorageKey::Statistics, Self::encode(StorageKey::Statistics, statistics)?));
        }
        if let Some(achievements) = &bundle.achievements {
            writes.push((StorageKey::Achievements, Self::encode(StorageKey::Achievements, achievements)?));
        }
        if let Some(profile) = &bundle.user_profile {
            writes.push((StorageKey::UserProfile, Self::encode(StorageKey::UserProfile, profile)?));
        }

        for (key, text) in &writes {
            self.store.set(key.as_str(), text)?;
        }
        tracing::info!(sections = writes.len(), "data imported");
        Ok(())
    }

    /// Remove every key, then write fresh defaults
    pub fn clear_all(&mut self, now: DateTime<Utc>) -> Result<(), StorageError> {
        for key in StorageKey::ALL {
            self.store.remove(key.as_str())?;
        }
        self.write_defaults(now)?;
        tracing::info!("all data cleared");
        Ok(())
    }

    pub fn storage_usage(&self) -> Result<StorageUsage, StorageError> {
        let mut breakdown = BTreeMap::new();
        let mut total = 0;
        for key in StorageKey::ALL {
            let size = self.store.get(key.as_str())?.map_or(0, |t| t.len() as u64);
            breakdown.insert(key.as_str().to_string(), size);
            total += size;
        }
        Ok(StorageUsage {
            total,
            breakdown,
            total_formatted: format_bytes(total, 2),
        })
    }
}

/// Human-readable size, e.g. `1.5 KB`. Trailing zeros are dropped.
pub fn format_bytes(bytes: u64, decimals: usize) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let mut text = format!("{value:.decimals$}");
    if text.contains('.') {
        text = text.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    format!("{text} {}", UNITS[unit])
}
