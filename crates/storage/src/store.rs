//! Key-value backends.
//!
//! Values are JSON text. [`FileStore`] keeps one `<key>.json` file per key
//! under a data directory and replaces files by rename, so a crash mid-write
//! leaves the previous value intact.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Keys used by [`GameStorage`](crate::GameStorage)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
    Settings,
    Statistics,
    Achievements,
    SavedGames,
    UserProfile,
}

impl StorageKey {
    pub const ALL: [StorageKey; 5] = [
        StorageKey::Settings,
        StorageKey::Statistics,
        StorageKey::Achievements,
        StorageKey::SavedGames,
        StorageKey::UserProfile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Settings => "settings",
            StorageKey::Statistics => "statistics",
            StorageKey::Achievements => "achievements",
            StorageKey::SavedGames => "saved_games",
            StorageKey::UserProfile => "user_profile",
        }
    }
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Removing a missing key is not an error
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-process store, mostly for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One JSON file per key in a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir`, creating it if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StorageError::io(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value).map_err(|e| StorageError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| StorageError::io(&path, e))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exercise(store: &mut dyn KeyValueStore) {
        assert_eq!(store.get("settings").unwrap(), None);

        store.set("settings", "{\"a\":1}").unwrap();
        assert_eq!(store.get("settings").unwrap().as_deref(), Some("{\"a\":1}"));

        store.set("settings", "{}").unwrap();
        assert_eq!(store.get("settings").unwrap().as_deref(), Some("{}"));

        store.remove("settings").unwrap();
        store.remove("settings").unwrap();
        assert_eq!(store.get("settings").unwrap(), None);
    }

    #[test]
    fn test_memory_store() {
        exercise(&mut MemoryStore::new());
    }

    #[test]
    fn test_file_store() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut store = FileStore::open(dir.path().join("data")).unwrap();
        exercise(&mut store);
    }

    #[test]
    fn test_file_store_writes_one_file_per_key() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut store = FileStore::open(dir.path()).unwrap();
        store.set(StorageKey::SavedGames.as_str(), "[]").unwrap();

        let text = fs::read_to_string(dir.path().join("saved_games.json")).unwrap();
        assert_eq!(text, "[]");
        assert!(!dir.path().join(".saved_games.json.tmp").exists());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        FileStore::open(dir.path()).unwrap().set("user_profile", "{}").unwrap();

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("user_profile").unwrap().as_deref(), Some("{}"));
    }
}
