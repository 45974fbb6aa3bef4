//! Standalone session files chosen by the player.

use std::fs;
use std::path::Path;

use word_search_core::Session;

use crate::error::StorageError;

/// Write `session` as pretty JSON.
///
/// Pass a [`Session::snapshot`] so the stored clock is stopped.
pub fn save_session_file(path: impl AsRef<Path>, session: &Session) -> Result<(), StorageError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(session).map_err(|source| StorageError::Encode {
        key: path.display().to_string(),
        source,
    })?;
    fs::write(path, json).map_err(|e| StorageError::io(path, e))?;
    tracing::debug!(path = %path.display(), "session saved");
    Ok(())
}

/// Read and validate a session file. The caller restores it onto its clock.
pub fn load_session_file(path: impl AsRef<Path>) -> Result<Session, StorageError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
    let session: Session = serde_json::from_str(&text).map_err(|source| StorageError::Corrupt {
        key: path.display().to_string(),
        source,
    })?;
    session.validate()?;
    Ok(session)
}
