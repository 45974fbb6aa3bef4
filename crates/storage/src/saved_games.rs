use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use word_search_core::Session;

/// Slots kept; saving past this evicts the oldest
pub const MAX_SAVED_GAMES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    /// Millisecond timestamp of the save, bumped to stay unique
    pub id: i64,
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub game_state: Session,
}

/// Append a save slot, evicting the oldest past [`MAX_SAVED_GAMES`].
/// Returns the new slot's id.
pub fn push_saved_game(
    games: &mut Vec<SavedGame>,
    session: Session,
    name: Option<String>,
    now: DateTime<Utc>,
) -> i64 {
    let next_free = games.iter().map(|g| g.id + 1).max().unwrap_or(i64::MIN);
    let id = now.timestamp_millis().max(next_free);
    let name = name.unwrap_or_else(|| format!("Game {}", now.format("%Y-%m-%d %H:%M:%S")));

    games.push(SavedGame {
        id,
        name,
        saved_at: now,
        game_state: session,
    });
    if games.len() > MAX_SAVED_GAMES {
        let excess = games.len() - MAX_SAVED_GAMES;
        games.drain(..excess);
    }
    id
}
