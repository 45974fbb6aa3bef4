//! Placement module - writes words into the grid
//!
//! Random-retry placement: for each word, draw a direction and a start cell
//! and keep the first feasible try. A try is feasible when every letter lands
//! in bounds on an empty cell or on a cell that already holds the same
//! letter, which is how words cross. A word that finds no spot within
//! [`MAX_PLACEMENT_ATTEMPTS`] tries is skipped with a warning, and
//! [`place_with_replacements`] draws another word from the category in its
//! place.

use serde::{Deserialize, Serialize};

use crate::catalog::WordPool;
use crate::grid::Grid;
use crate::rng::RandomSource;
use crate::types::{Direction, Position, MAX_PLACEMENT_ATTEMPTS};

/// A word's recorded location in the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedWord {
    pub word: String,
    pub start: Position,
    pub direction: Direction,
    /// One position per letter, in reading order
    pub positions: Vec<Position>,
    /// Index into the session's word list
    pub id: usize,
}

impl PlacedWord {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn first(&self) -> Option<Position> {
        self.positions.first().copied()
    }

    pub fn last(&self) -> Option<Position> {
        self.positions.last().copied()
    }
}

/// Positions `word` would occupy, or `None` if it runs off the grid
fn trace(word: &str, start: Position, direction: Direction, size: usize) -> Option<Vec<Position>> {
    word.chars()
        .enumerate()
        .map(|(i, _)| start.offset(direction, i, size))
        .collect()
}

/// Check whether `word` fits at `start` running along `direction`
pub fn can_place(grid: &Grid, word: &str, start: Position, direction: Direction) -> bool {
    let Some(positions) = trace(word, start, direction, grid.size()) else {
        return false;
    };

    positions.iter().zip(word.chars()).all(|(&pos, ch)| {
        grid.at(pos)
            .map(|cell| cell.letter.map_or(true, |existing| existing == ch))
            .unwrap_or(false)
    })
}

/// Write `word` into the grid and return its record.
///
/// Returns `None` without touching the grid when the word does not fit.
pub fn place_at(
    grid: &mut Grid,
    word: &str,
    start: Position,
    direction: Direction,
    id: usize,
) -> Option<PlacedWord> {
    if word.is_empty() || !can_place(grid, word, start, direction) {
        return None;
    }
    let positions = trace(word, start, direction, grid.size())?;

    for (&pos, ch) in positions.iter().zip(word.chars()) {
        let cell = grid.get_mut(pos.row, pos.col)?;
        cell.letter = Some(ch);
        cell.is_word_part = true;
        cell.word_id = Some(id);
    }

    Some(PlacedWord {
        word: word.to_string(),
        start,
        direction,
        positions,
        id,
    })
}

/// One random placement try: direction, then start row, then start column.
fn try_random<R: RandomSource>(grid: &mut Grid, word: &str, id: usize, rng: &mut R) -> Option<PlacedWord> {
    let direction = Direction::ALL[rng.next_index(Direction::ALL.len())];
    let row = rng.next_index(grid.size());
    let col = rng.next_index(grid.size());
    place_at(grid, word, Position::new(row, col), direction, id)
}

/// Up to [`MAX_PLACEMENT_ATTEMPTS`] random tries for one word.
pub fn place_word<R: RandomSource>(grid: &mut Grid, word: &str, id: usize, rng: &mut R) -> Option<PlacedWord> {
    let found = (0..MAX_PLACEMENT_ATTEMPTS).find_map(|_| try_random(grid, word, id, rng));
    match &found {
        Some(p) => {
            tracing::trace!(word, direction = p.direction.as_str(), row = p.start.row, col = p.start.col, "placed word");
        }
        None => {
            tracing::warn!(
                word,
                attempts = MAX_PLACEMENT_ATTEMPTS,
                size = grid.size(),
                "could not place word, skipping"
            );
        }
    }
    found
}

/// Place each word at a random feasible spot.
///
/// Ids are assigned in order of successful placement, so they index the
/// returned list. Words that cannot be placed are logged and left out.
pub fn place_words<R, S>(words: &[S], grid: &mut Grid, rng: &mut R) -> Vec<PlacedWord>
where
    R: RandomSource,
    S: AsRef<str>,
{
    let mut placed: Vec<PlacedWord> = Vec::with_capacity(words.len());
    for word in words {
        if let Some(p) = place_word(grid, word.as_ref(), placed.len(), rng) {
            placed.push(p);
        }
    }
    placed
}

/// Place `words`, then fill every skipped slot with a word drawn from
/// `pool`, so the result has `words.len()` entries unless the pool runs dry.
pub fn place_with_replacements<R, S>(words: &[S], pool: &mut WordPool, grid: &mut Grid, rng: &mut R) -> Vec<PlacedWord>
where
    R: RandomSource,
    S: AsRef<str>,
{
    let requested = words.len();
    let mut placed = place_words(words, grid, rng);

    while placed.len() < requested {
        let Some(word) = pool.draw(rng) else {
            tracing::warn!(placed = placed.len(), requested, "word pool exhausted, board is short");
            break;
        };
        if let Some(p) = place_word(grid, word, placed.len(), rng) {
            tracing::debug!(word, "placed replacement word");
            placed.push(p);
        }
    }

    placed
}
