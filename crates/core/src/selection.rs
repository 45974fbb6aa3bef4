//! Selection module - drag-to-select along straight lines
//!
//! A drag starts on a cell and follows the pointer. The path is only ever
//! one of the eight rays from the start cell: a target that is not on a ray
//! (for example a knight's move away) leaves the last valid path in place.
//!
//! On release the letters along the path are compared with the placed words,
//! both as read and reversed. Position order matters: a selection only
//! matches when it covers exactly the cells of the word, walked from the
//! first letter to the last or from the last to the first.

use arrayvec::ArrayVec;

use crate::placer::PlacedWord;
use crate::types::{Direction, Position, MAX_GRID_SIZE};

/// Cells covered by a selection, at most one grid side long
pub type SelectionPath = ArrayVec<Position, MAX_GRID_SIZE>;

/// Resolve the ray from `start` toward a target `(dr, dc)` cells away.
///
/// Returns `None` for a zero delta or when the target is not on a
/// horizontal, vertical or 45° diagonal line.
pub fn ray_direction(dr: i64, dc: i64) -> Option<Direction> {
    if dr == 0 && dc == 0 {
        return None;
    }
    if dr != 0 && dc != 0 && dr.abs() != dc.abs() {
        return None;
    }
    Direction::from_step(dr.signum() as i8, dc.signum() as i8)
}

/// Walk from `start` toward `(target_row, target_col)` along `direction`,
/// inclusive of both ends, stopping early at the board edge.
pub fn walk(
    start: Position,
    target_row: i64,
    target_col: i64,
    direction: Direction,
    size: usize,
) -> SelectionPath {
    let steps = (target_row - start.row as i64)
        .abs()
        .max((target_col - start.col as i64).abs()) as usize;

    let mut path = SelectionPath::new();
    for i in 0..=steps {
        let Some(pos) = start.offset(direction, i, size) else {
            break;
        };
        if path.try_push(pos).is_err() {
            break;
        }
    }
    path
}

/// A drag in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    start: Position,
    path: SelectionPath,
    direction: Option<Direction>,
}

impl Selection {
    /// Begin at `start`; the path is just the start cell
    pub fn new(start: Position) -> Self {
        let mut path = SelectionPath::new();
        path.push(start);
        Self {
            start,
            path,
            direction: None,
        }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn path(&self) -> &[Position] {
        &self.path
    }

    /// Direction of the current path; `None` until the drag leaves the start
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Follow the pointer to `(row, col)` on a `size`×`size` grid.
    ///
    /// Returns whether the path changed. Off-ray targets are ignored.
    pub fn update(&mut self, row: i64, col: i64, size: usize) -> bool {
        let dr = row - self.start.row as i64;
        let dc = col - self.start.col as i64;

        if dr == 0 && dc == 0 {
            let collapsed = self.path.len() != 1;
            self.path.clear();
            self.path.push(self.start);
            return collapsed;
        }

        let Some(direction) = ray_direction(dr, dc) else {
            return false;
        };

        let path = walk(self.start, row, col, direction, size);
        let changed = path != self.path || self.direction != Some(direction);
        self.direction = Some(direction);
        self.path = path;
        changed
    }
}

/// Find the unfound placed word a completed path spells.
///
/// `letters` is the string read along `path`. `is_found` reports whether a
/// word has already been found and must be skipped. Forward matches win over
/// reversed ones.
pub fn match_path<'a, F>(
    letters: &str,
    path: &[Position],
    placed: &'a [PlacedWord],
    is_found: F,
) -> Option<&'a PlacedWord>
where
    F: Fn(&str) -> bool,
{
    let forward = placed
        .iter()
        .find(|p| p.word == letters && !is_found(&p.word) && p.positions == path);
    if forward.is_some() {
        return forward;
    }

    let reversed: String = letters.chars().rev().collect();
    placed.iter().find(|p| {
        p.word == reversed
            && !is_found(&p.word)
            && p.positions.len() == path.len()
            && p.positions.iter().rev().eq(path.iter())
    })
}
