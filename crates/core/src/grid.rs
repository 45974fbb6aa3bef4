//! Grid module - the square letter matrix
//!
//! The grid is an N×N matrix of cells stored in a flat row-major `Vec`.
//! Coordinates: (row, col) where both range 0..N, row 0 at the top.
//!
//! Cells start empty (`letter == None`). The word placer writes words into
//! them, then [`fill_empty`] assigns a random filler letter to everything
//! left over, so no cell is empty at play time.

use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;
use crate::types::{Position, ALPHABET};

/// A single grid cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    /// `None` only before the filler pass
    pub letter: Option<char>,
    /// Covered by at least one placed word
    pub is_word_part: bool,
    /// Id of the last word written through this cell
    pub word_id: Option<usize>,
}

impl Cell {
    /// Create an empty cell tagged with its coordinates
    pub fn empty(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            letter: None,
            is_word_part: false,
            word_id: None,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    pub fn is_empty(&self) -> bool {
        self.letter.is_none()
    }
}

/// Errors produced when rebuilding a grid from its serialized rows
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid is empty")]
    Empty,

    #[error("grid is not square: row {row} has {len} cells, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },

    #[error("cell at slot ({row}, {col}) is tagged ({tag_row}, {tag_col})")]
    MisplacedCell {
        row: usize,
        col: usize,
        tag_row: usize,
        tag_col: usize,
    },
}

/// The N×N grid - flat array storage, row-major (row * size + col)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocate a `size`×`size` grid of empty cells
    pub fn new(size: usize) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                cells.push(Cell::empty(row, col));
            }
        }
        Self { size, cells }
    }

    /// Side length
    pub fn size(&self) -> usize {
        self.size
    }

    /// Calculate flat index from (row, col)
    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.size || col >= self.size {
            return None;
        }
        Some(row * self.size + col)
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        self.index(row, col).is_some()
    }

    /// Same as [`Grid::in_bounds`] for signed input coming from a pointer drag
    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && self.in_bounds(row as usize, col as usize)
    }

    /// Get cell at (row, col); `None` if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index(row, col).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.index(row, col).map(move |i| &mut self.cells[i])
    }

    pub fn at(&self, pos: Position) -> Option<&Cell> {
        self.get(pos.row, pos.col)
    }

    /// Letter at a position; `None` when out of bounds or still empty
    pub fn letter_at(&self, pos: Position) -> Option<char> {
        self.at(pos).and_then(|c| c.letter)
    }

    /// Concatenate the letters along `path`
    ///
    /// Empty or out-of-bounds cells contribute nothing.
    pub fn word_along(&self, path: &[Position]) -> String {
        path.iter().filter_map(|&p| self.letter_at(p)).collect()
    }

    /// Iterate over all cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Iterate over rows as slices
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks(0) panics; an empty grid has no rows anyway.
        self.cells.chunks(self.size.max(1))
    }

    /// Number of cells with no letter yet
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }
}

impl From<Grid> for Vec<Vec<Cell>> {
    fn from(grid: Grid) -> Self {
        let size = grid.size;
        let mut rows = Vec::with_capacity(size);
        let mut cells = grid.cells.into_iter();
        for _ in 0..size {
            rows.push(cells.by_ref().take(size).collect());
        }
        rows
    }
}

impl TryFrom<Vec<Vec<Cell>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        let size = rows.len();
        if size == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, cols) in rows.into_iter().enumerate() {
            if cols.len() != size {
                return Err(GridError::NotSquare {
                    row,
                    len: cols.len(),
                    size,
                });
            }
            for (col, cell) in cols.into_iter().enumerate() {
                if cell.row != row || cell.col != col {
                    return Err(GridError::MisplacedCell {
                        row,
                        col,
                        tag_row: cell.row,
                        tag_col: cell.col,
                    });
                }
                cells.push(cell);
            }
        }

        Ok(Self { size, cells })
    }
}

/// Give every still-empty cell a uniformly random letter from A-Z.
///
/// Returns how many cells were filled.
pub fn fill_empty<R: RandomSource>(grid: &mut Grid, rng: &mut R) -> usize {
    let mut filled = 0;
    for cell in grid.cells.iter_mut().filter(|c| c.is_empty()) {
        let letter = ALPHABET[rng.next_index(ALPHABET.len())];
        cell.letter = Some(letter as char);
        filled += 1;
    }
    filled
}
