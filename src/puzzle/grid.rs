//! Grid representation and utilities for 0h h1 puzzles

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single puzzle cell: undecided, or one of the two colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    Unset,
    Red,
    Blue,
}

impl Cell {
    /// The other colour. `Unset` has no opposite and maps to itself.
    pub fn opposite(self) -> Cell {
        match self {
            Cell::Red => Cell::Blue,
            Cell::Blue => Cell::Red,
            Cell::Unset => Cell::Unset,
        }
    }

    /// Whether the cell has been decided
    pub fn is_set(self) -> bool {
        !matches!(self, Cell::Unset)
    }

    /// Parse a cell from its puzzle-file character
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            'r' => Some(Cell::Red),
            'b' => Some(Cell::Blue),
            '.' => Some(Cell::Unset),
            _ => None,
        }
    }

    /// The puzzle-file character for this cell
    pub fn to_char(self) -> char {
        match self {
            Cell::Red => 'r',
            Cell::Blue => 'b',
            Cell::Unset => '.',
        }
    }
}

/// Errors raised while constructing or addressing a grid
#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("puzzle cannot be empty")]
    Empty,
    #[error("row {row} has length {found}, expected {expected} (grid must be square)")]
    RowLength {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("grid size {size} is odd (balanced colour counts need an even size)")]
    OddSize { size: usize },
    #[error("invalid character '{ch}' at row {row}, column {col} (expected 'r', 'b' or '.')")]
    InvalidCharacter { ch: char, row: usize, col: usize },
    #[error("coordinates ({row}, {col}) out of bounds for {size}x{size} grid")]
    OutOfBounds { row: usize, col: usize, size: usize },
}

/// Result of forcing a cell to a colour during propagation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceResult {
    /// The cell was unset and is now set
    Forced,
    /// The cell already held the requested colour
    Unchanged,
    /// The cell holds the other colour; the grid is contradictory
    Conflict,
}

/// A square 0h h1 board. Cells are stored row-major; `Clone` is the
/// deep-copy snapshot the search engine branches on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub size: usize,
    pub cells: Vec<Cell>,
}

impl Grid {
    /// Create a fully unset grid. The size must be even.
    pub fn new(size: usize) -> Result<Self, PuzzleError> {
        if size == 0 {
            return Err(PuzzleError::Empty);
        }
        if size % 2 != 0 {
            return Err(PuzzleError::OddSize { size });
        }
        Ok(Self {
            size,
            cells: vec![Cell::Unset; size * size],
        })
    }

    /// Create a grid from parsed rows, validating squareness and even size
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, PuzzleError> {
        if rows.is_empty() {
            return Err(PuzzleError::Empty);
        }

        let size = rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(PuzzleError::RowLength {
                    row: i,
                    found: row.len(),
                    expected: size,
                });
            }
        }
        if size % 2 != 0 {
            return Err(PuzzleError::OddSize { size });
        }

        Ok(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Convert 2D coordinates to the flat index
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Get the cell at the given coordinates
    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row < self.size && col < self.size {
            self.cells[self.index(row, col)]
        } else {
            Cell::Unset
        }
    }

    /// Set the cell at the given coordinates, overwriting any previous value
    pub fn set(&mut self, row: usize, col: usize, value: Cell) -> Result<(), PuzzleError> {
        if row >= self.size || col >= self.size {
            return Err(PuzzleError::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        let idx = self.index(row, col);
        self.cells[idx] = value;
        Ok(())
    }

    /// Force an in-bounds cell to a colour. Re-forcing the held colour is a
    /// no-op; forcing the other colour signals a contradiction rather than
    /// overwriting.
    pub fn force(&mut self, row: usize, col: usize, colour: Cell) -> ForceResult {
        let idx = self.index(row, col);
        match self.cells[idx] {
            Cell::Unset => {
                self.cells[idx] = colour;
                ForceResult::Forced
            }
            current if current == colour => ForceResult::Unchanged,
            _ => ForceResult::Conflict,
        }
    }

    /// Whether every cell has been decided
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|c| c.is_set())
    }

    /// Number of undecided cells
    pub fn unset_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_set()).count()
    }

    /// Number of cells already decided
    pub fn set_count(&self) -> usize {
        self.size * self.size - self.unset_count()
    }

    /// First undecided cell in row-major order, if any. This is the
    /// deterministic branch-cell selection policy.
    pub fn first_unset(&self) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|c| !c.is_set())
            .map(|idx| (idx / self.size, idx % self.size))
    }

    /// The cells of row `row`, left to right
    pub fn row_cells(&self, row: usize) -> Vec<Cell> {
        (0..self.size).map(|col| self.get(row, col)).collect()
    }

    /// The cells of column `col`, top to bottom
    pub fn col_cells(&self, col: usize) -> Vec<Cell> {
        (0..self.size).map(|row| self.get(row, col)).collect()
    }

    /// Count cells of a colour in row `row`
    pub fn count_in_row(&self, row: usize, colour: Cell) -> usize {
        (0..self.size).filter(|&c| self.get(row, c) == colour).count()
    }

    /// Count cells of a colour in column `col`
    pub fn count_in_col(&self, col: usize, colour: Cell) -> usize {
        (0..self.size).filter(|&r| self.get(r, col) == colour).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                write!(f, "{}", self.get(row, col).to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
