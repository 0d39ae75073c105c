//! Cell and grid representation for Game of Life

use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors from grid construction, mutation and parsing
#[derive(Debug, Error)]
pub enum GridError {
    #[error("Grid cannot be empty")]
    Empty,

    #[error("Grid dimension must be positive")]
    ZeroDimension,

    #[error("Live probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    #[error("Row {row} has length {found}, expected {expected} (all rows must have the same length)")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("Grid must be square: {rows} rows but {cols} columns")]
    NotSquare { rows: usize, cols: usize },

    #[error("Coordinates ({row}, {col}) out of bounds for dimension {dimension}")]
    OutOfBounds {
        row: usize,
        col: usize,
        dimension: usize,
    },

    #[error("Invalid character '{ch}' at position ({row}, {col}). Only digits '0'-'9' are allowed")]
    InvalidCharacter { ch: char, row: usize, col: usize },

    #[error("Cell at ({row}, {col}) breaks the liveness invariant: alive={alive}, generation={generation}")]
    BrokenInvariant {
        row: usize,
        col: usize,
        alive: bool,
        generation: u32,
    },
}

/// A single cell: current liveness plus the number of consecutive ticks it has
/// been continuously alive. Invariant: `alive == (generation > 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub alive: bool,
    pub generation: u32,
}

impl Cell {
    /// A dead cell (generation 0)
    pub fn dead() -> Self {
        Self {
            alive: false,
            generation: 0,
        }
    }

    /// A freshly born cell (generation 1)
    pub fn born() -> Self {
        Self {
            alive: true,
            generation: 1,
        }
    }

    /// A live cell that has survived for `generation` consecutive ticks
    pub fn alive_for(generation: u32) -> Self {
        debug_assert!(generation > 0, "live cells start at generation 1");
        Self {
            alive: true,
            generation,
        }
    }

    /// Whether the liveness invariant holds for this cell
    pub fn is_consistent(&self) -> bool {
        self.alive == (self.generation > 0)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::dead()
    }
}

/// The 8 Moore-neighborhood offsets as (row, col) deltas
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A square Game of Life grid, row-major and 0-indexed. The dimension is
/// fixed at construction; evolution derives successor grids instead of
/// editing in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub dimension: usize,
    pub cells: Vec<Cell>,
}

impl Grid {
    /// Create a new all-dead grid
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            cells: vec![Cell::dead(); dimension * dimension],
        }
    }

    /// Create a grid from rows of cells, enforcing squareness and the
    /// per-cell liveness invariant
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        if rows.is_empty() {
            return Err(GridError::Empty);
        }

        let dimension = rows.len();
        let width = rows[0].len();

        if width == 0 {
            return Err(GridError::Empty);
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::RaggedRow {
                    row: i,
                    found: row.len(),
                    expected: width,
                });
            }
        }

        if width != dimension {
            return Err(GridError::NotSquare {
                rows: dimension,
                cols: width,
            });
        }

        let cells: Vec<Cell> = rows.into_iter().flatten().collect();
        let grid = Self { dimension, cells };
        grid.check_invariant()?;
        Ok(grid)
    }

    /// Convert 2D coordinates to the flat index
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.dimension + col
    }

    /// Get the cell at the coordinates; out-of-bounds positions read as dead
    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row < self.dimension && col < self.dimension {
            self.cells[self.index(row, col)]
        } else {
            Cell::dead()
        }
    }

    /// Set the cell at the coordinates
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), GridError> {
        if row >= self.dimension || col >= self.dimension {
            return Err(GridError::OutOfBounds {
                row,
                col,
                dimension: self.dimension,
            });
        }
        let idx = self.index(row, col);
        self.cells[idx] = cell;
        Ok(())
    }

    /// Bounds-checked access for signed coordinates. Positions outside the
    /// grid do not exist: there is no wraparound, so edges and corners simply
    /// have fewer neighbors.
    pub fn cell_at(&self, row: isize, col: isize) -> Option<&Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row < self.dimension && col < self.dimension {
            Some(&self.cells[row * self.dimension + col])
        } else {
            None
        }
    }

    /// Count live cells among the up-to-8 Moore neighbors of (row, col)
    pub fn count_live_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut count = 0;

        for (dr, dc) in NEIGHBOR_OFFSETS {
            let neighbor = self.cell_at(row as isize + dr, col as isize + dc);
            if neighbor.map_or(false, |cell| cell.alive) {
                count += 1;
            }
        }

        count
    }

    /// Get all living cell coordinates
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        iproduct!(0..self.dimension, 0..self.dimension)
            .filter(|&(row, col)| self.get(row, col).alive)
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.alive).count()
    }

    /// Liveness bitmap, ignoring generation counters. Two grids holding the
    /// same pattern at different ages compare equal through this view.
    pub fn live_pattern(&self) -> Vec<bool> {
        self.cells.iter().map(|cell| cell.alive).collect()
    }

    /// Check if the grid has no living cells
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.alive)
    }

    /// Verify that every cell satisfies `alive == (generation > 0)`
    pub fn check_invariant(&self) -> Result<(), GridError> {
        for (row, col) in iproduct!(0..self.dimension, 0..self.dimension) {
            let cell = self.get(row, col);
            if !cell.is_consistent() {
                return Err(GridError::BrokenInvariant {
                    row,
                    col,
                    alive: cell.alive,
                    generation: cell.generation,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.dimension {
            for col in 0..self.dimension {
                let cell = self.get(row, col);
                let symbol = if cell.alive { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
