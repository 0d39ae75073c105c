//! Grid evolution: the per-tick transition rules

use super::{Cell, Grid};
use rayon::prelude::*;

/// Applies the Conway transition rules, extended with the per-cell
/// consecutive-alive generation counter
pub struct GridEngine;

impl GridEngine {
    /// Advance the grid one tick, deriving a new grid of the same dimension.
    ///
    /// The input is never mutated: every neighbor lookup reads the source
    /// grid, so all cells transition simultaneously. Sequential in-place
    /// updates would leak next-tick states into the neighbor counts of
    /// not-yet-processed cells.
    pub fn step(current: &Grid) -> Grid {
        let dimension = current.dimension;

        let cells: Vec<Cell> = (0..dimension)
            .into_par_iter()
            .flat_map(|row| {
                (0..dimension).into_par_iter().map(move |col| {
                    let neighbors = current.count_live_neighbors(row, col);
                    Self::next_cell(current.get(row, col), neighbors)
                })
            })
            .collect();

        Grid { dimension, cells }
    }

    /// Transition a single cell given its live neighbor count.
    ///
    /// Underpopulation (n < 2) and overpopulation (n > 3) kill; survival
    /// (n == 2 or 3) increments the generation counter; reproduction (dead
    /// with n == 3) births at generation 1.
    pub fn next_cell(cell: Cell, live_neighbors: u8) -> Cell {
        if cell.alive {
            match live_neighbors {
                2 | 3 => Cell::alive_for(cell.generation + 1),
                _ => Cell::dead(),
            }
        } else if live_neighbors == 3 {
            Cell::born()
        } else {
            Cell::dead()
        }
    }

    /// Advance the grid through multiple ticks
    pub fn step_ticks(mut grid: Grid, ticks: usize) -> Grid {
        for _ in 0..ticks {
            grid = Self::step(&grid);
        }
        grid
    }

    /// Whether a cell with the given state and neighbor count lives next tick
    pub fn should_be_alive(alive: bool, live_neighbors: u8) -> bool {
        matches!(
            (alive, live_neighbors),
            (true, 2) | (true, 3) | (false, 3)
        )
    }
}
