//! File I/O for grids
//!
//! Text format: one line per row, one digit per cell. '0' is dead; '1'-'9'
//! is a live cell carrying that generation counter. Counters above 9
//! saturate to '9' on write.

use super::{Cell, Grid, GridError};
use anyhow::{Context, Result};
use std::path::Path;

/// Load a grid from a text file
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read grid file: {}", path.as_ref().display()))?;

    parse_grid_from_string(&content)
        .with_context(|| format!("Failed to parse grid from file: {}", path.as_ref().display()))
}

/// Parse a grid from its string representation
pub fn parse_grid_from_string(content: &str) -> Result<Grid, GridError> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(GridError::Empty);
    }

    let mut rows = Vec::with_capacity(lines.len());

    for (row_idx, line) in lines.iter().enumerate() {
        let mut row = Vec::with_capacity(line.chars().count());
        for (col_idx, ch) in line.chars().enumerate() {
            match ch.to_digit(10) {
                Some(0) => row.push(Cell::dead()),
                Some(generation) => row.push(Cell::alive_for(generation)),
                None => {
                    return Err(GridError::InvalidCharacter {
                        ch,
                        row: row_idx,
                        col: col_idx,
                    })
                }
            }
        }
        rows.push(row);
    }

    Grid::from_rows(rows)
}

/// Save a grid to a text file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let content = grid_to_string(grid);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write grid to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Convert a grid to its string representation
pub fn grid_to_string(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.dimension * (grid.dimension + 1));

    for row in 0..grid.dimension {
        for col in 0..grid.dimension {
            let cell = grid.get(row, col);
            result.push(cell_to_char(cell));
        }
        result.push('\n');
    }

    result
}

fn cell_to_char(cell: Cell) -> char {
    if cell.alive {
        char::from_digit(cell.generation.min(9), 10).unwrap_or('9')
    } else {
        '0'
    }
}

/// Create example grid files with well-known starting patterns
pub fn create_example_grids<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    // Glider
    let glider_content = "00100\n10100\n01100\n00000\n00000\n";
    std::fs::write(dir.join("glider.txt"), glider_content)
        .context("Failed to write glider.txt")?;

    // Blinker (period-2 oscillator)
    let blinker_content = "000\n111\n000\n";
    std::fs::write(dir.join("blinker.txt"), blinker_content)
        .context("Failed to write blinker.txt")?;

    // Block (still life)
    let block_content = "0000\n0110\n0110\n0000\n";
    std::fs::write(dir.join("block.txt"), block_content)
        .context("Failed to write block.txt")?;

    // Beacon (period-2 oscillator)
    let beacon_content = "1100\n1100\n0011\n0011\n";
    std::fs::write(dir.join("beacon.txt"), beacon_content)
        .context("Failed to write beacon.txt")?;

    Ok(())
}
