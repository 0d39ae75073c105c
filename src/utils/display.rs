//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::engine::{io, CellClass, ClassificationPolicy, Grid};
use crate::simulation::SimulationReport;
use anyhow::{Context, Result};
use itertools::Itertools;
use std::path::Path;

/// Console and file views over grids and runs
pub struct GridFormatter;

impl GridFormatter {
    /// Liveness-only view
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::new();
        for row in 0..grid.dimension {
            for col in 0..grid.dimension {
                output.push(if grid.get(row, col).alive { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Generation-counter view: digit per live cell (saturating at 9)
    pub fn format_grid_generations(grid: &Grid) -> String {
        let mut output = String::new();
        for row in 0..grid.dimension {
            for col in 0..grid.dimension {
                let cell = grid.get(row, col);
                if cell.alive {
                    let digit = cell.generation.min(9);
                    output.push(char::from_digit(digit, 10).unwrap_or('9'));
                } else {
                    output.push('·');
                }
            }
            output.push('\n');
        }
        output
    }

    /// Class view: each live cell rendered as a block colored by its
    /// classification bucket
    pub fn format_grid_classes(grid: &Grid, policy: &ClassificationPolicy) -> String {
        let mut output = String::new();
        for row in 0..grid.dimension {
            for col in 0..grid.dimension {
                match policy.classify(grid.get(row, col)) {
                    CellClass::Dead => output.push('·'),
                    class => {
                        output.push_str(&ColorOutput::colored("█", ColorOutput::for_class(&class)))
                    }
                }
            }
            output.push('\n');
        }
        output
    }

    /// Per-class census: css class name → cell count, dead cells included
    pub fn format_class_counts(grid: &Grid, policy: &ClassificationPolicy) -> String {
        let counts = grid
            .cells
            .iter()
            .map(|&cell| policy.classify(cell).css_class())
            .counts();

        let mut output = String::from("Class census:\n");
        for (class, count) in counts.iter().sorted() {
            output.push_str(&format!("  {:10} {}\n", class, count));
        }
        output
    }

    /// Grid with row/column coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for col in 0..grid.dimension {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        for row in 0..grid.dimension {
            output.push_str(&format!("{:2} ", row));
            for col in 0..grid.dimension {
                output.push_str(if grid.get(row, col).alive { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Save the artifacts of a run according to the output format
    pub fn save_run_artifacts<P: AsRef<Path>>(
        report: &SimulationReport,
        history: &[Grid],
        output_dir: P,
        format: &OutputFormat,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        match format {
            OutputFormat::Text => {
                io::save_grid_to_file(&report.initial_grid, output_dir.join("seed.txt"))?;
                io::save_grid_to_file(&report.final_grid, output_dir.join("final.txt"))?;
                for (tick, grid) in history.iter().enumerate() {
                    io::save_grid_to_file(grid, output_dir.join(format!("tick_{:03}.txt", tick)))?;
                }
            }
            OutputFormat::Json => {
                report.save_to_file(output_dir.join("report.json"))?;
            }
            OutputFormat::Visual => {
                let content = Self::create_visual_evolution(report, history);
                std::fs::write(output_dir.join("evolution.txt"), content)
                    .context("Failed to write evolution.txt")?;
            }
        }

        Ok(())
    }

    /// Tick-by-tick generation views with a trailing summary
    fn create_visual_evolution(report: &SimulationReport, history: &[Grid]) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Evolution of a {}x{} grid over {} ticks\n",
            report.dimension, report.dimension, report.ticks
        ));
        output.push_str(&"=".repeat(50));
        output.push('\n');

        if history.is_empty() {
            output.push_str("\nSeed:\n");
            output.push_str(&Self::format_grid_generations(&report.initial_grid));
            output.push_str(&format!("\nAfter {} ticks:\n", report.ticks));
            output.push_str(&Self::format_grid_generations(&report.final_grid));
        } else {
            for (tick, grid) in history.iter().enumerate() {
                output.push_str(&format!(
                    "\nTick {} (living: {}):\n",
                    tick,
                    grid.living_count()
                ));
                output.push_str(&Self::format_grid_generations(grid));
            }
        }

        output.push('\n');
        output.push_str(&report.to_string());
        output
    }
}

/// Progress indicator for long head-less runs
pub struct ProgressIndicator {
    total: usize,
    current: usize,
    last_update: std::time::Instant,
    start_time: std::time::Instant,
}

impl ProgressIndicator {
    pub fn new(total: usize) -> Self {
        let now = std::time::Instant::now();
        Self {
            total,
            current: 0,
            last_update: now,
            start_time: now,
        }
    }

    /// Update progress and refresh the display at most every 100ms
    pub fn update(&mut self, current: usize) {
        self.current = current;
        let now = std::time::Instant::now();

        if now.duration_since(self.last_update).as_millis() > 100 {
            self.display();
            self.last_update = now;
        }
    }

    fn display(&self) {
        let percentage = if self.total > 0 {
            (self.current as f64 / self.total as f64) * 100.0
        } else {
            0.0
        };

        print!(
            "\rTick {}/{} ({:.1}%)",
            self.current, self.total, percentage
        );
        std::io::Write::flush(&mut std::io::stdout()).ok();
    }

    /// Finish and clear the progress line
    pub fn finish(&self) {
        println!(
            "\rCompleted {} ticks in {:.1}s",
            self.total,
            self.start_time.elapsed().as_secs_f64()
        );
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if the terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Color assigned to a classification bucket
    pub fn for_class(class: &CellClass) -> Color {
        match class {
            CellClass::Dead => Color::Blue,
            CellClass::Seedling | CellClass::Gen(1) => Color::Green,
            CellClass::Leaves | CellClass::Gen(2) => Color::Cyan,
            CellClass::Tree | CellClass::Gen(3) | CellClass::Gen(4) => Color::Blue,
            CellClass::Gen(_) => Color::Magenta,
        }
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Magenta => 35,
            Color::Cyan => 36,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Cell;

    fn sample_grid() -> Grid {
        let mut grid = Grid::new(3);
        grid.set(0, 1, Cell::born()).unwrap();
        grid.set(1, 1, Cell::alive_for(4)).unwrap();
        grid.set(2, 1, Cell::alive_for(12)).unwrap();
        grid
    }

    #[test]
    fn test_compact_and_generation_views() {
        let grid = sample_grid();

        let compact = GridFormatter::format_grid_compact(&grid);
        assert_eq!(compact, "·█·\n·█·\n·█·\n");

        let generations = GridFormatter::format_grid_generations(&grid);
        assert_eq!(generations, "·1·\n·4·\n·9·\n");
    }

    #[test]
    fn test_class_census() {
        let grid = sample_grid();
        let policy = ClassificationPolicy::Staged;

        let census = GridFormatter::format_class_counts(&grid, &policy);
        assert!(census.contains("dead"));
        assert!(census.contains("seedling"));
        assert!(census.contains("tree"));
        assert!(!census.contains("leaves"));
    }

    #[test]
    fn test_coords_view_has_headers() {
        let with_coords = GridFormatter::format_grid_with_coords(&sample_grid());
        assert!(with_coords.contains(" 0  1  2"));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }

    #[test]
    fn test_progress_indicator() {
        let mut progress = ProgressIndicator::new(100);
        progress.update(50);
        assert_eq!(progress.current, 50);
        assert_eq!(progress.total, 100);
    }
}
