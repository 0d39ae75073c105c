//! Run statistics and stability analysis

use crate::engine::Grid;
use anyhow::{Context, Result};
use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Summary of a completed (or in-progress) simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub dimension: usize,
    pub ticks: usize,
    pub initial_grid: Grid,
    pub final_grid: Grid,
    /// Living-cell count per tick, starting with the seed state
    pub population_by_tick: Vec<usize>,
    pub stability: StabilityAnalysis,
}

/// What the recorded run converged to, if anything
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StabilityAnalysis {
    pub is_extinct: bool,
    pub is_still_life: bool,
    pub is_oscillator: bool,
    pub oscillation_period: Option<usize>,
}

impl StabilityAnalysis {
    /// Classify the run from its recorded history. Pattern comparisons use
    /// the liveness bitmap: surviving cells keep aging, so full-cell equality
    /// would never find a repeat.
    pub fn from_history(history: &[Grid], final_population: usize) -> Self {
        let mut analysis = Self {
            is_extinct: final_population == 0,
            ..Self::default()
        };

        let Some(last) = history.last() else {
            return analysis;
        };
        if history.len() < 2 || analysis.is_extinct {
            return analysis;
        }

        let last_pattern = last.live_pattern();

        if history[history.len() - 2].live_pattern() == last_pattern {
            analysis.is_still_life = true;
            return analysis;
        }

        for (age, earlier) in history.iter().rev().skip(1).enumerate() {
            if earlier.live_pattern() == last_pattern {
                analysis.is_oscillator = true;
                analysis.oscillation_period = Some(age + 1);
                break;
            }
        }

        analysis
    }
}

impl SimulationReport {
    pub fn from_run(
        initial: &Grid,
        current: &Grid,
        populations: &[usize],
        history: &[Grid],
    ) -> Self {
        let final_population = current.living_count();

        Self {
            dimension: initial.dimension,
            ticks: populations.len().saturating_sub(1),
            initial_grid: initial.clone(),
            final_grid: current.clone(),
            population_by_tick: populations.to_vec(),
            stability: StabilityAnalysis::from_history(history, final_population),
        }
    }

    pub fn initial_population(&self) -> usize {
        self.population_by_tick.first().copied().unwrap_or(0)
    }

    pub fn final_population(&self) -> usize {
        self.population_by_tick.last().copied().unwrap_or(0)
    }

    /// Save the report as pretty-printed JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize report")?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write report to {}", path.as_ref().display()))?;

        Ok(())
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run Summary:")?;
        writeln!(f, "  Grid: {}x{}", self.dimension, self.dimension)?;
        writeln!(f, "  Ticks: {}", self.ticks)?;
        writeln!(
            f,
            "  Population: {} → {}",
            self.initial_population(),
            self.final_population()
        )?;

        match self.population_by_tick.iter().minmax() {
            MinMaxResult::MinMax(min, max) => {
                writeln!(f, "  Population range: {} – {}", min, max)?
            }
            MinMaxResult::OneElement(only) => writeln!(f, "  Population range: {}", only)?,
            MinMaxResult::NoElements => {}
        }

        if self.stability.is_extinct {
            writeln!(f, "  Outcome: Extinct")?;
        } else if self.stability.is_still_life {
            writeln!(f, "  Outcome: Still Life")?;
        } else if self.stability.is_oscillator {
            writeln!(
                f,
                "  Outcome: Oscillator (period {})",
                self.stability.oscillation_period.unwrap_or(0)
            )?;
        } else {
            writeln!(f, "  Outcome: Evolving")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Cell;
    use crate::simulation::SimulationRunner;
    use tempfile::tempdir;

    fn grid_from_live(dimension: usize, live: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(dimension);
        for &(row, col) in live {
            grid.set(row, col, Cell::born()).unwrap();
        }
        grid
    }

    #[test]
    fn test_blinker_detected_as_oscillator() {
        let blinker = grid_from_live(5, &[(1, 2), (2, 2), (3, 2)]);
        let mut runner = SimulationRunner::with_initial(blinker, true);
        runner.run(4);

        let report = runner.report();
        assert!(report.stability.is_oscillator);
        assert_eq!(report.stability.oscillation_period, Some(2));
        assert!(!report.stability.is_still_life);
        assert!(!report.stability.is_extinct);
    }

    #[test]
    fn test_block_detected_as_still_life() {
        let block = grid_from_live(4, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
        let mut runner = SimulationRunner::with_initial(block, true);
        runner.run(3);

        let report = runner.report();
        assert!(report.stability.is_still_life);
        assert!(!report.stability.is_oscillator);
    }

    #[test]
    fn test_extinction_detected() {
        let lone = grid_from_live(3, &[(1, 1)]);
        let mut runner = SimulationRunner::with_initial(lone, true);
        runner.run(2);

        let report = runner.report();
        assert!(report.stability.is_extinct);
        assert!(!report.stability.is_still_life);
        assert_eq!(report.final_population(), 0);
    }

    #[test]
    fn test_no_history_no_stability_claims() {
        let block = grid_from_live(4, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
        let mut runner = SimulationRunner::with_initial(block, false);
        runner.run(3);

        let report = runner.report();
        assert!(!report.stability.is_still_life);
        assert!(!report.stability.is_oscillator);
        assert_eq!(report.ticks, 3);
        assert_eq!(report.population_by_tick, vec![4, 4, 4, 4]);
    }

    #[test]
    fn test_report_json_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("report.json");

        let blinker = grid_from_live(3, &[(0, 1), (1, 1), (2, 1)]);
        let mut runner = SimulationRunner::with_initial(blinker, true);
        runner.run(2);

        let report = runner.report();
        report.save_to_file(&path).unwrap();

        let loaded: SimulationReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.ticks, 2);
        assert_eq!(loaded.final_grid, report.final_grid);
        assert_eq!(loaded.population_by_tick, report.population_by_tick);
    }
}
