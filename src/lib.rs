//! Conway's Game of Life with per-cell generation counters
//!
//! This library evolves a fixed-dimension square grid under the canonical
//! four Life rules, tracking for every cell how many consecutive ticks it has
//! stayed alive, and classifies cells into renderer-facing visual categories.

pub mod config;
pub mod engine;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use engine::{Cell, CellClass, ClassificationPolicy, Grid, GridEngine, GridFactory};
pub use simulation::{SimulationReport, SimulationRunner};

use anyhow::Result;

/// Seed a grid from the settings and evolve it for the configured number of
/// ticks, returning the run report
pub fn run_simulation(settings: &Settings) -> Result<SimulationReport> {
    let mut runner = SimulationRunner::from_settings(settings)?;
    runner.run(settings.simulation.ticks);
    Ok(runner.report())
}
