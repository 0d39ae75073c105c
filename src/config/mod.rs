//! Configuration management for the Game of Life simulation

pub mod settings;

pub use settings::{
    ClassificationConfig, CliOverrides, OutputConfig, OutputFormat, SeedConfig, Settings,
    SimulationConfig,
};
