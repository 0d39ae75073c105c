//! Configuration settings for the Game of Life simulation

use crate::engine::ClassificationPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub seed: SeedConfig,
    pub classification: ClassificationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of ticks an auto-play run advances
    pub ticks: usize,
    /// Pause between displayed ticks in watch mode (0 = no pause)
    pub tick_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub dimension: usize,
    pub live_probability: f64,
    /// Fixed RNG seed for reproducible runs; absent = nondeterministic
    pub rng_seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationConfig {
    pub policy: ClassificationPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Record every intermediate grid, enabling stability analysis and
    /// full-history artifacts
    pub save_history: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
    Visual,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                ticks: 10,
                tick_delay_ms: 0,
            },
            seed: SeedConfig {
                dimension: 20,
                live_probability: 0.33,
                rng_seed: None,
            },
            classification: ClassificationConfig {
                policy: ClassificationPolicy::default(),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                save_history: false,
                output_directory: PathBuf::from("output/runs"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.simulation.ticks == 0 {
            anyhow::bail!("Number of ticks must be positive");
        }

        if self.seed.dimension == 0 {
            anyhow::bail!("Grid dimension must be positive");
        }

        if !(0.0..=1.0).contains(&self.seed.live_probability) {
            anyhow::bail!(
                "Live probability {} is outside [0, 1]",
                self.seed.live_probability
            );
        }

        if let ClassificationPolicy::Capped { max_class } = self.classification.policy {
            if max_class == 0 {
                anyhow::bail!("max_class must be at least 1");
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ticks) = cli_overrides.ticks {
            self.simulation.ticks = ticks;
        }
        if let Some(dimension) = cli_overrides.dimension {
            self.seed.dimension = dimension;
        }
        if let Some(live_probability) = cli_overrides.live_probability {
            self.seed.live_probability = live_probability;
        }
        if let Some(rng_seed) = cli_overrides.rng_seed {
            self.seed.rng_seed = Some(rng_seed);
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub ticks: Option<usize>,
    pub dimension: Option<usize>,
    pub live_probability: Option<f64>,
    pub rng_seed: Option<u64>,
    pub output_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.seed.dimension, 20);
        assert!((settings.seed.live_probability - 0.33).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.seed.dimension = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.seed.live_probability = 1.2;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.classification.policy = ClassificationPolicy::Capped { max_class: 0 };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");

        let mut settings = Settings::default();
        settings.seed.rng_seed = Some(42);
        settings.classification.policy = ClassificationPolicy::Staged;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.seed.rng_seed, Some(42));
        assert_eq!(loaded.classification.policy, ClassificationPolicy::Staged);
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            ticks: Some(50),
            dimension: Some(32),
            live_probability: Some(0.5),
            rng_seed: Some(7),
            output_dir: Some(PathBuf::from("elsewhere")),
        };

        settings.merge_with_cli(&overrides);
        assert_eq!(settings.simulation.ticks, 50);
        assert_eq!(settings.seed.dimension, 32);
        assert!((settings.seed.live_probability - 0.5).abs() < f64::EPSILON);
        assert_eq!(settings.seed.rng_seed, Some(7));
        assert_eq!(settings.output.output_directory, PathBuf::from("elsewhere"));
    }
}
