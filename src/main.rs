//! Main CLI application for the Game of Life simulation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use life_grid::{
    config::{CliOverrides, Settings},
    engine::{create_example_grids, load_grid_from_file, save_grid_to_file, GridEngine, GridFactory},
    simulation::SimulationRunner,
    utils::{ColorOutput, GridFormatter, ProgressIndicator},
};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "life_grid")]
#[command(about = "Conway's Game of Life with per-cell generation counters")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed a grid and evolve it for a number of ticks (auto-play)
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Number of ticks (overrides config)
        #[arg(short, long)]
        ticks: Option<usize>,

        /// Grid dimension (overrides config)
        #[arg(short, long)]
        dimension: Option<usize>,

        /// Live-cell probability for seeding (overrides config)
        #[arg(short = 'p', long)]
        live_probability: Option<f64>,

        /// RNG seed for a reproducible run (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Start from a saved grid file instead of a random seed
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the grid after every tick
        #[arg(long)]
        watch: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Advance a saved grid by exactly one tick (manual stepping)
    Step {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Grid file to advance
        #[arg(short, long)]
        grid: PathBuf,

        /// Where to write the stepped grid (defaults to overwriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show the classification view instead of the generation view
        #[arg(long)]
        classes: bool,
    },

    /// Generate a random starting grid without evolving it
    Seed {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Grid dimension (overrides config)
        #[arg(short, long)]
        dimension: Option<usize>,

        /// Live-cell probability (overrides config)
        #[arg(short = 'p', long)]
        live_probability: Option<f64>,

        /// RNG seed for a reproducible grid (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output file
        #[arg(short, long, default_value = "output/seed.txt")]
        output: PathBuf,
    },

    /// Create example configuration and grid files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            ticks,
            dimension,
            live_probability,
            seed,
            input,
            output,
            watch,
            verbose,
        } => run_command(
            config,
            ticks,
            dimension,
            live_probability,
            seed,
            input,
            output,
            watch,
            verbose,
        ),
        Commands::Step {
            config,
            grid,
            output,
            classes,
        } => step_command(config, grid, output, classes),
        Commands::Seed {
            config,
            dimension,
            live_probability,
            seed,
            output,
        } => seed_command(config, dimension, live_probability, seed, output),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

/// Load settings from the config file, falling back to defaults if it is
/// missing
fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

#[allow(clippy::too_many_arguments)]
fn run_command(
    config_path: PathBuf,
    ticks: Option<usize>,
    dimension: Option<usize>,
    live_probability: Option<f64>,
    seed: Option<u64>,
    input: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    watch: bool,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("Starting Game of Life run"));

    let mut settings = load_settings(&config_path)?;

    let cli_overrides = CliOverrides {
        ticks,
        dimension,
        live_probability,
        rng_seed: seed,
        output_dir,
    };
    settings.merge_with_cli(&cli_overrides);

    settings.validate().context("Configuration validation failed")?;

    if verbose {
        println!("Configuration:");
        println!("  Ticks: {}", settings.simulation.ticks);
        println!("  Dimension: {}", settings.seed.dimension);
        println!("  Live probability: {}", settings.seed.live_probability);
        match settings.seed.rng_seed {
            Some(seed) => println!("  RNG seed: {}", seed),
            None => println!("  RNG seed: random"),
        }
        println!("  Output dir: {}", settings.output.output_directory.display());
        println!();
    }

    let start_time = Instant::now();

    let mut runner = match &input {
        Some(path) => {
            let grid = load_grid_from_file(path)
                .with_context(|| format!("Failed to load grid from {}", path.display()))?;
            SimulationRunner::with_initial(grid, settings.output.save_history)
        }
        None => SimulationRunner::from_settings(&settings)
            .context("Failed to seed starting grid")?,
    };

    if watch {
        println!("Tick 0:");
        println!("{}", GridFormatter::format_grid_generations(runner.current()));

        for _ in 0..settings.simulation.ticks {
            if settings.simulation.tick_delay_ms > 0 {
                std::thread::sleep(Duration::from_millis(settings.simulation.tick_delay_ms));
            }
            runner.advance();
            println!("Tick {}:", runner.tick());
            println!("{}", GridFormatter::format_grid_generations(runner.current()));
        }
    } else if settings.simulation.ticks >= 200 {
        let mut progress = ProgressIndicator::new(settings.simulation.ticks);
        for tick in 1..=settings.simulation.ticks {
            runner.advance();
            progress.update(tick);
        }
        progress.finish();
    } else {
        runner.run(settings.simulation.ticks);
    }

    let total_time = start_time.elapsed();
    let report = runner.report();

    if !watch {
        println!("Final state after {} ticks:", report.ticks);
        println!("{}", GridFormatter::format_grid_generations(&report.final_grid));
    }

    if verbose {
        print!(
            "{}",
            GridFormatter::format_class_counts(&report.final_grid, &settings.classification.policy)
        );
        println!();
    }

    print!("{}", report);
    println!(
        "{}",
        ColorOutput::success(&format!(
            "Run completed in {:.3}s",
            total_time.as_secs_f64()
        ))
    );

    GridFormatter::save_run_artifacts(
        &report,
        runner.history(),
        &settings.output.output_directory,
        &settings.output.format,
    )
    .context("Failed to save run artifacts")?;

    println!(
        "Artifacts saved to {}",
        settings.output.output_directory.display()
    );

    Ok(())
}

fn step_command(
    config_path: PathBuf,
    grid_path: PathBuf,
    output: Option<PathBuf>,
    classes: bool,
) -> Result<()> {
    let settings = load_settings(&config_path)?;
    let policy = &settings.classification.policy;

    let grid = load_grid_from_file(&grid_path)
        .with_context(|| format!("Failed to load grid from {}", grid_path.display()))?;

    let next = GridEngine::step(&grid);

    let render = |grid| {
        if classes {
            GridFormatter::format_grid_classes(grid, policy)
        } else {
            GridFormatter::format_grid_generations(grid)
        }
    };

    println!("Before:");
    println!("{}", render(&grid));
    println!("After:");
    println!("{}", render(&next));

    if classes {
        print!("{}", GridFormatter::format_class_counts(&next, policy));
    }

    let output_path = output.unwrap_or(grid_path);
    save_grid_to_file(&next, &output_path)
        .with_context(|| format!("Failed to save stepped grid to {}", output_path.display()))?;

    println!(
        "{}",
        ColorOutput::success(&format!("Stepped grid saved to {}", output_path.display()))
    );

    Ok(())
}

fn seed_command(
    config_path: PathBuf,
    dimension: Option<usize>,
    live_probability: Option<f64>,
    seed: Option<u64>,
    output: PathBuf,
) -> Result<()> {
    let mut settings = load_settings(&config_path)?;

    let cli_overrides = CliOverrides {
        dimension,
        live_probability,
        rng_seed: seed,
        ..CliOverrides::default()
    };
    settings.merge_with_cli(&cli_overrides);
    settings.validate().context("Configuration validation failed")?;

    let grid = match settings.seed.rng_seed {
        Some(seed) => GridFactory::create_seeded(
            settings.seed.dimension,
            settings.seed.live_probability,
            seed,
        )?,
        None => GridFactory::create(settings.seed.dimension, settings.seed.live_probability)?,
    };

    println!(
        "Seeded {}x{} grid with {} living cells:",
        grid.dimension,
        grid.dimension,
        grid.living_count()
    );
    println!("{}", GridFormatter::format_grid_compact(&grid));

    save_grid_to_file(&grid, &output)
        .with_context(|| format!("Failed to save grid to {}", output.display()))?;

    println!(
        "{}",
        ColorOutput::success(&format!("Grid saved to {}", output.display()))
    );

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/grids");
    let output_dir = directory.join("output/runs");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        let default_settings = Settings::default();
        default_settings
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_grids(&input_dir).context("Failed to create example grids")?;
    println!("Created example grids in: {}", input_dir.display());

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    // Staged classification with a slow watchable cadence
    let mut staged_config = Settings::default();
    staged_config.classification.policy = life_grid::ClassificationPolicy::Staged;
    staged_config.simulation.tick_delay_ms = 1000;
    staged_config.output.save_history = true;
    staged_config.to_file(&examples_dir.join("staged.yaml"))?;

    // Reproducible run with a JSON report
    let mut reproducible_config = Settings::default();
    reproducible_config.seed.rng_seed = Some(42);
    reproducible_config.output.format = life_grid::config::OutputFormat::Json;
    reproducible_config.to_file(&examples_dir.join("reproducible.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- run --config config/default.yaml");
    println!(
        "3. Or step a pattern: cargo run -- step --grid {}",
        input_dir.join("blinker.txt").display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "life_grid",
            "run",
            "--config",
            "test.yaml",
            "--ticks",
            "5",
            "--seed",
            "42",
        ]);

        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_rejects_unknown_command() {
        let cli = Cli::try_parse_from(["life_grid", "reverse"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("input/grids/blinker.txt").exists());
        assert!(temp_dir.path().join("config/examples/staged.yaml").exists());
    }

    #[test]
    fn test_seed_command_writes_grid() {
        let temp_dir = tempdir().unwrap();
        let output = temp_dir.path().join("seed.txt");

        let result = seed_command(
            temp_dir.path().join("missing.yaml"),
            Some(8),
            Some(0.5),
            Some(42),
            output.clone(),
        );

        assert!(result.is_ok());
        let grid = load_grid_from_file(&output).unwrap();
        assert_eq!(grid.dimension, 8);
    }
}
