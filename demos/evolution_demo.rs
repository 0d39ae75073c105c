//! Demonstration of the grid evolution library
//!
//! Seeds a reproducible grid, advances it tick by tick, and shows the
//! generation counters and both classification policies at work.

use life_grid::utils::GridFormatter;
use life_grid::{ClassificationPolicy, GridEngine, GridFactory, SimulationRunner};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Game of Life Evolution Demonstration ===\n");

    // Reproducible 12x12 seed, one third alive
    let seed = GridFactory::create_seeded(12, 0.33, 42)?;
    println!("Seed ({} living cells):", seed.living_count());
    println!("{}", GridFormatter::format_grid_compact(&seed));

    // A single manual step
    let next = GridEngine::step(&seed);
    println!("After one tick (digits are per-cell alive streaks):");
    println!("{}", GridFormatter::format_grid_generations(&next));

    // Auto-play through a runner that owns the grid
    let mut runner = SimulationRunner::with_initial(seed, true);
    runner.run(20);

    let report = runner.report();
    println!("After {} ticks:", report.ticks);
    println!("{}", GridFormatter::format_grid_generations(&report.final_grid));
    print!("{}", report);
    println!();

    // The renderer contract: cells bucketed into visual categories
    let capped = ClassificationPolicy::default();
    let staged = ClassificationPolicy::Staged;

    println!("Capped classification census:");
    print!(
        "{}",
        GridFormatter::format_class_counts(&report.final_grid, &capped)
    );
    println!("\nStaged classification census:");
    print!(
        "{}",
        GridFormatter::format_class_counts(&report.final_grid, &staged)
    );

    Ok(())
}
