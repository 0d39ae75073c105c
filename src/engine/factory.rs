//! Random initial-grid construction

use super::{Cell, Grid, GridError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Produces randomly seeded starting grids
pub struct GridFactory;

impl GridFactory {
    /// Create a `dimension` x `dimension` grid where each cell is
    /// independently alive with probability `live_probability`. Live cells
    /// start at generation 1.
    pub fn create(dimension: usize, live_probability: f64) -> Result<Grid, GridError> {
        let mut rng = rand::thread_rng();
        Self::create_with_rng(dimension, live_probability, &mut rng)
    }

    /// Like [`create`](Self::create), but reproducible from a fixed RNG seed
    pub fn create_seeded(
        dimension: usize,
        live_probability: f64,
        seed: u64,
    ) -> Result<Grid, GridError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::create_with_rng(dimension, live_probability, &mut rng)
    }

    /// Seed a grid from any RNG source
    pub fn create_with_rng<R: Rng>(
        dimension: usize,
        live_probability: f64,
        rng: &mut R,
    ) -> Result<Grid, GridError> {
        if dimension == 0 {
            return Err(GridError::ZeroDimension);
        }
        if !(0.0..=1.0).contains(&live_probability) {
            return Err(GridError::InvalidProbability(live_probability));
        }

        let cells = (0..dimension * dimension)
            .map(|_| {
                if rng.gen_bool(live_probability) {
                    Cell::born()
                } else {
                    Cell::dead()
                }
            })
            .collect();

        Ok(Grid { dimension, cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_zero_gives_dead_grid() {
        let grid = GridFactory::create(5, 0.0).unwrap();
        assert_eq!(grid.dimension, 5);
        assert!(grid.is_empty());
        assert!(grid.cells.iter().all(|cell| cell.generation == 0));
    }

    #[test]
    fn test_probability_one_gives_live_grid() {
        let grid = GridFactory::create(5, 1.0).unwrap();
        assert_eq!(grid.living_count(), 25);
        assert!(grid.cells.iter().all(|cell| cell.generation == 1));
    }

    #[test]
    fn test_seeded_creation_is_reproducible() {
        let first = GridFactory::create_seeded(20, 0.33, 42).unwrap();
        let second = GridFactory::create_seeded(20, 0.33, 42).unwrap();
        let other = GridFactory::create_seeded(20, 0.33, 43).unwrap();

        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn test_invariant_holds_after_seeding() {
        let grid = GridFactory::create_seeded(10, 0.5, 7).unwrap();
        assert!(grid.check_invariant().is_ok());
    }

    #[test]
    fn test_invalid_arguments_are_rejected() {
        assert!(matches!(
            GridFactory::create(0, 0.5),
            Err(GridError::ZeroDimension)
        ));
        assert!(matches!(
            GridFactory::create(5, 1.5),
            Err(GridError::InvalidProbability(_))
        ));
        assert!(matches!(
            GridFactory::create(5, -0.1),
            Err(GridError::InvalidProbability(_))
        ));
    }
}
