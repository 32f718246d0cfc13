pub mod backtracker;
pub mod extra_paths;

use rand::{thread_rng, Rng, SeedableRng as _};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use thiserror::Error;

use crate::{
    dims::Dims,
    grid::{Cell, Grid},
};

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Smallest side that leaves room for distinct start and end cells inside the border.
pub const MIN_SIZE: usize = 5;
pub const DEFAULT_MAX_SIZE: usize = 20;
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("maze size must be between {min} and {max}, got {size}")]
    SizeOutOfRange { size: usize, min: usize, max: usize },
    #[error("maze size must be odd, got {0}")]
    EvenSize(usize),
    #[error("no solvable maze after {0} attempts")]
    AttemptsExhausted(usize),
}

/// Generates square mazes with the start in the top-left and the end in the bottom-right
/// interior corner.
///
/// Output is a perfect maze unless [`Generator::extra_paths`] is enabled. Every returned grid is
/// checked to be solvable; unsolvable ones are thrown away and generated again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generator {
    max_size: usize,
    max_attempts: usize,
    extra_paths: bool,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            extra_paths: false,
        }
    }
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_size(mut self, value: usize) -> Self {
        self.max_size = value;
        self
    }

    pub fn max_attempts(mut self, value: usize) -> Self {
        self.max_attempts = value;
        self
    }

    pub fn extra_paths(mut self, value: bool) -> Self {
        self.extra_paths = value;
        self
    }

    /// Start cell, the same for every size.
    pub const START: Dims = Dims(1, 1);

    pub fn end(size: usize) -> Dims {
        let last = size as i32 - 2;
        Dims(last, last)
    }

    pub fn validate(&self, size: usize) -> Result<(), GeneratorError> {
        if !(MIN_SIZE..=self.max_size).contains(&size) {
            return Err(GeneratorError::SizeOutOfRange {
                size,
                min: MIN_SIZE,
                max: self.max_size,
            });
        }

        if size % 2 == 0 {
            return Err(GeneratorError::EvenSize(size));
        }

        Ok(())
    }

    /// Generates a solvable maze of side `size`, drawing all randomness from `rng`.
    pub fn generate<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Result<Grid, GeneratorError> {
        self.validate(size)?;

        let (start, end) = (Self::START, Self::end(size));
        let mut grid = Grid::new(size);

        for attempt in 1..=self.max_attempts {
            if attempt > 1 {
                grid.clear();
            }

            backtracker::carve(&mut grid, start, rng);
            if self.extra_paths {
                extra_paths::add_extra_paths(&mut grid, rng);
            }

            grid[start] = Cell::Start;
            grid[end] = Cell::End;

            if grid.reaches(start, end) {
                log::debug!("generated {size}x{size} maze on attempt {attempt}");
                return Ok(grid);
            }

            log::warn!("end of {size}x{size} maze is unreachable, regenerating (attempt {attempt})");
        }

        Err(GeneratorError::AttemptsExhausted(self.max_attempts))
    }

    /// Same as [`Generator::generate`] with a [`Random`] seeded from `seed`, or from the thread
    /// rng when there's none.
    pub fn generate_seeded(&self, size: usize, seed: Option<u64>) -> Result<Grid, GeneratorError> {
        let seed = seed.unwrap_or_else(|| thread_rng().gen());
        log::debug!("maze seed: {seed}");

        let mut rng = Random::seed_from_u64(seed);
        self.generate(size, &mut rng)
    }

    /// Generates `count` mazes in parallel.
    ///
    /// Each maze gets its own grid and its own rng, jumped ahead from the one seeded by `seed`,
    /// so the result only depends on the seed.
    pub fn generate_batch(
        &self,
        size: usize,
        count: usize,
        seed: Option<u64>,
    ) -> Result<Vec<Grid>, GeneratorError> {
        self.validate(size)?;

        let seed = seed.unwrap_or_else(|| thread_rng().gen());
        log::debug!("batch of {count} mazes, seed: {seed}");

        let mut rng = Random::seed_from_u64(seed);
        let rngs = (0..count)
            .map(|_| {
                rng.jump();
                rng.clone()
            })
            .collect::<Vec<_>>();

        rngs.into_par_iter()
            .map(|mut rng| self.generate(size, &mut rng))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use super::*;

    fn check_generated(grid: &Grid) {
        let size = grid.size();
        assert!(grid.border().all(|pos| grid[pos] == Cell::Wall));
        assert_eq!(grid.count(Cell::Start), 1);
        assert_eq!(grid.count(Cell::End), 1);
        assert_eq!(grid[Generator::START], Cell::Start);
        assert_eq!(grid[Generator::end(size)], Cell::End);
        assert!(grid.reaches(Generator::START, Generator::end(size)));
    }

    #[test]
    fn every_valid_size_is_solvable() {
        let generator = Generator::new();
        let mut rng = Random::seed_from_u64(42);
        for size in (MIN_SIZE..=DEFAULT_MAX_SIZE).step_by(2) {
            for _ in 0..10 {
                let grid = generator.generate(size, &mut rng).unwrap();
                assert_eq!(grid.size(), size);
                check_generated(&grid);
            }
        }
    }

    #[test]
    fn smallest_maze_hundred_times() {
        let generator = Generator::new();
        for _ in 0..100 {
            let grid = generator.generate(5, &mut thread_rng()).unwrap();
            check_generated(&grid);
        }
    }

    #[test]
    fn rejects_invalid_sizes() {
        let generator = Generator::new();
        let mut rng = Random::seed_from_u64(0);

        for size in [0, 1, 3, 4] {
            assert_eq!(
                generator.generate(size, &mut rng),
                Err(GeneratorError::SizeOutOfRange {
                    size,
                    min: 5,
                    max: 20
                })
            );
        }
        assert_eq!(
            generator.generate(21, &mut rng).unwrap_err(),
            GeneratorError::SizeOutOfRange {
                size: 21,
                min: 5,
                max: 20
            }
        );
        assert_eq!(
            generator.generate(6, &mut rng),
            Err(GeneratorError::EvenSize(6))
        );
    }

    #[test]
    fn upper_bound_is_configurable() {
        let generator = Generator::new().max_size(51);
        let grid = generator.generate_seeded(51, Some(5)).unwrap();
        check_generated(&grid);
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let generator = Generator::new();
        assert_eq!(
            generator.generate_seeded(15, Some(1234)),
            generator.generate_seeded(15, Some(1234))
        );
    }

    #[test]
    fn no_attempts_is_an_error() {
        let generator = Generator::new().max_attempts(0);
        assert_eq!(
            generator.generate_seeded(7, Some(0)),
            Err(GeneratorError::AttemptsExhausted(0))
        );
    }

    #[test]
    fn extra_paths_stay_solvable() {
        let generator = Generator::new().extra_paths(true);
        let mut rng = Random::seed_from_u64(8);
        for _ in 0..50 {
            check_generated(&generator.generate(19, &mut rng).unwrap());
        }
    }

    #[test]
    fn batch_is_deterministic_and_independent() {
        let generator = Generator::new();
        let a = generator.generate_batch(13, 8, Some(77)).unwrap();
        let b = generator.generate_batch(13, 8, Some(77)).unwrap();

        assert_eq!(a.len(), 8);
        assert_eq!(a, b);
        a.iter().for_each(check_generated);
        assert!(a.windows(2).any(|pair| pair[0] != pair[1]));
    }

    #[test]
    fn batch_validates_size() {
        assert_eq!(
            Generator::new().generate_batch(4, 3, None),
            Err(GeneratorError::SizeOutOfRange {
                size: 4,
                min: 5,
                max: 20
            })
        );
    }
}
