//! Parent selection.
//!
//! A [`Selector`] picks one parent index per call; the runner calls it
//! `population_size` times to fill the mating pool. Fitness is maximized.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//!   and the Effects of Noise"

use super::population::{cached_fitness, Population};
use crate::error::{GaError, Result};
use rand::Rng;

/// Chooses parents from an evaluated population.
pub trait Selector: Send + Sync {
    /// Returns the index of one selected parent.
    ///
    /// # Errors
    /// [`GaError::EmptyPopulation`] if there is nothing to select from,
    /// [`GaError::InvalidGenome`] if a contestant is unevaluated.
    fn select<R: Rng>(&self, population: &Population, rng: &mut R) -> Result<usize>;

    /// Fills a mating pool of `count` indices.
    fn select_many<R: Rng>(
        &self,
        population: &Population,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<usize>> {
        (0..count).map(|_| self.select(population, rng)).collect()
    }
}

/// Tournament selection: sample `size` individuals uniformly with
/// replacement and keep the fittest.
///
/// Higher `size` means stronger selection pressure:
/// - 2: light pressure
/// - 3-5: moderate (3 is the usual default)
/// - above 5: strong, risks premature convergence
///
/// Ties among the fittest contestants are broken uniformly at random.
///
/// # Complexity
/// O(size) per selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tournament {
    pub size: usize,
}

impl Tournament {
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl Default for Tournament {
    fn default() -> Self {
        Self { size: 3 }
    }
}

impl Selector for Tournament {
    fn select<R: Rng>(&self, population: &Population, rng: &mut R) -> Result<usize> {
        let n = population.len();
        if n == 0 {
            return Err(GaError::EmptyPopulation);
        }
        let individuals = population.individuals();
        let k = self.size.max(1);

        let mut best_idx = rng.random_range(0..n);
        let mut best_fit = cached_fitness(&individuals[best_idx])?;
        // Number of contestants tied at `best_fit` seen so far.
        let mut ties = 1u32;

        for _ in 1..k {
            let idx = rng.random_range(0..n);
            let fit = cached_fitness(&individuals[idx])?;
            if fit > best_fit {
                best_idx = idx;
                best_fit = fit;
                ties = 1;
            } else if fit == best_fit {
                // Reservoir sampling over the tied contestants.
                ties += 1;
                if rng.random_range(0..ties) == 0 {
                    best_idx = idx;
                }
            }
        }
        Ok(best_idx)
    }
}
