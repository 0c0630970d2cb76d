//! Bit-string variation operators.
//!
//! Operators work on [`Individual`]s in place and only invalidate the cached
//! fitness of an individual whose bits actually changed, so unchanged copies
//! keep their score and are not re-evaluated.
//!
//! # Crossover Operators
//!
//! - [`Crossover::OnePoint`]: swap the tails after one random cut
//! - [`Crossover::TwoPoint`]: swap the segment between two random cuts
//!
//! # Mutation Operators
//!
//! - [`BitFlipMutation`]: flip each bit independently with a per-bit rate
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - De Jong (1975), "An Analysis of the Behavior of a Class of Genetic
//!   Adaptive Systems"

use super::types::Individual;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Recombines two parents in place.
pub trait CrossoverOperator: Send + Sync {
    /// Exchanges genetic material between `a` and `b`.
    ///
    /// Returns `true` if at least one bit changed in either individual.
    fn crossover<R: Rng>(&self, a: &mut Individual, b: &mut Individual, rng: &mut R) -> bool;
}

/// Perturbs one individual in place.
pub trait MutationOperator: Send + Sync {
    /// Returns `true` if at least one bit changed.
    fn mutate<R: Rng>(&self, individual: &mut Individual, rng: &mut R) -> bool;
}

// ============================================================================
// Crossover operators
// ============================================================================

/// Cut-point crossover style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Crossover {
    /// One cut in `1..n`; the tails after it are swapped.
    OnePoint,
    /// Two cuts; the segment between them is swapped.
    #[default]
    TwoPoint,
}

impl Crossover {
    /// Draws the half-open segment `[start, end)` to exchange for genomes
    /// of `n` bits. Returns `None` when `n < 2`, where no cut exists.
    pub fn segment<R: Rng>(&self, n: usize, rng: &mut R) -> Option<(usize, usize)> {
        if n < 2 {
            return None;
        }
        match self {
            Crossover::OnePoint => Some((rng.random_range(1..n), n)),
            Crossover::TwoPoint => {
                let mut start = rng.random_range(1..=n);
                let mut end = rng.random_range(1..n);
                if end >= start {
                    end += 1;
                } else {
                    std::mem::swap(&mut start, &mut end);
                }
                Some((start, end))
            }
        }
    }
}

impl CrossoverOperator for Crossover {
    fn crossover<R: Rng>(&self, a: &mut Individual, b: &mut Individual, rng: &mut R) -> bool {
        let n = a.genome().len();
        assert_eq!(n, b.genome().len(), "parents must have equal length");

        let Some((start, end)) = self.segment(n, rng) else {
            return false;
        };
        swap_segment(a, b, start, end)
    }
}

/// Swaps bits `start..end` between two individuals.
///
/// Positions where both parents agree are left alone; if they agree on the
/// whole segment neither fitness cache is touched.
pub fn swap_segment(a: &mut Individual, b: &mut Individual, start: usize, end: usize) -> bool {
    let differs = a.genome().bits()[start..end]
        .iter()
        .zip(&b.genome().bits()[start..end])
        .any(|(x, y)| x != y);
    if !differs {
        return false;
    }

    let ga = a.genome_mut().bits_mut();
    let gb = b.genome_mut().bits_mut();
    ga[start..end].swap_with_slice(&mut gb[start..end]);
    true
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Independent per-bit flip mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitFlipMutation {
    /// Probability of flipping each bit, in `[0, 1]`.
    pub rate: f64,
}

impl BitFlipMutation {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

impl MutationOperator for BitFlipMutation {
    fn mutate<R: Rng>(&self, individual: &mut Individual, rng: &mut R) -> bool {
        // Decide every flip first so an untouched genome keeps its fitness.
        let flips: Vec<usize> = (0..individual.genome().len())
            .filter(|_| rng.random_range(0.0..1.0) < self.rate)
            .collect();
        if flips.is_empty() {
            return false;
        }

        let genome = individual.genome_mut();
        for idx in flips {
            genome.flip(idx);
        }
        true
    }
}

// ============================================================================
// Tests
// ============================================================================
