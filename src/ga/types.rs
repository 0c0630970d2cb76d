//! Core types: the bit-string [`Genome`], the fitness-caching
//! [`Individual`], and the pluggable [`FitnessFunction`].

use crate::error::{GaError, Result};
use rand::Rng;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A fixed-length bit string candidate solution.
///
/// The length is chosen at creation and never changes: variation operators
/// only flip or swap bits in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Genome {
    bits: Vec<bool>,
}

impl Genome {
    /// Creates a genome of `length` bits, each drawn uniformly from {0, 1}.
    pub fn random<R: Rng>(length: usize, rng: &mut R) -> Self {
        let bits = (0..length).map(|_| rng.random_bool(0.5)).collect();
        Self { bits }
    }

    /// Wraps an explicit bit vector.
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// All-zeros genome.
    pub fn zeros(length: usize) -> Self {
        Self {
            bits: vec![false; length],
        }
    }

    /// All-ones genome.
    pub fn ones(length: usize) -> Self {
        Self {
            bits: vec![true; length],
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Mutable view of the bits. Length cannot change through a slice.
    pub fn bits_mut(&mut self) -> &mut [bool] {
        &mut self.bits
    }

    /// Number of bits set to 1.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Flips the bit at `index`. Out-of-range indices are ignored.
    pub fn flip(&mut self, index: usize) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = !*bit;
        }
    }

    /// Consumes the genome and returns the underlying bits.
    pub fn into_bits(self) -> Vec<bool> {
        self.bits
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Produces a random genome of the given length.
///
/// Free-function form of [`Genome::random`].
pub fn random_genome<R: Rng>(length: usize, rng: &mut R) -> Genome {
    Genome::random(length, rng)
}

/// A genome annotated with its cached fitness.
///
/// The cache is cleared whenever the genome is borrowed mutably through
/// [`genome_mut`](Individual::genome_mut), so a present fitness always
/// reflects the current bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    genome: Genome,
    fitness: Option<usize>,
}

impl Individual {
    /// Wraps a genome with no fitness yet.
    pub fn new(genome: Genome) -> Self {
        Self {
            genome,
            fitness: None,
        }
    }

    /// Creates an individual and evaluates it immediately.
    pub fn evaluated<F: FitnessFunction + ?Sized>(genome: Genome, fitness: &F) -> Result<Self> {
        let mut ind = Self::new(genome);
        ind.evaluate(fitness)?;
        Ok(ind)
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    /// Mutable access to the genome. Invalidates the cached fitness.
    pub fn genome_mut(&mut self) -> &mut Genome {
        self.fitness = None;
        &mut self.genome
    }

    /// Cached fitness, `None` if the genome changed since the last evaluation.
    pub fn fitness(&self) -> Option<usize> {
        self.fitness
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Marks the cached fitness stale.
    pub fn invalidate(&mut self) {
        self.fitness = None;
    }

    /// Evaluates the genome and caches the result.
    pub fn evaluate<F: FitnessFunction + ?Sized>(&mut self, fitness: &F) -> Result<usize> {
        let value = fitness.evaluate(&self.genome)?;
        self.fitness = Some(value);
        Ok(value)
    }

    /// Evaluates only when the cache is stale. Returns `true` if an
    /// evaluation was performed.
    pub fn ensure_evaluated<F: FitnessFunction + ?Sized>(&mut self, fitness: &F) -> Result<bool> {
        if self.fitness.is_some() {
            return Ok(false);
        }
        self.evaluate(fitness)?;
        Ok(true)
    }

    pub fn into_genome(self) -> Genome {
        self.genome
    }
}

/// Scores a genome. Higher is better.
///
/// Implementations must be pure: the same genome always yields the same
/// fitness. `Send + Sync` is required because evaluation may run on rayon
/// worker threads when the `parallel` feature is enabled.
pub trait FitnessFunction: Send + Sync {
    /// Computes the fitness of `genome`.
    ///
    /// Returns [`GaError::InvalidGenome`] for genomes the function cannot
    /// score.
    fn evaluate(&self, genome: &Genome) -> Result<usize>;

    /// Fitness value that ends the run successfully for genomes of
    /// `genome_length` bits.
    fn target(&self, genome_length: usize) -> usize;
}

/// The one-max fitness: number of bits equal to 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OneMax;

impl FitnessFunction for OneMax {
    fn evaluate(&self, genome: &Genome) -> Result<usize> {
        if genome.is_empty() {
            return Err(GaError::InvalidGenome("genome has no bits".into()));
        }
        Ok(genome.count_ones())
    }

    fn target(&self, genome_length: usize) -> usize {
        genome_length
    }
}

/// Evaluates `genome` with the one-max fitness.
pub fn evaluate(genome: &Genome) -> Result<usize> {
    OneMax.evaluate(genome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_random_genome_length() {
        let mut rng = create_rng(42);
        for len in [1, 7, 100] {
            assert_eq!(random_genome(len, &mut rng).len(), len);
        }
    }

    #[test]
    fn test_random_genome_is_roughly_balanced() {
        let mut rng = create_rng(42);
        let g = Genome::random(10_000, &mut rng);
        let ones = g.count_ones();
        assert!(
            (4_500..5_500).contains(&ones),
            "expected about half ones, got {ones}"
        );
    }

    #[test]
    fn test_onemax_extremes() {
        assert_eq!(evaluate(&Genome::ones(100)), Ok(100));
        assert_eq!(evaluate(&Genome::zeros(100)), Ok(0));
    }

    #[test]
    fn test_onemax_counts_ones() {
        let g = Genome::from_bits(vec![true, false, true, true, false]);
        assert_eq!(evaluate(&g), Ok(3));
        // Same genome, same score.
        assert_eq!(evaluate(&g), evaluate(&g));
    }

    #[test]
    fn test_onemax_empty_genome() {
        let err = evaluate(&Genome::zeros(0)).unwrap_err();
        assert!(matches!(err, GaError::InvalidGenome(_)));
    }

    #[test]
    fn test_onemax_target() {
        assert_eq!(OneMax.target(20), 20);
    }

    #[test]
    fn test_flip() {
        let mut g = Genome::zeros(3);
        g.flip(1);
        assert_eq!(g.bits(), &[false, true, false]);
        g.flip(1);
        g.flip(10);
        assert_eq!(g, Genome::zeros(3));
    }

    #[test]
    fn test_display() {
        let g = Genome::from_bits(vec![true, false, true]);
        assert_eq!(g.to_string(), "101");
    }

    #[test]
    fn test_genome_mut_invalidates_fitness() {
        let mut ind = Individual::evaluated(Genome::zeros(4), &OneMax).unwrap();
        assert_eq!(ind.fitness(), Some(0));

        ind.genome_mut().flip(0);
        assert_eq!(ind.fitness(), None);
        assert!(!ind.is_evaluated());

        assert!(ind.ensure_evaluated(&OneMax).unwrap());
        assert_eq!(ind.fitness(), Some(1));
        assert!(!ind.ensure_evaluated(&OneMax).unwrap());
    }

    #[test]
    fn test_evaluate_error_leaves_cache_empty() {
        let mut ind = Individual::new(Genome::zeros(0));
        assert!(ind.evaluate(&OneMax).is_err());
        assert!(!ind.is_evaluated());
    }
}
