//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::operators::Crossover;
use crate::error::{GaError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for a one-max GA run.
///
/// Immutable for the duration of a run. [`validate`](GaConfig::validate) is
/// called before any population is created.
///
/// # Defaults
///
/// ```
/// use u_onemax::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.genome_length, 100);
/// assert_eq!(config.population_size, 300);
/// assert_eq!(config.tournament_size, 3);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_onemax::ga::{Crossover, GaConfig};
///
/// let config = GaConfig::default()
///     .with_genome_length(20)
///     .with_population_size(50)
///     .with_crossover(Crossover::OnePoint)
///     .with_mutation_prob(0.05)
///     .with_random_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaConfig {
    /// Number of bits per genome. Also the target fitness.
    pub genome_length: usize,

    /// Number of individuals per generation. Constant across the run.
    pub population_size: usize,

    /// Probability of applying crossover to a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied the children are unchanged copies.
    pub crossover_prob: f64,

    /// Per-bit flip probability (0.0–1.0). A typical value is `1 / genome_length`.
    pub mutation_prob: f64,

    /// Probability that an offspring is submitted to mutation at all
    /// (0.0–1.0). The default of 1.0 mutates every offspring.
    pub individual_mutation_prob: f64,

    /// Contestants per tournament. Must be in `1..=population_size`.
    pub tournament_size: usize,

    /// Cut-point style of the crossover.
    pub crossover: Crossover,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a seed from the OS; the seed used is logged.
    pub random_seed: Option<u64>,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked at the end of each generation, so a run can exceed the limit
    /// by one generation's worth of work.
    pub time_limit_ms: Option<u64>,

    /// Evaluate changed offspring on the rayon thread pool.
    ///
    /// Only effective with the `parallel` feature. Evaluation draws no
    /// randomness, so seeded results are identical either way.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            genome_length: 100,
            population_size: 300,
            crossover_prob: 0.5,
            mutation_prob: 0.01,
            individual_mutation_prob: 1.0,
            tournament_size: 3,
            crossover: Crossover::TwoPoint,
            max_generations: 1000,
            random_seed: None,
            time_limit_ms: None,
            parallel: false,
        }
    }
}

impl GaConfig {
    /// Sets the genome length.
    pub fn with_genome_length(mut self, n: usize) -> Self {
        self.genome_length = n;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the crossover probability. Not clamped: out-of-range values are
    /// rejected by [`validate`](Self::validate).
    pub fn with_crossover_prob(mut self, p: f64) -> Self {
        self.crossover_prob = p;
        self
    }

    /// Sets the per-bit mutation probability.
    pub fn with_mutation_prob(mut self, p: f64) -> Self {
        self.mutation_prob = p;
        self
    }

    /// Sets the per-individual mutation gate.
    pub fn with_individual_mutation_prob(mut self, p: f64) -> Self {
        self.individual_mutation_prob = p;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the crossover style.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The classic one-max setup: 100 bits, 300 individuals, two-point
    /// crossover at 0.5, 20% of offspring mutated with a 5% per-bit rate,
    /// tournaments of 3, at most 1000 generations.
    pub fn classic() -> Self {
        Self {
            genome_length: 100,
            population_size: 300,
            crossover_prob: 0.5,
            mutation_prob: 0.05,
            individual_mutation_prob: 0.2,
            tournament_size: 3,
            crossover: Crossover::TwoPoint,
            max_generations: 1000,
            ..Self::default()
        }
    }

    /// Default parameters for genomes of `n` bits with the usual per-bit
    /// mutation rate of `1 / n`.
    pub fn for_length(n: usize) -> Self {
        Self {
            genome_length: n,
            mutation_prob: if n == 0 { 0.0 } else { 1.0 / n as f64 },
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns [`GaError::InvalidConfiguration`] describing the first
    /// parameter out of range.
    pub fn validate(&self) -> Result<()> {
        if self.genome_length == 0 {
            return Err(invalid("genome_length must be at least 1"));
        }
        if self.population_size == 0 {
            return Err(invalid("population_size must be at least 1"));
        }
        check_probability("crossover_prob", self.crossover_prob)?;
        check_probability("mutation_prob", self.mutation_prob)?;
        check_probability("individual_mutation_prob", self.individual_mutation_prob)?;
        if self.tournament_size == 0 {
            return Err(invalid("tournament_size must be at least 1"));
        }
        if self.tournament_size > self.population_size {
            return Err(GaError::InvalidConfiguration(format!(
                "tournament_size ({}) exceeds population_size ({})",
                self.tournament_size, self.population_size
            )));
        }
        if self.max_generations == 0 {
            return Err(invalid("max_generations must be at least 1"));
        }
        if self.time_limit_ms == Some(0) {
            return Err(invalid("time_limit_ms must be positive or None"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> GaError {
    GaError::InvalidConfiguration(msg.to_string())
}

fn check_probability(name: &str, p: f64) -> Result<()> {
    // NaN fails the range check too.
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(GaError::InvalidConfiguration(format!(
            "{name} must be in [0, 1], got {p}"
        )))
    }
}
