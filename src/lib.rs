//! Generational genetic algorithm for the one-max problem.
//!
//! Evolves a population of fixed-length bit strings until one of them is
//! all ones, using tournament selection, one- or two-point crossover and
//! per-bit flip mutation. Every random draw comes from a single seedable
//! RNG, so a run is fully reproducible from its seed.
//!
//! ```
//! use u_onemax::ga::GaConfig;
//!
//! let config = GaConfig::default()
//!     .with_genome_length(20)
//!     .with_population_size(50)
//!     .with_mutation_prob(0.05)
//!     .with_random_seed(42);
//! let result = u_onemax::run(&config).unwrap();
//! assert!(result.success);
//! assert_eq!(result.best_fitness, 20);
//! ```
//!
//! Progress is exposed as data ([`ga::GaResult::history`]) and as `tracing`
//! events; the crate never prints.

pub mod error;
pub mod ga;
pub mod random;

pub use error::{GaError, Result};

/// Runs one-max with the strategies described by `config`.
///
/// Shorthand for `GaRunner::from_config(config).run(config)`.
pub fn run(config: &ga::GaConfig) -> Result<ga::GaResult> {
    ga::GaRunner::from_config(config).run(config)
}
