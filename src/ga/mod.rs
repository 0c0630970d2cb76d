//! Genetic Algorithm for bit-string problems.
//!
//! A generational, non-elitist GA built from explicit strategy objects.
//! The default composition solves one-max: evolve a fixed-length bit string
//! until every bit is 1.
//!
//! # Core Traits
//!
//! - [`FitnessFunction`]: Scores a [`Genome`]; [`OneMax`] counts 1-bits
//! - [`Selector`]: Picks parents; [`Tournament`] is the provided strategy
//! - [`CrossoverOperator`] / [`MutationOperator`]: Variation in place
//!
//! # Key Types
//!
//! - [`GaConfig`]: Run parameters (sizes, probabilities, termination)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best genome, termination reason, per-generation statistics
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Ackley (1987), *A Connectionist Machine for Genetic Hillclimbing* (one-max)

mod config;
mod operators;
mod population;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use operators::{swap_segment, BitFlipMutation, Crossover, CrossoverOperator, MutationOperator};
pub use population::{Population, Statistics};
pub use runner::{GaResult, GaRunner, GenerationStats, Termination};
pub use selection::{Selector, Tournament};
pub use types::{evaluate, random_genome, FitnessFunction, Genome, Individual, OneMax};
