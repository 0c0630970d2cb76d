//! Error types for u-onemax.

use thiserror::Error;

/// Errors raised by the GA engine.
///
/// All variants are deterministic for a given configuration and seed, so
/// none of them are retried: they propagate straight to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GaError {
    /// A configuration parameter is out of range. Raised before any
    /// population is created.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A genome is empty or does not have the configured length.
    #[error("invalid genome: {0}")]
    InvalidGenome(String),

    /// Statistics were requested on a population with no individuals.
    #[error("population is empty")]
    EmptyPopulation,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GaError>;
