//! Seedable random source shared by every stochastic step of a run.
//!
//! A run draws all of its randomness from a single [`StdRng`], so two runs
//! with the same seed make exactly the same sequence of draws.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic RNG from a 64-bit seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates an RNG from an optional seed, drawing a fresh seed when `None`.
///
/// Returns the seed actually used so it can be logged and replayed.
pub fn rng_from_seed(seed: Option<u64>) -> (StdRng, u64) {
    let seed = seed.unwrap_or_else(rand::random);
    (create_rng(seed), seed)
}
