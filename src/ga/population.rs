//! Population management: random initialization and fitness statistics.

use super::types::{FitnessFunction, Genome, Individual};
use crate::error::{GaError, Result};
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Aggregate fitness statistics over a population.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Statistics {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    /// Population (not sample) standard deviation.
    pub std_dev: f64,
    pub count: usize,
}

/// The individuals alive in one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates `size` random individuals of `genome_length` bits, each
    /// evaluated immediately.
    pub fn initialize<F, R>(
        size: usize,
        genome_length: usize,
        fitness: &F,
        rng: &mut R,
    ) -> Result<Self>
    where
        F: FitnessFunction + ?Sized,
        R: Rng,
    {
        let individuals = (0..size)
            .map(|_| Individual::evaluated(Genome::random(genome_length, rng), fitness))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { individuals })
    }

    /// Wraps an existing set of individuals.
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.individuals.iter()
    }

    pub fn into_individuals(self) -> Vec<Individual> {
        self.individuals
    }

    /// Fitness statistics over the cached values.
    ///
    /// # Errors
    /// - [`GaError::EmptyPopulation`] when there are no individuals.
    /// - [`GaError::InvalidGenome`] when a member has not been evaluated.
    pub fn statistics(&self) -> Result<Statistics> {
        let fits = self.fitness_values()?;
        let count = fits.len();

        let min = fits.iter().copied().min().ok_or(GaError::EmptyPopulation)?;
        let max = fits.iter().copied().max().ok_or(GaError::EmptyPopulation)?;

        let n = count as f64;
        let sum: f64 = fits.iter().map(|&f| f as f64).sum();
        let sum_sq: f64 = fits.iter().map(|&f| (f as f64) * (f as f64)).sum();
        let mean = sum / n;
        // Clamp tiny negative values from floating-point cancellation.
        let variance = (sum_sq / n - mean * mean).max(0.0);

        Ok(Statistics {
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
            count,
        })
    }

    /// The fittest individual. On ties the earliest one wins.
    pub fn best(&self) -> Result<&Individual> {
        if self.individuals.is_empty() {
            return Err(GaError::EmptyPopulation);
        }
        let mut best: Option<(&Individual, usize)> = None;
        for ind in &self.individuals {
            let f = cached_fitness(ind)?;
            match best {
                Some((_, bf)) if f <= bf => {}
                _ => best = Some((ind, f)),
            }
        }
        best.map(|(ind, _)| ind).ok_or(GaError::EmptyPopulation)
    }

    fn fitness_values(&self) -> Result<Vec<usize>> {
        if self.individuals.is_empty() {
            return Err(GaError::EmptyPopulation);
        }
        self.individuals.iter().map(cached_fitness).collect()
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Individual;
    type IntoIter = std::slice::Iter<'a, Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}

pub(crate) fn cached_fitness(ind: &Individual) -> Result<usize> {
    ind.fitness()
        .ok_or_else(|| GaError::InvalidGenome("individual has not been evaluated".into()))
}
