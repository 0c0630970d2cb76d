//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation →
//! replacement → termination check → repeat.
//!
//! Replacement is generational and non-elitist: the offspring replace the
//! parents wholesale, and the best individual of the run is tracked
//! separately so it is never lost.

use super::config::GaConfig;
use super::operators::{BitFlipMutation, Crossover, CrossoverOperator, MutationOperator};
use super::population::{cached_fitness, Population};
use super::selection::{Selector, Tournament};
use super::types::{FitnessFunction, Genome, Individual, OneMax};
use crate::error::{GaError, Result};
use crate::random::rng_from_seed;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::instrument;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Termination {
    /// An individual reached the target fitness.
    TargetReached,
    /// The generation budget was exhausted.
    MaxGenerations,
    /// The wall-clock limit elapsed.
    TimeLimit,
    /// The cancellation flag was raised.
    Cancelled,
}

/// Fitness statistics of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenerationStats {
    /// Generation index; 0 is the initial population.
    pub generation: usize,
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub std_dev: f64,
    /// Population size at the end of the generation.
    pub count: usize,
    /// Individuals evaluated during this generation.
    pub evaluations: usize,
}

impl GenerationStats {
    fn collect(generation: usize, population: &Population, evaluations: usize) -> Result<Self> {
        let stats = population.statistics()?;
        Ok(Self {
            generation,
            min: stats.min,
            max: stats.max,
            mean: stats.mean,
            std_dev: stats.std_dev,
            count: stats.count,
            evaluations,
        })
    }
}

/// Result of a GA optimization run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaResult {
    /// The best genome found during the entire run.
    pub best_genome: Genome,

    /// Fitness of `best_genome`.
    pub best_fitness: usize,

    /// Generations executed after the initial population.
    pub generations_run: usize,

    /// Whether the target fitness was reached.
    pub success: bool,

    /// Why the run stopped.
    pub termination: Termination,

    /// Total fitness evaluations, initial population included.
    pub evaluations: usize,

    /// Seed the run's RNG was created from.
    pub seed: u64,

    /// Statistics per generation, starting with generation 0.
    pub history: Vec<GenerationStats>,
}

/// Executes the GA evolutionary loop.
///
/// The runner is composed from explicit strategy objects: a fitness
/// function, a selector, and the two variation operators. Of the
/// configuration, the runner itself only reads the population/genome sizes,
/// the operator application probabilities, and the termination settings;
/// `tournament_size`, `crossover` and `mutation_prob` feed
/// [`GaRunner::from_config`].
///
/// # Usage
///
/// ```
/// use u_onemax::ga::{GaConfig, GaRunner};
///
/// let config = GaConfig::default()
///     .with_genome_length(16)
///     .with_population_size(40)
///     .with_random_seed(42);
/// let result = GaRunner::from_config(&config).run(&config).unwrap();
/// assert!(result.generations_run <= config.max_generations);
/// ```
#[derive(Debug, Clone)]
pub struct GaRunner<F = OneMax, S = Tournament, C = Crossover, M = BitFlipMutation> {
    fitness: F,
    selector: S,
    crossover: C,
    mutation: M,
}

impl GaRunner {
    /// One-max runner with tournament selection, the configured crossover
    /// style and per-bit flip mutation.
    pub fn from_config(config: &GaConfig) -> Self {
        Self::new(
            OneMax,
            Tournament::new(config.tournament_size),
            config.crossover,
            BitFlipMutation::new(config.mutation_prob),
        )
    }
}

impl<F, S, C, M> GaRunner<F, S, C, M>
where
    F: FitnessFunction,
    S: Selector,
    C: CrossoverOperator,
    M: MutationOperator,
{
    pub fn new(fitness: F, selector: S, crossover: C, mutation: M) -> Self {
        Self {
            fitness,
            selector,
            crossover,
            mutation,
        }
    }

    pub fn fitness(&self) -> &F {
        &self.fitness
    }

    /// Runs the GA optimization.
    ///
    /// # Errors
    /// [`GaError::InvalidConfiguration`] before anything runs if `config` is
    /// invalid; [`GaError::InvalidGenome`] if evaluation fails.
    pub fn run(&self, config: &GaConfig) -> Result<GaResult> {
        self.execute(config, None, |_| {})
    }

    /// Runs the GA, handing each generation's statistics to `observer`.
    ///
    /// The observer sees the same values recorded in
    /// [`GaResult::history`]; it cannot influence the run.
    pub fn run_with_observer<O>(&self, config: &GaConfig, observer: O) -> Result<GaResult>
    where
        O: FnMut(&GenerationStats),
    {
        self.execute(config, None, observer)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA stops
    /// before starting the next generation and returns the best solution
    /// found so far.
    pub fn run_with_cancel(
        &self,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult> {
        self.execute(config, cancel.as_deref(), |_| {})
    }

    #[instrument(
        level = "info",
        skip(self, config, cancel, observer),
        fields(
            genome_length = config.genome_length,
            population_size = config.population_size,
            max_generations = config.max_generations,
        )
    )]
    fn execute<O>(
        &self,
        config: &GaConfig,
        cancel: Option<&AtomicBool>,
        mut observer: O,
    ) -> Result<GaResult>
    where
        O: FnMut(&GenerationStats),
    {
        config.validate()?;

        let (mut rng, seed) = rng_from_seed(config.random_seed);
        let started = Instant::now();
        let time_limit = config.time_limit_ms.map(Duration::from_millis);
        let target = self.fitness.target(config.genome_length);
        tracing::info!(seed, target, "GA run started");

        // 1. Initialize and evaluate generation 0
        let mut population = Population::initialize(
            config.population_size,
            config.genome_length,
            &self.fitness,
            &mut rng,
        )?;
        let mut evaluations = population.len();

        let mut history = Vec::with_capacity(config.max_generations.min(1024) + 1);
        let stats = GenerationStats::collect(0, &population, evaluations)?;
        report(&stats, &mut observer);
        history.push(stats);

        // 2. Track best
        let mut best = population.best()?.clone();
        let mut best_fitness = cached_fitness(&best)?;

        let mut generation = 0;
        let mut termination = (best_fitness >= target).then_some(Termination::TargetReached);

        // 3. Evolutionary loop
        while termination.is_none() {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                termination = Some(Termination::Cancelled);
                break;
            }
            generation += 1;

            let mut offspring = self.breed(&population, config, &mut rng)?;
            let evaluated = evaluate_pending(
                &self.fitness,
                &mut offspring,
                config.genome_length,
                config.parallel,
            )?;
            evaluations += evaluated;

            population = Population::from_individuals(offspring);
            debug_assert_eq!(population.len(), config.population_size);

            let stats = GenerationStats::collect(generation, &population, evaluated)?;
            report(&stats, &mut observer);
            history.push(stats);

            let gen_best = population.best()?;
            let gen_best_fitness = cached_fitness(gen_best)?;
            if gen_best_fitness > best_fitness {
                best = gen_best.clone();
                best_fitness = gen_best_fitness;
            }

            termination = if gen_best_fitness >= target {
                Some(Termination::TargetReached)
            } else if generation >= config.max_generations {
                Some(Termination::MaxGenerations)
            } else if time_limit.is_some_and(|limit| started.elapsed() >= limit) {
                Some(Termination::TimeLimit)
            } else {
                None
            };
        }

        let termination = termination.unwrap_or(Termination::Cancelled);
        tracing::info!(
            generations = generation,
            best_fitness,
            evaluations,
            ?termination,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "GA run finished"
        );

        Ok(GaResult {
            best_genome: best.into_genome(),
            best_fitness,
            generations_run: generation,
            success: termination == Termination::TargetReached,
            termination,
            evaluations,
            seed,
            history,
        })
    }

    /// Selection and variation: builds the next generation's offspring.
    ///
    /// Offspring are clones of the selected parents; crossover is applied to
    /// consecutive pairs, then every offspring is offered to mutation. A
    /// trailing unpaired offspring (odd population size) is only mutated.
    fn breed<R: Rng>(
        &self,
        population: &Population,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<Vec<Individual>> {
        let pool = self
            .selector
            .select_many(population, config.population_size, rng)?;
        let mut offspring = pool
            .into_iter()
            .map(|idx| {
                population
                    .get(idx)
                    .cloned()
                    .ok_or(GaError::EmptyPopulation)
            })
            .collect::<Result<Vec<_>>>()?;

        for pair in offspring.chunks_exact_mut(2) {
            if rng.random_range(0.0..1.0) < config.crossover_prob {
                let (first, second) = pair.split_at_mut(1);
                self.crossover.crossover(&mut first[0], &mut second[0], rng);
            }
        }

        for child in &mut offspring {
            if rng.random_range(0.0..1.0) < config.individual_mutation_prob {
                self.mutation.mutate(child, rng);
            }
        }

        Ok(offspring)
    }
}

fn report<O: FnMut(&GenerationStats)>(stats: &GenerationStats, observer: &mut O) {
    tracing::debug!(
        generation = stats.generation,
        min = stats.min,
        max = stats.max,
        mean = stats.mean,
        std_dev = stats.std_dev,
        evaluations = stats.evaluations,
        "generation complete"
    );
    observer(stats);
}

/// Evaluates one individual if its cache is stale, checking its length first.
fn evaluate_one<F: FitnessFunction>(
    fitness: &F,
    individual: &mut Individual,
    genome_length: usize,
) -> Result<usize> {
    let len = individual.genome().len();
    if len != genome_length {
        return Err(GaError::InvalidGenome(format!(
            "expected {genome_length} bits, got {len}"
        )));
    }
    individual.ensure_evaluated(fitness).map(usize::from)
}

/// Evaluates every individual with a stale fitness. Returns how many were
/// evaluated.
#[cfg(feature = "parallel")]
fn evaluate_pending<F: FitnessFunction>(
    fitness: &F,
    individuals: &mut [Individual],
    genome_length: usize,
    parallel: bool,
) -> Result<usize> {
    use rayon::prelude::*;

    if parallel {
        let counts = individuals
            .par_iter_mut()
            .map(|ind| evaluate_one(fitness, ind, genome_length))
            .collect::<Result<Vec<usize>>>()?;
        Ok(counts.into_iter().sum())
    } else {
        individuals
            .iter_mut()
            .map(|ind| evaluate_one(fitness, ind, genome_length))
            .sum()
    }
}

/// Evaluates every individual with a stale fitness. Returns how many were
/// evaluated.
#[cfg(not(feature = "parallel"))]
fn evaluate_pending<F: FitnessFunction>(
    fitness: &F,
    individuals: &mut [Individual],
    genome_length: usize,
    _parallel: bool,
) -> Result<usize> {
    individuals
        .iter_mut()
        .map(|ind| evaluate_one(fitness, ind, genome_length))
        .sum()
}

// ============================================================================
// Tests
// ============================================================================
