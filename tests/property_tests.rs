//! Property-based tests for u-onemax.
//!
//! Uses proptest to check the invariants of the genome, the operators, and
//! the evolutionary loop over many random inputs.

use proptest::prelude::*;
use u_onemax::ga::{
    evaluate, BitFlipMutation, Crossover, CrossoverOperator, GaConfig, GaRunner, Genome,
    Individual, MutationOperator, OneMax, Population, Selector, Tournament,
};
use u_onemax::random::create_rng;
use u_onemax::GaError;

fn crossover_style() -> impl Strategy<Value = Crossover> {
    prop_oneof![Just(Crossover::OnePoint), Just(Crossover::TwoPoint)]
}

proptest! {
    // ---- Fitness ----

    #[test]
    fn fitness_within_bounds(bits in prop::collection::vec(any::<bool>(), 1..200)) {
        let n = bits.len();
        let fit = evaluate(&Genome::from_bits(bits)).unwrap();
        prop_assert!(fit <= n);
    }

    #[test]
    fn fitness_is_idempotent(bits in prop::collection::vec(any::<bool>(), 1..200)) {
        let g = Genome::from_bits(bits);
        prop_assert_eq!(evaluate(&g).unwrap(), evaluate(&g).unwrap());
    }

    #[test]
    fn fitness_of_extremes(n in 1usize..500) {
        prop_assert_eq!(evaluate(&Genome::ones(n)).unwrap(), n);
        prop_assert_eq!(evaluate(&Genome::zeros(n)).unwrap(), 0);
    }

    // ---- Operators ----

    #[test]
    fn crossover_preserves_length(
        n in 1usize..100,
        seed in any::<u64>(),
        style in crossover_style(),
    ) {
        let mut rng = create_rng(seed);
        let mut a = Individual::new(Genome::random(n, &mut rng));
        let mut b = Individual::new(Genome::random(n, &mut rng));
        style.crossover(&mut a, &mut b, &mut rng);
        prop_assert_eq!(a.genome().len(), n);
        prop_assert_eq!(b.genome().len(), n);
    }

    #[test]
    fn mutation_preserves_length(n in 1usize..200, rate in 0.0f64..=1.0, seed in any::<u64>()) {
        let mut rng = create_rng(seed);
        let mut ind = Individual::evaluated(Genome::random(n, &mut rng), &OneMax).unwrap();
        let changed = BitFlipMutation::new(rate).mutate(&mut ind, &mut rng);
        prop_assert_eq!(ind.genome().len(), n);
        // A changed genome must have lost its cached fitness.
        prop_assert_eq!(changed, !ind.is_evaluated());
    }

    #[test]
    fn cached_fitness_matches_genome(n in 1usize..100, seed in any::<u64>()) {
        let mut rng = create_rng(seed);
        let mut ind = Individual::new(Genome::random(n, &mut rng));
        BitFlipMutation::new(0.3).mutate(&mut ind, &mut rng);
        ind.ensure_evaluated(&OneMax).unwrap();
        prop_assert_eq!(ind.fitness(), Some(ind.genome().count_ones()));
    }

    // ---- Selection ----

    #[test]
    fn tournament_returns_valid_index(
        pop_size in 1usize..50,
        k in 1usize..10,
        seed in any::<u64>(),
    ) {
        let mut rng = create_rng(seed);
        let pop = Population::initialize(pop_size, 8, &OneMax, &mut rng).unwrap();
        let idx = Tournament::new(k).select(&pop, &mut rng).unwrap();
        prop_assert!(idx < pop_size);
    }

    // ---- Evolution loop ----

    #[test]
    fn run_respects_invariants(
        genome_length in 1usize..24,
        population_size in 2usize..24,
        max_generations in 1usize..40,
        crossover_prob in 0.0f64..=1.0,
        mutation_prob in 0.0f64..=0.2,
        style in crossover_style(),
        seed in any::<u64>(),
    ) {
        let config = GaConfig::default()
            .with_genome_length(genome_length)
            .with_population_size(population_size)
            .with_tournament_size(2)
            .with_crossover_prob(crossover_prob)
            .with_mutation_prob(mutation_prob)
            .with_crossover(style)
            .with_max_generations(max_generations)
            .with_random_seed(seed);
        let result = u_onemax::run(&config).unwrap();

        prop_assert!(result.generations_run <= max_generations);
        prop_assert_eq!(result.history.len(), result.generations_run + 1);
        prop_assert_eq!(result.best_genome.len(), genome_length);
        prop_assert_eq!(result.best_genome.count_ones(), result.best_fitness);
        if result.success {
            prop_assert_eq!(result.best_fitness, genome_length);
        }
        for stats in &result.history {
            prop_assert_eq!(stats.count, population_size);
        }
    }

    #[test]
    fn run_is_deterministic(seed in any::<u64>()) {
        let config = GaConfig::default()
            .with_genome_length(16)
            .with_population_size(20)
            .with_max_generations(30)
            .with_random_seed(seed);
        let runner = GaRunner::from_config(&config);
        prop_assert_eq!(runner.run(&config).unwrap(), runner.run(&config).unwrap());
    }

    #[test]
    fn oversized_tournament_rejected(population_size in 1usize..50, extra in 1usize..10) {
        let config = GaConfig::default()
            .with_population_size(population_size)
            .with_tournament_size(population_size + extra);
        prop_assert!(matches!(u_onemax::run(&config), Err(GaError::InvalidConfiguration(_))));
    }
}

#[test]
fn zero_genome_length_rejected_before_initialization() {
    let config = GaConfig::default().with_genome_length(0);
    let mut generations = 0;
    let result = GaRunner::from_config(&config).run_with_observer(&config, |_| generations += 1);
    assert!(matches!(result, Err(GaError::InvalidConfiguration(_))));
    // Not even generation 0 was produced.
    assert_eq!(generations, 0);
}

#[test]
fn reference_scenario_succeeds() {
    let config = GaConfig {
        genome_length: 20,
        population_size: 50,
        crossover_prob: 0.5,
        mutation_prob: 0.05,
        tournament_size: 3,
        max_generations: 1000,
        random_seed: Some(42),
        ..GaConfig::default()
    };
    let result = u_onemax::run(&config).unwrap();
    assert!(result.success);
    assert_eq!(result.best_fitness, 20);
    assert!(result.generations_run <= 1000);
}

#[test]
fn classic_preset_solves_with_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let config = GaConfig::classic().with_random_seed(7);
    let result = u_onemax::run(&config).unwrap();
    assert!(result.success, "terminated with {:?}", result.termination);
    assert_eq!(result.best_fitness, 100);
}
