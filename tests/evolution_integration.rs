use std::sync::{Arc, Mutex};
use stormctl::engines::evaluation::Evaluator;
use stormctl::engines::generation::evolution_engine::{EvolutionConfig, EvolutionEngine};
use stormctl::engines::generation::{GenerationStats, ProgressCallback};
use stormctl::types::{Individual, SETTING_MAX};
use stormctl::{Result, StormctlError};

/// Deterministic stand-in for the hydraulic simulation: the cost is the
/// sum of all settings, so the optimum is the all-zero policy.
struct SumEvaluator;

impl Evaluator for SumEvaluator {
    fn evaluate(&self, policy: &[u8]) -> Result<f64> {
        Ok(policy.iter().map(|&g| g as f64).sum())
    }
}

struct FailingEvaluator;

impl Evaluator for FailingEvaluator {
    fn evaluate(&self, _policy: &[u8]) -> Result<f64> {
        Err(StormctlError::Evaluation("simulation crashed".to_string()))
    }
}

struct NullCallback;

impl ProgressCallback for NullCallback {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_generation_complete(
        &mut self,
        _generation: usize,
        _stats: &GenerationStats,
        _best_fitness: f64,
    ) {
    }
}

/// Collects the best-of-run cost reported after each generation.
struct RecordingCallback {
    best_per_generation: Arc<Mutex<Vec<f64>>>,
}

impl ProgressCallback for RecordingCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(
        &mut self,
        _generation: usize,
        _stats: &GenerationStats,
        best_fitness: f64,
    ) {
        self.best_per_generation.lock().unwrap().push(best_fitness);
    }
}

fn engine_config(policy_length: usize, seed: u64) -> EvolutionConfig {
    EvolutionConfig {
        population_size: 30,
        generations: 8,
        policy_length,
        crossover_rate: 0.5,
        mutation_rate: 0.2,
        gene_mutation_rate: 0.10,
        tournament_size: 3,
        hall_of_fame_size: 1,
        workers: 4,
        seed: Some(seed),
    }
}

#[test]
fn best_of_run_never_trails_any_generation() {
    let mut engine = EvolutionEngine::new(engine_config(6, 42), SumEvaluator).unwrap();
    let best = engine.run(None, NullCallback).unwrap();

    assert_eq!(best.policy.len(), 6);
    assert!(best.policy.iter().all(|&g| g <= SETTING_MAX));

    let logbook = engine.logbook();
    assert!(!logbook.is_empty());
    for row in logbook {
        assert!(best.fitness <= row.min);
    }
}

#[test]
fn hall_of_fame_best_is_monotone_non_increasing() {
    let best_per_generation = Arc::new(Mutex::new(Vec::new()));
    let callback = RecordingCallback {
        best_per_generation: Arc::clone(&best_per_generation),
    };

    let mut engine = EvolutionEngine::new(engine_config(8, 7), SumEvaluator).unwrap();
    engine.run(None, callback).unwrap();

    let recorded = best_per_generation.lock().unwrap();
    assert_eq!(recorded.len(), 8);
    for pair in recorded.windows(2) {
        assert!(pair[1] <= pair[0]);
    }
}

#[test]
fn same_seed_reproduces_the_same_best_policy() {
    let run = |seed| {
        let mut engine = EvolutionEngine::new(engine_config(5, seed), SumEvaluator).unwrap();
        engine.run(None, NullCallback).unwrap()
    };

    let first = run(123);
    let second = run(123);

    assert_eq!(first.policy, second.policy);
    assert_eq!(first.fitness, second.fitness);
}

#[test]
fn logbook_has_one_row_per_generation() {
    let mut engine = EvolutionEngine::new(engine_config(4, 9), SumEvaluator).unwrap();
    engine.run(None, NullCallback).unwrap();

    let logbook = engine.logbook();
    assert_eq!(logbook.len(), 8);
    for (i, row) in logbook.iter().enumerate() {
        assert_eq!(row.generation, i);
    }
    // the whole initial population is simulated in the first generation
    assert!(logbook[0].evaluations >= 30);
}

#[test]
fn restored_population_must_match_the_policy_length() {
    let mut engine = EvolutionEngine::new(engine_config(4, 1), SumEvaluator).unwrap();
    let restored = vec![Individual::new(vec![1, 2, 3])];

    let err = engine.run(Some(restored), NullCallback).unwrap_err();
    assert!(matches!(err, StormctlError::Encoding(_)));
}

#[test]
fn empty_restored_population_is_rejected() {
    let mut engine = EvolutionEngine::new(engine_config(4, 1), SumEvaluator).unwrap();
    let err = engine.run(Some(Vec::new()), NullCallback).unwrap_err();
    assert!(matches!(err, StormctlError::Encoding(_)));
}

#[test]
fn evaluator_failure_is_fatal_to_the_run() {
    let mut engine = EvolutionEngine::new(engine_config(4, 2), FailingEvaluator).unwrap();
    let err = engine.run(None, NullCallback).unwrap_err();
    assert!(matches!(err, StormctlError::Evaluation(_)));
}

#[test]
fn restored_individuals_are_reused() {
    // a restored population of known all-zero optima: the hall of fame
    // must pick one up with cost 0 no matter what evolution does next
    let mut engine = EvolutionEngine::new(engine_config(4, 3), SumEvaluator).unwrap();
    let restored = (0..30).map(|_| Individual::new(vec![0, 0, 0, 0])).collect();

    let best = engine.run(Some(restored), NullCallback).unwrap();
    assert_eq!(best.fitness, 0.0);
    assert_eq!(best.policy, vec![0, 0, 0, 0]);
}
