use crate::config::AppConfig;
use crate::data::PopulationStore;
use crate::engines::evaluation::Evaluator;
use crate::engines::generation::evolution_engine::{
    EvolutionConfig as EngineEvolutionConfig, EvolutionEngine,
};
use crate::engines::generation::hall_of_fame::EliteRecord;
use crate::engines::generation::policy::policy_length;
use crate::engines::generation::progress::ProgressCallback;
use crate::engines::generation::seeding::SeedingStrategy;
use crate::error::Result;
use crate::types::ControlStructure;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Run one control-horizon search end to end.
///
/// Restores the population persisted by the previous horizon (or starts
/// from random individuals on the first run), evolves it, persists the
/// seeded population for the next horizon, and hands back the best policy
/// found.
pub fn run_control_step<E, C>(config: &AppConfig, evaluator: E, callback: C) -> Result<EliteRecord>
where
    E: Evaluator,
    C: ProgressCallback,
{
    let controls = ControlStructure::parse_all(&config.simulation.control_structures)?;
    let len = policy_length(&controls, config.simulation.n_control_steps);

    let store = PopulationStore::new(&config.simulation.work_dir);
    let initial = if store.exists() {
        log::info!("restoring population from {}", store.path().display());
        Some(store.read(len)?)
    } else {
        log::info!(
            "no population file at {}; starting from random individuals",
            store.path().display()
        );
        None
    };

    let engine_config = EngineEvolutionConfig {
        population_size: config.evolution.population_size,
        generations: config.evolution.num_generations,
        policy_length: len,
        crossover_rate: config.evolution.crossover_rate,
        mutation_rate: config.evolution.mutation_rate,
        gene_mutation_rate: config.evolution.gene_mutation_rate,
        tournament_size: config.evolution.tournament_size,
        hall_of_fame_size: config.evolution.hall_of_fame_size,
        workers: config.evolution.workers,
        seed: config.evolution.seed,
    };
    let mut engine = EvolutionEngine::new(engine_config, evaluator)?;
    let best = engine.run(initial, callback)?;
    log::info!("best policy cost {:.4}", best.fitness);

    let seeding = SeedingStrategy {
        population_size: config.evolution.population_size,
        n_controls: controls.len(),
        gene_mutation_rate: config.evolution.seed_mutation_rate,
    };
    // decorrelated from the engine's stream so a restart with the same
    // seed does not replay the engine's draws into the seeding step
    let mut rng = match config.evolution.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    };
    let next = seeding.seed(&best.policy, &mut rng)?;
    store.write(&next)?;
    log::info!(
        "seeded {} individuals for the next horizon into {}",
        next.len(),
        store.path().display()
    );

    Ok(best)
}
