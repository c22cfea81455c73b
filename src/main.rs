use anyhow::Context;
use std::time::Duration;
use stormctl::config::ConfigManager;
use stormctl::controller::run_control_step;
use stormctl::engines::evaluation::{CommandEvaluator, EvaluationContext};
use stormctl::engines::generation::ConsoleProgressCallback;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .context("usage: stormctl <config-file>")?;

    let manager = ConfigManager::new();
    manager
        .load_from_file(&config_path)
        .with_context(|| format!("loading {}", config_path))?;
    let config = manager.get();

    let sim = &config.simulation;
    let context = EvaluationContext {
        hydraulics_path: sim.hydraulics_path.clone(),
        process_path: sim.process_path.clone(),
        sim_dt: sim.sim_dt,
        control_time_step: sim.control_time_step,
        n_control_steps: sim.n_control_steps,
        control_structures: sim.control_structures.clone(),
        target_depths: sim.target_depths.clone(),
        node_flood_weights: sim.node_flood_weights.clone(),
        flood_weight: sim.flood_weight,
        dev_weight: sim.dev_weight,
    };
    let evaluator = CommandEvaluator::new(
        sim.evaluator_command.clone(),
        sim.evaluator_args.clone(),
        context,
        sim.evaluation_timeout_secs.map(Duration::from_secs),
    );

    let best = run_control_step(&config, evaluator, ConsoleProgressCallback)?;

    // the policy the caller applies for the next control step
    println!("{}", serde_json::to_string(&best.policy)?);
    Ok(())
}
