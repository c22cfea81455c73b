use super::traits::ConfigSection;
use crate::error::StormctlError;
use crate::types::ControlStructure;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Directory holding the population bridge file between horizons.
    pub work_dir: PathBuf,
    /// Hydraulic hot-start state the simulation resumes from.
    pub hydraulics_path: PathBuf,
    /// Process model file describing the network.
    pub process_path: PathBuf,
    /// External simulator invoked once per fitness evaluation.
    pub evaluator_command: String,
    pub evaluator_args: Vec<String>,
    /// Simulation routing step, seconds.
    pub sim_dt: f64,
    /// Wall-clock length of one control decision, seconds.
    pub control_time_step: f64,
    /// Number of future control steps encoded in a policy.
    pub n_control_steps: usize,
    /// Controllable structures, e.g. `["ORIFICE R1", "PUMP P1"]`; order
    /// fixes the order of sub-blocks in a policy.
    pub control_structures: Vec<String>,
    /// Target depth per node id, for the deviation penalty.
    pub target_depths: HashMap<String, f64>,
    /// Per-node flooding weights.
    pub node_flood_weights: HashMap<String, f64>,
    pub flood_weight: f64,
    pub dev_weight: f64,
    /// Per-evaluation wall clock limit; a timed-out simulation counts as
    /// an evaluation failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation_timeout_secs: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            hydraulics_path: PathBuf::new(),
            process_path: PathBuf::new(),
            evaluator_command: String::new(),
            evaluator_args: Vec::new(),
            sim_dt: 30.0,
            control_time_step: 900.0,
            n_control_steps: 6,
            control_structures: Vec::new(),
            target_depths: HashMap::new(),
            node_flood_weights: HashMap::new(),
            flood_weight: 1.0,
            dev_weight: 1.0,
            evaluation_timeout_secs: None,
        }
    }
}

impl ConfigSection for SimulationConfig {
    fn section_name() -> &'static str {
        "simulation"
    }

    fn validate(&self) -> Result<(), StormctlError> {
        if self.control_structures.is_empty() {
            return Err(StormctlError::Configuration(
                "At least one control structure is required".to_string(),
            ));
        }
        ControlStructure::parse_all(&self.control_structures)?;
        if self.n_control_steps < 1 {
            return Err(StormctlError::Configuration(
                "Control horizon must be at least 1 step".to_string(),
            ));
        }
        if self.sim_dt <= 0.0 {
            return Err(StormctlError::Configuration(
                "Simulation time step must be positive".to_string(),
            ));
        }
        if self.control_time_step <= 0.0 {
            return Err(StormctlError::Configuration(
                "Control time step must be positive".to_string(),
            ));
        }
        if self.flood_weight < 0.0 || self.dev_weight < 0.0 {
            return Err(StormctlError::Configuration(
                "Cost weights must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}
