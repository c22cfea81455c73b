use super::traits::ConfigSection;
use crate::error::StormctlError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub num_generations: usize,
    /// Probability of two-point crossover per adjacent pair.
    pub crossover_rate: f64,
    /// Probability of mutating an individual at all.
    pub mutation_rate: f64,
    /// Per-gene replacement probability once an individual mutates.
    pub gene_mutation_rate: f64,
    /// Per-gene replacement probability when seeding the next horizon.
    pub seed_mutation_rate: f64,
    pub tournament_size: usize,
    pub hall_of_fame_size: usize,
    /// Concurrent simulation runs during fitness evaluation.
    pub workers: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            num_generations: 10,
            crossover_rate: 0.5,
            mutation_rate: 0.2,
            gene_mutation_rate: 0.10,
            seed_mutation_rate: 0.2,
            tournament_size: 6,
            hall_of_fame_size: 1,
            workers: 16,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), StormctlError> {
        if self.population_size < 2 {
            return Err(StormctlError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }
        if self.num_generations < 1 {
            return Err(StormctlError::Configuration(
                "Generation count must be at least 1".to_string(),
            ));
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
            ("gene_mutation_rate", self.gene_mutation_rate),
            ("seed_mutation_rate", self.seed_mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(StormctlError::Configuration(format!(
                    "{} must be between 0 and 1",
                    name
                )));
            }
        }
        if self.tournament_size < 1 || self.tournament_size > self.population_size {
            return Err(StormctlError::Configuration(
                "Tournament size must be between 1 and the population size".to_string(),
            ));
        }
        if self.hall_of_fame_size < 1 {
            return Err(StormctlError::Configuration(
                "Hall of fame size must be at least 1".to_string(),
            ));
        }
        if self.workers < 1 {
            return Err(StormctlError::Configuration(
                "Worker count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
