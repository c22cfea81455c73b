use crate::types::Individual;

/// Per-generation fitness summary, one row of the run's logbook.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    /// Simulations actually run this generation; unchanged individuals
    /// keep their cost and are not re-evaluated.
    pub evaluations: usize,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

impl GenerationStats {
    pub fn from_population(
        generation: usize,
        evaluations: usize,
        population: &[Individual],
    ) -> Self {
        let costs: Vec<f64> = population.iter().filter_map(|ind| ind.fitness).collect();
        if costs.is_empty() {
            return Self {
                generation,
                evaluations,
                avg: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
            };
        }

        let sum: f64 = costs.iter().sum();
        let min = costs.iter().copied().fold(f64::INFINITY, f64::min);
        let max = costs.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            generation,
            evaluations,
            avg: sum / costs.len() as f64,
            min,
            max,
        }
    }
}
