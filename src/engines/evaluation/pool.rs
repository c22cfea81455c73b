use super::evaluator::Evaluator;
use crate::error::{Result, StormctlError};
use crate::types::Individual;
use rayon::prelude::*;

/// Fixed-size worker pool for fitness evaluation.
///
/// Evaluations are stateless and independent of each other, so they map
/// cleanly onto a bounded thread pool. Each call evaluates every
/// individual still lacking a cost and blocks until the whole batch is
/// done; a generation never proceeds on partial results.
pub struct EvaluationPool {
    pool: rayon::ThreadPool,
}

impl EvaluationPool {
    pub fn new(workers: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| {
                StormctlError::Evaluation(format!("failed to build worker pool: {}", e))
            })?;
        Ok(Self { pool })
    }

    /// Evaluate every individual without a fitness, assigning results
    /// back positionally. The first evaluator error aborts the batch.
    /// Returns how many evaluations ran.
    pub fn evaluate_pending<E: Evaluator>(
        &self,
        evaluator: &E,
        population: &mut [Individual],
    ) -> Result<usize> {
        let pending: Vec<usize> = population
            .iter()
            .enumerate()
            .filter(|(_, ind)| !ind.evaluated())
            .map(|(idx, _)| idx)
            .collect();

        let results: Result<Vec<(usize, f64)>> = {
            let snapshot: &[Individual] = population;
            self.pool.install(|| {
                pending
                    .par_iter()
                    .map(|&idx| {
                        evaluator
                            .evaluate(&snapshot[idx].policy)
                            .map(|cost| (idx, cost))
                    })
                    .collect()
            })
        };

        for (idx, cost) in results? {
            population[idx].fitness = Some(cost);
        }
        Ok(pending.len())
    }
}
