use super::hall_of_fame::{EliteRecord, HallOfFame};
use super::operators::{mutate_uniform, random_policy, tournament_selection, two_point_crossover};
use super::progress::ProgressCallback;
use super::stats::GenerationStats;
use crate::engines::evaluation::{EvaluationPool, Evaluator};
use crate::error::{Result, StormctlError};
use crate::types::Individual;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    pub policy_length: usize,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub gene_mutation_rate: f64,
    pub tournament_size: usize,
    pub hall_of_fame_size: usize,
    pub workers: usize,
    pub seed: Option<u64>,
}

/// The generational search over control policies.
///
/// One engine instance owns one run: it takes a starting population
/// (restored from the previous horizon or freshly random), evolves it for
/// a fixed number of generations against the evaluator, and hands back
/// the best policy it ever saw.
pub struct EvolutionEngine<E: Evaluator> {
    config: EvolutionConfig,
    evaluator: E,
    pool: EvaluationPool,
    hall_of_fame: HallOfFame,
    logbook: Vec<GenerationStats>,
    rng: StdRng,
}

impl<E: Evaluator> EvolutionEngine<E> {
    pub fn new(config: EvolutionConfig, evaluator: E) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let pool = EvaluationPool::new(config.workers)?;
        let hall_of_fame = HallOfFame::new(config.hall_of_fame_size);

        Ok(Self {
            config,
            evaluator,
            pool,
            hall_of_fame,
            logbook: Vec::new(),
            rng,
        })
    }

    /// Run the evolution process and return the best policy seen.
    ///
    /// `initial` carries a population restored from a previous horizon;
    /// `None` starts from uniform random individuals. Any evaluator
    /// failure aborts the run.
    pub fn run<C: ProgressCallback>(
        &mut self,
        initial: Option<Vec<Individual>>,
        mut callback: C,
    ) -> Result<EliteRecord> {
        let mut population = match initial {
            Some(restored) => self.check_restored(restored)?,
            None => self.initialize_population(),
        };

        for generation in 0..self.config.generations {
            callback.on_generation_start(generation);

            // synchronous barrier: nothing proceeds until every member
            // has a cost
            let mut evaluations = self.evaluate_and_record(&mut population)?;

            let mut offspring = self.select(&population);
            self.vary(&mut offspring);
            evaluations += self.evaluate_and_record(&mut offspring)?;

            let stats = GenerationStats::from_population(generation, evaluations, &offspring);
            let best_fitness = self
                .hall_of_fame
                .best()
                .map(|record| record.fitness)
                .unwrap_or(f64::NAN);
            log::info!(
                "gen {} nevals {} avg {:.4} min {:.4} max {:.4}",
                stats.generation,
                stats.evaluations,
                stats.avg,
                stats.min,
                stats.max
            );
            callback.on_generation_complete(generation, &stats, best_fitness);
            self.logbook.push(stats);

            population = offspring;
        }

        self.hall_of_fame.best().cloned().ok_or_else(|| {
            StormctlError::Evaluation("run finished without evaluating any individual".to_string())
        })
    }

    fn initialize_population(&mut self) -> Vec<Individual> {
        (0..self.config.population_size)
            .map(|_| Individual::new(random_policy(self.config.policy_length, &mut self.rng)))
            .collect()
    }

    /// A restored population is only trusted after its shape is checked
    /// against the current encoding.
    fn check_restored(&self, population: Vec<Individual>) -> Result<Vec<Individual>> {
        if population.is_empty() {
            return Err(StormctlError::Encoding(
                "restored population is empty".to_string(),
            ));
        }
        for ind in &population {
            if ind.policy.len() != self.config.policy_length {
                return Err(StormctlError::Encoding(format!(
                    "restored individual has {} genes, expected {}",
                    ind.policy.len(),
                    self.config.policy_length
                )));
            }
        }
        Ok(population)
    }

    fn evaluate_and_record(&mut self, population: &mut [Individual]) -> Result<usize> {
        let evaluations = self.pool.evaluate_pending(&self.evaluator, population)?;
        // fold in immediately so the best ever seen can never be lost to
        // selection before being recorded
        self.hall_of_fame.update(population);
        Ok(evaluations)
    }

    fn select(&mut self, population: &[Individual]) -> Vec<Individual> {
        (0..self.config.population_size)
            .map(|_| tournament_selection(population, self.config.tournament_size, &mut self.rng))
            .collect()
    }

    /// Crossover on adjacent pairs, then per-individual mutation.
    /// Individuals whose genes actually changed lose their cost and get
    /// re-evaluated at the next barrier.
    fn vary(&mut self, offspring: &mut [Individual]) {
        for pair in offspring.chunks_exact_mut(2) {
            if self.rng.gen::<f64>() < self.config.crossover_rate {
                let (a, b) = pair.split_at_mut(1);
                let before_a = a[0].policy.clone();
                let before_b = b[0].policy.clone();
                two_point_crossover(&mut a[0].policy, &mut b[0].policy, &mut self.rng);
                if a[0].policy != before_a {
                    a[0].invalidate();
                }
                if b[0].policy != before_b {
                    b[0].invalidate();
                }
            }
        }

        for ind in offspring.iter_mut() {
            if self.rng.gen::<f64>() < self.config.mutation_rate {
                let before = ind.policy.clone();
                mutate_uniform(&mut ind.policy, self.config.gene_mutation_rate, &mut self.rng);
                if ind.policy != before {
                    ind.invalidate();
                }
            }
        }
    }

    pub fn get_hall_of_fame(&self) -> &HallOfFame {
        &self.hall_of_fame
    }

    pub fn logbook(&self) -> &[GenerationStats] {
        &self.logbook
    }
}
