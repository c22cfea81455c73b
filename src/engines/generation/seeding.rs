use super::operators::{mutate_uniform, random_policy};
use super::policy::split_policy;
use crate::error::Result;
use crate::types::{Policy, SETTING_RANGE};
use rand::Rng;

/// Failed unique draws tolerated per population slot before the backfill
/// starts admitting duplicates. Keeps the loop terminating when the
/// unique-policy space is smaller than the population.
const BACKFILL_ATTEMPTS_PER_SLOT: usize = 64;

/// Builds the starting population for the next control horizon out of the
/// best policy found in the current one.
///
/// Each structure's block of the best policy loses its first setting (that
/// control step has already been executed and cannot be re-decided), the
/// remaining settings are jittered, and one fresh random setting extends
/// the block by a new final horizon step. Candidates that duplicate an
/// earlier one are dropped; fully random individuals fill whatever
/// deduplication removed.
pub struct SeedingStrategy {
    pub population_size: usize,
    pub n_controls: usize,
    pub gene_mutation_rate: f64,
}

impl SeedingStrategy {
    pub fn seed<R: Rng>(&self, best_policy: &[u8], rng: &mut R) -> Result<Vec<Policy>> {
        let blocks = split_policy(best_policy, self.n_controls)?;

        let mut population: Vec<Policy> = Vec::with_capacity(self.population_size);
        for _ in 0..self.population_size {
            let mut candidate: Policy = Vec::with_capacity(best_policy.len());
            for block in &blocks {
                let mut tail = block[1..].to_vec();
                mutate_uniform(&mut tail, self.gene_mutation_rate, rng);
                tail.push(rng.gen_range(SETTING_RANGE));
                candidate.extend(tail);
            }
            if !population.contains(&candidate) {
                population.push(candidate);
            }
        }

        let attempt_cap = BACKFILL_ATTEMPTS_PER_SLOT * self.population_size;
        let mut failed_draws = 0;
        while population.len() < self.population_size {
            let candidate = random_policy(best_policy.len(), rng);
            if failed_draws <= attempt_cap && population.contains(&candidate) {
                failed_draws += 1;
                if failed_draws > attempt_cap {
                    log::warn!(
                        "seeding backfill exhausted {} unique draws; admitting duplicate policies",
                        attempt_cap
                    );
                }
                continue;
            }
            population.push(candidate);
        }

        Ok(population)
    }
}
