use crate::types::{Individual, Policy, SETTING_RANGE};
use rand::Rng;

/// Tournament selection: keep the lowest-cost of K random candidates.
pub fn tournament_selection<R: Rng>(
    population: &[Individual],
    tournament_size: usize,
    rng: &mut R,
) -> Individual {
    // unevaluated individuals never win a tournament
    let cost = |ind: &Individual| ind.fitness.unwrap_or(f64::INFINITY);

    let mut best_idx = rng.gen_range(0..population.len());
    for _ in 1..tournament_size {
        let idx = rng.gen_range(0..population.len());
        if cost(&population[idx]) < cost(&population[best_idx]) {
            best_idx = idx;
        }
    }

    population[best_idx].clone()
}

/// Two-point crossover: exchange the segment between two distinct random
/// cut points. Policies shorter than two genes are left untouched.
pub fn two_point_crossover<R: Rng>(a: &mut [u8], b: &mut [u8], rng: &mut R) {
    let len = a.len().min(b.len());
    if len < 2 {
        return;
    }

    let p1 = rng.gen_range(1..=len);
    let p2 = rng.gen_range(1..len);
    let (lo, hi) = if p2 >= p1 { (p1, p2 + 1) } else { (p2, p1) };

    a[lo..hi].swap_with_slice(&mut b[lo..hi]);
}

/// Uniform integer mutation: each gene is independently replaced by a
/// fresh uniform setting with probability `gene_rate`. A replacement may
/// redraw the current value. Returns how many genes were rewritten.
pub fn mutate_uniform<R: Rng>(policy: &mut [u8], gene_rate: f64, rng: &mut R) -> usize {
    let mut rewritten = 0;
    for gene in policy.iter_mut() {
        if rng.gen::<f64>() < gene_rate {
            *gene = rng.gen_range(SETTING_RANGE);
            rewritten += 1;
        }
    }
    rewritten
}

/// Fresh uniform random policy.
pub fn random_policy<R: Rng>(length: usize, rng: &mut R) -> Policy {
    (0..length).map(|_| rng.gen_range(SETTING_RANGE)).collect()
}
