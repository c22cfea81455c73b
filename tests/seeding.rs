use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use stormctl::engines::generation::SeedingStrategy;
use stormctl::types::SETTING_MAX;
use stormctl::StormctlError;

#[test]
fn seeded_population_has_exact_size_and_length() {
    let strategy = SeedingStrategy {
        population_size: 40,
        n_controls: 2,
        gene_mutation_rate: 0.2,
    };
    let best: Vec<u8> = vec![3, 7, 1, 9, 0, 5, 2, 8, 4, 6, 10, 1];
    let mut rng = StdRng::seed_from_u64(42);

    let population = strategy.seed(&best, &mut rng).unwrap();

    assert_eq!(population.len(), 40);
    assert!(population.iter().all(|p| p.len() == best.len()));
}

#[test]
fn seeded_genes_stay_in_range() {
    let strategy = SeedingStrategy {
        population_size: 60,
        n_controls: 3,
        gene_mutation_rate: 0.5,
    };
    let best: Vec<u8> = vec![10; 9];
    let mut rng = StdRng::seed_from_u64(7);

    let population = strategy.seed(&best, &mut rng).unwrap();

    assert!(population
        .iter()
        .all(|p| p.iter().all(|&g| g <= SETTING_MAX)));
}

#[test]
fn seeded_population_has_no_duplicates_in_a_roomy_space() {
    // 12 genes leave far more unique policies than population slots, so
    // neither the mutation-derived candidates nor the backfill should
    // ever need to admit a duplicate
    let strategy = SeedingStrategy {
        population_size: 50,
        n_controls: 2,
        gene_mutation_rate: 0.2,
    };
    let best: Vec<u8> = vec![5, 5, 5, 5, 5, 5, 2, 2, 2, 2, 2, 2];
    let mut rng = StdRng::seed_from_u64(99);

    let population = strategy.seed(&best, &mut rng).unwrap();

    let unique: HashSet<&Vec<u8>> = population.iter().collect();
    assert_eq!(unique.len(), population.len());
}

#[test]
fn each_block_drops_the_elapsed_step_and_gains_a_fresh_one() {
    // with mutation off, the retained window shows through unchanged:
    // [5,5,5 | 2,2,2] -> [5,5,x | 2,2,y] with x and y freshly drawn
    let strategy = SeedingStrategy {
        population_size: 1,
        n_controls: 2,
        gene_mutation_rate: 0.0,
    };
    let best: Vec<u8> = vec![5, 5, 5, 2, 2, 2];
    let mut rng = StdRng::seed_from_u64(1);

    let population = strategy.seed(&best, &mut rng).unwrap();

    assert_eq!(population.len(), 1);
    let candidate = &population[0];
    assert_eq!(candidate.len(), best.len());
    assert_eq!(&candidate[0..2], &[5, 5]);
    assert_eq!(&candidate[3..5], &[2, 2]);
    assert!(candidate[2] <= SETTING_MAX);
    assert!(candidate[5] <= SETTING_MAX);
}

#[test]
fn tiny_policy_space_backfill_still_terminates() {
    // a 1-gene policy has only 11 distinct values; asking for 20
    // individuals forces the backfill past its uniqueness cap
    let strategy = SeedingStrategy {
        population_size: 20,
        n_controls: 1,
        gene_mutation_rate: 0.2,
    };
    let best: Vec<u8> = vec![4];
    let mut rng = StdRng::seed_from_u64(3);

    let population = strategy.seed(&best, &mut rng).unwrap();

    assert_eq!(population.len(), 20);
    assert!(population.iter().all(|p| p.len() == 1 && p[0] <= SETTING_MAX));
}

#[test]
fn uneven_best_policy_is_an_encoding_error() {
    let strategy = SeedingStrategy {
        population_size: 10,
        n_controls: 2,
        gene_mutation_rate: 0.2,
    };
    let best: Vec<u8> = vec![1, 2, 3];
    let mut rng = StdRng::seed_from_u64(11);

    let err = strategy.seed(&best, &mut rng).unwrap_err();
    assert!(matches!(err, StormctlError::Encoding(_)));
}
