pub mod policy;
pub mod operators;
pub mod hall_of_fame;
pub mod evolution_engine;
pub mod progress;
pub mod seeding;
pub mod stats;

pub use policy::{policy_length, split_policy};
pub use hall_of_fame::{EliteRecord, HallOfFame};
pub use evolution_engine::{EvolutionConfig, EvolutionEngine};
pub use progress::{ConsoleProgressCallback, ProgressCallback};
pub use seeding::SeedingStrategy;
pub use stats::GenerationStats;
