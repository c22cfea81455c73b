pub mod population_store;

pub use population_store::PopulationStore;
