use super::stats::GenerationStats;

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(
        &mut self,
        generation: usize,
        stats: &GenerationStats,
        best_fitness: f64,
    );
}

/// Prints one logbook row per generation.
pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(
        &mut self,
        generation: usize,
        stats: &GenerationStats,
        best_fitness: f64,
    ) {
        println!(
            "gen {:>3}  nevals {:>4}  avg {:>12.4}  min {:>12.4}  max {:>12.4}  best {:>12.4}",
            generation, stats.evaluations, stats.avg, stats.min, stats.max, best_fitness
        );
    }
}
