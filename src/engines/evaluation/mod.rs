pub mod evaluator;
pub mod pool;

pub use evaluator::{CommandEvaluator, EvaluationContext, Evaluator};
pub use pool::EvaluationPool;
