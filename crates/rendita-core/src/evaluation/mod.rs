pub mod batch;
pub mod security;
pub mod snapshot;

pub use batch::{recompute_batch, recompute_batch_with, BatchEntry, BatchItem, BatchOutput, BatchRequest};
pub use security::{evaluate_security, evaluate_security_with, EvaluationInput, SecurityEvaluation};
pub use snapshot::SimulationSnapshot;
