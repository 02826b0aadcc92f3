pub mod advanced;
pub mod evaluation;
pub mod projection;
pub mod trend;
pub mod yields;
