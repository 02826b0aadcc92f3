pub mod calendar;
pub mod error;
pub mod evaluation;
pub mod instrument;
pub mod projection;
pub mod regime;
pub mod trend;
pub mod types;
pub mod yields;

#[cfg(feature = "advanced")]
pub mod advanced;

pub use error::RenditaError;
pub use regime::TaxRegime;
pub use types::*;

/// Standard result type for all rendita operations
pub type RenditaResult<T> = Result<T, RenditaError>;
