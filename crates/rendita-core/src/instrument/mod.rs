pub mod purchase;
pub mod request;
pub mod security;

pub use purchase::{PurchaseAssumptions, StampDutyMode};
pub use request::YieldRequest;
pub use security::{InstrumentKind, Periodicity, Security};
