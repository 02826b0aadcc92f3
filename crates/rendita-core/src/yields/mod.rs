pub mod calculator;
pub mod stamp_duty;

pub use calculator::{compute_yield, compute_yield_with, YieldResult};
