use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RenditaError;
use crate::RenditaResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.125 = 12.5%) unless the field name says percent.
pub type Rate = Decimal;

/// Year fractions
pub type Years = Decimal;

/// Scale of every monetary figure and yield percentage in a yield result.
pub const MONEY_DP: u32 = 4;
/// Scale carried by divisions before any further rounding.
pub const INTERMEDIATE_DP: u32 = 8;
/// Scale of projected final values.
pub const PROJECTION_DP: u32 = 2;
/// Scale of the compounding factor in the multi-year projection.
pub const FACTOR_DP: u32 = 10;
/// Scale of year fractions derived from day counts.
pub const YEARS_DP: u32 = 6;

/// Largest nominal accepted for a single purchase.
pub const MAX_INVESTMENT_AMOUNT: Money = dec!(1_000_000_000_000_000);

/// Round half-up (away from zero on the midpoint) to `dp` fractional digits.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Divide and round half-up to `dp` fractional digits. A quotient outside
/// the decimal range is reported against `context`.
pub fn div_half_up(
    numerator: Decimal,
    denominator: Decimal,
    dp: u32,
    context: &str,
) -> RenditaResult<Decimal> {
    if denominator.is_zero() {
        return Err(RenditaError::DivisionByZero {
            context: context.to_string(),
        });
    }
    numerator
        .checked_div(denominator)
        .map(|q| round_half_up(q, dp))
        .ok_or_else(|| RenditaError::invalid(context, "Result is out of range"))
}

/// Multiply without panicking; overflow is reported against `field`.
pub fn mul_checked(a: Decimal, b: Decimal, field: &str) -> RenditaResult<Decimal> {
    a.checked_mul(b)
        .ok_or_else(|| RenditaError::invalid(field, "Value is out of range"))
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
