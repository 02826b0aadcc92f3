//! Multi-year yield on a whole-year horizon, without day counting.
//!
//! Coupons are taken as a flat annual amount and stamp duty is charged on a
//! reference price rather than on the market value, so the figures are an
//! approximation of [`crate::yields::compute_yield`] suitable for comparing
//! securities of different tenors. Every intermediate is rounded half-up to
//! 8 digits; yields are decimal fractions (0.0221 = 2.21%).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::RenditaError;
use crate::regime::TaxRegime;
use crate::types::{
    div_half_up, mul_checked, round_half_up, with_metadata, ComputationOutput, Money, Rate,
    Years, INTERMEDIATE_DP, MAX_INVESTMENT_AMOUNT,
};
use crate::RenditaResult;

const HUNDRED: Decimal = dec!(100);
const MONTHS_IN_YEAR: Decimal = dec!(12);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvancedYieldInput {
    pub nominal: Money,
    /// Price per 100 of nominal
    pub purchase_price_pct: Decimal,
    /// Annual coupon as a decimal (0.0525 for 5.25%)
    pub annual_coupon_rate: Rate,
    pub years: Years,
    pub commission_rate: Rate,
    /// Price per 100 of nominal on which stamp duty is levied
    pub duty_reference_price_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedYieldResult {
    pub invested_capital: Money,
    pub net_annual_coupons: Money,
    pub net_capital_gain: Money,
    pub net_gain_before_costs: Money,
    pub yield_before_costs: Rate,
    pub commission: Money,
    pub capital_with_commission: Money,
    pub yield_with_commission: Rate,
    pub total_annual_duty: Money,
    pub yield_with_commission_and_annual_duty: Rate,
    pub total_monthly_duty: Money,
    pub yield_with_commission_and_monthly_duty: Rate,
    /// Net coupons over the whole horizon
    pub net_interest: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn compute_advanced_yield(
    input: &AdvancedYieldInput,
) -> RenditaResult<ComputationOutput<AdvancedYieldResult>> {
    compute_advanced_yield_with(input, &TaxRegime::default())
}

pub fn compute_advanced_yield_with(
    input: &AdvancedYieldInput,
    regime: &TaxRegime,
) -> RenditaResult<ComputationOutput<AdvancedYieldResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;
    regime.validate()?;

    let dp = INTERMEDIATE_DP;
    let net_factor = regime.net_factor();
    let nominal = input.nominal;
    let years = input.years;

    let invested_capital = div_half_up(
        mul_checked(nominal, input.purchase_price_pct, "purchase_price_pct")?,
        HUNDRED,
        dp,
        "invested capital",
    )?;
    let net_annual_coupons = round_half_up(
        mul_checked(nominal * net_factor, input.annual_coupon_rate, "annual_coupon_rate")?,
        dp,
    );
    let net_capital_gain = round_half_up((nominal - invested_capital) * net_factor, dp);
    let net_interest = round_half_up(mul_checked(net_annual_coupons, years, "years")?, dp);
    let net_gain_before_costs = round_half_up(net_interest + net_capital_gain, dp);

    let yield_before_costs = div_half_up(
        net_gain_before_costs,
        mul_checked(invested_capital, years, "years")?,
        dp,
        "yield before costs",
    )?;

    let commission = round_half_up(
        mul_checked(invested_capital, input.commission_rate, "commission_rate")?,
        dp,
    );
    let capital_with_commission = invested_capital + commission;
    let capital_years = mul_checked(capital_with_commission, years, "years")?;
    let on_capital =
        |gain: Money, context: &str| div_half_up(gain, capital_years, dp, context);
    let yield_with_commission = on_capital(net_gain_before_costs, "yield with commission")?;

    let duty_base = div_half_up(
        mul_checked(nominal, input.duty_reference_price_pct, "duty_reference_price_pct")?,
        HUNDRED,
        dp,
        "duty base",
    )?;

    let annual_duty = round_half_up(duty_base * regime.stamp_duty_rate, dp);
    let total_annual_duty = round_half_up(mul_checked(annual_duty, years, "years")?, dp);
    let yield_with_commission_and_annual_duty = on_capital(
        net_gain_before_costs - total_annual_duty,
        "yield with annual duty",
    )?;

    let monthly_duty = div_half_up(
        duty_base * regime.stamp_duty_rate,
        MONTHS_IN_YEAR,
        dp,
        "monthly duty",
    )?;
    let total_monthly_duty = round_half_up(
        mul_checked(monthly_duty, mul_checked(years, MONTHS_IN_YEAR, "years")?, "years")?,
        dp,
    );
    let yield_with_commission_and_monthly_duty = on_capital(
        net_gain_before_costs - total_monthly_duty,
        "yield with monthly duty",
    )?;

    log::debug!(
        "advanced yield over {} years: invested={} gain={} yields={}/{}/{}/{}",
        years,
        invested_capital,
        net_gain_before_costs,
        yield_before_costs,
        yield_with_commission,
        yield_with_commission_and_annual_duty,
        yield_with_commission_and_monthly_duty
    );

    if net_capital_gain < Decimal::ZERO {
        warnings.push(format!(
            "Bought above par at {}: capital loss of {}",
            input.purchase_price_pct, net_capital_gain
        ));
    }
    if yield_with_commission_and_annual_duty < Decimal::ZERO
        || yield_with_commission_and_monthly_duty < Decimal::ZERO
    {
        warnings.push("Yield net of costs is negative".into());
    }

    let output = AdvancedYieldResult {
        invested_capital,
        net_annual_coupons,
        net_capital_gain,
        net_gain_before_costs,
        yield_before_costs,
        commission,
        capital_with_commission,
        yield_with_commission,
        total_annual_duty,
        yield_with_commission_and_annual_duty,
        total_monthly_duty,
        yield_with_commission_and_monthly_duty,
        net_interest,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Whole-year yield — flat net coupons, taxed capital gain, commission on invested capital, duty on reference price",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &AdvancedYieldInput) -> RenditaResult<()> {
    for (field, value) in [
        ("nominal", input.nominal),
        ("purchase_price_pct", input.purchase_price_pct),
        ("years", input.years),
        ("duty_reference_price_pct", input.duty_reference_price_pct),
    ] {
        if value <= Decimal::ZERO {
            return Err(RenditaError::invalid(field, "Must be positive"));
        }
    }
    if input.nominal > MAX_INVESTMENT_AMOUNT {
        return Err(RenditaError::invalid(
            "nominal",
            format!("Nominal cannot exceed {MAX_INVESTMENT_AMOUNT}"),
        ));
    }
    for (field, value) in [
        ("annual_coupon_rate", input.annual_coupon_rate),
        ("commission_rate", input.commission_rate),
    ] {
        if value < Decimal::ZERO {
            return Err(RenditaError::invalid(field, "Cannot be negative"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn four_year_premium() -> AdvancedYieldInput {
        AdvancedYieldInput {
            nominal: dec!(10000),
            purchase_price_pct: dec!(109.8887),
            annual_coupon_rate: dec!(0.0525),
            years: dec!(4),
            commission_rate: dec!(0.0009),
            duty_reference_price_pct: dec!(100),
        }
    }

    #[test]
    fn test_four_year_premium_btp() {
        let out = compute_advanced_yield(&four_year_premium()).unwrap();
        let expected = AdvancedYieldResult {
            invested_capital: dec!(10988.87),
            net_annual_coupons: dec!(459.375),
            net_capital_gain: dec!(-865.26125),
            net_gain_before_costs: dec!(972.23875),
            yield_before_costs: dec!(0.02211872),
            commission: dec!(9.889983),
            capital_with_commission: dec!(10998.759983),
            yield_with_commission: dec!(0.02209883),
            total_annual_duty: dec!(80),
            yield_with_commission_and_annual_duty: dec!(0.02028044),
            // 1.66666667 per month over 48 months
            total_monthly_duty: dec!(80.00000016),
            yield_with_commission_and_monthly_duty: dec!(0.02028044),
            net_interest: dec!(1837.5),
        };
        assert_eq!(out.result, expected);
    }

    #[test]
    fn test_yields_decrease_with_costs() {
        let r = compute_advanced_yield(&four_year_premium()).unwrap().result;
        assert!(r.yield_before_costs >= r.yield_with_commission);
        assert!(r.yield_with_commission >= r.yield_with_commission_and_annual_duty);
    }

    #[test]
    fn test_zero_years_rejected() {
        let input = AdvancedYieldInput {
            years: Decimal::ZERO,
            ..four_year_premium()
        };
        match compute_advanced_yield(&input).unwrap_err() {
            RenditaError::InvalidInput { field, .. } => assert_eq!(field, "years"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_oversized_nominal_rejected() {
        let input = AdvancedYieldInput {
            nominal: MAX_INVESTMENT_AMOUNT + dec!(1),
            ..four_year_premium()
        };
        match compute_advanced_yield(&input).unwrap_err() {
            RenditaError::InvalidInput { field, .. } => assert_eq!(field, "nominal"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_overflowing_price_is_invalid_input() {
        let input = AdvancedYieldInput {
            nominal: MAX_INVESTMENT_AMOUNT,
            purchase_price_pct: Decimal::from_i128_with_scale(10_i128.pow(20), 0),
            ..four_year_premium()
        };
        match compute_advanced_yield(&input).unwrap_err() {
            RenditaError::InvalidInput { field, .. } => assert_eq!(field, "purchase_price_pct"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_commission_rejected() {
        let input = AdvancedYieldInput {
            commission_rate: dec!(-0.001),
            ..four_year_premium()
        };
        assert!(compute_advanced_yield(&input).is_err());
    }
}
