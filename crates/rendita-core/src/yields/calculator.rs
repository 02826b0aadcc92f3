//! Realised yield of a BTP/BOT purchase held to maturity.
//!
//! Coupons accrue ACT/360 on the nominal, net of the 12.5% withholding; the
//! capital gain (or loss) against the purchase price is taxed at the same rate.
//! Commission and stamp duty are then deducted in turn, and each stage is
//! annualised on the amount actually paid.
//!
//! Every step is rounded half-up: monetary figures to 4 digits, divisions
//! feeding a later step to 8 digits first.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::stamp_duty;
use crate::calendar;
use crate::error::RenditaError;
use crate::instrument::{PurchaseAssumptions, Security, StampDutyMode};
use crate::regime::TaxRegime;
use crate::types::{
    div_half_up, mul_checked, round_half_up, with_metadata, ComputationOutput, Money,
    INTERMEDIATE_DP, MONEY_DP,
};
use crate::RenditaResult;

const HUNDRED: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Figures for one purchase. Monetary values and yield percentages carry 4
/// fractional digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldResult {
    pub days_to_maturity: i64,
    pub months_to_maturity: i64,
    pub stamp_duty_mode: StampDutyMode,
    /// Nominal × price / 100
    pub paid_amount: Money,
    /// Nominal − paid amount; negative when bought above par
    pub capital_gain: Money,
    pub net_capital_gain: Money,
    /// Coupon accrual to maturity after withholding
    pub net_coupon_interest: Money,
    pub commission: Money,
    pub total_gain: Money,
    pub gain_net_of_commission: Money,
    pub stamp_duty: Money,
    pub gain_net_of_duty: Money,
    /// Annualised percent on the paid amount
    pub gross_yield: Decimal,
    pub yield_net_of_commission: Decimal,
    pub yield_net_of_duty: Decimal,
    /// Non-annualised percent of the gain net of duty on the nominal
    pub net_return_pct: Decimal,
    /// Nominal + gain net of duty
    pub maturity_payoff: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the yield of `purchase` on `security` under the default tax regime.
pub fn compute_yield(
    security: &Security,
    purchase: &PurchaseAssumptions,
) -> RenditaResult<ComputationOutput<YieldResult>> {
    compute_yield_with(security, purchase, &TaxRegime::default())
}

/// Compute the yield of `purchase` on `security` under `regime`.
pub fn compute_yield_with(
    security: &Security,
    purchase: &PurchaseAssumptions,
    regime: &TaxRegime,
) -> RenditaResult<ComputationOutput<YieldResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    security.validate()?;
    purchase.validate()?;
    regime.validate()?;

    if purchase.purchase_date.is_none() {
        warnings.push("Purchase date not supplied; today's date was used".into());
    }
    let purchase_date = purchase.effective_purchase_date();

    let result = yield_figures(security, purchase, purchase_date, regime)?;

    if result.capital_gain < Decimal::ZERO {
        warnings.push(format!(
            "Bought above par at {}: capital loss of {}",
            purchase.purchase_price, result.capital_gain
        ));
    }
    if purchase.stamp_duty_mode == StampDutyMode::Annual && result.stamp_duty.is_zero() {
        warnings.push("Maturity falls within the purchase year; no annual stamp duty due".into());
    }
    if result.yield_net_of_duty < Decimal::ZERO {
        warnings.push("Yield net of costs is negative".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Held-to-maturity yield — ACT/360 net coupons, taxed capital gain, commission and stamp duty",
        &(security, purchase),
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

fn yield_figures(
    security: &Security,
    purchase: &PurchaseAssumptions,
    purchase_date: NaiveDate,
    regime: &TaxRegime,
) -> RenditaResult<YieldResult> {
    let maturity_date = security.maturity_date;
    let days_to_maturity = calendar::days_between(purchase_date, maturity_date);
    if days_to_maturity <= 0 {
        return Err(RenditaError::PastMaturity {
            purchase_date,
            maturity_date,
        });
    }
    let months_to_maturity = calendar::whole_months_between(purchase_date, maturity_date);

    let nominal = purchase.investment_amount;
    let net_factor = regime.net_factor();
    let days = Decimal::from(days_to_maturity);

    let paid_amount = div_half_up(
        mul_checked(nominal, purchase.purchase_price, "purchase_price")?,
        HUNDRED,
        MONEY_DP,
        "paid amount",
    )?;
    if paid_amount.is_zero() {
        return Err(RenditaError::invalid(
            "purchase_price",
            "Paid amount rounds to zero",
        ));
    }
    let capital_gain = nominal - paid_amount;
    let net_capital_gain = round_half_up(capital_gain * net_factor, MONEY_DP);

    let rate_decimal = div_half_up(security.nominal_rate, HUNDRED, INTERMEDIATE_DP, "rate")?;
    // nominal is capped by validation; the coupon rate is not
    let annual_net_coupon = mul_checked(nominal * net_factor, rate_decimal, "nominal_rate")?;
    let net_coupon_interest = div_half_up(
        mul_checked(annual_net_coupon, days, "nominal_rate")?,
        regime.basis(),
        MONEY_DP,
        "coupon accrual",
    )?;

    // Commission is charged on the nominal, not on the paid amount.
    let commission = round_half_up(
        nominal * purchase.effective_commission_rate(regime),
        MONEY_DP,
    );

    let total_gain = round_half_up(net_capital_gain + net_coupon_interest, MONEY_DP);
    let gain_net_of_commission = round_half_up(total_gain - commission, MONEY_DP);

    let stamp_duty = stamp_duty::stamp_duty(
        purchase.stamp_duty_mode,
        nominal,
        regime.stamp_duty_rate,
        purchase_date,
        maturity_date,
    );
    let gain_net_of_duty = round_half_up(gain_net_of_commission - stamp_duty, MONEY_DP);

    let annualise = |gain: Money| annualised_yield(gain, paid_amount, days, regime.basis());
    let gross_yield = annualise(total_gain)?;
    let yield_net_of_commission = annualise(gain_net_of_commission)?;
    let yield_net_of_duty = annualise(gain_net_of_duty)?;

    let net_return = div_half_up(gain_net_of_duty, nominal, MONEY_DP, "net return")?;
    let net_return_pct = round_half_up(mul_checked(net_return, HUNDRED, "net return")?, MONEY_DP);
    let maturity_payoff = round_half_up(nominal + gain_net_of_duty, MONEY_DP);

    log::debug!(
        "{}: days={} paid={} gain={} coupons={} commission={} duty({})={} yields={}/{}/{}",
        security.isin,
        days_to_maturity,
        paid_amount,
        net_capital_gain,
        net_coupon_interest,
        commission,
        purchase.stamp_duty_mode,
        stamp_duty,
        gross_yield,
        yield_net_of_commission,
        yield_net_of_duty
    );

    Ok(YieldResult {
        days_to_maturity,
        months_to_maturity,
        stamp_duty_mode: purchase.stamp_duty_mode,
        paid_amount,
        capital_gain,
        net_capital_gain,
        net_coupon_interest,
        commission,
        total_gain,
        gain_net_of_commission,
        stamp_duty,
        gain_net_of_duty,
        gross_yield,
        yield_net_of_commission,
        yield_net_of_duty,
        net_return_pct,
        maturity_payoff,
    })
}

/// `(gain / paid) × (basis / days) × 100`, each division carried to 8 digits,
/// the percentage rounded to 4.
pub(crate) fn annualised_yield(
    gain: Money,
    paid_amount: Money,
    days: Decimal,
    basis: Decimal,
) -> RenditaResult<Decimal> {
    let on_paid = div_half_up(gain, paid_amount, INTERMEDIATE_DP, "yield on paid amount")?;
    let per_year = div_half_up(
        mul_checked(on_paid, basis, "annualisation")?,
        days,
        INTERMEDIATE_DP,
        "annualisation",
    )?;
    Ok(round_half_up(mul_checked(per_year, HUNDRED, "annualisation")?, MONEY_DP))
}
