use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::instrument::{PurchaseAssumptions, Security, StampDutyMode};
use crate::regime::TaxRegime;
use crate::types::{div_half_up, Money, Rate, MONEY_DP};
use crate::yields::YieldResult;
use crate::RenditaResult;

/// The record a caller persists for one simulated purchase. Yields are
/// decimal fractions (0.0224 = 2.24%), 4 fractional digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub isin: String,
    pub purchase_date: NaiveDate,
    pub purchase_price: Decimal,
    pub commission_rate: Rate,
    pub stamp_duty_mode: StampDutyMode,
    pub gross_yield: Rate,
    /// Gross yield after withholding
    pub taxed_yield: Rate,
    /// Yield net of commission
    pub net_coupon_yield: Rate,
    pub stamp_duty: Money,
    /// Non-annualised percent
    pub net_of_duty_return_pct: Decimal,
    pub net_capital_gain: Money,
    pub maturity_payoff: Money,
}

impl SimulationSnapshot {
    pub fn from_yield(
        security: &Security,
        purchase_date: NaiveDate,
        purchase: &PurchaseAssumptions,
        result: &YieldResult,
        regime: &TaxRegime,
    ) -> RenditaResult<Self> {
        let hundred = dec!(100);
        let as_fraction = |pct: Decimal| div_half_up(pct, hundred, MONEY_DP, "snapshot yield");

        Ok(Self {
            isin: security.isin.clone(),
            purchase_date,
            purchase_price: purchase.purchase_price,
            commission_rate: purchase.effective_commission_rate(regime),
            stamp_duty_mode: result.stamp_duty_mode,
            gross_yield: as_fraction(result.gross_yield)?,
            taxed_yield: as_fraction(result.gross_yield * regime.net_factor())?,
            net_coupon_yield: as_fraction(result.yield_net_of_commission)?,
            stamp_duty: result.stamp_duty,
            net_of_duty_return_pct: result.net_return_pct,
            net_capital_gain: result.net_capital_gain,
            maturity_payoff: result.maturity_payoff,
        })
    }
}
