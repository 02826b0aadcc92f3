//! Tax and cost parameters applied to Italian government bonds.
//!
//! Defaults reflect the national regime: 12.5% on coupons and capital gains,
//! 0.2% yearly stamp duty on the nominal, 0.09% broker commission.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RenditaError;
use crate::types::{Money, Rate};
use crate::RenditaResult;

pub const DEFAULT_TAX_RATE: Rate = dec!(0.125);
pub const DEFAULT_STAMP_DUTY_RATE: Rate = dec!(0.002);
pub const DEFAULT_COMMISSION_RATE: Rate = dec!(0.0009);
pub const DEFAULT_DAY_COUNT_BASIS: u32 = 360;
pub const DEFAULT_BATCH_NOMINAL: Money = dec!(10000);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxRegime {
    /// Withholding on coupons and capital gains
    pub tax_rate: Rate,
    /// Yearly stamp duty on the nominal held
    pub stamp_duty_rate: Rate,
    /// Commission applied when the purchase does not state one
    pub default_commission_rate: Rate,
    /// Days in the notional year for coupon accrual and annualisation (ACT/360)
    pub day_count_basis: u32,
    /// Nominal used by batch recomputation when the request does not set one
    pub batch_nominal: Money,
}

impl Default for TaxRegime {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
            stamp_duty_rate: DEFAULT_STAMP_DUTY_RATE,
            default_commission_rate: DEFAULT_COMMISSION_RATE,
            day_count_basis: DEFAULT_DAY_COUNT_BASIS,
            batch_nominal: DEFAULT_BATCH_NOMINAL,
        }
    }
}

impl TaxRegime {
    /// `1 - tax_rate`, the share of a gain kept after tax.
    pub fn net_factor(&self) -> Rate {
        Decimal::ONE - self.tax_rate
    }

    pub fn basis(&self) -> Decimal {
        Decimal::from(self.day_count_basis)
    }

    pub fn validate(&self) -> RenditaResult<()> {
        check_unit_rate("tax_rate", self.tax_rate)?;
        check_unit_rate("stamp_duty_rate", self.stamp_duty_rate)?;
        check_unit_rate("default_commission_rate", self.default_commission_rate)?;
        if self.day_count_basis == 0 {
            return Err(RenditaError::invalid(
                "day_count_basis",
                "Day count basis must be positive",
            ));
        }
        if self.batch_nominal <= Decimal::ZERO {
            return Err(RenditaError::invalid(
                "batch_nominal",
                "Batch nominal must be positive",
            ));
        }
        Ok(())
    }
}

fn check_unit_rate(field: &str, rate: Rate) -> RenditaResult<()> {
    if rate < Decimal::ZERO || rate >= Decimal::ONE {
        return Err(RenditaError::invalid(field, "Rate must be in [0, 1)"));
    }
    Ok(())
}
