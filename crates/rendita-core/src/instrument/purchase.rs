use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::error::RenditaError;
use crate::regime::TaxRegime;
use crate::types::{Money, Rate, MAX_INVESTMENT_AMOUNT, MONEY_DP};
use crate::RenditaResult;

/// How stamp duty ("bollo") accrues over the holding period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StampDutyMode {
    /// Charged once, and only when maturity falls after 31 December of the purchase year
    #[default]
    #[serde(alias = "ANNUALE")]
    Annual,
    /// Pro-rated on each whole month left to maturity
    #[serde(alias = "MENSILE")]
    Monthly,
}

impl StampDutyMode {
    pub const ALL: [StampDutyMode; 2] = [StampDutyMode::Annual, StampDutyMode::Monthly];
}

impl fmt::Display for StampDutyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StampDutyMode::Annual => f.write_str("ANNUAL"),
            StampDutyMode::Monthly => f.write_str("MONTHLY"),
        }
    }
}

impl FromStr for StampDutyMode {
    type Err = RenditaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ANNUAL" | "ANNUALE" => Ok(StampDutyMode::Annual),
            "MONTHLY" | "MENSILE" => Ok(StampDutyMode::Monthly),
            _ => Err(RenditaError::UnsupportedMode(s.to_string())),
        }
    }
}

/// Terms of a single purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseAssumptions {
    /// Trade date; today when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
    /// Price per 100 of nominal (109.8887 = 109.8887% of par)
    pub purchase_price: Decimal,
    /// Nominal bought, in currency units
    pub investment_amount: Money,
    pub stamp_duty_mode: StampDutyMode,
    /// Commission as a fraction of the nominal; regime default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_rate: Option<Rate>,
}

impl PurchaseAssumptions {
    pub fn new(
        purchase_date: NaiveDate,
        purchase_price: Decimal,
        investment_amount: Money,
        stamp_duty_mode: StampDutyMode,
    ) -> Self {
        Self {
            purchase_date: Some(purchase_date),
            purchase_price,
            investment_amount,
            stamp_duty_mode,
            commission_rate: None,
        }
    }

    pub fn with_mode(&self, stamp_duty_mode: StampDutyMode) -> Self {
        Self {
            stamp_duty_mode,
            ..self.clone()
        }
    }

    pub fn effective_purchase_date(&self) -> NaiveDate {
        self.purchase_date.unwrap_or_else(calendar::today)
    }

    pub fn effective_commission_rate(&self, regime: &TaxRegime) -> Rate {
        self.commission_rate.unwrap_or(regime.default_commission_rate)
    }

    pub fn validate(&self) -> RenditaResult<()> {
        if self.purchase_price <= Decimal::ZERO {
            return Err(RenditaError::invalid(
                "purchase_price",
                "Purchase price must be positive",
            ));
        }
        if self.investment_amount <= Decimal::ZERO {
            return Err(RenditaError::invalid(
                "investment_amount",
                "Investment amount must be positive",
            ));
        }
        if self.investment_amount > MAX_INVESTMENT_AMOUNT {
            return Err(RenditaError::invalid(
                "investment_amount",
                format!("Investment amount cannot exceed {MAX_INVESTMENT_AMOUNT}"),
            ));
        }
        if self.investment_amount.normalize().scale() > MONEY_DP {
            return Err(RenditaError::invalid(
                "investment_amount",
                "Investment amount supports at most 4 fractional digits",
            ));
        }
        if let Some(rate) = self.commission_rate {
            if rate < Decimal::ZERO || rate >= Decimal::ONE {
                return Err(RenditaError::invalid(
                    "commission_rate",
                    "Commission rate must be in [0, 1)",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn purchase() -> PurchaseAssumptions {
        PurchaseAssumptions::new(
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            dec!(100),
            dec!(10000),
            StampDutyMode::Annual,
        )
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("annual".parse::<StampDutyMode>().unwrap(), StampDutyMode::Annual);
        assert_eq!("MENSILE".parse::<StampDutyMode>().unwrap(), StampDutyMode::Monthly);
        match "WEEKLY".parse::<StampDutyMode>().unwrap_err() {
            RenditaError::UnsupportedMode(label) => assert_eq!(label, "WEEKLY"),
            other => panic!("Expected UnsupportedMode, got {other:?}"),
        }
    }

    #[test]
    fn test_default_commission_rate() {
        let p = purchase();
        assert_eq!(p.effective_commission_rate(&TaxRegime::default()), dec!(0.0009));
        let custom = PurchaseAssumptions {
            commission_rate: Some(dec!(0.0019)),
            ..purchase()
        };
        assert_eq!(custom.effective_commission_rate(&TaxRegime::default()), dec!(0.0019));
    }

    #[test]
    fn test_trailing_zeros_do_not_count_as_precision() {
        let p = PurchaseAssumptions {
            investment_amount: dec!(10000.000000),
            ..purchase()
        };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_excess_precision_rejected() {
        let p = PurchaseAssumptions {
            investment_amount: dec!(10000.00001),
            ..purchase()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_amount_above_ceiling_rejected() {
        let p = PurchaseAssumptions {
            investment_amount: Decimal::from_i128_with_scale(10_i128.pow(27), 0),
            ..purchase()
        };
        assert_eq!(p.validate().unwrap_err().field(), Some("investment_amount"));

        let at_ceiling = PurchaseAssumptions {
            investment_amount: MAX_INVESTMENT_AMOUNT,
            ..purchase()
        };
        assert!(at_ceiling.validate().is_ok());
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let p = PurchaseAssumptions {
            purchase_price: Decimal::ZERO,
            ..purchase()
        };
        match p.validate().unwrap_err() {
            RenditaError::InvalidInput { field, .. } => assert_eq!(field, "purchase_price"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }
}
