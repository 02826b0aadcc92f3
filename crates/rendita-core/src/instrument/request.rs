use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::purchase::{PurchaseAssumptions, StampDutyMode};
use super::security::{InstrumentKind, Periodicity, Security};
use crate::error::RenditaError;
use crate::types::{Money, Rate};
use crate::RenditaResult;

/// Loosely-typed yield request as it arrives from a form, a JSON body or CLI
/// flags. Every field may be missing; [`YieldRequest::resolve`] reports the
/// first required one that is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YieldRequest {
    pub isin: Option<String>,
    pub name: Option<String>,
    pub kind: Option<InstrumentKind>,
    /// Percent
    pub nominal_rate: Option<Decimal>,
    pub maturity_date: Option<NaiveDate>,
    pub coupon_periodicity: Option<Periodicity>,
    pub stamp_duty_periodicity: Option<Periodicity>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Option<Decimal>,
    pub investment_amount: Option<Money>,
    /// ANNUAL / MONTHLY (Italian labels accepted)
    pub stamp_duty_mode: Option<String>,
    pub commission_rate: Option<Rate>,
}

fn required<T>(value: Option<T>, field: &str) -> RenditaResult<T> {
    value.ok_or_else(|| RenditaError::invalid(field, "Required field is missing"))
}

impl YieldRequest {
    pub fn resolve(self) -> RenditaResult<(Security, PurchaseAssumptions)> {
        let isin = required(self.isin, "isin")?;
        let nominal_rate = required(self.nominal_rate, "nominal_rate")?;
        let maturity_date = required(self.maturity_date, "maturity_date")?;
        let purchase_price = required(self.purchase_price, "purchase_price")?;
        let investment_amount = required(self.investment_amount, "investment_amount")?;
        let mode_label = required(self.stamp_duty_mode, "stamp_duty_mode")?;
        let stamp_duty_mode: StampDutyMode = mode_label.parse()?;

        let mut security = Security::btp(isin, nominal_rate, maturity_date);
        security.name = self.name;
        if let Some(kind) = self.kind {
            security.kind = kind;
        }
        if let Some(p) = self.coupon_periodicity {
            security.coupon_periodicity = p;
        }
        if let Some(p) = self.stamp_duty_periodicity {
            security.stamp_duty_periodicity = p;
        }

        let purchase = PurchaseAssumptions {
            purchase_date: self.purchase_date,
            purchase_price,
            investment_amount,
            stamp_duty_mode,
            commission_rate: self.commission_rate,
        };

        Ok((security, purchase))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn complete() -> YieldRequest {
        YieldRequest {
            isin: Some("IT0005436693".into()),
            nominal_rate: Some(dec!(0.6)),
            maturity_date: NaiveDate::from_ymd_opt(2031, 8, 1),
            purchase_price: Some(dec!(86.5)),
            investment_amount: Some(dec!(5000)),
            stamp_duty_mode: Some("mensile".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_complete_request() {
        let (sec, purchase) = complete().resolve().unwrap();
        assert_eq!(sec.isin, "IT0005436693");
        assert_eq!(purchase.stamp_duty_mode, StampDutyMode::Monthly);
        assert!(purchase.purchase_date.is_none());
        assert!(purchase.commission_rate.is_none());
    }

    #[test]
    fn test_missing_price_names_the_field() {
        let req = YieldRequest {
            purchase_price: None,
            ..complete()
        };
        let err = req.resolve().unwrap_err();
        assert_eq!(err.field(), Some("purchase_price"));
        assert!(matches!(err, RenditaError::InvalidInput { .. }));
    }

    #[test]
    fn test_missing_mode_is_invalid_input() {
        let req = YieldRequest {
            stamp_duty_mode: None,
            ..complete()
        };
        assert_eq!(req.resolve().unwrap_err().field(), Some("stamp_duty_mode"));
    }

    #[test]
    fn test_unknown_mode_is_unsupported() {
        let req = YieldRequest {
            stamp_duty_mode: Some("QUARTERLY".into()),
            ..complete()
        };
        assert!(matches!(
            req.resolve().unwrap_err(),
            RenditaError::UnsupportedMode(_)
        ));
    }
}
