//! Reference data for a government bond, as supplied by the caller's
//! security repository.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RenditaError;
use crate::RenditaResult;

/// Italian government bond families.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InstrumentKind {
    /// Buono del Tesoro Poliennale, multi-year coupon bond
    #[default]
    Btp,
    /// Buono Ordinario del Tesoro, zero-coupon bill
    Bot,
}

/// Payment or accrual periodicity. Informational for the calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Periodicity {
    #[serde(alias = "ANNUALE")]
    Annual,
    #[serde(alias = "SEMESTRALE")]
    Semiannual,
    #[serde(alias = "TRIMESTRALE")]
    Quarterly,
    #[serde(alias = "MENSILE")]
    Monthly,
}

impl Periodicity {
    pub fn periods_per_year(self) -> u32 {
        match self {
            Periodicity::Annual => 1,
            Periodicity::Semiannual => 2,
            Periodicity::Quarterly => 4,
            Periodicity::Monthly => 12,
        }
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Periodicity::Annual => "ANNUAL",
            Periodicity::Semiannual => "SEMIANNUAL",
            Periodicity::Quarterly => "QUARTERLY",
            Periodicity::Monthly => "MONTHLY",
        };
        f.write_str(label)
    }
}

impl FromStr for Periodicity {
    type Err = RenditaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ANNUAL" | "ANNUALE" => Ok(Periodicity::Annual),
            "SEMIANNUAL" | "SEMESTRALE" => Ok(Periodicity::Semiannual),
            "QUARTERLY" | "TRIMESTRALE" => Ok(Periodicity::Quarterly),
            "MONTHLY" | "MENSILE" => Ok(Periodicity::Monthly),
            _ => Err(RenditaError::invalid(
                "periodicity",
                format!("Unknown periodicity '{s}'"),
            )),
        }
    }
}

fn default_coupon_periodicity() -> Periodicity {
    Periodicity::Semiannual
}

fn default_stamp_duty_periodicity() -> Periodicity {
    Periodicity::Annual
}

/// A government bond as held in the security repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Security {
    /// ISIN or any other opaque identifier
    pub isin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: InstrumentKind,
    /// Nominal annual coupon rate in percent (5.25 = 5.25%)
    pub nominal_rate: Decimal,
    pub maturity_date: NaiveDate,
    #[serde(default = "default_coupon_periodicity")]
    pub coupon_periodicity: Periodicity,
    #[serde(default = "default_stamp_duty_periodicity")]
    pub stamp_duty_periodicity: Periodicity,
}

impl Security {
    /// A BTP with semiannual coupons and annual duty periodicity.
    pub fn btp(isin: impl Into<String>, nominal_rate: Decimal, maturity_date: NaiveDate) -> Self {
        Self {
            isin: isin.into(),
            name: None,
            kind: InstrumentKind::Btp,
            nominal_rate,
            maturity_date,
            coupon_periodicity: default_coupon_periodicity(),
            stamp_duty_periodicity: default_stamp_duty_periodicity(),
        }
    }

    /// A zero-coupon BOT.
    pub fn bot(isin: impl Into<String>, maturity_date: NaiveDate) -> Self {
        Self {
            kind: InstrumentKind::Bot,
            coupon_periodicity: Periodicity::Annual,
            ..Self::btp(isin, Decimal::ZERO, maturity_date)
        }
    }

    pub fn validate(&self) -> RenditaResult<()> {
        if self.isin.trim().is_empty() {
            return Err(RenditaError::invalid("isin", "Identifier is required"));
        }
        if self.nominal_rate < Decimal::ZERO {
            return Err(RenditaError::invalid(
                "nominal_rate",
                "Nominal rate cannot be negative",
            ));
        }
        Ok(())
    }
}
