use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::error::RenditaError;

/// Residual-maturity window, in whole months, used to select securities for
/// batch recomputation. Bounds are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityWindow {
    Quarterly,
    Semiannual,
    Annual,
    ThreeYear,
    #[default]
    All,
}

impl MaturityWindow {
    pub fn month_range(self) -> (i64, Option<i64>) {
        match self {
            MaturityWindow::Quarterly => (2, Some(3)),
            MaturityWindow::Semiannual => (5, Some(6)),
            MaturityWindow::Annual => (11, Some(12)),
            MaturityWindow::ThreeYear => (30, Some(36)),
            MaturityWindow::All => (0, None),
        }
    }

    pub fn contains(self, months: i64) -> bool {
        let (min, max) = self.month_range();
        months >= min && max.map_or(true, |m| months <= m)
    }

    pub fn contains_dates(self, as_of: NaiveDate, maturity: NaiveDate) -> bool {
        self.contains(calendar::whole_months_between(as_of, maturity))
    }

    /// Unknown or missing labels select everything.
    pub fn parse_lenient(label: Option<&str>) -> Self {
        label
            .and_then(|l| l.parse().ok())
            .unwrap_or(MaturityWindow::All)
    }
}

impl FromStr for MaturityWindow {
    type Err = RenditaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quarterly" | "trimestrali" => Ok(MaturityWindow::Quarterly),
            "semiannual" | "semestrali" => Ok(MaturityWindow::Semiannual),
            "annual" | "annuali" => Ok(MaturityWindow::Annual),
            "three_year" | "triennali" => Ok(MaturityWindow::ThreeYear),
            "all" | "tutti" => Ok(MaturityWindow::All),
            _ => Err(RenditaError::invalid(
                "window",
                format!("Unknown maturity window '{s}'"),
            )),
        }
    }
}
