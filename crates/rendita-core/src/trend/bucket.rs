//! Residual-maturity buckets used to group yield snapshots into trend series.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::types::Years;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MaturityBucket {
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "12M")]
    TwelveMonths,
    #[serde(rename = "24M")]
    TwentyFourMonths,
    #[serde(rename = "36M")]
    ThirtySixMonths,
    #[serde(rename = "60M")]
    SixtyMonths,
    #[serde(rename = ">60M", alias = "OLTRE_60M")]
    OverSixtyMonths,
}

impl MaturityBucket {
    /// Ascending by lower bound; adjacent bounds meet, so the table covers
    /// `[0, ∞)` without gaps or overlaps.
    pub const ALL: [MaturityBucket; 7] = [
        MaturityBucket::ThreeMonths,
        MaturityBucket::SixMonths,
        MaturityBucket::TwelveMonths,
        MaturityBucket::TwentyFourMonths,
        MaturityBucket::ThirtySixMonths,
        MaturityBucket::SixtyMonths,
        MaturityBucket::OverSixtyMonths,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MaturityBucket::ThreeMonths => "3M",
            MaturityBucket::SixMonths => "6M",
            MaturityBucket::TwelveMonths => "12M",
            MaturityBucket::TwentyFourMonths => "24M",
            MaturityBucket::ThirtySixMonths => "36M",
            MaturityBucket::SixtyMonths => "60M",
            MaturityBucket::OverSixtyMonths => ">60M",
        }
    }

    /// Inclusive lower bound in years.
    pub fn lower_bound(self) -> Years {
        match self {
            MaturityBucket::ThreeMonths => Decimal::ZERO,
            MaturityBucket::SixMonths => dec!(0.375),
            MaturityBucket::TwelveMonths => dec!(0.75),
            MaturityBucket::TwentyFourMonths => dec!(1.5),
            MaturityBucket::ThirtySixMonths => dec!(2.5),
            MaturityBucket::SixtyMonths => dec!(4),
            MaturityBucket::OverSixtyMonths => dec!(5),
        }
    }

    /// Exclusive upper bound in years; `None` for the open-ended top bucket.
    pub fn upper_bound(self) -> Option<Years> {
        let idx = Self::ALL.iter().position(|b| *b == self)?;
        Self::ALL.get(idx + 1).map(|next| next.lower_bound())
    }

    pub fn contains(self, years: Years) -> bool {
        years >= self.lower_bound() && self.upper_bound().map_or(true, |upper| years < upper)
    }
}

impl fmt::Display for MaturityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bucket for a residual maturity in years: the first match by ascending
/// lower bound, or the open-ended top bucket when nothing matches.
pub fn classify(years: Years) -> MaturityBucket {
    MaturityBucket::ALL
        .into_iter()
        .find(|bucket| bucket.contains(years))
        .unwrap_or(MaturityBucket::OverSixtyMonths)
}

/// Bucket for a residual maturity in days, on a 365-day year.
pub fn classify_days(days: i64) -> MaturityBucket {
    classify(calendar::years_from_days(days))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_contiguous() {
        for pair in MaturityBucket::ALL.windows(2) {
            assert_eq!(pair[0].upper_bound(), Some(pair[1].lower_bound()));
        }
        assert_eq!(MaturityBucket::ThreeMonths.lower_bound(), Decimal::ZERO);
        assert_eq!(MaturityBucket::OverSixtyMonths.upper_bound(), None);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(Decimal::ZERO), MaturityBucket::ThreeMonths);
        assert_eq!(classify(dec!(0.25)), MaturityBucket::ThreeMonths);
        assert_eq!(classify(dec!(0.374999)), MaturityBucket::ThreeMonths);
        assert_eq!(classify(dec!(0.375)), MaturityBucket::SixMonths);
        assert_eq!(classify(dec!(1)), MaturityBucket::TwelveMonths);
        assert_eq!(classify(dec!(2)), MaturityBucket::TwentyFourMonths);
        assert_eq!(classify(dec!(3)), MaturityBucket::ThirtySixMonths);
        assert_eq!(classify(dec!(4.99)), MaturityBucket::SixtyMonths);
        assert_eq!(classify(dec!(5)), MaturityBucket::OverSixtyMonths);
        assert_eq!(classify(dec!(30)), MaturityBucket::OverSixtyMonths);
    }

    #[test]
    fn test_negative_falls_to_top_bucket() {
        assert_eq!(classify(dec!(-0.1)), MaturityBucket::OverSixtyMonths);
    }

    #[test]
    fn test_classify_days() {
        assert_eq!(classify_days(91), MaturityBucket::ThreeMonths);
        assert_eq!(classify_days(182), MaturityBucket::SixMonths);
        assert_eq!(classify_days(1461), MaturityBucket::SixtyMonths);
    }

    #[test]
    fn test_serde_labels() {
        assert_eq!(
            serde_json::to_string(&MaturityBucket::OverSixtyMonths).unwrap(),
            r#"">60M""#
        );
        let b: MaturityBucket = serde_json::from_str(r#""OLTRE_60M""#).unwrap();
        assert_eq!(b, MaturityBucket::OverSixtyMonths);
        assert_eq!(MaturityBucket::TwelveMonths.to_string(), "12M");
    }
}
