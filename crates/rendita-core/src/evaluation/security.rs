//! One-shot evaluation of a purchase: both stamp duty modes, the projected
//! final value, the maturity bucket and the snapshot to persist.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::snapshot::SimulationSnapshot;
use crate::calendar;
use crate::instrument::{InstrumentKind, PurchaseAssumptions, Security, StampDutyMode};
use crate::projection::final_value::EXEMPT_OMITTED_WARNING;
use crate::projection::{project_final_value, ProjectionInput, ProjectionResult};
use crate::regime::TaxRegime;
use crate::trend::{classify, MaturityBucket};
use crate::types::{with_metadata, ComputationOutput, Years};
use crate::yields::calculator::annualised_yield;
use crate::yields::{compute_yield_with, YieldResult};
use crate::RenditaResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationInput {
    pub security: Security,
    /// `stamp_duty_mode` selects the headline figures; both modes are computed
    pub purchase: PurchaseAssumptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityEvaluation {
    pub isin: String,
    pub purchase_date: NaiveDate,
    pub headline: StampDutyMode,
    pub annual: YieldResult,
    pub monthly: YieldResult,
    pub projection: ProjectionResult,
    pub years_to_maturity: Years,
    pub bucket: MaturityBucket,
    pub snapshot: SimulationSnapshot,
}

impl SecurityEvaluation {
    /// Yield figures for the requested duty mode.
    pub fn headline_result(&self) -> &YieldResult {
        match self.headline {
            StampDutyMode::Annual => &self.annual,
            StampDutyMode::Monthly => &self.monthly,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn evaluate_security(
    input: &EvaluationInput,
) -> RenditaResult<ComputationOutput<SecurityEvaluation>> {
    evaluate_security_with(input, &TaxRegime::default())
}

pub fn evaluate_security_with(
    input: &EvaluationInput,
    regime: &TaxRegime,
) -> RenditaResult<ComputationOutput<SecurityEvaluation>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let security = &input.security;
    let purchase_date = input.purchase.effective_purchase_date();
    // Both modes must see the same trade date even if the clock ticks over.
    let pinned = PurchaseAssumptions {
        purchase_date: Some(purchase_date),
        ..input.purchase.clone()
    };
    if input.purchase.purchase_date.is_none() {
        warnings.push("Purchase date not supplied; today's date was used".into());
    }

    let annual_out = compute_yield_with(security, &pinned.with_mode(StampDutyMode::Annual), regime)?;
    let monthly_out =
        compute_yield_with(security, &pinned.with_mode(StampDutyMode::Monthly), regime)?;
    for w in annual_out.warnings.into_iter().chain(monthly_out.warnings) {
        if !warnings.contains(&w) {
            warnings.push(w);
        }
    }
    let annual = annual_out.result;
    let monthly = monthly_out.result;

    let years_to_maturity = calendar::years_from_days(annual.days_to_maturity);

    let (exempt_gain, yield_exempt_pct) = match security.kind {
        InstrumentKind::Btp => {
            let gain = annual.gain_net_of_commission - annual.net_capital_gain
                + annual.capital_gain
                - annual.stamp_duty;
            let pct = annualised_yield(
                gain,
                annual.paid_amount,
                Decimal::from(annual.days_to_maturity),
                regime.basis(),
            )?;
            (Some(annual.capital_gain), Some(pct))
        }
        InstrumentKind::Bot => (None, None),
    };

    let projection_input = ProjectionInput {
        nominal: pinned.investment_amount,
        net_interest: annual.net_coupon_interest,
        taxable_gain: annual.net_capital_gain,
        exempt_gain,
        commission: annual.commission,
        duty_annual: annual.stamp_duty,
        duty_monthly: monthly.stamp_duty,
        yield_annual_pct: annual.yield_net_of_duty,
        yield_monthly_pct: monthly.yield_net_of_duty,
        yield_exempt_pct,
        days_to_maturity: annual.days_to_maturity,
        years_remaining: years_to_maturity,
    };
    let projection_out = project_final_value(&projection_input)?;
    // BOTs carry no exempt scenario by construction
    for w in projection_out.warnings {
        if security.kind == InstrumentKind::Bot && w == EXEMPT_OMITTED_WARNING {
            continue;
        }
        if !warnings.contains(&w) {
            warnings.push(w);
        }
    }
    let projection = projection_out.result;

    let bucket = classify(years_to_maturity);

    let headline = pinned.stamp_duty_mode;
    let headline_result = match headline {
        StampDutyMode::Annual => &annual,
        StampDutyMode::Monthly => &monthly,
    };
    let snapshot =
        SimulationSnapshot::from_yield(security, purchase_date, &pinned, headline_result, regime)?;

    log::debug!(
        "{}: evaluated {} days, bucket {}, headline {} yield {}",
        security.isin,
        annual.days_to_maturity,
        bucket,
        headline,
        headline_result.yield_net_of_duty
    );

    let evaluation = SecurityEvaluation {
        isin: security.isin.clone(),
        purchase_date,
        headline,
        annual,
        monthly,
        projection,
        years_to_maturity,
        bucket,
        snapshot,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Security evaluation — yield under both stamp duty modes, projected final value, maturity bucket",
        input,
        warnings,
        elapsed,
        evaluation,
    ))
}
