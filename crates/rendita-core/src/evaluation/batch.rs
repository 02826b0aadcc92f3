//! Recompute yields for a set of securities at a common date, the way a
//! scheduled job refreshes the stored simulations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::security::{evaluate_security_with, EvaluationInput, SecurityEvaluation};
use crate::calendar;
use crate::instrument::{PurchaseAssumptions, Security, StampDutyMode};
use crate::regime::TaxRegime;
use crate::trend::{MaturityBucket, MaturityWindow};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::RenditaResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItem {
    pub security: Security,
    pub purchase_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Purchase date for every item; today when absent
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    #[serde(default)]
    pub stamp_duty_mode: StampDutyMode,
    /// Nominal per item; the regime's batch nominal when absent
    #[serde(default)]
    pub nominal: Option<Money>,
    #[serde(default)]
    pub commission_rate: Option<Rate>,
    #[serde(default)]
    pub window: MaturityWindow,
    pub items: Vec<BatchItem>,
}

/// Outcome for one item. Exactly one of `evaluation` and `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEntry {
    pub isin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<MaturityBucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<SecurityEvaluation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutput {
    pub as_of: NaiveDate,
    pub window: MaturityWindow,
    pub evaluated: usize,
    pub failed: usize,
    /// Matured on or before `as_of`
    pub skipped: Vec<String>,
    /// Still alive but outside the requested window
    pub outside_window: Vec<String>,
    pub entries: Vec<BatchEntry>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn recompute_batch(request: &BatchRequest) -> RenditaResult<ComputationOutput<BatchOutput>> {
    recompute_batch_with(request, &TaxRegime::default())
}

/// Items are evaluated independently; one failing item never aborts the
/// batch. Entries keep the order of `request.items`.
pub fn recompute_batch_with(
    request: &BatchRequest,
    regime: &TaxRegime,
) -> RenditaResult<ComputationOutput<BatchOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    regime.validate()?;

    let as_of = match request.as_of {
        Some(date) => date,
        None => {
            warnings.push("as_of not supplied; today's date was used".into());
            calendar::today()
        }
    };
    let nominal = request.nominal.unwrap_or(regime.batch_nominal);

    let mut skipped = Vec::new();
    let mut outside_window = Vec::new();
    let mut jobs = Vec::with_capacity(request.items.len());

    for item in &request.items {
        let security = &item.security;
        if security.maturity_date <= as_of {
            log::warn!(
                "{}: matured on {}, skipped",
                security.isin,
                security.maturity_date
            );
            skipped.push(security.isin.clone());
            continue;
        }
        if !request.window.contains_dates(as_of, security.maturity_date) {
            outside_window.push(security.isin.clone());
            continue;
        }
        jobs.push(EvaluationInput {
            security: security.clone(),
            purchase: PurchaseAssumptions {
                purchase_date: Some(as_of),
                purchase_price: item.purchase_price,
                investment_amount: nominal,
                stamp_duty_mode: request.stamp_duty_mode,
                commission_rate: request.commission_rate,
            },
        });
    }

    let entries = evaluate_all(&jobs, regime);

    let failed = entries.iter().filter(|e| e.error.is_some()).count();
    let evaluated = entries.len() - failed;

    if !skipped.is_empty() {
        warnings.push(format!("{} matured securities skipped", skipped.len()));
    }
    if failed > 0 {
        warnings.push(format!("{failed} securities could not be evaluated"));
    }

    log::info!(
        "batch as of {}: {} evaluated, {} failed, {} matured, {} outside window {:?}",
        as_of,
        evaluated,
        failed,
        skipped.len(),
        outside_window.len(),
        request.window
    );

    let output = BatchOutput {
        as_of,
        window: request.window,
        evaluated,
        failed,
        skipped,
        outside_window,
        entries,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Batch recomputation — every live security evaluated at a common purchase date",
        request,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

fn evaluate_one(input: &EvaluationInput, regime: &TaxRegime) -> BatchEntry {
    match evaluate_security_with(input, regime) {
        Ok(out) => BatchEntry {
            isin: input.security.isin.clone(),
            bucket: Some(out.result.bucket),
            evaluation: Some(out.result),
            error: None,
        },
        Err(e) => {
            log::warn!("{}: evaluation failed: {}", input.security.isin, e);
            BatchEntry {
                isin: input.security.isin.clone(),
                bucket: None,
                evaluation: None,
                error: Some(e.to_string()),
            }
        }
    }
}

#[cfg(feature = "parallel")]
fn evaluate_all(jobs: &[EvaluationInput], regime: &TaxRegime) -> Vec<BatchEntry> {
    use rayon::prelude::*;

    jobs.par_iter().map(|job| evaluate_one(job, regime)).collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_all(jobs: &[EvaluationInput], regime: &TaxRegime) -> Vec<BatchEntry> {
    jobs.iter().map(|job| evaluate_one(job, regime)).collect()
}
