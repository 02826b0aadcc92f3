//! Theoretical value at maturity under the four duty-mode × capital-gain
//! treatment scenarios.
//!
//! Short-dated holdings (under 365 days) add up nominal, net interest and gain
//! less costs. Longer holdings spread the total return over the remaining
//! years and express it as a single-year factor on the nominal.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::RenditaError;
use crate::instrument::StampDutyMode;
use crate::types::{
    div_half_up, mul_checked, round_half_up, with_metadata, ComputationOutput, Money, Years,
    FACTOR_DP, MAX_INVESTMENT_AMOUNT, PROJECTION_DP,
};
use crate::RenditaResult;

/// Holdings shorter than this many days use the additive formula.
pub const ANNUALISED_THRESHOLD_DAYS: i64 = 365;

pub(crate) const EXEMPT_OMITTED_WARNING: &str =
    "Exempt capital gain not supplied; exempt scenarios omitted";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionInput {
    /// Nominal invested
    pub nominal: Money,
    /// Coupon interest to maturity, after tax
    pub net_interest: Money,
    /// Capital gain after tax
    pub taxable_gain: Money,
    /// Capital gain when exempt from tax; enables the exempt scenarios
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exempt_gain: Option<Money>,
    pub commission: Money,
    pub duty_annual: Money,
    pub duty_monthly: Money,
    /// Annualised yield (percent) with annual duty
    pub yield_annual_pct: Decimal,
    /// Annualised yield (percent) with monthly duty
    pub yield_monthly_pct: Decimal,
    /// Annualised yield (percent) with an exempt capital gain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_exempt_pct: Option<Decimal>,
    pub days_to_maturity: i64,
    pub years_remaining: Years,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMethod {
    /// nominal + interest + gain − costs
    Additive,
    /// nominal × (1 + return / (nominal × years))
    Annualised,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GainTreatment {
    Taxable,
    Exempt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectionScenario {
    pub duty_mode: StampDutyMode,
    pub gain: GainTreatment,
}

impl ProjectionScenario {
    pub const ALL: [ProjectionScenario; 4] = [
        ProjectionScenario::new(StampDutyMode::Annual, GainTreatment::Taxable),
        ProjectionScenario::new(StampDutyMode::Monthly, GainTreatment::Taxable),
        ProjectionScenario::new(StampDutyMode::Annual, GainTreatment::Exempt),
        ProjectionScenario::new(StampDutyMode::Monthly, GainTreatment::Exempt),
    ];

    pub const fn new(duty_mode: StampDutyMode, gain: GainTreatment) -> Self {
        Self { duty_mode, gain }
    }
}

/// Final values rounded to 2 digits. Exempt scenarios are `None` when the
/// exempt figures were not supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub method: ProjectionMethod,
    pub days_to_maturity: i64,
    pub years_remaining: Years,
    pub annual_duty_taxable_gain: Money,
    pub monthly_duty_taxable_gain: Money,
    pub annual_duty_exempt_gain: Option<Money>,
    pub monthly_duty_exempt_gain: Option<Money>,
    pub yield_annual_pct: Decimal,
    pub yield_monthly_pct: Decimal,
    pub yield_exempt_pct: Option<Decimal>,
}

impl ProjectionResult {
    pub fn value_for(&self, scenario: ProjectionScenario) -> Option<Money> {
        match (scenario.duty_mode, scenario.gain) {
            (StampDutyMode::Annual, GainTreatment::Taxable) => Some(self.annual_duty_taxable_gain),
            (StampDutyMode::Monthly, GainTreatment::Taxable) => {
                Some(self.monthly_duty_taxable_gain)
            }
            (StampDutyMode::Annual, GainTreatment::Exempt) => self.annual_duty_exempt_gain,
            (StampDutyMode::Monthly, GainTreatment::Exempt) => self.monthly_duty_exempt_gain,
        }
    }

    /// The scenarios that were projected, in a fixed order.
    pub fn scenarios(&self) -> Vec<(ProjectionScenario, Money)> {
        ProjectionScenario::ALL
            .iter()
            .filter_map(|s| self.value_for(*s).map(|v| (*s, v)))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn project_final_value(
    input: &ProjectionInput,
) -> RenditaResult<ComputationOutput<ProjectionResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let method = if input.days_to_maturity < ANNUALISED_THRESHOLD_DAYS {
        ProjectionMethod::Additive
    } else {
        ProjectionMethod::Annualised
    };

    let project = |scenario: ProjectionScenario, gain: Money| -> RenditaResult<Money> {
        let duty = match scenario.duty_mode {
            StampDutyMode::Annual => input.duty_annual,
            StampDutyMode::Monthly => input.duty_monthly,
        };
        let costs = input.commission + duty;
        let value = final_value(method, input, gain, costs)?;
        log::debug!(
            "final value {:?}/{:?} ({:?}): nominal={} interest={} gain={} costs={} years={} -> {}",
            scenario.duty_mode,
            scenario.gain,
            method,
            input.nominal,
            input.net_interest,
            gain,
            costs,
            input.years_remaining,
            value
        );
        Ok(value)
    };

    let [annual_taxable, monthly_taxable, annual_exempt, monthly_exempt] = ProjectionScenario::ALL;

    let annual_duty_taxable_gain = project(annual_taxable, input.taxable_gain)?;
    let monthly_duty_taxable_gain = project(monthly_taxable, input.taxable_gain)?;

    let (annual_duty_exempt_gain, monthly_duty_exempt_gain) =
        match (input.exempt_gain, input.yield_exempt_pct) {
            (Some(gain), Some(_)) => (
                Some(project(annual_exempt, gain)?),
                Some(project(monthly_exempt, gain)?),
            ),
            _ => {
                warnings.push(EXEMPT_OMITTED_WARNING.into());
                (None, None)
            }
        };

    if annual_duty_taxable_gain < input.nominal {
        warnings.push("Projected value with annual duty is below the nominal invested".into());
    }

    let output = ProjectionResult {
        method,
        days_to_maturity: input.days_to_maturity,
        years_remaining: input.years_remaining,
        annual_duty_taxable_gain,
        monthly_duty_taxable_gain,
        annual_duty_exempt_gain,
        monthly_duty_exempt_gain,
        yield_annual_pct: input.yield_annual_pct,
        yield_monthly_pct: input.yield_monthly_pct,
        yield_exempt_pct: input.yield_exempt_pct,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    let methodology = match method {
        ProjectionMethod::Additive => "Final value — additive, holding under one year",
        ProjectionMethod::Annualised => "Final value — total return annualised over remaining years",
    };

    Ok(with_metadata(methodology, input, warnings, elapsed, output))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &ProjectionInput) -> RenditaResult<()> {
    if input.nominal <= Decimal::ZERO {
        return Err(RenditaError::invalid("nominal", "Nominal must be positive"));
    }
    if input.nominal > MAX_INVESTMENT_AMOUNT {
        return Err(RenditaError::invalid(
            "nominal",
            format!("Nominal cannot exceed {MAX_INVESTMENT_AMOUNT}"),
        ));
    }
    if input.days_to_maturity <= 0 {
        return Err(RenditaError::invalid(
            "days_to_maturity",
            "Days to maturity must be positive",
        ));
    }
    if input.days_to_maturity >= ANNUALISED_THRESHOLD_DAYS && input.years_remaining <= Decimal::ZERO
    {
        return Err(RenditaError::invalid(
            "years_remaining",
            "Years remaining must be positive for holdings of a year or more",
        ));
    }
    for (field, value) in [
        ("commission", input.commission),
        ("duty_annual", input.duty_annual),
        ("duty_monthly", input.duty_monthly),
    ] {
        if value < Decimal::ZERO {
            return Err(RenditaError::invalid(field, "Costs cannot be negative"));
        }
    }
    if input.exempt_gain.is_some() != input.yield_exempt_pct.is_some() {
        return Err(RenditaError::invalid(
            "exempt_gain/yield_exempt_pct",
            "Both exempt_gain and yield_exempt_pct must be provided together, or neither",
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Formula
// ---------------------------------------------------------------------------

fn final_value(
    method: ProjectionMethod,
    input: &ProjectionInput,
    gain: Money,
    costs: Money,
) -> RenditaResult<Money> {
    let value = match method {
        ProjectionMethod::Additive => input.nominal + input.net_interest + gain - costs,
        ProjectionMethod::Annualised => {
            let total_return = input.net_interest + gain - costs;
            let per_year = div_half_up(
                total_return,
                mul_checked(input.nominal, input.years_remaining, "years_remaining")?,
                FACTOR_DP,
                "final value factor",
            )?;
            mul_checked(input.nominal, dec!(1) + per_year, "nominal")?
        }
    };
    Ok(round_half_up(value, PROJECTION_DP))
}
