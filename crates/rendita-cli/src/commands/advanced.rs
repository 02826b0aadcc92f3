use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use rendita_core::advanced::{self, AdvancedYieldInput};
use rendita_core::TaxRegime;

use crate::input;

/// Arguments for the whole-year yield
#[derive(Args)]
pub struct AdvancedArgs {
    /// Nominal bought
    #[arg(long)]
    pub nominal: Option<Decimal>,

    /// Purchase price per 100 of nominal
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Annual coupon as a decimal (e.g. 0.0525 for 5.25%)
    #[arg(long)]
    pub coupon: Option<Decimal>,

    /// Holding period in years
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Commission as a fraction of invested capital; regime default when omitted
    #[arg(long)]
    pub commission: Option<Decimal>,

    /// Price per 100 of nominal on which stamp duty is levied
    #[arg(long)]
    pub reference_price: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_advanced(
    args: AdvancedArgs,
    regime: &TaxRegime,
) -> Result<Value, Box<dyn std::error::Error>> {
    let adv_input: AdvancedYieldInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        AdvancedYieldInput {
            nominal: args
                .nominal
                .ok_or("--nominal is required (or provide --input)")?,
            purchase_price_pct: args
                .price
                .ok_or("--price is required (or provide --input)")?,
            annual_coupon_rate: args
                .coupon
                .ok_or("--coupon is required (or provide --input)")?,
            years: args
                .years
                .ok_or("--years is required (or provide --input)")?,
            commission_rate: args.commission.unwrap_or(regime.default_commission_rate),
            duty_reference_price_pct: args.reference_price.unwrap_or(dec!(100)),
        }
    };

    let result = advanced::compute_advanced_yield_with(&adv_input, regime)?;
    Ok(serde_json::to_value(result)?)
}
