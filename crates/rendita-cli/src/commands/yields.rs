use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use rendita_core::instrument::{InstrumentKind, YieldRequest};
use rendita_core::yields;
use rendita_core::TaxRegime;

use crate::input;

/// Arguments for the held-to-maturity yield
#[derive(Args)]
pub struct YieldArgs {
    /// Security identifier (ISIN)
    #[arg(long)]
    pub isin: Option<String>,

    /// Nominal annual coupon in percent (e.g. 5.25); 0 for BOT
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Maturity date (YYYY-MM-DD)
    #[arg(long)]
    pub maturity: Option<NaiveDate>,

    /// Purchase price per 100 of nominal (e.g. 109.8887)
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Nominal bought
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Stamp duty mode: ANNUAL or MONTHLY
    #[arg(long, default_value = "ANNUAL")]
    pub mode: String,

    /// Commission as a fraction of the nominal (e.g. 0.0009)
    #[arg(long)]
    pub commission: Option<Decimal>,

    /// Purchase date (YYYY-MM-DD); today when omitted
    #[arg(long)]
    pub purchase_date: Option<NaiveDate>,

    /// Treat the security as a zero-coupon BOT
    #[arg(long)]
    pub bot: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_yield(args: YieldArgs, regime: &TaxRegime) -> Result<Value, Box<dyn std::error::Error>> {
    let request: YieldRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        YieldRequest {
            isin: args.isin,
            kind: Some(if args.bot {
                InstrumentKind::Bot
            } else {
                InstrumentKind::Btp
            }),
            nominal_rate: args.rate.or(args.bot.then_some(Decimal::ZERO)),
            maturity_date: args.maturity,
            purchase_date: args.purchase_date,
            purchase_price: args.price,
            investment_amount: args.amount,
            stamp_duty_mode: Some(args.mode),
            commission_rate: args.commission,
            ..Default::default()
        }
    };

    let (security, purchase) = request.resolve()?;
    let result = yields::compute_yield_with(&security, &purchase, regime)?;
    Ok(serde_json::to_value(result)?)
}
