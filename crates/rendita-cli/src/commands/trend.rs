use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use rendita_core::calendar;
use rendita_core::trend::classify;

/// Arguments for maturity bucket classification
#[derive(Args)]
pub struct ClassifyArgs {
    /// Years to maturity (e.g. 4.00274)
    #[arg(long, conflicts_with = "days")]
    pub years: Option<Decimal>,

    /// Days to maturity, converted at 365 days per year
    #[arg(long)]
    pub days: Option<i64>,
}

pub fn run_classify(args: ClassifyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let years = match (args.years, args.days) {
        (Some(years), _) => years,
        (None, Some(days)) => calendar::years_from_days(days),
        (None, None) => return Err("--years or --days is required".into()),
    };
    let bucket = classify(years);

    Ok(json!({
        "result": {
            "years": years,
            "bucket": bucket,
            "lower_bound": bucket.lower_bound(),
            "upper_bound": bucket.upper_bound(),
        }
    }))
}
