use chrono::NaiveDate;
use clap::Args;
use serde_json::Value;

use rendita_core::evaluation::{self, BatchRequest, EvaluationInput};
use rendita_core::trend::MaturityWindow;
use rendita_core::TaxRegime;

use crate::input;

/// Arguments for a full security evaluation
#[derive(Args)]
pub struct EvaluateArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_evaluate(
    args: EvaluateArgs,
    regime: &TaxRegime,
) -> Result<Value, Box<dyn std::error::Error>> {
    let eval_input: EvaluationInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for evaluation".into());
    };
    let result = evaluation::evaluate_security_with(&eval_input, regime)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for batch recomputation
#[derive(Args)]
pub struct BatchArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    /// Recompute as of this date (YYYY-MM-DD), overriding the file
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Residual-maturity window: quarterly, semiannual, annual, three_year, all
    #[arg(long)]
    pub window: Option<String>,
}

pub fn run_batch(args: BatchArgs, regime: &TaxRegime) -> Result<Value, Box<dyn std::error::Error>> {
    let mut request: BatchRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for batch recomputation".into());
    };

    if args.as_of.is_some() {
        request.as_of = args.as_of;
    }
    if args.window.is_some() {
        request.window = MaturityWindow::parse_lenient(args.window.as_deref());
    }

    let result = evaluation::recompute_batch_with(&request, regime)?;
    Ok(serde_json::to_value(result)?)
}
