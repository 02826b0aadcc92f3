use clap::Args;
use serde_json::Value;

use rendita_core::projection::{self, ProjectionInput};

use crate::input;

/// Arguments for the final value projection
#[derive(Args)]
pub struct ProjectArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_project(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let projection_input: ProjectionInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for final value projection".into());
    };
    let result = projection::project_final_value(&projection_input)?;
    Ok(serde_json::to_value(result)?)
}
