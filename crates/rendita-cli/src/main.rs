mod commands;
mod config;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::advanced::AdvancedArgs;
use commands::evaluation::{BatchArgs, EvaluateArgs};
use commands::projection::ProjectArgs;
use commands::trend::ClassifyArgs;
use commands::yields::YieldArgs;

/// Yield calculations for Italian government bonds (BTP and BOT)
#[derive(Parser)]
#[command(
    name = "rendita",
    version,
    about = "Yield calculations for Italian government bonds",
    long_about = "A CLI for held-to-maturity yield calculations on BTP and BOT purchases \
                  with decimal precision. Supports net yields after withholding tax, \
                  commission and stamp duty, final value projections, maturity buckets \
                  and batch recomputation."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Tax regime file (YAML or JSON); built-in rates when absent
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Net yield of a purchase held to maturity
    Yield(YieldArgs),
    /// Theoretical value at maturity under each duty/gain scenario
    Project(ProjectArgs),
    /// Residual-maturity bucket for a horizon
    Classify(ClassifyArgs),
    /// Both duty modes, final value projection and bucket in one pass
    Evaluate(EvaluateArgs),
    /// Recompute yields for a list of securities at a common date
    Batch(BatchArgs),
    /// Whole-year yield with commission on invested capital
    Advanced(AdvancedArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let regime = match config::load_regime(cli.config.as_deref()) {
        Ok(regime) => regime,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Yield(args) => commands::yields::run_yield(args, &regime),
        Commands::Project(args) => commands::projection::run_project(args),
        Commands::Classify(args) => commands::trend::run_classify(args),
        Commands::Evaluate(args) => commands::evaluation::run_evaluate(args, &regime),
        Commands::Batch(args) => commands::evaluation::run_batch(args, &regime),
        Commands::Advanced(args) => commands::advanced::run_advanced(args, &regime),
        Commands::Version => {
            println!("rendita {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
