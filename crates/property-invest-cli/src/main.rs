mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::investment::{EvaluateArgs, MortgageArgs};

/// Rental property investment analysis
#[derive(Parser)]
#[command(
    name = "pia",
    version,
    about = "Rental property investment analysis",
    long_about = "A CLI for evaluating rental property investments with decimal \
                  precision. Computes the mortgage payment, net operating income, \
                  cash flow, cap rate, cash-on-cash return, gross rent multiplier, \
                  and a 10-year projection of cumulative cash flow and appreciation."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a rental property investment (metrics + 10-year projection)
    Evaluate(EvaluateArgs),
    /// Calculate the monthly payment on an amortizing mortgage
    Mortgage(MortgageArgs),
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
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Evaluate(args) => commands::investment::run_evaluate(args),
        Commands::Mortgage(args) => commands::investment::run_mortgage(args),
        Commands::Version => {
            println!("pia {}", env!("CARGO_PKG_VERSION"));
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
