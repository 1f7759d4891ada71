mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::analyze::AnalyzeArgs;
use commands::emi::EmiArgs;
use commands::export::ExportArgs;
use commands::schedule::ScheduleArgs;

/// Loan amortization schedules with prepayment analysis
#[derive(Parser)]
#[command(
    name = "amort",
    version,
    about = "Loan amortization schedules with prepayment analysis",
    long_about = "A CLI for computing equated monthly installments and \
                  month-by-month amortization ledgers with decimal precision. \
                  Supports one-time and systematic prepayments under \
                  reduce-tenure and reduce-EMI strategies."
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
    /// Calculate the equated monthly installment
    Emi(EmiArgs),
    /// Build the month-by-month amortization ledger
    Schedule(ScheduleArgs),
    /// Compare baseline and with-prepayment schedules
    Analyze(AnalyzeArgs),
    /// Write the full ledger as CSV (Month,EMI,Principal,Interest,Prepayment,Balance)
    Export(ExportArgs),
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
        Commands::Emi(args) => commands::emi::run_emi(args),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Analyze(args) => commands::analyze::run_analyze(args),
        Commands::Export(args) => {
            // Fixed serialization contract; --output does not apply.
            match commands::export::run_export(args) {
                Ok(csv) => {
                    print!("{csv}");
                    process::exit(0);
                }
                Err(e) => {
                    eprintln!("{}: {}", "error".red().bold(), e);
                    process::exit(1);
                }
            }
        }
        Commands::Version => {
            println!("amort {}", env!("CARGO_PKG_VERSION"));
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
