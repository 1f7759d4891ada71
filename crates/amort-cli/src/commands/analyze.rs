use clap::Args;
use serde_json::Value;

use amort_core::schedule::analyze_loan;

use super::{resolve_input, LoanFlags};

/// Arguments for the prepayment comparison
#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub loan: LoanFlags,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = resolve_input(&args.loan)?;
    let output = analyze_loan(&input)?;
    Ok(serde_json::to_value(&output)?)
}
