use clap::Args;

use amort_core::schedule::{analyze_loan, schedule_to_csv};

use super::{resolve_input, LoanFlags};

/// Arguments for the CSV export
#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub loan: LoanFlags,
}

/// Export the full with-prepayment ledger in the canonical CSV layout.
pub fn run_export(args: ExportArgs) -> Result<String, Box<dyn std::error::Error>> {
    let input = resolve_input(&args.loan)?;
    let output = analyze_loan(&input)?.result;
    Ok(schedule_to_csv(&output.schedule_with_prepayment))
}
