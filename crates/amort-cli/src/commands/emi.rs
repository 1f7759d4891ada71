use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use amort_core::schedule::{monthly_installment, LoanTerms};

use super::TenureUnitArg;

/// Arguments for the installment calculation
#[derive(Args)]
pub struct EmiArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent (10 = 10%)
    #[arg(long)]
    pub rate: Decimal,

    /// Loan tenure, in --tenure-unit units
    #[arg(long)]
    pub tenure: u32,

    /// Unit of --tenure
    #[arg(long, value_enum, default_value_t = TenureUnitArg::Months)]
    pub tenure_unit: TenureUnitArg,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.principal <= Decimal::ZERO {
        return Err("--principal must be positive".into());
    }
    if args.rate <= Decimal::ZERO {
        return Err("--rate must be positive".into());
    }
    if args.tenure == 0 {
        return Err("--tenure must be at least 1".into());
    }

    let terms = LoanTerms {
        principal: args.principal,
        annual_rate_pct: args.rate,
        tenure_value: args.tenure,
        tenure_unit: args.tenure_unit.into(),
    };
    let emi = monthly_installment(terms.principal, terms.monthly_rate(), terms.tenure_months());

    Ok(serde_json::json!({
        "emi": format!("{:.2}", emi.round_dp(2)),
        "principal": terms.principal.to_string(),
        "annual_rate_pct": terms.annual_rate_pct.to_string(),
        "tenure_months": terms.tenure_months(),
    }))
}
