pub mod analyze;
pub mod emi;
pub mod export;
pub mod schedule;

use clap::{Args, ValueEnum};
use rust_decimal::Decimal;

use amort_core::schedule::{
    LoanAnalysisInput, LoanTerms, PrepaymentFrequency, PrepaymentPolicy, Strategy, TenureUnit,
};

use crate::input;

/// Loan terms and prepayment flags shared by the schedule-producing
/// commands.
#[derive(Args)]
pub struct LoanFlags {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (10 = 10%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan tenure, in --tenure-unit units
    #[arg(long)]
    pub tenure: Option<u32>,

    /// Unit of --tenure
    #[arg(long, value_enum, default_value_t = TenureUnitArg::Months)]
    pub tenure_unit: TenureUnitArg,

    /// One-time prepayment amount
    #[arg(long)]
    pub onetime_amount: Option<Decimal>,

    /// Month of the one-time prepayment (1-based)
    #[arg(long, default_value_t = 1)]
    pub onetime_month: u32,

    /// Recurring prepayment amount
    #[arg(long)]
    pub systematic_amount: Option<Decimal>,

    /// Cadence of the recurring prepayment
    #[arg(long, value_enum, default_value_t = FrequencyArg::Monthly)]
    pub systematic_frequency: FrequencyArg,

    /// First month of the recurring prepayment (1-based)
    #[arg(long, default_value_t = 1)]
    pub systematic_start: u32,

    /// What a prepayment buys: shorter tenure or lower installment
    #[arg(long, value_enum, default_value_t = StrategyArg::ReduceTenure)]
    pub strategy: StrategyArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TenureUnitArg {
    Months,
    Years,
}

impl From<TenureUnitArg> for TenureUnit {
    fn from(unit: TenureUnitArg) -> Self {
        match unit {
            TenureUnitArg::Months => TenureUnit::Months,
            TenureUnitArg::Years => TenureUnit::Years,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FrequencyArg {
    Monthly,
    Yearly,
}

impl From<FrequencyArg> for PrepaymentFrequency {
    fn from(frequency: FrequencyArg) -> Self {
        match frequency {
            FrequencyArg::Monthly => PrepaymentFrequency::Monthly,
            FrequencyArg::Yearly => PrepaymentFrequency::Yearly,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    ReduceTenure,
    ReduceEmi,
}

impl From<StrategyArg> for Strategy {
    fn from(strategy: StrategyArg) -> Self {
        match strategy {
            StrategyArg::ReduceTenure => Strategy::ReduceTenure,
            StrategyArg::ReduceEmi => Strategy::ReduceEmi,
        }
    }
}

/// Resolve the analysis input: --input file first, then piped stdin, then
/// individual flags.
pub fn resolve_input(flags: &LoanFlags) -> Result<LoanAnalysisInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = flags.input {
        return input::file::read_json(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }

    let terms = LoanTerms {
        principal: flags
            .principal
            .ok_or("--principal is required (or provide --input)")?,
        annual_rate_pct: flags.rate.ok_or("--rate is required (or provide --input)")?,
        tenure_value: flags
            .tenure
            .ok_or("--tenure is required (or provide --input)")?,
        tenure_unit: flags.tenure_unit.into(),
    };

    let policy = match (flags.onetime_amount, flags.systematic_amount) {
        (Some(_), Some(_)) => {
            return Err("choose one of --onetime-amount or --systematic-amount, not both".into())
        }
        (Some(amount), None) => PrepaymentPolicy::OneTime {
            amount,
            month: flags.onetime_month,
        },
        (None, Some(amount)) => PrepaymentPolicy::Systematic {
            amount,
            frequency: flags.systematic_frequency.into(),
            start_month: flags.systematic_start,
        },
        (None, None) => PrepaymentPolicy::None,
    };

    Ok(LoanAnalysisInput {
        terms,
        policy,
        strategy: flags.strategy.into(),
    })
}
