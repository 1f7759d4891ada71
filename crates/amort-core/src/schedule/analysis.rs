use std::collections::BTreeMap;
use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::AmortError;
use crate::schedule::emi::monthly_installment;
use crate::schedule::engine::{
    build_schedule, ScheduleRow, Strategy, BALANCE_EPSILON, SAFETY_CAP_MULTIPLE,
};
use crate::schedule::prepayment::{derive_prepayments, PrepaymentPolicy};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::AmortResult;

/// Loan terms as captured at the boundary: principal, annual percentage
/// rate, and tenure as value + unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// Annual rate as a percentage (10 = 10%).
    pub annual_rate_pct: Decimal,
    pub tenure_value: u32,
    pub tenure_unit: TenureUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TenureUnit {
    Months,
    Years,
}

impl LoanTerms {
    pub fn tenure_months(&self) -> u32 {
        match self.tenure_unit {
            TenureUnit::Months => self.tenure_value,
            TenureUnit::Years => self.tenure_value.saturating_mul(12),
        }
    }

    /// Monthly rate as a decimal fraction.
    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate_pct / dec!(12) / dec!(100)
    }
}

/// Input for a full loan analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAnalysisInput {
    pub terms: LoanTerms,
    #[serde(default)]
    pub policy: PrepaymentPolicy,
    #[serde(default)]
    pub strategy: Strategy,
}

/// Output of a full loan analysis run: both ledgers plus the comparison
/// scalars the presentation layer displays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAnalysisOutput {
    pub emi_original: Money,
    /// Installment on the last recorded month of the with-prepayment
    /// schedule. Differs from `emi_original` only under `ReduceEmi`.
    pub final_emi: Money,
    pub total_interest_original: Money,
    pub total_interest_with_prepayment: Money,
    pub interest_saved: Money,
    pub total_prepayment: Money,
    pub months_original: u32,
    pub months_with_prepayment: u32,
    pub months_saved: i64,
    pub schedule_original: Vec<ScheduleRow>,
    pub schedule_with_prepayment: Vec<ScheduleRow>,
}

/// Sum of interest across a schedule.
pub fn total_interest(rows: &[ScheduleRow]) -> Money {
    rows.iter().map(|r| r.interest).sum()
}

/// Sum of regular and extra principal across a schedule.
pub fn total_principal(rows: &[ScheduleRow]) -> Money {
    rows.iter().map(|r| r.principal + r.prepayment).sum()
}

/// Run the full analysis: baseline schedule, with-prepayment schedule, and
/// the savings comparison between them.
pub fn analyze_loan(
    input: &LoanAnalysisInput,
) -> AmortResult<ComputationOutput<LoanAnalysisOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_terms(&input.terms)?;

    let tenure_months = input.terms.tenure_months();
    let monthly_rate = input.terms.monthly_rate();
    let emi_original = monthly_installment(input.terms.principal, monthly_rate, tenure_months);

    let schedule_original = build_schedule(
        input.terms.principal,
        monthly_rate,
        emi_original,
        tenure_months,
        &BTreeMap::new(),
        Strategy::ReduceTenure,
    );

    let prepayments = derive_prepayments(&input.policy, tenure_months);
    if prepayments.is_empty() && !matches!(input.policy, PrepaymentPolicy::None) {
        warnings.push(
            "Prepayment policy resolved to no payments; schedule matches the baseline".into(),
        );
    }

    let schedule_with_prepayment = if prepayments.is_empty() {
        schedule_original.clone()
    } else {
        build_schedule(
            input.terms.principal,
            monthly_rate,
            emi_original,
            tenure_months,
            &prepayments,
            input.strategy,
        )
    };

    push_cap_warning(&schedule_original, "baseline", &mut warnings);
    if !prepayments.is_empty() {
        push_cap_warning(&schedule_with_prepayment, "with-prepayment", &mut warnings);
    }

    let total_interest_original = total_interest(&schedule_original);
    let total_interest_with_prepayment = total_interest(&schedule_with_prepayment);
    let total_prepayment: Money = schedule_with_prepayment.iter().map(|r| r.prepayment).sum();
    let final_emi = schedule_with_prepayment
        .last()
        .map(|r| r.emi)
        .unwrap_or(emi_original);

    let output = LoanAnalysisOutput {
        emi_original,
        final_emi,
        total_interest_original,
        total_interest_with_prepayment,
        interest_saved: total_interest_original - total_interest_with_prepayment,
        total_prepayment,
        months_original: schedule_original.len() as u32,
        months_with_prepayment: schedule_with_prepayment.len() as u32,
        months_saved: schedule_original.len() as i64 - schedule_with_prepayment.len() as i64,
        schedule_original,
        schedule_with_prepayment,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-Pay Amortization with Prepayment Comparison",
        &serde_json::json!({
            "principal": input.terms.principal.to_string(),
            "annual_rate_pct": input.terms.annual_rate_pct.to_string(),
            "tenure_months": tenure_months,
            "strategy": format!("{:?}", input.strategy),
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn validate_terms(terms: &LoanTerms) -> AmortResult<()> {
    if terms.principal <= Decimal::ZERO {
        return Err(AmortError::InvalidInput {
            field: "principal".into(),
            reason: "Loan principal must be positive".into(),
        });
    }
    if terms.annual_rate_pct <= Decimal::ZERO {
        return Err(AmortError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Interest rate must be positive".into(),
        });
    }
    if terms.tenure_value == 0 {
        return Err(AmortError::InvalidInput {
            field: "tenure_value".into(),
            reason: "Loan tenure must be at least 1".into(),
        });
    }
    Ok(())
}

fn push_cap_warning(rows: &[ScheduleRow], label: &str, warnings: &mut Vec<String>) {
    if let Some(last) = rows.last() {
        if last.balance > BALANCE_EPSILON {
            warnings.push(format!(
                "{label} schedule did not amortise within {SAFETY_CAP_MULTIPLE}x tenure; \
                 {} remains outstanding",
                last.balance.round_dp(2),
            ));
        }
    }
}
