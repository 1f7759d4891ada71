use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::schedule::emi::monthly_installment;
use crate::types::{Money, Rate};

/// Balance below which the loan is considered fully paid.
pub const BALANCE_EPSILON: Decimal = dec!(0.01);

/// Hard ceiling on simulated months, as a multiple of the contractual
/// tenure. Bounds non-amortising inputs where the installment never covers
/// accrued interest.
pub const SAFETY_CAP_MULTIPLE: u32 = 3;

/// What a prepayment buys the borrower.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Keep the installment fixed and let prepayments shorten the schedule.
    #[default]
    ReduceTenure,
    /// Re-amortise the remaining balance over the remaining contractual
    /// term after each prepayment, lowering future installments.
    ReduceEmi,
}

/// A single month in the amortization ledger. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub emi: Money,
    pub principal: Money,
    pub interest: Money,
    pub prepayment: Money,
    pub balance: Money,
}

/// Month-by-month level-pay simulation.
///
/// Runs until the balance falls to [`BALANCE_EPSILON`] or the month counter
/// reaches `tenure_months * SAFETY_CAP_MULTIPLE`, whichever comes first.
/// Degenerate inputs are absorbed by clamping: the final installment is
/// trimmed to what is actually owed, and a prepayment never draws the
/// balance below zero. Cap termination returns the ledger as built, with
/// whatever balance remains — callers surface that as a warning.
pub fn build_schedule(
    principal: Money,
    monthly_rate: Rate,
    emi: Money,
    tenure_months: u32,
    prepayments: &BTreeMap<u32, Money>,
    strategy: Strategy,
) -> Vec<ScheduleRow> {
    let mut rows = Vec::with_capacity(tenure_months as usize);
    let mut balance = principal;
    let mut current_emi = emi;
    let mut month: u32 = 1;
    let cap = tenure_months.saturating_mul(SAFETY_CAP_MULTIPLE);

    while balance > BALANCE_EPSILON && month <= cap {
        let interest = balance * monthly_rate;
        let mut principal_paid = current_emi - interest;

        // Final-month overpay: record only what was actually owed.
        if principal_paid > balance {
            principal_paid = balance;
            current_emi = principal_paid + interest;
        }

        let scheduled = prepayments.get(&month).copied().unwrap_or(Decimal::ZERO);
        let actual_prepayment = scheduled.min(balance - principal_paid);

        balance -= principal_paid + actual_prepayment;
        if balance < Decimal::ZERO {
            balance = Decimal::ZERO;
        }

        rows.push(ScheduleRow {
            month,
            emi: current_emi,
            principal: principal_paid,
            interest,
            prepayment: actual_prepayment,
            balance,
        });

        if actual_prepayment > Decimal::ZERO
            && strategy == Strategy::ReduceEmi
            && balance > Decimal::ZERO
        {
            let remaining = tenure_months.saturating_sub(month);
            if remaining > 0 {
                current_emi = monthly_installment(balance, monthly_rate, remaining);
            }
        }

        month += 1;
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const TOL: Decimal = dec!(0.01);

    fn monthly_rate(annual_pct: Decimal) -> Rate {
        annual_pct / dec!(12) / dec!(100)
    }

    fn standard_loan() -> (Money, Rate, Money, u32) {
        let principal = dec!(1_000_000);
        let rate = monthly_rate(dec!(10));
        let emi = monthly_installment(principal, rate, 12);
        (principal, rate, emi, 12)
    }

    #[test]
    fn test_baseline_runs_full_tenure() {
        let (principal, rate, emi, tenure) = standard_loan();
        let rows = build_schedule(
            principal,
            rate,
            emi,
            tenure,
            &BTreeMap::new(),
            Strategy::ReduceTenure,
        );
        assert_eq!(rows.len(), 12);
        assert!(rows.last().unwrap().balance <= BALANCE_EPSILON);
    }

    #[test]
    fn test_months_are_sequential() {
        let (principal, rate, emi, tenure) = standard_loan();
        let rows = build_schedule(
            principal,
            rate,
            emi,
            tenure,
            &BTreeMap::new(),
            Strategy::ReduceTenure,
        );
        for (idx, row) in rows.iter().enumerate() {
            assert_eq!(row.month, idx as u32 + 1);
        }
    }

    #[test]
    fn test_balance_is_non_increasing() {
        let (principal, rate, emi, tenure) = standard_loan();
        let mut prepayments = BTreeMap::new();
        prepayments.insert(6, dec!(200_000));
        let rows = build_schedule(
            principal,
            rate,
            emi,
            tenure,
            &prepayments,
            Strategy::ReduceTenure,
        );
        let mut previous = principal;
        for row in &rows {
            assert!(row.balance <= previous, "balance rose in month {}", row.month);
            previous = row.balance;
        }
    }

    #[test]
    fn test_conservation_of_principal() {
        let (principal, rate, emi, tenure) = standard_loan();
        let mut prepayments = BTreeMap::new();
        prepayments.insert(6, dec!(200_000));
        let rows = build_schedule(
            principal,
            rate,
            emi,
            tenure,
            &prepayments,
            Strategy::ReduceTenure,
        );
        let repaid: Decimal = rows.iter().map(|r| r.principal + r.prepayment).sum();
        assert!((repaid - principal).abs() <= TOL);
    }

    #[test]
    fn test_prepayment_never_overdraws() {
        let (principal, rate, emi, tenure) = standard_loan();
        let mut prepayments = BTreeMap::new();
        // Far more than the loan is worth by month 11.
        prepayments.insert(11, dec!(5_000_000));
        let rows = build_schedule(
            principal,
            rate,
            emi,
            tenure,
            &prepayments,
            Strategy::ReduceTenure,
        );
        let mut balance_before = principal;
        for row in &rows {
            assert!(row.prepayment <= balance_before - row.principal + TOL);
            balance_before = row.balance;
        }
        assert_eq!(rows.last().unwrap().balance, Decimal::ZERO);
    }

    #[test]
    fn test_final_month_installment_is_trimmed() {
        let (principal, rate, emi, tenure) = standard_loan();
        let rows = build_schedule(
            principal,
            rate,
            emi,
            tenure,
            &BTreeMap::new(),
            Strategy::ReduceTenure,
        );
        let last = rows.last().unwrap();
        assert_eq!(last.emi, last.principal + last.interest);
        assert!(last.emi <= emi + TOL);
    }

    #[test]
    fn test_reduce_tenure_shortens_schedule_with_fixed_emi() {
        let (principal, rate, emi, tenure) = standard_loan();
        let mut prepayments = BTreeMap::new();
        prepayments.insert(6, dec!(200_000));
        let rows = build_schedule(
            principal,
            rate,
            emi,
            tenure,
            &prepayments,
            Strategy::ReduceTenure,
        );
        assert_eq!(rows.len(), 10);
        // Installment unchanged on every row but the trimmed last one.
        for row in &rows[..rows.len() - 1] {
            assert_eq!(row.emi, emi);
        }
    }

    #[test]
    fn test_reduce_emi_preserves_tenure_and_lowers_installment() {
        let (principal, rate, emi, tenure) = standard_loan();
        let mut prepayments = BTreeMap::new();
        prepayments.insert(6, dec!(200_000));
        let rows = build_schedule(principal, rate, emi, tenure, &prepayments, Strategy::ReduceEmi);
        assert_eq!(rows.len(), 12);
        // Installment drops from month 7 onward.
        assert_eq!(rows[5].emi, emi);
        assert!(rows[6].emi < emi);
        let last = rows.last().unwrap();
        let diff = (last.emi - dec!(53_603.61)).abs();
        assert!(diff <= TOL, "final EMI {} out of tolerance", last.emi);
    }

    #[test]
    fn test_zero_rate_schedule() {
        let principal = dec!(120_000);
        let emi = monthly_installment(principal, Decimal::ZERO, 12);
        let rows = build_schedule(
            principal,
            Decimal::ZERO,
            emi,
            12,
            &BTreeMap::new(),
            Strategy::ReduceTenure,
        );
        assert_eq!(rows.len(), 12);
        let total_interest: Decimal = rows.iter().map(|r| r.interest).sum();
        assert_eq!(total_interest, Decimal::ZERO);
        let repaid: Decimal = rows.iter().map(|r| r.principal).sum();
        assert_eq!(repaid, principal);
    }

    #[test]
    fn test_non_amortising_input_stops_at_safety_cap() {
        let (principal, rate, _, tenure) = standard_loan();
        // Installment far below first-month interest: balance only grows.
        let rows = build_schedule(
            principal,
            rate,
            dec!(500),
            tenure,
            &BTreeMap::new(),
            Strategy::ReduceTenure,
        );
        assert_eq!(rows.len(), (tenure * SAFETY_CAP_MULTIPLE) as usize);
        assert!(rows.last().unwrap().balance > principal);
    }

    #[test]
    fn test_zero_tenure_yields_empty_schedule() {
        let rows = build_schedule(
            dec!(1_000),
            dec!(0.01),
            dec!(100),
            0,
            &BTreeMap::new(),
            Strategy::ReduceTenure,
        );
        assert!(rows.is_empty());
    }
}
