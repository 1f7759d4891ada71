use clap::Args;
use serde_json::Value;

use amort_core::schedule::{analyze_loan, ScheduleRow};

use super::{resolve_input, LoanFlags};

/// Arguments for the amortization ledger
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanFlags,

    /// Downsample the ledger to at most this many rows (0 = no cap)
    #[arg(long, default_value_t = 360)]
    pub max_rows: usize,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = resolve_input(&args.loan)?;
    let output = analyze_loan(&input)?.result;

    let sampled = sample_rows(&output.schedule_with_prepayment, args.max_rows);
    Ok(Value::Array(sampled.iter().map(row_value).collect()))
}

fn row_value(row: &ScheduleRow) -> Value {
    serde_json::json!({
        "month": row.month,
        "emi": format!("{:.2}", row.emi.round_dp(2)),
        "principal": format!("{:.2}", row.principal.round_dp(2)),
        "interest": format!("{:.2}", row.interest.round_dp(2)),
        "prepayment": format!("{:.2}", row.prepayment.round_dp(2)),
        "balance": format!("{:.2}", row.balance.round_dp(2)),
    })
}

/// Stride-sample long ledgers for display, always keeping the final row.
pub(crate) fn sample_rows(rows: &[ScheduleRow], max_points: usize) -> Vec<ScheduleRow> {
    if max_points == 0 || rows.len() <= max_points {
        return rows.to_vec();
    }

    let step = rows.len().div_ceil(max_points);
    let mut sampled: Vec<ScheduleRow> = rows.iter().step_by(step).cloned().collect();

    if let (Some(last_sampled), Some(last)) = (sampled.last(), rows.last()) {
        if last_sampled.month != last.month {
            sampled.push(last.clone());
        }
    }

    sampled
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn rows(n: u32) -> Vec<ScheduleRow> {
        (1..=n)
            .map(|month| ScheduleRow {
                month,
                emi: Decimal::ZERO,
                principal: Decimal::ZERO,
                interest: Decimal::ZERO,
                prepayment: Decimal::ZERO,
                balance: Decimal::ZERO,
            })
            .collect()
    }

    #[test]
    fn test_short_ledger_is_untouched() {
        assert_eq!(sample_rows(&rows(12), 360).len(), 12);
    }

    #[test]
    fn test_zero_cap_disables_sampling() {
        assert_eq!(sample_rows(&rows(600), 0).len(), 600);
    }

    #[test]
    fn test_sampling_respects_cap_and_keeps_last_row() {
        let sampled = sample_rows(&rows(600), 100);
        assert!(sampled.len() <= 101);
        assert_eq!(sampled.first().unwrap().month, 1);
        assert_eq!(sampled.last().unwrap().month, 600);
    }

    #[test]
    fn test_sampling_strides_evenly() {
        let sampled = sample_rows(&rows(240), 120);
        // Stride of 2: months 1, 3, 5, … plus the appended final row.
        assert_eq!(sampled[0].month, 1);
        assert_eq!(sampled[1].month, 3);
        assert_eq!(sampled.last().unwrap().month, 240);
    }
}
