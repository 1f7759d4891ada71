use std::fmt::Write as _;

use rust_decimal::Decimal;

use crate::error::AmortError;
use crate::schedule::engine::ScheduleRow;
use crate::types::Money;
use crate::AmortResult;

/// Header line of the exported ledger.
pub const CSV_HEADER: &str = "Month,EMI,Principal,Interest,Prepayment,Balance";

/// Serialize a schedule to delimited text, currency fields to 2 decimal
/// places. Pure function of the schedule; the caller decides where the
/// bytes go.
pub fn schedule_to_csv(rows: &[ScheduleRow]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + rows.len() * 48);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for row in rows {
        let _ = writeln!(
            out,
            "{},{:.2},{:.2},{:.2},{:.2},{:.2}",
            row.month,
            row.emi.round_dp(2),
            row.principal.round_dp(2),
            row.interest.round_dp(2),
            row.prepayment.round_dp(2),
            row.balance.round_dp(2),
        );
    }

    out
}

/// Parse a ledger previously produced by [`schedule_to_csv`].
pub fn parse_schedule_csv(text: &str) -> AmortResult<Vec<ScheduleRow>> {
    let mut lines = text.lines();

    match lines.next() {
        Some(header) if header.trim() == CSV_HEADER => {}
        _ => {
            return Err(AmortError::InvalidInput {
                field: "csv".into(),
                reason: format!("expected header '{CSV_HEADER}'"),
            })
        }
    }

    let mut rows = Vec::new();
    for (idx, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 2;
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 6 {
            return Err(AmortError::InvalidInput {
                field: "csv".into(),
                reason: format!("line {line_no}: expected 6 fields, found {}", fields.len()),
            });
        }

        let month: u32 = fields[0].trim().parse().map_err(|_| AmortError::InvalidInput {
            field: "csv".into(),
            reason: format!("line {line_no}: invalid month '{}'", fields[0]),
        })?;

        rows.push(ScheduleRow {
            month,
            emi: parse_money(fields[1], line_no)?,
            principal: parse_money(fields[2], line_no)?,
            interest: parse_money(fields[3], line_no)?,
            prepayment: parse_money(fields[4], line_no)?,
            balance: parse_money(fields[5], line_no)?,
        });
    }

    Ok(rows)
}

fn parse_money(field: &str, line_no: usize) -> AmortResult<Money> {
    field
        .trim()
        .parse::<Decimal>()
        .map_err(|_| AmortError::InvalidInput {
            field: "csv".into(),
            reason: format!("line {line_no}: invalid amount '{field}'"),
        })
}
