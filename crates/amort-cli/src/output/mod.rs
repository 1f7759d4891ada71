pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use rust_decimal::Decimal;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Round decimal-looking strings to 2 places for human-facing formats.
/// Full precision stays in the JSON output.
pub(crate) fn display_amount(s: &str) -> String {
    match s.parse::<Decimal>() {
        Ok(d) if d.scale() > 2 => format!("{:.2}", d.round_dp(2)),
        _ => s.to_string(),
    }
}
