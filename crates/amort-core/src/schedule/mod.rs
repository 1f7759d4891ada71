//! Loan amortization: installment calculation, prepayment schedule
//! derivation, the month-by-month engine, comparison analysis, and CSV
//! export. All math in `rust_decimal::Decimal`.

pub mod analysis;
pub mod emi;
pub mod engine;
pub mod export;
pub mod prepayment;

pub use analysis::{
    analyze_loan, total_interest, total_principal, LoanAnalysisInput, LoanAnalysisOutput,
    LoanTerms, TenureUnit,
};
pub use emi::monthly_installment;
pub use engine::{build_schedule, ScheduleRow, Strategy, BALANCE_EPSILON, SAFETY_CAP_MULTIPLE};
pub use export::{parse_schedule_csv, schedule_to_csv, CSV_HEADER};
pub use prepayment::{derive_prepayments, PrepaymentFrequency, PrepaymentPolicy};
