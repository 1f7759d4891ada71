use napi::Result as NapiResult;
use napi_derive::napi;

use amort_core::schedule::{monthly_installment, schedule_to_csv, LoanAnalysisInput, LoanTerms};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let terms: LoanTerms = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    if terms.tenure_months() == 0 {
        return Err(napi::Error::from_reason("tenure must be at least 1 month"));
    }
    let emi = monthly_installment(terms.principal, terms.monthly_rate(), terms.tenure_months());
    serde_json::to_string(&emi).map_err(to_napi_error)
}

#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let input: LoanAnalysisInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amort_core::schedule::analyze_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output.result.schedule_with_prepayment).map_err(to_napi_error)
}

#[napi]
pub fn analyze_loan(input_json: String) -> NapiResult<String> {
    let input: LoanAnalysisInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amort_core::schedule::analyze_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn export_schedule_csv(input_json: String) -> NapiResult<String> {
    let input: LoanAnalysisInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amort_core::schedule::analyze_loan(&input).map_err(to_napi_error)?;
    Ok(schedule_to_csv(&output.result.schedule_with_prepayment))
}
