use std::str::FromStr;

use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Investment analysis
// ---------------------------------------------------------------------------

/// Full investment evaluation. Takes `InvestmentInputs` as a JSON string and
/// returns the `ComputationOutput<InvestmentAnalysis>` envelope as JSON.
/// Intended for interactive hosts that re-invoke on every input change.
#[napi]
pub fn analyze_investment(input_json: String) -> NapiResult<String> {
    let input: property_invest_core::investment::analysis::InvestmentInputs =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = property_invest_core::investment::analysis::analyze_investment(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Mortgage
// ---------------------------------------------------------------------------

/// Monthly payment on an amortizing loan. Decimal amounts pass as strings
/// to avoid f64 precision loss across the boundary.
#[napi]
pub fn monthly_mortgage_payment(
    loan_amount: String,
    annual_interest_rate: String,
    term_years: u32,
) -> NapiResult<String> {
    let loan = Decimal::from_str(&loan_amount).map_err(to_napi_error)?;
    let rate = Decimal::from_str(&annual_interest_rate).map_err(to_napi_error)?;
    let payment = property_invest_core::mortgage::monthly_payment(loan, rate, term_years)
        .map_err(to_napi_error)?;
    Ok(payment.to_string())
}
