use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PropertyInvestError;
use crate::investment::projection::{self, ProjectionPoint};
use crate::mortgage;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::PropertyInvestResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Mortgage financing terms. Absent for an all-cash purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancingTerms {
    /// Down payment as a percentage of purchase price (20 = 20%)
    pub down_payment_pct: Decimal,
    /// Nominal annual interest rate (0.045 = 4.5%)
    pub annual_interest_rate: Rate,
    /// Loan term in years
    pub term_years: u32,
}

/// Input assumptions for a rental property investment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentInputs {
    /// Acquisition price
    pub purchase_price: Money,
    /// Expected annual property appreciation (0.03 = 3%)
    pub annual_appreciation_rate: Rate,
    /// Mortgage terms; None buys the property outright
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financing: Option<FinancingTerms>,
    /// Expected monthly rent
    pub monthly_rent: Money,
    /// Fraction of gross rent lost to vacancy (0.05 = 5%)
    pub annual_vacancy_rate: Rate,
    /// Monthly common charges and maintenance
    pub monthly_common_expenses: Money,
    /// Monthly property tax
    pub monthly_property_tax: Money,
    /// Management commission on collected rent (0.07 = 7%)
    pub management_fee_rate: Rate,
}

/// Derived investment metrics for a single property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentMetrics {
    /// Cash invested at purchase
    pub down_payment: Money,
    /// Principal borrowed
    pub loan_amount: Money,
    /// Level monthly mortgage payment (zero for all-cash purchases)
    pub monthly_mortgage_payment: Money,
    /// Annualized rent before vacancy
    pub gross_annual_income: Money,
    /// Income lost to vacancy
    pub vacancy_loss: Money,
    /// Gross income net of vacancy
    pub effective_income: Money,
    /// Management commission on effective income
    pub management_fee: Money,
    /// Common charges and property tax, annualized
    pub fixed_annual_expenses: Money,
    pub total_operating_expenses: Money,
    /// Effective income less operating expenses, before debt service
    pub net_operating_income: Money,
    pub annual_debt_service: Money,
    /// NOI less debt service; negative when the property does not carry itself
    pub annual_cash_flow: Money,
    pub monthly_cash_flow: Money,
    /// NOI / purchase price, in percent
    pub cap_rate: Decimal,
    /// Annual cash flow / down payment, in percent; zero for a zero-basis deal
    pub cash_on_cash_return: Decimal,
    /// Purchase price / gross annual income; None when there is no rental income
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_rent_multiplier: Option<Decimal>,
    /// Loan amount / purchase price
    pub loan_to_value: Decimal,
    /// NOI / annual debt service; None for all-cash purchases
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_service_coverage: Option<Decimal>,
}

/// Complete analysis output: point metrics plus the 10-year return projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentAnalysis {
    pub metrics: InvestmentMetrics,
    pub projection: Vec<ProjectionPoint>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Evaluate a rental property investment.
///
/// Computes the capital structure, mortgage payment, operating results,
/// cash flow and return ratios, and a 10-year projection of cumulative cash
/// flow and appreciation. Returns a `ComputationOutput<InvestmentAnalysis>`
/// carrying warnings for unusual assumptions and computation metadata.
pub fn analyze_investment(
    input: &InvestmentInputs,
) -> PropertyInvestResult<ComputationOutput<InvestmentAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input, &mut warnings)?;

    // --- Capital structure ---
    let (down_payment, loan_amount) = capital_structure(input);

    // --- Mortgage payment ---
    let monthly_mortgage_payment = match &input.financing {
        Some(terms) => {
            mortgage::monthly_payment(loan_amount, terms.annual_interest_rate, terms.term_years)?
        }
        None => Decimal::ZERO,
    };

    // --- Operating results and ratios ---
    let operating = operating_results(input);
    let metrics = cash_flow_and_ratios(
        input,
        down_payment,
        loan_amount,
        monthly_mortgage_payment,
        &operating,
        &mut warnings,
    );

    // --- 10-year projection ---
    let projection = projection::project_returns(
        input.purchase_price,
        input.annual_appreciation_rate,
        metrics.annual_cash_flow,
    );

    let analysis = InvestmentAnalysis {
        metrics,
        projection,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Rental Property Investment Analysis",
        input,
        warnings,
        elapsed,
        analysis,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(
    input: &InvestmentInputs,
    warnings: &mut Vec<String>,
) -> PropertyInvestResult<()> {
    if input.purchase_price <= Decimal::ZERO {
        return Err(PropertyInvestError::InvalidInput {
            field: "purchase_price".into(),
            reason: "Purchase price must be positive".into(),
        });
    }

    if input.monthly_rent < Decimal::ZERO {
        return Err(PropertyInvestError::InvalidInput {
            field: "monthly_rent".into(),
            reason: "Monthly rent cannot be negative".into(),
        });
    }

    if input.monthly_common_expenses < Decimal::ZERO || input.monthly_property_tax < Decimal::ZERO
    {
        return Err(PropertyInvestError::InvalidInput {
            field: "monthly_expenses".into(),
            reason: "Expense amounts cannot be negative".into(),
        });
    }

    if input.annual_vacancy_rate < Decimal::ZERO || input.annual_vacancy_rate >= Decimal::ONE {
        return Err(PropertyInvestError::InvalidInput {
            field: "annual_vacancy_rate".into(),
            reason: "Vacancy rate must be between 0 and 1 (exclusive upper)".into(),
        });
    }

    if input.management_fee_rate < Decimal::ZERO {
        return Err(PropertyInvestError::InvalidInput {
            field: "management_fee_rate".into(),
            reason: "Management fee rate cannot be negative".into(),
        });
    }

    if input.annual_appreciation_rate < Decimal::ZERO {
        return Err(PropertyInvestError::InvalidInput {
            field: "annual_appreciation_rate".into(),
            reason: "Appreciation rate cannot be negative".into(),
        });
    }

    if let Some(terms) = &input.financing {
        if terms.down_payment_pct < Decimal::ZERO || terms.down_payment_pct > dec!(100) {
            return Err(PropertyInvestError::InvalidInput {
                field: "down_payment_pct".into(),
                reason: "Down payment must be between 0 and 100 percent".into(),
            });
        }
        if terms.annual_interest_rate < Decimal::ZERO {
            return Err(PropertyInvestError::InvalidInput {
                field: "annual_interest_rate".into(),
                reason: "Interest rate cannot be negative".into(),
            });
        }
    }

    // --- Warnings for assumptions outside typical ranges ---
    if input.annual_vacancy_rate > dec!(0.20) {
        warnings.push(format!(
            "Vacancy rate {:.1}% exceeds 20% — above typical market norms",
            input.annual_vacancy_rate * dec!(100)
        ));
    }

    if input.management_fee_rate > dec!(0.20) {
        warnings.push(format!(
            "Management fee {:.1}% exceeds 20% — verify the commission terms",
            input.management_fee_rate * dec!(100)
        ));
    }

    if input.annual_appreciation_rate > dec!(0.10) {
        warnings.push(format!(
            "Appreciation rate {:.1}% exceeds 10% — unusually aggressive assumption",
            input.annual_appreciation_rate * dec!(100)
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Capital structure
// ---------------------------------------------------------------------------

/// Split the purchase price into equity and borrowed principal.
/// `down_payment + loan_amount` always equals the purchase price exactly.
fn capital_structure(input: &InvestmentInputs) -> (Money, Money) {
    match &input.financing {
        Some(terms) => {
            let down_payment = input.purchase_price * terms.down_payment_pct / dec!(100);
            (down_payment, input.purchase_price - down_payment)
        }
        // All-cash: the full price is the equity basis
        None => (input.purchase_price, Decimal::ZERO),
    }
}

// ---------------------------------------------------------------------------
// Operating results
// ---------------------------------------------------------------------------

struct OperatingResults {
    gross_annual_income: Money,
    vacancy_loss: Money,
    effective_income: Money,
    management_fee: Money,
    fixed_annual_expenses: Money,
    total_operating_expenses: Money,
    net_operating_income: Money,
}

fn operating_results(input: &InvestmentInputs) -> OperatingResults {
    let gross_annual_income = input.monthly_rent * dec!(12);
    let vacancy_loss = gross_annual_income * input.annual_vacancy_rate;
    let effective_income = gross_annual_income - vacancy_loss;

    // Management commission applies to collected (effective) rent only
    let management_fee = effective_income * input.management_fee_rate;
    let fixed_annual_expenses =
        (input.monthly_common_expenses + input.monthly_property_tax) * dec!(12);
    let total_operating_expenses = management_fee + fixed_annual_expenses;

    let net_operating_income = effective_income - total_operating_expenses;

    OperatingResults {
        gross_annual_income,
        vacancy_loss,
        effective_income,
        management_fee,
        fixed_annual_expenses,
        total_operating_expenses,
        net_operating_income,
    }
}

// ---------------------------------------------------------------------------
// Cash flow and ratios
// ---------------------------------------------------------------------------

fn cash_flow_and_ratios(
    input: &InvestmentInputs,
    down_payment: Money,
    loan_amount: Money,
    monthly_mortgage_payment: Money,
    operating: &OperatingResults,
    warnings: &mut Vec<String>,
) -> InvestmentMetrics {
    let annual_debt_service = monthly_mortgage_payment * dec!(12);
    let annual_cash_flow = operating.net_operating_income - annual_debt_service;
    let monthly_cash_flow = annual_cash_flow / dec!(12);

    // purchase_price > 0 is enforced at validation
    let cap_rate = operating.net_operating_income / input.purchase_price * dec!(100);

    let cash_on_cash_return = if down_payment.is_zero() {
        // Zero-basis deal: no cash invested, return defined as zero
        Decimal::ZERO
    } else {
        annual_cash_flow / down_payment * dec!(100)
    };

    let gross_rent_multiplier = if operating.gross_annual_income > Decimal::ZERO {
        Some(input.purchase_price / operating.gross_annual_income)
    } else {
        None
    };

    let loan_to_value = loan_amount / input.purchase_price;

    let debt_service_coverage = if annual_debt_service.is_zero() {
        None
    } else {
        Some(operating.net_operating_income / annual_debt_service)
    };

    if loan_to_value > dec!(0.80) {
        warnings.push(format!(
            "LTV of {:.1}% exceeds 80% — high leverage",
            loan_to_value * dec!(100)
        ));
    }

    if annual_cash_flow < Decimal::ZERO {
        warnings.push(
            "Negative annual cash flow — rent does not cover expenses and debt service".into(),
        );
    }

    InvestmentMetrics {
        down_payment,
        loan_amount,
        monthly_mortgage_payment,
        gross_annual_income: operating.gross_annual_income,
        vacancy_loss: operating.vacancy_loss,
        effective_income: operating.effective_income,
        management_fee: operating.management_fee,
        fixed_annual_expenses: operating.fixed_annual_expenses,
        total_operating_expenses: operating.total_operating_expenses,
        net_operating_income: operating.net_operating_income,
        annual_debt_service,
        annual_cash_flow,
        monthly_cash_flow,
        cap_rate,
        cash_on_cash_return,
        gross_rent_multiplier,
        loan_to_value,
        debt_service_coverage,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// Standard test property: financed rental apartment
    fn sample_input() -> InvestmentInputs {
        InvestmentInputs {
            purchase_price: dec!(350_000_000),
            annual_appreciation_rate: dec!(0.03),
            financing: Some(FinancingTerms {
                down_payment_pct: dec!(20),
                annual_interest_rate: dec!(0.045),
                term_years: 20,
            }),
            monthly_rent: dec!(1_800_000),
            annual_vacancy_rate: dec!(0.05),
            monthly_common_expenses: dec!(150_000),
            monthly_property_tax: dec!(80_000),
            management_fee_rate: dec!(0.07),
        }
    }

    // --- Capital structure ---

    #[test]
    fn test_capital_structure_financed() {
        let result = analyze_investment(&sample_input()).unwrap();
        let m = &result.result.metrics;

        assert_eq!(m.down_payment, dec!(70_000_000));
        assert_eq!(m.loan_amount, dec!(280_000_000));
    }

    #[test]
    fn test_capital_structure_all_cash() {
        let mut input = sample_input();
        input.financing = None;
        let result = analyze_investment(&input).unwrap();
        let m = &result.result.metrics;

        assert_eq!(m.down_payment, dec!(350_000_000));
        assert_eq!(m.loan_amount, Decimal::ZERO);
        assert_eq!(m.monthly_mortgage_payment, Decimal::ZERO);
    }

    // --- Operating results ---

    #[test]
    fn test_operating_results() {
        let result = analyze_investment(&sample_input()).unwrap();
        let m = &result.result.metrics;

        // Gross = 1.8M * 12 = 21.6M
        assert_eq!(m.gross_annual_income, dec!(21_600_000));
        // Vacancy = 21.6M * 0.05 = 1.08M
        assert_eq!(m.vacancy_loss, dec!(1_080_000));
        // Effective = 20.52M
        assert_eq!(m.effective_income, dec!(20_520_000));
        // Management = 20.52M * 0.07 = 1,436,400
        assert_eq!(m.management_fee, dec!(1_436_400));
        // Fixed = (150k + 80k) * 12 = 2.76M
        assert_eq!(m.fixed_annual_expenses, dec!(2_760_000));
        // Total opex = 4,196,400
        assert_eq!(m.total_operating_expenses, dec!(4_196_400));
        // NOI = 20.52M - 4,196,400 = 16,323,600
        assert_eq!(m.net_operating_income, dec!(16_323_600));
    }

    #[test]
    fn test_no_financing_cash_flow_equals_noi() {
        let mut input = sample_input();
        input.financing = None;
        let result = analyze_investment(&input).unwrap();
        let m = &result.result.metrics;

        assert_eq!(m.annual_debt_service, Decimal::ZERO);
        assert_eq!(m.annual_cash_flow, m.net_operating_income);
        assert!(m.debt_service_coverage.is_none());
    }

    // --- Ratios ---

    #[test]
    fn test_cap_rate() {
        let result = analyze_investment(&sample_input()).unwrap();
        let m = &result.result.metrics;

        // 16,323,600 / 350M * 100 ~ 4.66%
        assert!(m.cap_rate > dec!(4.6) && m.cap_rate < dec!(4.7));
    }

    #[test]
    fn test_gross_rent_multiplier() {
        let result = analyze_investment(&sample_input()).unwrap();
        let m = &result.result.metrics;

        // 350M / 21.6M ~ 16.2
        let grm = m.gross_rent_multiplier.unwrap();
        assert!((grm - dec!(16.2037)).abs() < dec!(0.001));
    }

    #[test]
    fn test_grm_none_with_zero_rent() {
        let mut input = sample_input();
        input.monthly_rent = Decimal::ZERO;
        let result = analyze_investment(&input).unwrap();
        let m = &result.result.metrics;

        assert!(m.gross_rent_multiplier.is_none());
        assert_eq!(m.gross_annual_income, Decimal::ZERO);
    }

    #[test]
    fn test_zero_basis_cash_on_cash_is_zero() {
        let mut input = sample_input();
        input.financing = Some(FinancingTerms {
            down_payment_pct: Decimal::ZERO,
            annual_interest_rate: dec!(0.045),
            term_years: 20,
        });
        let result = analyze_investment(&input).unwrap();
        let m = &result.result.metrics;

        assert_eq!(m.down_payment, Decimal::ZERO);
        assert_eq!(m.cash_on_cash_return, Decimal::ZERO);
    }

    #[test]
    fn test_ltv_and_dscr() {
        let result = analyze_investment(&sample_input()).unwrap();
        let m = &result.result.metrics;

        assert_eq!(m.loan_to_value, dec!(0.80));
        let dscr = m.debt_service_coverage.unwrap();
        // NOI 16.3M against ~21.3M debt service: below 1.0x
        assert!(dscr < Decimal::ONE);
    }

    // --- Warnings ---

    #[test]
    fn test_negative_cash_flow_warning() {
        // The sample terms over-leverage the property
        let result = analyze_investment(&sample_input()).unwrap();
        assert!(result.result.metrics.annual_cash_flow < Decimal::ZERO);
        let warned = result
            .warnings
            .iter()
            .any(|w| w.contains("Negative annual cash flow"));
        assert!(warned, "Expected negative cash flow warning");
    }

    #[test]
    fn test_high_leverage_warning() {
        let mut input = sample_input();
        input.financing.as_mut().unwrap().down_payment_pct = dec!(10);
        let result = analyze_investment(&input).unwrap();
        let warned = result.warnings.iter().any(|w| w.contains("exceeds 80%"));
        assert!(warned, "Expected LTV warning at 90% leverage");
    }

    #[test]
    fn test_high_vacancy_warning() {
        let mut input = sample_input();
        input.annual_vacancy_rate = dec!(0.25);
        let result = analyze_investment(&input).unwrap();
        let warned = result.warnings.iter().any(|w| w.contains("Vacancy rate"));
        assert!(warned, "Expected vacancy warning above 20%");
    }

    // --- Validation errors ---

    #[test]
    fn test_zero_purchase_price_rejected() {
        let mut input = sample_input();
        input.purchase_price = Decimal::ZERO;
        let result = analyze_investment(&input);
        assert!(result.is_err());
        match result.unwrap_err() {
            PropertyInvestError::InvalidInput { field, .. } => {
                assert_eq!(field, "purchase_price");
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_rent_rejected() {
        let mut input = sample_input();
        input.monthly_rent = dec!(-100);
        assert!(analyze_investment(&input).is_err());
    }

    #[test]
    fn test_down_payment_pct_over_100_rejected() {
        let mut input = sample_input();
        input.financing.as_mut().unwrap().down_payment_pct = dec!(120);
        assert!(analyze_investment(&input).is_err());
    }

    #[test]
    fn test_zero_term_interest_free_rejected() {
        let mut input = sample_input();
        input.financing = Some(FinancingTerms {
            down_payment_pct: dec!(20),
            annual_interest_rate: Decimal::ZERO,
            term_years: 0,
        });
        assert!(analyze_investment(&input).is_err());
    }

    // --- Envelope ---

    #[test]
    fn test_methodology_string() {
        let result = analyze_investment(&sample_input()).unwrap();
        assert_eq!(result.methodology, "Rental Property Investment Analysis");
    }

    #[test]
    fn test_projection_included() {
        let result = analyze_investment(&sample_input()).unwrap();
        assert_eq!(result.result.projection.len(), 10);
        // Year 1 appreciation on 350M at 3% is 10.5M
        assert_eq!(result.result.projection[0].appreciation_gain, dec!(10_500_000));
    }
}
