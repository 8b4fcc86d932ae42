use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::PropertyInvestError;
use crate::types::{Money, Rate};
use crate::PropertyInvestResult;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Level monthly payment on a fixed-rate amortizing loan:
/// `P * r(1+r)^n / ((1+r)^n - 1)` with `r = annual_rate / 12` and
/// `n = term_years * 12`.
///
/// A zero rate repays principal straight-line over the term. A zero term
/// with a positive rate means no loan is scheduled and the payment is zero;
/// a zero term on an interest-free loan has no defined payment and is
/// rejected.
pub fn monthly_payment(
    loan_amount: Money,
    annual_rate: Rate,
    term_years: u32,
) -> PropertyInvestResult<Money> {
    if loan_amount <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    if term_years == 0 {
        if annual_rate.is_zero() {
            return Err(PropertyInvestError::InvalidInput {
                field: "term_years".into(),
                reason: "An interest-free loan needs a repayment term of at least 1 year".into(),
            });
        }
        return Ok(Decimal::ZERO);
    }

    let total_months = Decimal::from(term_years * MONTHS_PER_YEAR);

    if annual_rate.is_zero() {
        return Ok(loan_amount / total_months);
    }

    let monthly_rate = annual_rate / dec!(12);
    let compound = (Decimal::ONE + monthly_rate).powd(total_months);
    let denominator = compound - Decimal::ONE;

    if denominator.is_zero() {
        return Err(PropertyInvestError::DivisionByZero {
            context: "mortgage payment denominator".into(),
        });
    }

    Ok(loan_amount * monthly_rate * compound / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_payment_standard() {
        // 80M at 4.5% over 20 years, expected ~506,100/mo
        let payment = monthly_payment(dec!(80_000_000), dec!(0.045), 20).unwrap();
        assert!(
            payment > dec!(505_800) && payment < dec!(506_400),
            "Monthly payment {} outside expected range",
            payment
        );
    }

    #[test]
    fn test_zero_rate_straight_line() {
        let payment = monthly_payment(dec!(360_000), Decimal::ZERO, 30).unwrap();
        // 360k / 360 months = 1000/mo
        assert_eq!(payment, dec!(1000));
    }

    #[test]
    fn test_zero_loan_amount() {
        assert_eq!(monthly_payment(Decimal::ZERO, dec!(0.05), 20).unwrap(), Decimal::ZERO);
        assert_eq!(monthly_payment(dec!(-100), dec!(0.05), 20).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_zero_term_positive_rate() {
        let payment = monthly_payment(dec!(100_000), dec!(0.05), 0).unwrap();
        assert_eq!(payment, Decimal::ZERO);
    }

    #[test]
    fn test_zero_term_zero_rate_rejected() {
        let result = monthly_payment(dec!(100_000), Decimal::ZERO, 0);
        assert!(result.is_err());
        match result.unwrap_err() {
            PropertyInvestError::InvalidInput { field, .. } => {
                assert_eq!(field, "term_years");
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_shorter_term_pays_more_per_month() {
        let p10 = monthly_payment(dec!(1_000_000), dec!(0.06), 10).unwrap();
        let p30 = monthly_payment(dec!(1_000_000), dec!(0.06), 30).unwrap();
        assert!(p10 > p30, "10y payment {p10} should exceed 30y payment {p30}");
    }
}
