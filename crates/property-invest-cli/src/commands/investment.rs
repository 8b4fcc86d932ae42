use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use property_invest_core::investment::analysis::{
    analyze_investment, FinancingTerms, InvestmentInputs,
};
use property_invest_core::mortgage;

use crate::input;

/// Arguments for investment evaluation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct EvaluateArgs {
    /// Purchase price
    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Expected annual appreciation rate (e.g. 0.03 for 3%)
    #[arg(long, default_value = "0")]
    pub appreciation_rate: Decimal,

    /// Finance the purchase with a mortgage (all-cash when omitted)
    #[arg(long)]
    pub financed: bool,

    /// Down payment as a percentage of price (e.g. 20 for 20%)
    #[arg(long, default_value = "20")]
    pub down_payment_pct: Decimal,

    /// Annual mortgage interest rate (e.g. 0.045 for 4.5%)
    #[arg(long, default_value = "0")]
    pub interest_rate: Decimal,

    /// Mortgage term in years
    #[arg(long, default_value = "20")]
    pub term_years: u32,

    /// Expected monthly rent
    #[arg(long)]
    pub monthly_rent: Option<Decimal>,

    /// Fraction of gross rent lost to vacancy (e.g. 0.05 for 5%)
    #[arg(long, default_value = "0")]
    pub vacancy_rate: Decimal,

    /// Monthly common charges and maintenance
    #[arg(long, default_value = "0")]
    pub common_expenses: Decimal,

    /// Monthly property tax
    #[arg(long, default_value = "0")]
    pub property_tax: Decimal,

    /// Management commission on collected rent (e.g. 0.07 for 7%)
    #[arg(long, default_value = "0")]
    pub management_fee_rate: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a standalone mortgage payment calculation
#[derive(Args)]
pub struct MortgageArgs {
    /// Principal borrowed
    #[arg(long)]
    pub loan_amount: Decimal,

    /// Annual interest rate (e.g. 0.045 for 4.5%)
    #[arg(long, default_value = "0")]
    pub interest_rate: Decimal,

    /// Loan term in years
    #[arg(long)]
    pub term_years: u32,
}

pub fn run_evaluate(args: EvaluateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let invest_input: InvestmentInputs = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let financing = if args.financed {
            Some(FinancingTerms {
                down_payment_pct: args.down_payment_pct,
                annual_interest_rate: args.interest_rate,
                term_years: args.term_years,
            })
        } else {
            None
        };

        InvestmentInputs {
            purchase_price: args
                .purchase_price
                .ok_or("--purchase-price is required (or provide --input)")?,
            annual_appreciation_rate: args.appreciation_rate,
            financing,
            monthly_rent: args
                .monthly_rent
                .ok_or("--monthly-rent is required (or provide --input)")?,
            annual_vacancy_rate: args.vacancy_rate,
            monthly_common_expenses: args.common_expenses,
            monthly_property_tax: args.property_tax,
            management_fee_rate: args.management_fee_rate,
        }
    };

    let result = analyze_investment(&invest_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_mortgage(args: MortgageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payment = mortgage::monthly_payment(args.loan_amount, args.interest_rate, args.term_years)?;

    Ok(serde_json::json!({
        "result": {
            "loan_amount": args.loan_amount,
            "annual_interest_rate": args.interest_rate,
            "term_years": args.term_years,
            "monthly_payment": payment,
            "annual_debt_service": payment * dec!(12),
        }
    }))
}
