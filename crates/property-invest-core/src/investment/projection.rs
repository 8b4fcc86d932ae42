use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

/// Length of the forward return projection, in years.
pub const PROJECTION_YEARS: u32 = 10;

/// One year of the cumulative return projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// Projection year, 1-based
    pub year: u32,
    /// Running total of annual cash flow through this year
    pub cumulative_cash_flow: Money,
    /// Market value gain over the purchase price
    pub appreciation_gain: Money,
}

/// Project cumulative cash flow and appreciation gain over a 10-year hold.
///
/// Cash flow is held flat across the horizon: the projection compounds the
/// property value but does not model rent growth, vacancy drift, or
/// amortization-driven equity buildup.
pub fn project_returns(
    purchase_price: Money,
    annual_appreciation_rate: Rate,
    annual_cash_flow: Money,
) -> Vec<ProjectionPoint> {
    let mut points = Vec::with_capacity(PROJECTION_YEARS as usize);
    let mut projected_value = purchase_price;
    let mut cumulative_cash_flow = Decimal::ZERO;

    for year in 1..=PROJECTION_YEARS {
        projected_value *= Decimal::ONE + annual_appreciation_rate;
        cumulative_cash_flow += annual_cash_flow;
        points.push(ProjectionPoint {
            year,
            cumulative_cash_flow,
            appreciation_gain: projected_value - purchase_price,
        });
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_projection_horizon() {
        let points = project_returns(dec!(1_000_000), dec!(0.03), dec!(50_000));
        assert_eq!(points.len(), 10);
        assert_eq!(points[0].year, 1);
        assert_eq!(points[9].year, 10);
    }

    #[test]
    fn test_first_year_values() {
        let points = project_returns(dec!(1_000_000), dec!(0.03), dec!(50_000));
        // Year 1: value 1,030,000, gain 30,000, one year of cash flow
        assert_eq!(points[0].appreciation_gain, dec!(30_000));
        assert_eq!(points[0].cumulative_cash_flow, dec!(50_000));
    }

    #[test]
    fn test_cash_flow_accumulates_linearly() {
        let points = project_returns(dec!(1_000_000), dec!(0.03), dec!(50_000));
        for (i, point) in points.iter().enumerate() {
            let years = Decimal::from(i as u32 + 1);
            assert_eq!(point.cumulative_cash_flow, dec!(50_000) * years);
        }
    }

    #[test]
    fn test_appreciation_compounds() {
        let points = project_returns(dec!(1_000_000), dec!(0.10), Decimal::ZERO);
        // Gains grow by more each year under compounding
        let step1 = points[1].appreciation_gain - points[0].appreciation_gain;
        let step9 = points[9].appreciation_gain - points[8].appreciation_gain;
        assert!(step9 > step1);
    }

    #[test]
    fn test_zero_appreciation_zero_gain() {
        let points = project_returns(dec!(1_000_000), Decimal::ZERO, dec!(10_000));
        for point in &points {
            assert_eq!(point.appreciation_gain, Decimal::ZERO);
        }
    }

    #[test]
    fn test_negative_cash_flow_accumulates() {
        let points = project_returns(dec!(1_000_000), dec!(0.03), dec!(-20_000));
        assert_eq!(points[9].cumulative_cash_flow, dec!(-200_000));
    }
}
