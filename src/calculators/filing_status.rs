//! Filing-status adapter: the income-splitting rule (§4.5)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::Result;
use crate::models::tax::FilingStatus;

/// Applies `spec.md` §4.5's splitting rule on top of any evaluator.
///
/// For `Single`, this is a passthrough. For `Joint`, the combined income is
/// halved, the evaluator is asked for the tax at that half, and the implied
/// average rate is scaled back up across the full income, rather than the
/// evaluator being asked for the tax at the full joint income directly.
/// Applied identically whether `evaluator` is the federal evaluator or the
/// cantonal simple evaluator; neither needs to know filing status itself.
pub fn tax_under_status<F>(income: Decimal, status: FilingStatus, evaluator: F) -> Result<Decimal>
where
    F: Fn(Decimal) -> Result<Decimal>,
{
    if income <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    match status {
        FilingStatus::Single => evaluator(income),
        FilingStatus::Joint => {
            let half = income / dec!(2);
            let tax_at_half = evaluator(half)?;
            let rate = tax_at_half / half;
            Ok(rate * income)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_is_a_passthrough() {
        let result = tax_under_status(dec!(50000), FilingStatus::Single, |inc| {
            Ok(inc * dec!(0.1))
        })
        .unwrap();
        assert_eq!(result, dec!(5000));
    }

    #[test]
    fn joint_scales_the_half_income_rate_across_the_full_income() {
        // A flat-rate evaluator should give the same answer either way.
        let result = tax_under_status(dec!(80000), FilingStatus::Joint, |inc| {
            Ok(inc * dec!(0.1))
        })
        .unwrap();
        assert_eq!(result, dec!(8000));
    }

    #[test]
    fn joint_with_progressive_evaluator_taxes_less_than_the_combined_single_rate() {
        // Evaluator: 0% up to 20000, 20% above, a textbook progressive shape.
        let progressive = |inc: Decimal| -> Result<Decimal> {
            Ok(if inc <= dec!(20000) {
                Decimal::ZERO
            } else {
                (inc - dec!(20000)) * dec!(0.2)
            })
        };
        let single_tax = tax_under_status(dec!(80000), FilingStatus::Single, progressive).unwrap();
        let joint_tax = tax_under_status(dec!(80000), FilingStatus::Joint, progressive).unwrap();
        assert!(joint_tax < single_tax);
    }

    #[test]
    fn zero_income_is_zero_tax_regardless_of_status() {
        let evaluator = |_: Decimal| -> Result<Decimal> { Ok(dec!(999)) };
        assert_eq!(
            tax_under_status(dec!(0), FilingStatus::Joint, evaluator).unwrap(),
            dec!(0)
        );
    }
}
