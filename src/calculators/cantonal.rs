//! Cantonal evaluator (§4.3)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::canton::{Canton, RoundingPolicy, RoundingScope};
use crate::models::tax::CantonalTaxResult;
use crate::rounding::{round_to, RoundMode};

/// Evaluates a canton's progressive bracket sum, or its high-income flat
/// override, for a single income.
///
/// Stateless: cantons differ only in the data passed per call, so there is
/// nothing to hold across evaluations (unlike the federal evaluator, which
/// borrows the whole status-keyed table once).
pub struct CantonalEvaluator;

impl CantonalEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// `cantonal_simple_tax(income, canton) -> Decimal` of §4.3.
    pub fn cantonal_simple_tax(&self, income: Decimal, canton: &Canton) -> CantonalTaxResult {
        let income = income.max(Decimal::ZERO);

        if let Some(override_rule) = &canton.override_rule {
            if income >= override_rule.threshold {
                let raw = income * override_rule.flat_percent / dec!(100);
                let tax = round_final_tax(raw, &canton.rounding);
                return CantonalTaxResult {
                    taxable_income: income,
                    simple_tax: tax,
                    used_override: true,
                };
            }
        }

        let taxable = apply_taxable_step(income, &canton.rounding);

        let mut simple_tax = Decimal::ZERO;
        for bracket in &canton.brackets {
            let overlap = taxable.min(bracket.upper()) - bracket.lower;
            if overlap > Decimal::ZERO {
                simple_tax += overlap * bracket.rate_percent / dec!(100);
            }
        }

        CantonalTaxResult {
            taxable_income: taxable,
            simple_tax: round_final_tax(simple_tax, &canton.rounding),
            used_override: false,
        }
    }
}

impl Default for CantonalEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// The bracket covering `income` (post taxable-step), or `None` when the
/// high-income override fires instead. Used by `compare::compare_brackets`,
/// which needs the bracket identity itself rather than a computed tax.
pub fn bracket_containing<'c>(
    income: Decimal,
    canton: &'c Canton,
) -> (Option<&'c crate::models::cantonal::CantonalBracket>, bool) {
    let income = income.max(Decimal::ZERO);

    if let Some(override_rule) = &canton.override_rule {
        if income >= override_rule.threshold {
            return (None, true);
        }
    }

    let taxable = apply_taxable_step(income, &canton.rounding);
    let bracket = canton.brackets.iter().find(|b| b.contains(taxable));
    (bracket, false)
}

/// Step-ceils `income` to the canton's `taxable_step` when the rounding
/// policy says that step applies to the taxable base (`TaxableOnly`/`Both`).
/// `AsOfficial` leaves the taxable base untouched. This canton taxes the
/// exact income, as most cantonal schedules already incorporate their own
/// step convention into the published bracket widths.
fn apply_taxable_step(income: Decimal, policy: &RoundingPolicy) -> Decimal {
    match policy.scope {
        RoundingScope::TaxableOnly | RoundingScope::Both => {
            round_to(income, policy.taxable_step, RoundMode::CeilStep)
        },
        RoundingScope::AsOfficial => income,
    }
}

/// Rounds the computed simple tax down to `tax_round_to` when the policy
/// says final-tax rounding applies (`AsOfficial`/`Both`, mirroring the
/// federal convention of always rounding the liability, not the base).
/// `TaxableOnly` leaves the tax at full cent precision.
fn round_final_tax(raw: Decimal, policy: &RoundingPolicy) -> Decimal {
    match policy.scope {
        RoundingScope::AsOfficial | RoundingScope::Both => {
            round_to(raw, policy.tax_round_to, RoundMode::FloorStep)
        },
        RoundingScope::TaxableOnly => raw.round_dp(2),
    }
}
