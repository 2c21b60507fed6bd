//! Bracket comparator (§4.12, §6.2 `compare_brackets`).
//!
//! Promoted to its own module because `spec.md` §6.2 lists `compare_brackets`
//! as one of the six callable core operations, even though §4 never gave it
//! a numbered component of its own. It reuses the same segment/bracket
//! lookup helpers as the federal and cantonal evaluators rather than
//! duplicating the bracket walk.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculators::bracket_containing;
use crate::engine::TaxCalculationEngine;
use crate::error::{Result, TaxGlideError};

/// Snapshot of the federal segment containing one income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FederalBracketSnapshot {
    pub from: Decimal,
    pub to: Option<Decimal>,
    pub per100: Decimal,
}

/// Snapshot of the cantonal bracket containing one income, or `None` with
/// `used_override = true` when the high-income flat override fires instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CantonalBracketSnapshot {
    pub lower: Option<Decimal>,
    pub width: Option<Decimal>,
    pub rate_percent: Option<Decimal>,
    pub used_override: bool,
}

/// `{before, after, changed}` for both federal and cantonal brackets (§4.12).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BracketComparison {
    pub federal_before: FederalBracketSnapshot,
    pub federal_after: FederalBracketSnapshot,
    pub federal_bracket_changed: bool,
    pub cantonal_before: CantonalBracketSnapshot,
    pub cantonal_after: CantonalBracketSnapshot,
    pub cantonal_bracket_changed: bool,
}

/// `compare_brackets((income|incomes), deduction) -> {before, after,
/// changed}` of §6.2: computes the federal segment and cantonal bracket
/// containing `income_fed`/`income_sg` before and after `deduction`, and
/// whether each changed.
pub fn compare_brackets(
    engine: &TaxCalculationEngine<'_>,
    income_sg: Decimal,
    income_fed: Decimal,
    deduction: Decimal,
) -> Result<BracketComparison> {
    if deduction < Decimal::ZERO {
        return Err(TaxGlideError::invalid_input(
            "deduction must not be negative",
        ));
    }
    if income_sg <= Decimal::ZERO || income_fed <= Decimal::ZERO {
        return Err(TaxGlideError::invalid_input("incomes must be positive"));
    }

    let new_sg = (income_sg - deduction).max(Decimal::ZERO);
    let new_fed = (income_fed - deduction).max(Decimal::ZERO);

    let federal_before = federal_snapshot(engine, income_fed)?;
    let federal_after = federal_snapshot(engine, new_fed)?;
    let federal_bracket_changed =
        federal_before.from != federal_after.from || federal_before.to != federal_after.to;

    let (before_bracket, before_override) = bracket_containing(income_sg, engine.canton());
    let (after_bracket, after_override) = bracket_containing(new_sg, engine.canton());

    let cantonal_before = cantonal_snapshot(before_bracket, before_override);
    let cantonal_after = cantonal_snapshot(after_bracket, after_override);
    let cantonal_bracket_changed = cantonal_before != cantonal_after;

    Ok(BracketComparison {
        federal_before,
        federal_after,
        federal_bracket_changed,
        cantonal_before,
        cantonal_after,
        cantonal_bracket_changed,
    })
}

fn federal_snapshot(
    engine: &TaxCalculationEngine<'_>,
    income_fed: Decimal,
) -> Result<FederalBracketSnapshot> {
    let segment = engine
        .federal_segment(income_fed)
        .ok_or_else(|| TaxGlideError::calculation("no federal segment found for income"))?;
    Ok(FederalBracketSnapshot {
        from: segment.from,
        to: segment.to,
        per100: segment.per100,
    })
}

fn cantonal_snapshot(
    bracket: Option<&crate::models::cantonal::CantonalBracket>,
    used_override: bool,
) -> CantonalBracketSnapshot {
    match bracket {
        Some(b) => CantonalBracketSnapshot {
            lower: Some(b.lower),
            width: Some(b.width),
            rate_percent: Some(b.rate_percent),
            used_override,
        },
        None => CantonalBracketSnapshot {
            lower: None,
            width: None,
            rate_percent: None,
            used_override,
        },
    }
}
