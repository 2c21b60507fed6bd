//! Sweet-spot selector (§4.10).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::engine::TaxCalculationEngine;
use crate::error::Result;
use crate::models::optimise::{FederalNudge, IncomeDetails, OptimizationSummary, PlateauReport, SweetSpot};
use crate::models::scan::ScanRow;
use crate::models::tax::TaxBreakdown;
use crate::rounding::ceil_to_100;

/// The 100-nudge probe window (§4.10, §9 Open Question: the exact boundary
/// this targets isn't pinned down by `spec.md`'s prose; see `DESIGN.md` for
/// the reading adopted here. The "next lower segment boundary" is the
/// floor of the segment the sweet spot already landed in, and the nudge is
/// only surfaced when that floor is within one step of where we already are).
const NUDGE_WINDOW: Decimal = dec!(100);

/// `select_sweet_spot(rows, plateau, baseline_breakdown, incomes,
/// multipliers_applied) -> SweetSpot` of §4.10.
///
/// Chooses `d* = plateau.max_d`, the plateau's right endpoint: the largest
/// deduction that still sits within tolerance of the observed maximum ROI.
/// Conservative under income uncertainty: a caller who slightly
/// overestimates how much they can actually deduct still lands inside the
/// near-optimal region rather than falling off a cliff.
pub fn select_sweet_spot(
    engine: &TaxCalculationEngine<'_>,
    rows: &[ScanRow],
    plateau: &PlateauReport,
    baseline: &TaxBreakdown,
    income_sg: Decimal,
    income_fed: Decimal,
) -> Result<SweetSpot> {
    let spot_row = rows
        .iter()
        .find(|r| r.deduction == plateau.max_d)
        .expect("plateau.max_d must reference a row produced by the same scan");

    let d_star = spot_row.deduction;

    let federal_bracket_changed = {
        let before = engine
            .federal_segment(income_fed)
            .expect("income_fed must resolve to a federal segment");
        let after = engine
            .federal_segment(spot_row.new_income_fed)
            .expect("new_income_fed must resolve to a federal segment");
        before.from != after.from || before.to != after.to
    };

    let federal_100_nudge = if federal_bracket_changed {
        compute_nudge(engine, spot_row.new_income_fed)?
    } else {
        None
    };

    let tax_saved_absolute = baseline.total - spot_row.total_tax;
    let tax_saved_percent = if baseline.total > Decimal::ZERO {
        dec!(100) * tax_saved_absolute / baseline.total
    } else {
        Decimal::ZERO
    };

    let explanation = if d_star == Decimal::ZERO {
        "no beneficial deduction found within the requested ceiling; ROI never rises above the baseline".to_string()
    } else {
        format!(
            "deducting {d_star} brings total tax from {} to {} ({tax_saved_percent}% saved), \
             the conservative right edge of a plateau spanning {}..{} at roi_percent ~{}",
            baseline.total, spot_row.total_tax, plateau.min_d, plateau.max_d, spot_row.roi_percent
        )
    };

    let marginal_rate_percent = spot_row
        .local_marginal_percent
        .or_else(|| rows.iter().rev().find_map(|r| r.local_marginal_percent))
        .unwrap_or(Decimal::ZERO);

    Ok(SweetSpot {
        deduction: d_star,
        new_income_sg: spot_row.new_income_sg,
        new_income_fed: spot_row.new_income_fed,
        total_tax_at_spot: spot_row.total_tax,
        federal_tax_at_spot: spot_row.federal,
        sg_tax_at_spot: spot_row.sg_after_multipliers,
        baseline_total_tax: baseline.total,
        baseline_federal_tax: baseline.federal,
        baseline_sg_tax: baseline.sg_after_multipliers,
        tax_saved_absolute,
        tax_saved_percent,
        explanation,
        income_details: IncomeDetails {
            original_sg: income_sg,
            original_fed: income_fed,
            after_sg: spot_row.new_income_sg,
            after_fed: spot_row.new_income_fed,
        },
        multipliers_applied: baseline.picks_applied.clone(),
        warnings: baseline.warnings.clone(),
        federal_bracket_changed,
        federal_100_nudge: federal_100_nudge.clone(),
        optimization_summary: OptimizationSummary {
            roi_percent: spot_row.roi_percent,
            plateau_width_chf: plateau.max_d - plateau.min_d,
            federal_bracket_changed,
            marginal_rate_percent,
        },
    })
}

/// Smallest additional deduction in `(0, 100]` whole CHF that pushes
/// `ceil_to_100(new_fed - extra)` down to the floor of the federal segment
/// `new_fed` already sits in, fully using the "free" step-ceiling
/// room left in the segment we just landed in, which can occasionally
/// expose a further per100-rate drop just beyond it. `None` when there is
/// no such room within the 100 CHF window, or when `new_fed` is already
/// exactly on the floor.
fn compute_nudge(engine: &TaxCalculationEngine<'_>, new_fed: Decimal) -> Result<Option<FederalNudge>> {
    let segment = engine
        .federal_segment(new_fed)
        .expect("new_fed must resolve to a federal segment");
    let floor = segment.from;
    let current_ceil = ceil_to_100(new_fed.max(Decimal::ZERO));
    let gap = current_ceil - floor;

    if gap <= Decimal::ZERO || gap > NUDGE_WINDOW {
        return Ok(None);
    }

    let nudged_fed = new_fed - gap;
    let tax_before = engine.federal_tax_only(new_fed)?;
    let tax_after = engine.federal_tax_only(nudged_fed)?;
    let saving = tax_before - tax_after;

    if saving <= Decimal::ZERO {
        return Ok(None);
    }

    Ok(Some(FederalNudge {
        additional_deduction: gap,
        federal_tax_saving: saving,
    }))
}
