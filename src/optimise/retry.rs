//! Adaptive retry (§4.9).
//!
//! Tries each tolerance in a prioritised schedule sequentially (no
//! interleaving, §5 Ordering guarantees), scoring each candidate's sweet
//! spot lexicographically on `(min(utilisation, 0.5), roi_at_spot)` with
//! ties broken toward the smaller tolerance, and records which one won.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::engine::TaxCalculationEngine;
use crate::error::Result;
use crate::models::optimise::{PlateauReport, SelectionReason, SweetSpot, ToleranceInfo};
use crate::models::scan::ScanRow;
use crate::models::tax::TaxBreakdown;
use crate::optimise::plateau::detect_plateau;
use crate::optimise::sweet_spot::select_sweet_spot;

struct Candidate {
    tolerance_bp: Decimal,
    plateau: PlateauReport,
    sweet_spot: SweetSpot,
    utilisation: Decimal,
    roi_at_spot: Decimal,
}

fn score(candidate: &Candidate) -> (Decimal, Decimal) {
    (candidate.utilisation.min(dec!(0.5)), candidate.roi_at_spot)
}

/// Income-class-based default tolerance schedule (§9 Open Question: "the
/// exact auto-tolerance schedule ... is not fully specified ... treat the
/// sequence as a tunable policy"). Smaller incomes get tighter tolerances
/// since a given absolute ROI swing represents a larger share of a smaller
/// deduction ceiling; the schedule spans the ~5-200bp range the spec calls
/// out. See `DESIGN.md` for the rationale behind these exact breakpoints.
pub fn auto_tolerance_schedule(income: Decimal) -> Vec<Decimal> {
    if income < dec!(50000) {
        vec![dec!(5), dec!(10), dec!(20), dec!(50)]
    } else if income < dec!(150000) {
        vec![dec!(10), dec!(25), dec!(50), dec!(100)]
    } else {
        vec![dec!(25), dec!(50), dec!(100), dec!(200)]
    }
}

/// `optimise_with_retry(rows, tolerances) -> (PlateauReport, SweetSpot,
/// Diagnostics)` of §4.9.
#[allow(clippy::too_many_arguments)]
pub fn optimise_with_retry(
    engine: &TaxCalculationEngine<'_>,
    rows: &[ScanRow],
    baseline: &TaxBreakdown,
    income_sg: Decimal,
    income_fed: Decimal,
    max_deduction: Decimal,
    tolerances: &[Decimal],
) -> Result<(PlateauReport, SweetSpot, ToleranceInfo)> {
    let mut candidates = Vec::with_capacity(tolerances.len());
    for &tolerance_bp in tolerances {
        let plateau = detect_plateau(rows, tolerance_bp);
        let sweet_spot = select_sweet_spot(
            engine,
            rows,
            &plateau,
            baseline,
            income_sg,
            income_fed,
        )?;
        let utilisation = if max_deduction > Decimal::ZERO {
            sweet_spot.deduction / max_deduction
        } else {
            Decimal::ZERO
        };
        let roi_at_spot = rows
            .iter()
            .find(|r| r.deduction == sweet_spot.deduction)
            .map(|r| r.roi_percent)
            .unwrap_or(Decimal::ZERO);

        candidates.push(Candidate {
            tolerance_bp,
            plateau,
            sweet_spot,
            utilisation,
            roi_at_spot,
        });
    }

    let first = &candidates[0];
    let first_score = score(first);

    let mut winner_idx = 0;
    let mut winner_score = first_score;
    for (idx, candidate) in candidates.iter().enumerate().skip(1) {
        let candidate_score = score(candidate);
        let better = candidate_score > winner_score
            || (candidate_score == winner_score
                && candidate.tolerance_bp < candidates[winner_idx].tolerance_bp);
        if better {
            winner_idx = idx;
            winner_score = candidate_score;
        }
    }

    let roi_improvement = candidates[winner_idx].roi_at_spot - first.roi_at_spot;
    let utilisation_improvement = candidates[winner_idx].utilisation - first.utilisation;

    let selection_reason = if winner_idx == 0 {
        SelectionReason::FirstChoice
    } else {
        let roi_improved = roi_improvement > Decimal::ZERO;
        let utilisation_improved = utilisation_improvement > Decimal::ZERO;
        match (roi_improved, utilisation_improved) {
            (true, true) => SelectionReason::BalancedImprovement,
            (true, false) => SelectionReason::RoiImprovement,
            (false, true) => SelectionReason::UtilisationImprovement,
            (false, false) => SelectionReason::BalancedImprovement,
        }
    };

    let tolerance_info = ToleranceInfo {
        tried_bp: tolerances.to_vec(),
        winning_tolerance_bp: candidates[winner_idx].tolerance_bp,
        roi_improvement,
        utilisation_improvement,
        selection_reason,
    };

    let winner = candidates.swap_remove(winner_idx);

    Ok((winner.plateau, winner.sweet_spot, tolerance_info))
}
