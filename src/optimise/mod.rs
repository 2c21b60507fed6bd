//! Optimiser orchestrator (§4.11). Drives the scan producer, plateau
//! detector, adaptive retry, and sweet-spot selector and assembles the
//! final report. The orchestrator analogue of the teacher's
//! `TaxCalculationEngine`: one method that calls out to specialised
//! calculators in sequence, generalized here to a multi-stage pipeline
//! with retry.

pub mod plateau;
pub mod retry;
pub mod sweet_spot;

use rust_decimal::Decimal;

use crate::engine::TaxCalculationEngine;
use crate::error::Result;
use crate::models::optimise::{
    BestRateRow, OptimisationReport, PlateauReport, SelectionReason, ToleranceInfo,
};
use crate::models::scan::ScanRow;
use crate::scan::ScanProducer;

use retry::{auto_tolerance_schedule, optimise_with_retry};
use sweet_spot::select_sweet_spot;

/// Drives §4.7–§4.10 for one bound engine and assembles the final
/// `OptimisationReport` (§4.11, §6.2 `optimise`).
pub struct Optimiser<'a, 'cfg> {
    engine: &'a TaxCalculationEngine<'cfg>,
}

impl<'a, 'cfg> Optimiser<'a, 'cfg> {
    pub fn new(engine: &'a TaxCalculationEngine<'cfg>) -> Self {
        Self { engine }
    }

    /// `optimise(..., max_deduction, step, tolerance_bp?) ->
    /// OptimisationReport` of §4.11/§6.2.
    pub fn optimise(
        &self,
        income_sg: Decimal,
        income_fed: Decimal,
        max_deduction: Decimal,
        step: Decimal,
        tolerance_bp: Option<Decimal>,
    ) -> Result<OptimisationReport> {
        let baseline = self.engine.calculate(income_sg, income_fed)?;
        let rows = ScanProducer::new(self.engine).scan(
            income_sg,
            income_fed,
            max_deduction,
            step,
            true,
        )?;

        let best_rate = best_rate_row(&rows);

        let r_max = max_roi(&rows);

        let (plateau, sweet_spot, tolerance_info, adaptive_retry_used) = if r_max <= Decimal::ZERO
        {
            // §4.11 point 5: empty plateau (no beneficial deduction at all)
            // collapses to d* = 0 without running the retry loop.
            let degenerate_tolerance = tolerance_bp.unwrap_or(Decimal::ZERO);
            let plateau = PlateauReport {
                min_d: rows[0].deduction,
                max_d: rows[0].deduction,
                roi_min_percent: Decimal::ZERO,
                roi_max_percent: Decimal::ZERO,
                tolerance_bp: degenerate_tolerance,
            };
            let sweet_spot = select_sweet_spot(
                self.engine,
                &rows,
                &plateau,
                &baseline,
                income_sg,
                income_fed,
            )?;
            let tolerance_info = ToleranceInfo {
                tried_bp: vec![degenerate_tolerance],
                winning_tolerance_bp: degenerate_tolerance,
                roi_improvement: Decimal::ZERO,
                utilisation_improvement: Decimal::ZERO,
                selection_reason: SelectionReason::FirstChoice,
            };
            (plateau, sweet_spot, tolerance_info, false)
        } else {
            let tolerances = match tolerance_bp {
                Some(bp) => vec![bp],
                None => auto_tolerance_schedule(income_sg.max(income_fed)),
            };
            let adaptive_retry_used = tolerance_bp.is_none();
            let (plateau, sweet_spot, tolerance_info) = optimise_with_retry(
                self.engine,
                &rows,
                &baseline,
                income_sg,
                income_fed,
                max_deduction,
                &tolerances,
            )?;
            (plateau, sweet_spot, tolerance_info, adaptive_retry_used)
        };

        let federal_100_nudge = sweet_spot.federal_100_nudge.clone();
        let multipliers_applied = baseline.picks_applied.clone();

        Ok(OptimisationReport {
            base_total: baseline.total,
            best_rate,
            plateau_near_max_roi: plateau,
            sweet_spot,
            federal_100_nudge,
            adaptive_retry_used,
            multipliers_applied,
            tolerance_info,
        })
    }
}

fn max_roi(rows: &[ScanRow]) -> Decimal {
    if rows.len() <= 1 {
        return Decimal::ZERO;
    }
    rows[1..]
        .iter()
        .map(|r| r.roi_percent)
        .fold(Decimal::MIN, |acc, roi| acc.max(roi))
}

fn best_rate_row(rows: &[ScanRow]) -> BestRateRow {
    let best = if rows.len() > 1 {
        rows[1..]
            .iter()
            .fold(&rows[1], |best, r| if r.roi_percent > best.roi_percent { r } else { best })
    } else {
        &rows[0]
    };

    BestRateRow {
        deduction: best.deduction,
        new_income: best.new_income,
        saved: best.saved,
        savings_rate_percent: best.roi_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::embedded::reference_configuration;
    use crate::models::tax::FilingStatus;
    use rust_decimal_macros::dec;

    fn engine(config: &crate::models::configuration::Configuration) -> TaxCalculationEngine<'_> {
        TaxCalculationEngine::new(config, "SG", "stgallen", FilingStatus::Single, vec![], vec![])
            .unwrap()
    }

    #[test]
    fn optimise_finds_a_deduction_multiple_of_step() {
        let config = reference_configuration();
        let eng = engine(&config);
        let optimiser = Optimiser::new(&eng);
        let report = optimiser
            .optimise(dec!(85000), dec!(85000), dec!(10000), dec!(100), None)
            .unwrap();
        assert_eq!(report.sweet_spot.deduction % dec!(100), Decimal::ZERO);
        assert!(report.sweet_spot.deduction >= Decimal::ZERO);
        assert!(report.plateau_near_max_roi.max_d >= report.sweet_spot.deduction);
    }

    #[test]
    fn zero_income_yields_zero_deduction_sweet_spot() {
        let config = reference_configuration();
        let eng = engine(&config);
        let optimiser = Optimiser::new(&eng);
        // max_deduction = 0 with an otherwise-valid minimal income exercises
        // the "nothing to optimise" path without tripping the scan's
        // positive-income validation.
        let report = optimiser
            .optimise(dec!(1000), dec!(1000), dec!(0), dec!(100), None)
            .unwrap();
        assert_eq!(report.sweet_spot.deduction, dec!(0));
    }

    #[test]
    fn explicit_tolerance_skips_adaptive_retry() {
        let config = reference_configuration();
        let eng = engine(&config);
        let optimiser = Optimiser::new(&eng);
        let report = optimiser
            .optimise(dec!(85000), dec!(85000), dec!(5000), dec!(100), Some(dec!(25)))
            .unwrap();
        assert!(!report.adaptive_retry_used);
        assert_eq!(report.tolerance_info.winning_tolerance_bp, dec!(25));
    }

    #[test]
    fn running_optimise_twice_is_deterministic() {
        let config = reference_configuration();
        let eng = engine(&config);
        let optimiser = Optimiser::new(&eng);
        let first = optimiser
            .optimise(dec!(85000), dec!(85000), dec!(10000), dec!(100), None)
            .unwrap();
        let second = optimiser
            .optimise(dec!(85000), dec!(85000), dec!(10000), dec!(100), None)
            .unwrap();
        assert_eq!(first.sweet_spot.deduction, second.sweet_spot.deduction);
        assert_eq!(first.base_total, second.base_total);
    }

    #[test]
    fn invalid_step_is_rejected() {
        let config = reference_configuration();
        let eng = engine(&config);
        let optimiser = Optimiser::new(&eng);
        assert!(optimiser
            .optimise(dec!(85000), dec!(85000), dec!(5000), dec!(0), None)
            .is_err());
    }
}
