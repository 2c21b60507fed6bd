//! Deduction scan producer (§4.7).
//!
//! Produces, for a strictly increasing sequence of deduction amounts, the
//! tax/ROI/bracket picture the plateau detector and sweet-spot selector
//! consume. Mirrors the teacher's `benchmark_all_states`-style "call the
//! engine once per input" loop, generalized from "one call per state" to
//! "one call per deduction step".

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::engine::TaxCalculationEngine;
use crate::error::{Result, TaxGlideError};
use crate::models::scan::ScanRow;
use crate::models::tax::TaxBreakdown;

/// The local-marginal finite-difference window is fixed at 100, independent
/// of the scan's own `d_step` (§4.7 point 5 specifies "total(d+100)"
/// literally, not "total(d + d_step)").
const MARGINAL_WINDOW: Decimal = dec!(100);

/// Produces dense deduction-scan tabulations for one bound engine
/// (canton/municipality/filing-status/picks/skips already fixed).
pub struct ScanProducer<'a, 'cfg> {
    engine: &'a TaxCalculationEngine<'cfg>,
}

impl<'a, 'cfg> ScanProducer<'a, 'cfg> {
    pub fn new(engine: &'a TaxCalculationEngine<'cfg>) -> Self {
        Self { engine }
    }

    /// `scan(incomes, ..., max_deduction, step, include_marginal) ->
    /// Vec<ScanRow>` of §4.7/§6.2.
    pub fn scan(
        &self,
        income_sg: Decimal,
        income_fed: Decimal,
        max_deduction: Decimal,
        step: Decimal,
        include_marginal: bool,
    ) -> Result<Vec<ScanRow>> {
        if step <= Decimal::ZERO {
            return Err(TaxGlideError::invalid_input("step must be positive"));
        }
        if max_deduction < Decimal::ZERO {
            return Err(TaxGlideError::invalid_input(
                "max_deduction must not be negative",
            ));
        }
        if income_sg <= Decimal::ZERO || income_fed <= Decimal::ZERO {
            return Err(TaxGlideError::invalid_input(
                "incomes must be positive",
            ));
        }

        let baseline = self.total_at_deduction(income_sg, income_fed, Decimal::ZERO)?;
        let total_at_d0 = baseline.total;

        let mut deductions = Vec::new();
        let mut d = Decimal::ZERO;
        loop {
            deductions.push(d);
            if d >= max_deduction {
                break;
            }
            d += step;
            if d > max_deduction {
                d = max_deduction;
            }
        }

        let mut rows = Vec::with_capacity(deductions.len());
        let last_index = deductions.len() - 1;
        for (idx, &d) in deductions.iter().enumerate() {
            let breakdown = self.total_at_deduction(income_sg, income_fed, d)?;
            let new_sg = (income_sg - d).max(Decimal::ZERO);
            let new_fed = (income_fed - d).max(Decimal::ZERO);

            let saved = total_at_d0 - breakdown.total;
            let roi_percent = if d == Decimal::ZERO {
                Decimal::ZERO
            } else {
                dec!(100) * saved / d
            };

            let segment = self
                .engine
                .federal_segment(new_fed)
                .ok_or_else(|| TaxGlideError::calculation("no federal segment for deduction row"))?;

            let local_marginal_percent = if include_marginal {
                Some(self.local_marginal_percent(
                    income_sg,
                    income_fed,
                    d,
                    breakdown.total,
                    idx == last_index,
                )?)
            } else {
                None
            };

            rows.push(ScanRow {
                deduction: d,
                new_income: new_sg.max(new_fed),
                new_income_sg: new_sg,
                new_income_fed: new_fed,
                total_tax: breakdown.total,
                federal: breakdown.federal,
                sg_simple: breakdown.sg_simple,
                sg_after_multipliers: breakdown.sg_after_multipliers,
                saved,
                roi_percent,
                federal_segment_from: segment.from,
                federal_segment_to: segment.to,
                federal_segment_per100: segment.per100,
                local_marginal_percent,
            });
        }

        Ok(rows)
    }

    fn total_at_deduction(
        &self,
        income_sg: Decimal,
        income_fed: Decimal,
        d: Decimal,
    ) -> Result<TaxBreakdown> {
        let new_sg = (income_sg - d).max(Decimal::ZERO);
        let new_fed = (income_fed - d).max(Decimal::ZERO);
        self.engine.calculate(new_sg, new_fed)
    }

    /// `local_marginal_percent` of §4.7 point 5: a forward difference over a
    /// fixed 100-unit window, except at the scan's last row (or when `d` is
    /// too small to step backward), where a backward difference is used
    /// instead (§9 Open Question, resolved in `DESIGN.md`).
    fn local_marginal_percent(
        &self,
        income_sg: Decimal,
        income_fed: Decimal,
        d: Decimal,
        total_d: Decimal,
        is_last: bool,
    ) -> Result<Decimal> {
        let use_backward = is_last && d >= MARGINAL_WINDOW;
        if use_backward {
            let prior = self
                .total_at_deduction(income_sg, income_fed, d - MARGINAL_WINDOW)?
                .total;
            Ok(((prior - total_d) / MARGINAL_WINDOW) * dec!(100))
        } else {
            let next = self
                .total_at_deduction(income_sg, income_fed, d + MARGINAL_WINDOW)?
                .total;
            Ok(((total_d - next) / MARGINAL_WINDOW) * dec!(100))
        }
    }
}
