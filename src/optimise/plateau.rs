//! Plateau detector (§4.8).
//!
//! A pure function over `&[ScanRow]`, deliberately dependency-free from the
//! tax kernel, matching the teacher's preference for small, independently
//! testable calculator structs over one with implicit state.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::optimise::PlateauReport;
use crate::models::scan::ScanRow;

/// `detect_plateau(rows, tolerance_bp) -> PlateauReport` of §4.8.
///
/// `rows[0]` is assumed to be the `d = 0` row (ROI undefined there); the
/// observed maximum and the plateau itself are computed over `rows[1..]`.
///
/// The spec's description of the "rightward scan" ends up a no-op by
/// construction: the anchor is defined as the row with the *highest*
/// deduction that still clears the tolerance threshold, so nothing past it
/// can also clear the threshold; `max_d` is always that anchor's own
/// deduction. The leftward scan is where the real work happens: walking
/// back from the anchor while ROI stays within tolerance, stopping at the
/// first row that falls below it.
pub fn detect_plateau(rows: &[ScanRow], tolerance_bp: Decimal) -> PlateauReport {
    assert!(!rows.is_empty(), "scan must contain at least the d=0 row");

    if rows.len() == 1 {
        // max_deduction == 0: nothing to scan past the baseline.
        return PlateauReport {
            min_d: rows[0].deduction,
            max_d: rows[0].deduction,
            roi_min_percent: rows[0].roi_percent,
            roi_max_percent: rows[0].roi_percent,
            tolerance_bp,
        };
    }

    let r_max = rows[1..]
        .iter()
        .map(|r| r.roi_percent)
        .fold(Decimal::MIN, |acc, roi| acc.max(roi));

    let threshold = r_max - tolerance_bp * dec!(0.01);

    let anchor_idx = rows[1..]
        .iter()
        .enumerate()
        .filter(|(_, r)| r.roi_percent >= threshold)
        .map(|(i, _)| i + 1)
        .next_back();

    let Some(anchor_idx) = anchor_idx else {
        // Degenerate: nothing clears a (pathological, e.g. negative-tolerance)
        // threshold. Collapse to the row that actually achieved r_max.
        let peak_idx = rows[1..]
            .iter()
            .position(|r| r.roi_percent == r_max)
            .map(|i| i + 1)
            .unwrap_or(0);
        return PlateauReport {
            min_d: rows[peak_idx].deduction,
            max_d: rows[peak_idx].deduction,
            roi_min_percent: rows[peak_idx].roi_percent,
            roi_max_percent: rows[peak_idx].roi_percent,
            tolerance_bp,
        };
    };

    let mut min_idx = anchor_idx;
    while min_idx > 1 && rows[min_idx - 1].roi_percent >= threshold {
        min_idx -= 1;
    }

    PlateauReport {
        min_d: rows[min_idx].deduction,
        max_d: rows[anchor_idx].deduction,
        roi_min_percent: rows[min_idx].roi_percent,
        roi_max_percent: r_max,
        tolerance_bp,
    }
}
