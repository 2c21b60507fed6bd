//! Deduction scan row (§3 `ScanRow`, §4.7)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a deduction scan: the tax/ROI/bracket picture at one
/// deduction amount `d`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRow {
    pub deduction: Decimal,
    /// `max(new_income_sg, new_income_fed)`.
    pub new_income: Decimal,
    pub new_income_sg: Decimal,
    pub new_income_fed: Decimal,
    pub total_tax: Decimal,
    pub federal: Decimal,
    pub sg_simple: Decimal,
    pub sg_after_multipliers: Decimal,
    pub saved: Decimal,
    pub roi_percent: Decimal,
    pub federal_segment_from: Decimal,
    pub federal_segment_to: Option<Decimal>,
    pub federal_segment_per100: Decimal,
    pub local_marginal_percent: Option<Decimal>,
}
