//! Optimiser result types (§3, §4.8–§4.11)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Contiguous deduction range whose ROI is within tolerance of the observed
/// maximum (§4.8).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlateauReport {
    pub min_d: Decimal,
    pub max_d: Decimal,
    pub roi_min_percent: Decimal,
    pub roi_max_percent: Decimal,
    pub tolerance_bp: Decimal,
}

/// A small additional deduction that aligns post-deduction federal taxable
/// income with the next-lower segment boundary (§4.10 "100-nudge").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FederalNudge {
    pub additional_deduction: Decimal,
    pub federal_tax_saving: Decimal,
}

/// Summary fields attached to the sweet spot (§4.10).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationSummary {
    pub roi_percent: Decimal,
    pub plateau_width_chf: Decimal,
    pub federal_bracket_changed: bool,
    pub marginal_rate_percent: Decimal,
}

/// Original and after-deduction income figures (§4.10).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeDetails {
    pub original_sg: Decimal,
    pub original_fed: Decimal,
    pub after_sg: Decimal,
    pub after_fed: Decimal,
}

/// The conservative right endpoint of the ROI plateau (§4.10).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweetSpot {
    pub deduction: Decimal,
    pub new_income_sg: Decimal,
    pub new_income_fed: Decimal,
    pub total_tax_at_spot: Decimal,
    pub federal_tax_at_spot: Decimal,
    pub sg_tax_at_spot: Decimal,
    pub baseline_total_tax: Decimal,
    pub baseline_federal_tax: Decimal,
    pub baseline_sg_tax: Decimal,
    pub tax_saved_absolute: Decimal,
    pub tax_saved_percent: Decimal,
    pub explanation: String,
    pub income_details: IncomeDetails,
    pub multipliers_applied: Vec<String>,
    pub warnings: Vec<String>,
    pub federal_bracket_changed: bool,
    pub federal_100_nudge: Option<FederalNudge>,
    pub optimization_summary: OptimizationSummary,
}

/// Why the adaptive retry's winning candidate differed from the first one
/// tried (§4.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionReason {
    FirstChoice,
    RoiImprovement,
    UtilisationImprovement,
    BalancedImprovement,
}

/// Which tolerances were tried and which one won (§4.9).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToleranceInfo {
    pub tried_bp: Vec<Decimal>,
    pub winning_tolerance_bp: Decimal,
    pub roi_improvement: Decimal,
    pub utilisation_improvement: Decimal,
    pub selection_reason: SelectionReason,
}

/// Row of maximum ROI, reported standalone alongside the plateau (§4.11).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestRateRow {
    pub deduction: Decimal,
    pub new_income: Decimal,
    pub saved: Decimal,
    pub savings_rate_percent: Decimal,
}

/// Final assembled optimisation report (§4.11, §6.2 `optimise`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimisationReport {
    pub base_total: Decimal,
    pub best_rate: BestRateRow,
    pub plateau_near_max_roi: PlateauReport,
    pub sweet_spot: SweetSpot,
    pub federal_100_nudge: Option<FederalNudge>,
    pub adaptive_retry_used: bool,
    pub multipliers_applied: Vec<String>,
    pub tolerance_info: ToleranceInfo,
}
