//! Filing status and tax-kernel result types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Filing status for the income-splitting rule of §4.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FilingStatus {
    #[default]
    Single,
    Joint,
}

impl FilingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilingStatus::Single => "single",
            FilingStatus::Joint => "married_joint",
        }
    }
}

/// Result of the cantonal evaluator for a single income.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CantonalTaxResult {
    pub taxable_income: Decimal,
    pub simple_tax: Decimal,
    /// True if the high-income flat override fired instead of the bracket sum.
    pub used_override: bool,
}

/// Result of applying a municipality's multipliers to a simple cantonal tax.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiplierResult {
    pub after_tax: Decimal,
    pub applied_codes: Vec<String>,
    pub warnings: Vec<String>,
}

/// Complete tax breakdown for one income (§4.6 Tax Kernel).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub federal: Decimal,
    pub sg_simple: Decimal,
    pub sg_after_multipliers: Decimal,
    pub total: Decimal,
    pub avg_rate: Decimal,
    pub marginal_total: Decimal,
    pub marginal_federal_per100: Decimal,
    pub picks_applied: Vec<String>,
    pub warnings: Vec<String>,
}
