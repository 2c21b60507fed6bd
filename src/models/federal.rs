//! Federal bracket table (§3 `FederalSegment`/`FederalTable`)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One marginal-rate segment of the federal schedule.
///
/// Covers the half-open interval `[from, to)`, with `to == None` for the
/// final, unbounded segment. `at_income` is the anchor at which `base_tax_at`
/// applies; `per100` is the tax added per 100 units of income above the
/// anchor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FederalSegment {
    pub from: Decimal,
    pub to: Option<Decimal>,
    pub at_income: Decimal,
    pub base_tax_at: Decimal,
    pub per100: Decimal,
}

impl FederalSegment {
    pub fn contains(&self, income: Decimal) -> bool {
        income >= self.from && self.to.is_none_or(|to| income < to)
    }
}

/// Sorted, gap-free cover of `[min_from, +inf)` for one filing status.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FederalTable(pub Vec<FederalSegment>);

impl FederalTable {
    /// Locate the segment such that `segment.from <= income < segment.to`.
    ///
    /// Segments are sorted and gap-free so a linear scan from the front
    /// would work, but `partition_point` gives the same binary-search
    /// behaviour `spec.md` §4.2 calls for without hand-rolling it.
    pub fn find_segment(&self, income: Decimal) -> Option<&FederalSegment> {
        if self.0.is_empty() || income < self.0[0].from {
            return None;
        }
        let idx = self.0.partition_point(|seg| seg.from <= income);
        self.0.get(idx.saturating_sub(1))
    }
}
