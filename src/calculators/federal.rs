//! Federal evaluator (§4.2)

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{Result, TaxGlideError};
use crate::models::federal::FederalTable;
use crate::models::tax::FilingStatus;
use crate::rounding::{ceil_to_100, round_down_005};

/// Evaluates the federal marginal-bracket table for a single income.
pub struct FederalEvaluator<'a> {
    federal: &'a HashMap<FilingStatus, FederalTable>,
}

impl<'a> FederalEvaluator<'a> {
    pub fn new(federal: &'a HashMap<FilingStatus, FederalTable>) -> Self {
        Self { federal }
    }

    pub fn table_for(&self, status: FilingStatus) -> Option<&FederalTable> {
        self.federal.get(&status)
    }

    /// `federal_tax(income, filing_status) -> Decimal` of §4.2.
    ///
    /// `filing_status` selects which table to read; the income-splitting
    /// rule for joint filing lives one layer up, in
    /// `calculators::filing_status::tax_under_status`. This function only
    /// ever performs a direct step-ceil-then-bracket-walk lookup.
    pub fn federal_tax(&self, income: Decimal, filing_status: FilingStatus) -> Result<Decimal> {
        let table = self.federal.get(&filing_status).ok_or_else(|| {
            TaxGlideError::calculation(format!(
                "no federal table configured for filing status {filing_status:?}"
            ))
        })?;

        let income = income.max(Decimal::ZERO);
        let i = ceil_to_100(income);

        match table.find_segment(i) {
            None => Ok(Decimal::ZERO),
            Some(segment) => {
                let raw =
                    segment.base_tax_at + ((i - segment.at_income) / dec!(100)) * segment.per100;
                Ok(round_down_005(raw))
            },
        }
    }
}
