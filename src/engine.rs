//! Tax kernel (§4.6): composes the federal evaluator, cantonal evaluator,
//! filing-status adapter, and multiplier engine into one `TaxBreakdown`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::calculators::{filing_status, multiplier, CantonalEvaluator, FederalEvaluator};
use crate::error::Result;
use crate::models::canton::Canton;
use crate::models::configuration::Configuration;
use crate::models::multiplier::Municipality;
use crate::models::tax::{FilingStatus, TaxBreakdown};

/// A finite-difference step to measure `marginal_total` (§3 `TaxBreakdown`).
const MARGINAL_STEP: Decimal = dec!(100);

struct CoreResult {
    federal: Decimal,
    sg_simple: Decimal,
    sg_after_multipliers: Decimal,
    total: Decimal,
    picks_applied: Vec<String>,
    warnings: Vec<String>,
}

/// Bound to one canton, municipality, and filing status for a given year;
/// evaluates `(income_sg, income_fed)` pairs against it without repeating
/// the canton/municipality lookup on every call.
pub struct TaxCalculationEngine<'a> {
    config: &'a Configuration,
    canton: &'a Canton,
    municipality: &'a Municipality,
    filing_status: FilingStatus,
    picks: Vec<String>,
    skips: Vec<String>,
}

impl<'a> TaxCalculationEngine<'a> {
    pub fn new(
        config: &'a Configuration,
        canton_key: &str,
        municipality_key: &str,
        filing_status: FilingStatus,
        picks: Vec<String>,
        skips: Vec<String>,
    ) -> Result<Self> {
        let canton = config.canton(canton_key)?;
        let municipality = canton.municipality(municipality_key).ok_or_else(|| {
            crate::error::TaxGlideError::invalid_input(format!(
                "unknown municipality '{municipality_key}' in canton '{canton_key}'"
            ))
        })?;

        for code in picks.iter().chain(skips.iter()) {
            if municipality.multiplier(code).is_none() {
                return Err(crate::error::TaxGlideError::invalid_input(format!(
                    "unknown multiplier code '{code}' for municipality '{municipality_key}'"
                )));
            }
        }

        // Fail fast: both tables this engine will ever need must exist.
        // Joint filing samples at half income using the Joint-keyed table
        // (§4.5), so it must be present even though Single is the default.
        config.federal_table(FilingStatus::Single)?;
        config.federal_table(FilingStatus::Joint)?;

        Ok(Self {
            config,
            canton,
            municipality,
            filing_status,
            picks,
            skips,
        })
    }

    pub fn canton(&self) -> &Canton {
        self.canton
    }

    pub fn municipality(&self) -> &Municipality {
        self.municipality
    }

    pub fn filing_status(&self) -> FilingStatus {
        self.filing_status
    }

    /// The federal segment containing `ceil_to_100(income_fed)`, for the
    /// scan producer and bracket comparator. A read-only lookup that
    /// outlives `&self`, since it only ever borrows from `self.config`.
    pub fn federal_segment(&self, income_fed: Decimal) -> Option<&'a crate::models::federal::FederalSegment> {
        let table = self.config.federal.get(&self.filing_status)?;
        table.find_segment(crate::rounding::ceil_to_100(income_fed.max(Decimal::ZERO)))
    }

    /// The federal tax alone at one income, through the same filing-status
    /// adapter `calculate` uses. For the sweet-spot selector's 100-nudge,
    /// which needs to probe a couple of nearby incomes without paying for a
    /// full breakdown (cantonal evaluation, multipliers) each time.
    pub fn federal_tax_only(&self, income_fed: Decimal) -> Result<Decimal> {
        let federal_eval = FederalEvaluator::new(&self.config.federal);
        let status = self.filing_status;
        filing_status::tax_under_status(income_fed.max(Decimal::ZERO), status, |inc| {
            federal_eval.federal_tax(inc, status)
        })
    }

    /// Full breakdown for one income pair, including the finite-difference
    /// marginal rate and the federal segment's own marginal per100.
    pub fn calculate(&self, income_sg: Decimal, income_fed: Decimal) -> Result<TaxBreakdown> {
        let income_sg = income_sg.max(Decimal::ZERO);
        let income_fed = income_fed.max(Decimal::ZERO);

        let base = self.calculate_core(income_sg, income_fed)?;
        let bumped =
            self.calculate_core(income_sg + MARGINAL_STEP, income_fed + MARGINAL_STEP)?;

        let marginal_total = (bumped.total - base.total) / MARGINAL_STEP;

        let denom = income_sg.max(income_fed);
        let avg_rate = if denom > Decimal::ZERO {
            base.total / denom
        } else {
            Decimal::ZERO
        };

        let federal_eval = FederalEvaluator::new(&self.config.federal);
        let marginal_federal_per100 = federal_eval
            .table_for(self.filing_status)
            .and_then(|table| table.find_segment(crate::rounding::ceil_to_100(income_fed)))
            .map(|segment| segment.per100 / dec!(100))
            .unwrap_or(Decimal::ZERO);

        debug!(
            income_sg = %income_sg,
            income_fed = %income_fed,
            total = %base.total,
            "evaluated tax breakdown"
        );

        Ok(TaxBreakdown {
            federal: base.federal,
            sg_simple: base.sg_simple,
            sg_after_multipliers: base.sg_after_multipliers,
            total: base.total,
            avg_rate,
            marginal_total,
            marginal_federal_per100,
            picks_applied: base.picks_applied,
            warnings: base.warnings,
        })
    }

    fn calculate_core(&self, income_sg: Decimal, income_fed: Decimal) -> Result<CoreResult> {
        let federal_eval = FederalEvaluator::new(&self.config.federal);
        let cantonal_eval = CantonalEvaluator::new();

        let status = self.filing_status;
        let federal = filing_status::tax_under_status(income_fed, status, |inc| {
            federal_eval.federal_tax(inc, status)
        })?;

        let canton = self.canton;
        let sg_simple = filing_status::tax_under_status(income_sg, status, |inc| {
            Ok(cantonal_eval.cantonal_simple_tax(inc, canton).simple_tax)
        })?;

        let multiplier_result =
            multiplier::apply_multipliers(sg_simple, self.municipality, &self.picks, &self.skips);

        let total = federal + multiplier_result.after_tax;

        Ok(CoreResult {
            federal,
            sg_simple,
            sg_after_multipliers: multiplier_result.after_tax,
            total,
            picks_applied: multiplier_result.applied_codes,
            warnings: multiplier_result.warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::embedded::reference_configuration;

    fn engine(config: &Configuration, status: FilingStatus) -> TaxCalculationEngine<'_> {
        TaxCalculationEngine::new(config, "SG", "stgallen", status, vec![], vec![]).unwrap()
    }

    #[test]
    fn total_is_federal_plus_sg_after_multipliers() {
        let config = reference_configuration();
        let eng = engine(&config, FilingStatus::Single);
        let result = eng.calculate(dec!(75000), dec!(75000)).unwrap();
        assert_eq!(result.total, result.federal + result.sg_after_multipliers);
    }

    #[test]
    fn zero_income_yields_zero_everywhere() {
        let config = reference_configuration();
        let eng = engine(&config, FilingStatus::Single);
        let result = eng.calculate(dec!(0), dec!(0)).unwrap();
        assert_eq!(result.total, dec!(0));
        assert_eq!(result.avg_rate, dec!(0));
    }

    #[test]
    fn joint_never_owes_more_than_single_at_the_same_income() {
        let config = reference_configuration();
        let single = engine(&config, FilingStatus::Single)
            .calculate(dec!(90000), dec!(90000))
            .unwrap();
        let joint = engine(&config, FilingStatus::Joint)
            .calculate(dec!(90000), dec!(90000))
            .unwrap();
        assert!(joint.total <= single.total);
    }

    #[test]
    fn unknown_municipality_is_invalid_input() {
        let config = reference_configuration();
        let result =
            TaxCalculationEngine::new(&config, "SG", "nowhere", FilingStatus::Single, vec![], vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_pick_code_is_invalid_input() {
        let config = reference_configuration();
        let result = TaxCalculationEngine::new(
            &config,
            "SG",
            "stgallen",
            FilingStatus::Single,
            vec!["NOPE".to_string()],
            vec![],
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_skip_code_is_invalid_input() {
        let config = reference_configuration();
        let result = TaxCalculationEngine::new(
            &config,
            "SG",
            "stgallen",
            FilingStatus::Single,
            vec![],
            vec!["NOPE".to_string()],
        );
        assert!(result.is_err());
    }

    #[test]
    fn known_pick_and_skip_codes_are_accepted() {
        let config = reference_configuration();
        let result = TaxCalculationEngine::new(
            &config,
            "SG",
            "stgallen",
            FilingStatus::Single,
            vec!["FEUER".to_string()],
            vec!["CHURCH".to_string()],
        );
        assert!(result.is_ok());
    }
}
