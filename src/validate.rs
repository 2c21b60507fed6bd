//! Configuration validator (§4.13, §6.2 `validate`).
//!
//! `spec.md` §6.1 calls validation "external" (a collaborator loading YAML
//! does the file-level parsing), but §6.2 lists `validate(year) -> {ok,
//! issues[]}` as one of the six core operations, and §7's
//! `ConfigurationInvalid` kind is explicitly "surfaced by the external
//! validator but wrapped here". This module is what `validate(year)` runs
//! once a collaborator has produced a typed `Configuration`: the structural
//! checks that only need the already-typed value, not the raw document.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::configuration::Configuration;

/// `{ok, issues[]}` of §6.2 `validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub ok: bool,
    pub issues: Vec<String>,
}

/// Validates a loaded `Configuration` against the structural invariants of
/// `spec.md` §3/§6.1: sorted gap-free federal segments and cantonal
/// brackets, anchor income within its segment, non-negative rates, and
/// unique multiplier codes per municipality.
pub fn validate(config: &Configuration) -> ValidationReport {
    let mut issues = Vec::new();

    if config.federal.is_empty() {
        issues.push("no federal table configured for any filing status".to_string());
    }
    for (status, table) in &config.federal {
        validate_federal_table(*status, table, &mut issues);
    }

    if !config.cantons.contains_key(&config.default_canton) {
        issues.push(format!(
            "default_canton '{}' is not a configured canton",
            config.default_canton
        ));
    }

    for (canton_key, canton) in &config.cantons {
        validate_canton(canton_key, canton, &mut issues);
    }

    ValidationReport {
        ok: issues.is_empty(),
        issues,
    }
}

fn validate_federal_table(
    status: crate::models::tax::FilingStatus,
    table: &crate::models::federal::FederalTable,
    issues: &mut Vec<String>,
) {
    if table.0.is_empty() {
        issues.push(format!("federal table for {status:?} has no segments"));
        return;
    }

    let mut previous_to: Option<Decimal> = None;
    for segment in &table.0 {
        if let Some(to) = segment.to {
            if to <= segment.from {
                issues.push(format!(
                    "federal segment [{}, {:?}) for {status:?} is empty or inverted",
                    segment.from, segment.to
                ));
            }
        }
        if segment.at_income < segment.from
            || segment.to.is_some_and(|to| segment.at_income >= to)
        {
            issues.push(format!(
                "federal segment [{}, {:?}) for {status:?} has an anchor income outside its own interval",
                segment.from, segment.to
            ));
        }
        if segment.per100 < Decimal::ZERO {
            issues.push(format!(
                "federal segment starting at {} for {status:?} has a negative per100 rate",
                segment.from
            ));
        }
        if segment.base_tax_at < Decimal::ZERO {
            issues.push(format!(
                "federal segment starting at {} for {status:?} has a negative base tax",
                segment.from
            ));
        }
        match previous_to {
            Some(to) if to != segment.from => {
                issues.push(format!(
                    "federal segments for {status:?} have a gap or overlap at {}..{}",
                    to, segment.from
                ));
            },
            _ => {},
        }
        previous_to = segment.to;
    }

    if previous_to.is_some() {
        issues.push(format!(
            "federal table for {status:?} has a bounded final segment; the cover must reach +infinity"
        ));
    }
}

fn validate_canton(
    canton_key: &str,
    canton: &crate::models::canton::Canton,
    issues: &mut Vec<String>,
) {
    let mut previous_upper: Option<Decimal> = None;
    for bracket in &canton.brackets {
        if bracket.width <= Decimal::ZERO {
            issues.push(format!(
                "canton '{canton_key}' bracket at {} has non-positive width",
                bracket.lower
            ));
        }
        if bracket.rate_percent < Decimal::ZERO {
            issues.push(format!(
                "canton '{canton_key}' bracket at {} has a negative rate",
                bracket.lower
            ));
        }
        match previous_upper {
            Some(upper) if upper != bracket.lower => {
                issues.push(format!(
                    "canton '{canton_key}' brackets have a gap or overlap at {upper}..{}",
                    bracket.lower
                ));
            },
            _ => {},
        }
        previous_upper = Some(bracket.upper());
    }

    if let Some(override_rule) = &canton.override_rule {
        if override_rule.flat_percent < Decimal::ZERO {
            issues.push(format!(
                "canton '{canton_key}' override has a negative flat_percent"
            ));
        }
    }

    if !canton.municipalities.contains_key(&canton.default_municipality) {
        issues.push(format!(
            "canton '{canton_key}' default_municipality '{}' is not configured",
            canton.default_municipality
        ));
    }

    for (muni_key, municipality) in &canton.municipalities {
        if let Some(duplicate) = municipality.duplicate_code() {
            issues.push(format!(
                "canton '{canton_key}' municipality '{muni_key}' has duplicate multiplier code '{duplicate}'"
            ));
        }
        for multiplier in &municipality.multipliers {
            if multiplier.rate < Decimal::ZERO {
                issues.push(format!(
                    "canton '{canton_key}' municipality '{muni_key}' multiplier '{}' has a negative rate",
                    multiplier.code
                ));
            }
        }
    }
}
