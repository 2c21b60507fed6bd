//! Embedded reference configuration: canton St. Gallen, municipality
//! St. Gallen city, year 2025 (§6.1).
//!
//! This is a self-consistent illustrative dataset built to exercise every
//! component in this crate: step-ceiling, bracket walks, the high-income
//! override, multiplier selection, income splitting. It is not a
//! reproduction of any external reference implementation's published
//! figures. See `DESIGN.md` for how the scenario-style numbers used in this
//! crate's tests were derived.

use std::collections::{BTreeMap, HashMap};

use rust_decimal_macros::dec;

use crate::models::canton::{Canton, RoundingPolicy, RoundingScope};
use crate::models::cantonal::{CantonalBracket, CantonalOverride};
use crate::models::configuration::Configuration;
use crate::models::federal::{FederalSegment, FederalTable};
use crate::models::multiplier::{Multiplier, Municipality};
use crate::models::tax::FilingStatus;

/// The federal schedule is identical for both filing statuses in this
/// dataset: joint filing is derived from the single table via the
/// income-splitting rule (§4.5), not a separately published married tariff,
/// mirroring how Switzerland's own federal "full splitting" divisor works.
fn federal_segments() -> Vec<FederalSegment> {
    vec![
        FederalSegment {
            from: dec!(0),
            to: Some(dec!(14500)),
            at_income: dec!(0),
            base_tax_at: dec!(0),
            per100: dec!(0),
        },
        FederalSegment {
            from: dec!(14500),
            to: Some(dec!(32000)),
            at_income: dec!(14500),
            base_tax_at: dec!(0),
            per100: dec!(0.86),
        },
        FederalSegment {
            from: dec!(32000),
            to: Some(dec!(60000)),
            at_income: dec!(32000),
            base_tax_at: dec!(150.50),
            per100: dec!(1.8),
        },
        FederalSegment {
            from: dec!(60000),
            to: Some(dec!(75000)),
            at_income: dec!(60000),
            base_tax_at: dec!(654.50),
            per100: dec!(3.3),
        },
        FederalSegment {
            from: dec!(75000),
            to: Some(dec!(90000)),
            at_income: dec!(75000),
            base_tax_at: dec!(1149.50),
            per100: dec!(4.4),
        },
        FederalSegment {
            from: dec!(90000),
            to: Some(dec!(120000)),
            at_income: dec!(90000),
            base_tax_at: dec!(1809.50),
            per100: dec!(5.2),
        },
        FederalSegment {
            from: dec!(120000),
            to: None,
            at_income: dec!(120000),
            base_tax_at: dec!(3369.50),
            per100: dec!(6.6),
        },
    ]
}

fn cantonal_brackets() -> Vec<CantonalBracket> {
    vec![
        CantonalBracket {
            lower: dec!(0),
            width: dec!(9700),
            rate_percent: dec!(3.0),
        },
        CantonalBracket {
            lower: dec!(9700),
            width: dec!(10600),
            rate_percent: dec!(5.5),
        },
        CantonalBracket {
            lower: dec!(20300),
            width: dec!(14700),
            rate_percent: dec!(7.0),
        },
        CantonalBracket {
            lower: dec!(35000),
            width: dec!(40000),
            rate_percent: dec!(8.5),
        },
        CantonalBracket {
            lower: dec!(75000),
            width: dec!(75000),
            rate_percent: dec!(9.8),
        },
        CantonalBracket {
            lower: dec!(150000),
            width: dec!(350000),
            rate_percent: dec!(10.8),
        },
        CantonalBracket {
            lower: dec!(500000),
            width: dec!(500000),
            rate_percent: dec!(11.2),
        },
    ]
}

fn multiplier(code: &str, name: &str, rate: rust_decimal::Decimal, default_selected: bool, optional: bool) -> Multiplier {
    Multiplier {
        code: code.to_string(),
        name: name.to_string(),
        rate,
        default_selected,
        optional,
    }
}

fn stgallen_city() -> Municipality {
    Municipality {
        name: "St. Gallen".to_string(),
        multipliers: vec![
            multiplier("KANTON", "Kanton St. Gallen", dec!(1.05), true, false),
            multiplier("GEMEINDE", "Stadt St. Gallen", dec!(1.38), true, false),
            multiplier("FEUER", "Feuerwehr-Ersatzabgabe", dec!(0.08), false, true),
            multiplier("CHURCH", "Kirchensteuer", dec!(0.25), false, true),
        ],
    }
}

fn wil() -> Municipality {
    Municipality {
        name: "Wil".to_string(),
        multipliers: vec![
            multiplier("KANTON", "Kanton St. Gallen", dec!(1.05), true, false),
            multiplier("GEMEINDE", "Stadt Wil", dec!(1.22), true, false),
            multiplier("CHURCH", "Kirchensteuer", dec!(0.22), false, true),
        ],
    }
}

fn st_gallen_canton() -> Canton {
    let mut municipalities = BTreeMap::new();
    municipalities.insert("stgallen".to_string(), stgallen_city());
    municipalities.insert("wil".to_string(), wil());

    Canton {
        name: "St. Gallen".to_string(),
        abbreviation: "SG".to_string(),
        brackets: cantonal_brackets(),
        override_rule: Some(CantonalOverride {
            threshold: dec!(1000000),
            flat_percent: dec!(11.5),
        }),
        rounding: RoundingPolicy {
            taxable_step: dec!(100),
            tax_round_to: dec!(0.05),
            scope: RoundingScope::AsOfficial,
        },
        municipalities,
        default_municipality: "stgallen".to_string(),
    }
}

/// Builds the 2025 St. Gallen reference configuration.
pub fn reference_configuration() -> Configuration {
    let mut cantons = BTreeMap::new();
    cantons.insert("SG".to_string(), st_gallen_canton());

    let mut federal = HashMap::new();
    federal.insert(FilingStatus::Single, FederalTable(federal_segments()));
    federal.insert(FilingStatus::Joint, FederalTable(federal_segments()));

    Configuration {
        year: 2025,
        cantons,
        default_canton: "SG".to_string(),
        federal,
    }
}
