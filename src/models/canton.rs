//! Canton, rounding policy, and the municipality map (§3)

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cantonal::{CantonalBracket, CantonalOverride};
use super::multiplier::Municipality;

/// How widely a canton's rounding policy applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundingScope {
    AsOfficial,
    TaxableOnly,
    Both,
}

/// `{taxable_step, tax_round_to, scope}` from `spec.md` §3.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundingPolicy {
    pub taxable_step: Decimal,
    pub tax_round_to: Decimal,
    pub scope: RoundingScope,
}

/// A canton: brackets, optional override, rounding policy, and its
/// municipalities keyed by a stable municipality key (ordered so validation
/// and any enumeration a collaborator performs is deterministic).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Canton {
    pub name: String,
    pub abbreviation: String,
    pub brackets: Vec<CantonalBracket>,
    pub override_rule: Option<CantonalOverride>,
    pub rounding: RoundingPolicy,
    pub municipalities: BTreeMap<String, Municipality>,
    pub default_municipality: String,
}

impl Canton {
    pub fn municipality(&self, key: &str) -> Option<&Municipality> {
        self.municipalities.get(key)
    }
}
