//! Multipliers and municipalities (§3)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A dimensionless factor applied multiplicatively to the simple cantonal
/// tax. Multiple selected multipliers sum rather than multiply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Multiplier {
    pub code: String,
    pub name: String,
    pub rate: Decimal,
    pub default_selected: bool,
    pub optional: bool,
}

/// A municipality within a canton: a name plus its ordered multipliers.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Municipality {
    pub name: String,
    pub multipliers: Vec<Multiplier>,
}

impl Municipality {
    pub fn multiplier(&self, code: &str) -> Option<&Multiplier> {
        self.multipliers.iter().find(|m| m.code == code)
    }

    /// Multiplier codes must be unique within a municipality (validated by
    /// `validate::validate`); this scans for the first duplicate, if any.
    pub fn duplicate_code(&self) -> Option<&str> {
        for (i, m) in self.multipliers.iter().enumerate() {
            if self.multipliers[..i].iter().any(|other| other.code == m.code) {
                return Some(&m.code);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn multiplier(code: &str, rate: Decimal, default_selected: bool, optional: bool) -> Multiplier {
        Multiplier {
            code: code.to_string(),
            name: code.to_string(),
            rate,
            default_selected,
            optional,
        }
    }

    #[test]
    fn finds_multiplier_by_code() {
        let m = Municipality {
            name: "St. Gallen".to_string(),
            multipliers: vec![multiplier("KANTON", dec!(1.05), true, false)],
        };
        assert!(m.multiplier("KANTON").is_some());
        assert!(m.multiplier("FEUER").is_none());
    }

    #[test]
    fn detects_duplicate_codes() {
        let m = Municipality {
            name: "Dup".to_string(),
            multipliers: vec![
                multiplier("KANTON", dec!(1.0), true, false),
                multiplier("KANTON", dec!(1.0), true, false),
            ],
        };
        assert_eq!(m.duplicate_code(), Some("KANTON"));
    }

    #[test]
    fn no_duplicates_returns_none() {
        let m = Municipality {
            name: "Clean".to_string(),
            multipliers: vec![
                multiplier("KANTON", dec!(1.0), true, false),
                multiplier("GEMEINDE", dec!(1.4), true, false),
            ],
        };
        assert_eq!(m.duplicate_code(), None);
    }
}
