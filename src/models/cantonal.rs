//! Cantonal bracket table and high-income override (§3)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One cantonal bracket, covering `[lower, lower + width)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CantonalBracket {
    pub lower: Decimal,
    pub width: Decimal,
    pub rate_percent: Decimal,
}

impl CantonalBracket {
    pub fn upper(&self) -> Decimal {
        self.lower + self.width
    }

    pub fn contains(&self, income: Decimal) -> bool {
        income >= self.lower && income < self.upper()
    }
}

/// High-income flat-rate override: if income >= threshold, brackets are
/// ignored and `flat_percent * income` is charged instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CantonalOverride {
    pub threshold: Decimal,
    pub flat_percent: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn bracket_upper_and_contains() {
        let b = CantonalBracket {
            lower: dec!(10000),
            width: dec!(5000),
            rate_percent: dec!(3),
        };
        assert_eq!(b.upper(), dec!(15000));
        assert!(b.contains(dec!(10000)));
        assert!(b.contains(dec!(14999.99)));
        assert!(!b.contains(dec!(15000)));
    }
}
