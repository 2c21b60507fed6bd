//! Multiplier engine (§4.4)

use rust_decimal::Decimal;

use crate::models::multiplier::Municipality;
use crate::models::tax::MultiplierResult;

/// Applies a municipality's selected multipliers to a simple cantonal tax.
///
/// A multiplier is selected ("on") if it is `default_selected` or its code
/// appears in `picks`, unless its code also appears in `skips`: an explicit
/// skip always wins over a pick or a default. Selected rates sum (they do
/// not compound) and the sum multiplies the simple tax once.
pub fn apply_multipliers(
    simple_tax: Decimal,
    municipality: &Municipality,
    picks: &[String],
    skips: &[String],
) -> MultiplierResult {
    let mut applied_codes = Vec::new();
    let mut rate_sum = Decimal::ZERO;

    for multiplier in &municipality.multipliers {
        let picked = picks.iter().any(|p| p == &multiplier.code);
        let skipped = skips.iter().any(|s| s == &multiplier.code);
        let selected = (multiplier.default_selected || picked) && !skipped;
        if selected {
            applied_codes.push(multiplier.code.clone());
            rate_sum += multiplier.rate;
        }
    }

    let after_tax = if applied_codes.is_empty() {
        Decimal::ZERO
    } else {
        simple_tax * rate_sum
    };

    let mut warnings = Vec::new();
    if applied_codes.is_empty() {
        warnings.push(
            "no multipliers selected for this municipality; sg_after_multipliers is 0"
                .to_string(),
        );
    }
    for multiplier in &municipality.multipliers {
        if multiplier.optional
            && multiplier.code.contains("FEUER")
            && !applied_codes.contains(&multiplier.code)
        {
            let estimate = simple_tax * multiplier.rate;
            warnings.push(format!(
                "optional fire-service multiplier '{}' is not selected; selecting it would add {} to sg_after_multipliers",
                multiplier.code, estimate
            ));
        }
    }

    MultiplierResult {
        after_tax,
        applied_codes,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn multiplier(code: &str, rate: Decimal, default_selected: bool, optional: bool) -> crate::models::multiplier::Multiplier {
        crate::models::multiplier::Multiplier {
            code: code.to_string(),
            name: code.to_string(),
            rate,
            default_selected,
            optional,
        }
    }

    fn municipality() -> Municipality {
        Municipality {
            name: "St. Gallen".to_string(),
            multipliers: vec![
                multiplier("KANTON", dec!(1.05), true, false),
                multiplier("GEMEINDE", dec!(1.41), true, false),
                multiplier("FEUER", dec!(0.08), false, true),
            ],
        }
    }

    #[test]
    fn defaults_sum_additively() {
        let m = municipality();
        let result = apply_multipliers(dec!(1000), &m, &[], &[]);
        assert_eq!(result.after_tax, dec!(2460));
        assert_eq!(result.applied_codes, vec!["KANTON", "GEMEINDE"]);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn pick_adds_an_optional_multiplier() {
        let m = municipality();
        let result = apply_multipliers(dec!(1000), &m, &["FEUER".to_string()], &[]);
        assert!(result.applied_codes.contains(&"FEUER".to_string()));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn skip_wins_over_default_and_pick() {
        let m = municipality();
        let result = apply_multipliers(
            dec!(1000),
            &m,
            &["FEUER".to_string()],
            &["FEUER".to_string(), "KANTON".to_string()],
        );
        assert!(!result.applied_codes.contains(&"FEUER".to_string()));
        assert!(!result.applied_codes.contains(&"KANTON".to_string()));
    }

    #[test]
    fn no_selected_multipliers_is_zero_with_warning() {
        let m = Municipality {
            name: "Empty".to_string(),
            multipliers: vec![multiplier("KANTON", dec!(1.0), false, true)],
        };
        let result = apply_multipliers(dec!(1000), &m, &[], &[]);
        assert_eq!(result.after_tax, dec!(0));
        assert!(result.applied_codes.is_empty());
        assert!(!result.warnings.is_empty());
    }
}
