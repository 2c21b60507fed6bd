//! Fixed-precision decimal rounding to an explicit step.
//!
//! All tax-bearing arithmetic in this crate uses `rust_decimal::Decimal`
//! exclusively; rounding only ever happens at the boundaries named here, not
//! as a side effect of intermediate arithmetic.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Directed rounding mode for `round_to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundMode {
    /// Round down to the nearest multiple of `step`.
    FloorStep,
    /// Round to the nearest multiple of `step`, ties away from zero.
    NearestStep,
    /// Round up to the nearest multiple of `step`.
    CeilStep,
}

/// Round `value` to the nearest multiple of `step` using `mode`.
///
/// Panics if `step` is not strictly positive; rounding policies are
/// validated at configuration-load time, so this is a programming invariant.
pub fn round_to(value: Decimal, step: Decimal, mode: RoundMode) -> Decimal {
    assert!(step > Decimal::ZERO, "rounding step must be positive");

    let units = value / step;
    let rounded_units = match mode {
        RoundMode::FloorStep => units.floor(),
        RoundMode::CeilStep => units.ceil(),
        RoundMode::NearestStep => {
            if units >= Decimal::ZERO {
                (units + dec!(0.5)).floor()
            } else {
                (units - dec!(0.5)).ceil()
            }
        },
    };
    rounded_units * step
}

/// "ESTV rounding": round down to the nearest 0.05.
pub fn round_down_005(value: Decimal) -> Decimal {
    round_to(value, dec!(0.05), RoundMode::FloorStep)
}

/// "Taxable step-ceiling": round up to the nearest 100.
pub fn ceil_to_100(value: Decimal) -> Decimal {
    round_to(value, dec!(100), RoundMode::CeilStep)
}
