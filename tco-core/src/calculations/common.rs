//! Rounding helpers for presenting calculated amounts.
//!
//! The calculator itself never rounds. These are applied by callers when an
//! amount is written out for people to read.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tco_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(497142.857142)), dec!(497142.86));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a decimal value to a whole number, half away from zero.
///
/// Used for the headline figures, which are shown without a fractional part.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tco_core::calculations::common::round_to_units;
///
/// assert_eq!(round_to_units(dec!(2697142.857)), dec!(2697143));
/// assert_eq!(round_to_units(dec!(-0.5)), dec!(-1));
/// ```
pub fn round_to_units(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
