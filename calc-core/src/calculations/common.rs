//! Rounding and clamping helpers shared by the calculators.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use calc_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps negative values to zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use calc_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-5.00)), dec!(0));
/// assert_eq!(non_negative(dec!(5.00)), dec!(5.00));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// `numerator / denominator`, or zero when the denominator is zero.
pub fn ratio_or_zero(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

/// Returns `Err(field)` when `value` is negative.
pub(crate) fn require_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, super::CalcError> {
    if value < Decimal::ZERO {
        Err(super::CalcError::NegativeAmount { field, value })
    } else {
        Ok(value)
    }
}
