//! Per-person payment rounding.
//!
//! The ideal payment `weight / total_weight * total_amount` is rounded to the
//! nearest multiple of [`ROUNDING_UNIT`], ties away from zero. The ratio is
//! evaluated exactly in 128-bit integers.

use crate::error::DenominatorError;

/// Granularity of every per-person payment.
pub const ROUNDING_UNIT: i64 = 1000;

/// Round `numerator / denominator` to the nearest integer, ties away from zero.
///
/// `denominator` must be positive.
pub fn round_half_away_from_zero(numerator: i128, denominator: i128) -> i128 {
    debug_assert!(denominator > 0);
    let quotient = numerator.abs() / denominator;
    let remainder = numerator.abs() % denominator;
    let magnitude = if remainder * 2 >= denominator {
        quotient + 1
    } else {
        quotient
    };
    if numerator < 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Rounded per-person payment for a role with the given scaled weight.
///
/// Both weights must use the same scale; it cancels out.
pub fn rounded_payment(
    scaled_weight: i128,
    total_weight: i128,
    total_amount: i64,
) -> Result<i64, DenominatorError> {
    if total_weight <= 0 {
        return Err(DenominatorError(total_weight));
    }
    let units = round_half_away_from_zero(
        scaled_weight * i128::from(total_amount),
        total_weight * i128::from(ROUNDING_UNIT),
    );
    Ok(saturate(units * i128::from(ROUNDING_UNIT)))
}

/// Narrow to `i64`, pinning at the bounds.
pub(crate) fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}
