//! Checked integer arithmetic shared by the pricing and liquidity paths.
//!
//! Every division in this crate floors; there is no rounding-up variant
//! anywhere. Overflow is an error, never a wrap.

use crate::errors::PoolError;

/// Computes `floor(a * b / c)` with a `u128` intermediate product.
///
/// Fails with [`PoolError::Arithmetic`] when `c == 0` or when the quotient
/// does not fit in a `u64`.
pub fn mul_div(a: u64, b: u64, c: u64) -> Result<u64, PoolError> {
    let product = (a as u128)
        .checked_mul(b as u128)
        .ok_or(PoolError::Arithmetic)?;
    let quotient = product
        .checked_div(c as u128)
        .ok_or(PoolError::Arithmetic)?;
    to_u64(quotient)
}

/// Checked narrowing from the `u128` working width back to `u64`.
pub fn to_u64(value: u128) -> Result<u64, PoolError> {
    u64::try_from(value).map_err(|_| PoolError::Arithmetic)
}
