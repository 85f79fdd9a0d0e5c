//! WAD (1e18) and basis-point fixed-point arithmetic on 256-bit integers.
//!
//! Every helper is checked: a zero denominator yields
//! [`SettleError::DivisionByZero`] and an intermediate product that does not
//! fit in 256 bits yields [`SettleError::Overflow`]. Division rounds toward
//! zero unless the function name ends in `_up`.

use opensettle_types::{
    Result, SettleError, U256,
    constants::{BPS_DENOMINATOR, WAD},
};
use rust_decimal::Decimal;

/// Iteration ceiling for [`cbrt`]. Newton from an over-estimate converges
/// well within this for any 256-bit input.
pub const CBRT_MAX_ITERATIONS: usize = 128;

/// `BPS_DENOMINATOR` as a `U256`.
#[must_use]
pub fn bps_denominator() -> U256 {
    U256::from(BPS_DENOMINATOR)
}

fn checked_product(a: U256, b: U256, operation: &'static str) -> Result<U256> {
    a.checked_mul(b).ok_or(SettleError::Overflow { operation })
}

fn ensure_nonzero(d: U256, operation: &'static str) -> Result<()> {
    if d.is_zero() {
        return Err(SettleError::DivisionByZero { operation });
    }
    Ok(())
}

/// `a * b / d`, rounded down.
pub fn mul_div(a: U256, b: U256, d: U256) -> Result<U256> {
    ensure_nonzero(d, "mul_div")?;
    Ok(checked_product(a, b, "mul_div")? / d)
}

/// `a * b / d`, rounded up.
pub fn mul_div_up(a: U256, b: U256, d: U256) -> Result<U256> {
    ensure_nonzero(d, "mul_div_up")?;
    let product = checked_product(a, b, "mul_div_up")?;
    let quotient = product / d;
    if (product % d).is_zero() {
        Ok(quotient)
    } else {
        Ok(quotient + U256::from(1))
    }
}

/// `a * b / WAD`, rounded down.
pub fn mul_wad(a: U256, b: U256) -> Result<U256> {
    Ok(checked_product(a, b, "mul_wad")? / WAD)
}

/// `a * b / WAD`, rounded up.
pub fn mul_wad_up(a: U256, b: U256) -> Result<U256> {
    mul_div_up(a, b, WAD)
}

/// `a * WAD / b`, rounded down.
pub fn div_wad(a: U256, b: U256) -> Result<U256> {
    ensure_nonzero(b, "div_wad")?;
    Ok(checked_product(a, WAD, "div_wad")? / b)
}

/// `a * WAD / b`, rounded up.
pub fn div_wad_up(a: U256, b: U256) -> Result<U256> {
    ensure_nonzero(b, "div_wad_up")?;
    mul_div_up(a, WAD, b)
}

/// `amount * bps / 10_000`, rounded down.
pub fn apply_bps(amount: U256, bps: u32) -> Result<U256> {
    Ok(checked_product(amount, U256::from(bps), "apply_bps")? / bps_denominator())
}

/// `part` as a share of `whole`, in basis points, rounded down.
pub fn to_bps(part: U256, whole: U256) -> Result<U256> {
    ensure_nonzero(whole, "to_bps")?;
    Ok(checked_product(part, bps_denominator(), "to_bps")? / whole)
}

/// Integer square root, rounded down (Babylonian iteration to convergence).
#[must_use]
pub fn sqrt(x: U256) -> U256 {
    if x.is_zero() {
        return U256::ZERO;
    }
    let two = U256::from(2);
    // ceil(x / 2) without overflowing at U256::MAX
    let mut z = x / two + x % two;
    let mut y = x;
    while z < y {
        y = z;
        z = (x / z + z) / two;
    }
    y
}

/// Integer cube root, rounded down.
///
/// Starts from a power of two at or above the root and runs Newton steps
/// until they stop decreasing, bounded by [`CBRT_MAX_ITERATIONS`].
#[must_use]
pub fn cbrt(x: U256) -> U256 {
    if x.is_zero() {
        return U256::ZERO;
    }
    let three = U256::from(3);
    let two = U256::from(2);
    let mut z = U256::from(1) << x.bit_len().div_ceil(3);
    for _ in 0..CBRT_MAX_ITERATIONS {
        let next = (two * z + x / (z * z)) / three;
        if next >= z {
            break;
        }
        z = next;
    }
    // Floor correction in case the iteration budget ran out above the root.
    while cube_exceeds(z, x) {
        z -= U256::from(1);
    }
    z
}

fn cube_exceeds(z: U256, x: U256) -> bool {
    z.checked_mul(z)
        .and_then(|sq| sq.checked_mul(z))
        .is_none_or(|cube| cube > x)
}

/// Square root of a WAD value, as a WAD value.
pub fn sqrt_wad(x: U256) -> Result<U256> {
    Ok(sqrt(checked_product(x, WAD, "sqrt_wad")?))
}

/// Exact decimal value of a WAD amount.
///
/// Returns `None` when the value exceeds `Decimal`'s 96-bit mantissa.
#[must_use]
pub fn to_decimal(wad: U256) -> Option<Decimal> {
    let raw = i128::try_from(u128::try_from(wad).ok()?).ok()?;
    Decimal::try_from_i128_with_scale(raw, 18)
        .ok()
        .map(|d| d.normalize())
}

/// Human-readable WAD amount for log fields: `0.9` rather than
/// `900000000000000000`. Falls back to the raw integer past `Decimal`'s range.
#[must_use]
pub fn format_wad(wad: U256) -> String {
    to_decimal(wad).map_or_else(|| wad.to_string(), |d| d.to_string())
}
