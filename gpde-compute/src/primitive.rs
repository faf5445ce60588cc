//! Arithmetic on the numeric variants of [`Primary`].
//!
//! Integers are kept exact as long as the result fits in an [`i64`]; otherwise the computation
//! falls back to [`f64`]. None of these functions ever produce a non-finite [`Primary::Float`].

use crate::symbolic::expr::Primary;

/// Creates a [`Primary`] from a number literal, preferring [`Primary::Integer`] when the value is
/// integral.
pub fn number(value: f64) -> Primary {
    // integers above 2^53 cannot be represented exactly anyway
    if value.fract() == 0.0 && value.abs() <= 9_007_199_254_740_992.0 {
        Primary::Integer(value as i64)
    } else {
        Primary::Float(value)
    }
}

/// Returns the value of a numeric [`Primary`] as an [`f64`].
pub fn as_f64(primary: &Primary) -> Option<f64> {
    match primary {
        Primary::Integer(int) => Some(*int as f64),
        Primary::Float(float) => Some(*float),
        _ => None,
    }
}

fn finite(value: f64) -> Option<Primary> {
    value.is_finite().then_some(Primary::Float(value))
}

/// Adds two numeric [`Primary`]s. Returns [`None`] if either is not a number, or if the result
/// would not be finite.
pub fn add(lhs: &Primary, rhs: &Primary) -> Option<Primary> {
    match (lhs, rhs) {
        (Primary::Integer(lhs), Primary::Integer(rhs)) => match lhs.checked_add(*rhs) {
            Some(sum) => Some(Primary::Integer(sum)),
            None => finite(*lhs as f64 + *rhs as f64),
        },
        _ => finite(as_f64(lhs)? + as_f64(rhs)?),
    }
}

/// Multiplies two numeric [`Primary`]s. Returns [`None`] if either is not a number, or if the
/// result would not be finite.
pub fn mul(lhs: &Primary, rhs: &Primary) -> Option<Primary> {
    match (lhs, rhs) {
        (Primary::Integer(lhs), Primary::Integer(rhs)) => match lhs.checked_mul(*rhs) {
            Some(product) => Some(Primary::Integer(product)),
            None => finite(*lhs as f64 * *rhs as f64),
        },
        _ => finite(as_f64(lhs)? * as_f64(rhs)?),
    }
}

/// Raises a numeric [`Primary`] to a numeric power.
///
/// An integer raised to a negative integer power is **not** folded, so that exact fractions such
/// as `2^-1` survive until numerical evaluation.
pub fn pow(base: &Primary, exp: &Primary) -> Option<Primary> {
    match (base, exp) {
        (Primary::Integer(base), Primary::Integer(exp)) => {
            if *exp < 0 {
                return None;
            }
            let exp = u32::try_from(*exp).ok()?;
            match base.checked_pow(exp) {
                Some(power) => Some(Primary::Integer(power)),
                None => finite((*base as f64).powf(exp as f64)),
            }
        },
        _ => finite(as_f64(base)?.powf(as_f64(exp)?)),
    }
}

/// Negates a numeric [`Primary`].
pub fn neg(primary: &Primary) -> Option<Primary> {
    match primary {
        Primary::Integer(int) => match int.checked_neg() {
            Some(neg) => Some(Primary::Integer(neg)),
            None => finite(-(*int as f64)),
        },
        Primary::Float(float) => Some(Primary::Float(-float)),
        _ => None,
    }
}
