use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Integer division rounding toward negative infinity.
///
/// ## Errors
/// - `RuntimeError::DivisionByZero` if `divisor` is zero.
/// - `RuntimeError::Overflow` for `i64::MIN / -1`.
///
/// ## Example
/// ```
/// use gambl::util::num::floor_div;
///
/// assert_eq!(floor_div(7, 2).unwrap(), 3);
/// assert_eq!(floor_div(-7, 2).unwrap(), -4);
/// assert_eq!(floor_div(7, -2).unwrap(), -4);
/// assert!(floor_div(1, 0).is_err());
/// ```
pub fn floor_div(dividend: i64, divisor: i64) -> EvalResult<i64> {
    if divisor == 0 {
        return Err(RuntimeError::DivisionByZero);
    }
    let quotient = dividend.checked_div(divisor)
                           .ok_or_else(|| overflow("/"))?;
    if dividend % divisor != 0 && (dividend < 0) != (divisor < 0) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

/// Integer remainder taking the sign of the divisor.
///
/// Pairs with [`floor_div`] so that
/// `floor_div(a, b) * b + floor_mod(a, b) == a`.
///
/// ## Errors
/// `RuntimeError::DivisionByZero` if `divisor` is zero.
///
/// ## Example
/// ```
/// use gambl::util::num::floor_mod;
///
/// assert_eq!(floor_mod(7, 3).unwrap(), 1);
/// assert_eq!(floor_mod(-7, 3).unwrap(), 2);
/// assert_eq!(floor_mod(7, -3).unwrap(), -2);
/// assert_eq!(floor_mod(i64::MIN, -1).unwrap(), 0);
/// ```
pub fn floor_mod(dividend: i64, divisor: i64) -> EvalResult<i64> {
    if divisor == 0 {
        return Err(RuntimeError::DivisionByZero);
    }
    let remainder = dividend.checked_rem(divisor).unwrap_or(0);
    if remainder != 0 && (remainder < 0) != (divisor < 0) {
        Ok(remainder + divisor)
    } else {
        Ok(remainder)
    }
}

/// Raises `base` to a non-negative integer power with overflow checking.
///
/// ## Errors
/// - `RuntimeError::InvalidArgument` for a negative exponent.
/// - `RuntimeError::Overflow` if the result does not fit in an `i64`.
///
/// ## Example
/// ```
/// use gambl::util::num::checked_pow;
///
/// assert_eq!(checked_pow(2, 10).unwrap(), 1024);
/// assert_eq!(checked_pow(-3, 3).unwrap(), -27);
/// assert!(checked_pow(2, -1).is_err());
/// assert!(checked_pow(2, 64).is_err());
/// ```
pub fn checked_pow(base: i64, exponent: i64) -> EvalResult<i64> {
    if exponent < 0 {
        return Err(RuntimeError::InvalidArgument { details:
                                                       format!("negative exponent {exponent}") });
    }
    // Bases -1, 0 and 1 stay bounded for any exponent.
    match base {
        0 => return Ok(i64::from(exponent == 0)),
        1 => return Ok(1),
        -1 => return Ok(if exponent % 2 == 0 { 1 } else { -1 }),
        _ => {},
    }
    let exponent = u32::try_from(exponent).map_err(|_| overflow("^"))?;
    base.checked_pow(exponent).ok_or_else(|| overflow("^"))
}

/// Resolves a possibly negative index against a length.
///
/// Non-negative indices count from the front, negative ones from the back,
/// so `-1` is the last position.
///
/// ## Errors
/// `RuntimeError::IndexOutOfRange` if the index is outside `-len..len`.
///
/// ## Example
/// ```
/// use gambl::util::num::normalize_index;
///
/// assert_eq!(normalize_index(0, 3).unwrap(), 0);
/// assert_eq!(normalize_index(-1, 3).unwrap(), 2);
/// assert!(normalize_index(3, 3).is_err());
/// assert!(normalize_index(-4, 3).is_err());
/// ```
pub fn normalize_index(index: i64, len: usize) -> EvalResult<usize> {
    let out_of_range = || RuntimeError::IndexOutOfRange { index, len };
    let len_i64 = i64::try_from(len).map_err(|_| out_of_range())?;

    let resolved = if index < 0 { index + len_i64 } else { index };
    if (0..len_i64).contains(&resolved) {
        usize::try_from(resolved).map_err(|_| out_of_range())
    } else {
        Err(out_of_range())
    }
}

/// Converts a count to `i64`, failing with `Overflow` if it does not fit.
///
/// ## Example
/// ```
/// use gambl::util::num::usize_to_i64_checked;
///
/// assert_eq!(usize_to_i64_checked(42, "len").unwrap(), 42);
/// ```
pub fn usize_to_i64_checked(value: usize, op: &str) -> EvalResult<i64> {
    i64::try_from(value).map_err(|_| overflow(op))
}

/// Converts a repetition count to `usize`.
///
/// Negative counts repeat zero times.
///
/// ## Example
/// ```
/// use gambl::util::num::repeat_count;
///
/// assert_eq!(repeat_count(3).unwrap(), 3);
/// assert_eq!(repeat_count(-2).unwrap(), 0);
/// ```
pub fn repeat_count(count: i64) -> EvalResult<usize> {
    if count <= 0 {
        return Ok(0);
    }
    usize::try_from(count).map_err(|_| overflow("*"))
}

/// Total length of `len` items repeated `times` times.
///
/// ## Errors
/// `RuntimeError::Overflow` if the product overflows or exceeds the largest
/// allocation the host supports (`isize::MAX`).
///
/// ## Example
/// ```
/// use gambl::util::num::repeat_len;
///
/// assert_eq!(repeat_len(2, 3).unwrap(), 6);
/// assert_eq!(repeat_len(0, usize::MAX).unwrap(), 0);
/// assert!(repeat_len(2, usize::MAX).is_err());
/// assert!(repeat_len(2, isize::MAX as usize).is_err());
/// ```
pub fn repeat_len(len: usize, times: usize) -> EvalResult<usize> {
    len.checked_mul(times)
       .filter(|&total| isize::try_from(total).is_ok())
       .ok_or_else(|| overflow("*"))
}

/// Builds an overflow error for the given operator.
pub(crate) fn overflow(op: &str) -> RuntimeError {
    RuntimeError::Overflow { op: op.to_string() }
}
