//! # Numeric Helpers
//!
//! Comparison and integrality tests over `serde_json::Number`.
//!
//! A JSON number is stored as `i64`, `u64`, or `f64`. Comparing everything
//! through `f64` would make `9007199254740993` equal to `9007199254740992`,
//! so integers are widened to `i128` and compared exactly. Only when a float
//! is involved does comparison fall back to `f64`.

use std::cmp::Ordering;

use serde_json::Number;

/// Widen an integer-valued number to `i128`. Floats return `None`.
fn as_i128(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

/// Compare two numbers, exactly when both are integers.
///
/// Returns `None` only if a float operand cannot be represented as `f64`,
/// which does not happen for values parsed by `serde_json`.
pub fn compare(a: &Number, b: &Number) -> Option<Ordering> {
    match (as_i128(a), as_i128(b)) {
        (Some(x), Some(y)) => Some(x.cmp(&y)),
        _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
    }
}

/// Numeric equality: `5` and `5.0` are equal.
pub fn equals(a: &Number, b: &Number) -> bool {
    compare(a, b) == Some(Ordering::Equal)
}

/// True if the number has no fractional part (`5` and `5.0`, not `5.5`).
pub fn is_integral(n: &Number) -> bool {
    if as_i128(n).is_some() {
        return true;
    }
    n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
}
