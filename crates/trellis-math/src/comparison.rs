//! Ulp-scaled floating-point comparison.
//!
//! Grid times, probabilities, and solver residuals are compared with a
//! relative tolerance expressed in units of machine epsilon rather than with
//! `==`. Two comparators are provided:
//!
//! - [`close`]: the difference must be small relative to **both** operands.
//!   Under this rule no nonzero value is close to zero.
//! - [`close_enough`]: the difference must be small relative to **either**
//!   operand, which does treat small values as close to zero.

/// Default comparison scale in units of machine epsilon.
pub const DEFAULT_ULPS: usize = 42;

/// Checks whether two values are close relative to both operands.
///
/// Returns `true` when `|x - y| <= n·ε·|x|` **and** `|x - y| <= n·ε·|y|`,
/// with `n = 42`. Exact equality short-circuits to `true`. When one operand
/// is zero the difference must fall below the squared tolerance, so only
/// values that are zero to within rounding qualify.
///
/// # Example
///
/// ```
/// use trellis_math::comparison::close;
///
/// assert!(close(1.0, 1.0 + f64::EPSILON));
/// assert!(!close(1e-17, 0.0));
/// ```
#[must_use]
pub fn close(x: f64, y: f64) -> bool {
    close_n(x, y, DEFAULT_ULPS)
}

/// Checks whether two values are close relative to both operands, with an
/// explicit epsilon scale.
#[must_use]
pub fn close_n(x: f64, y: f64, n: usize) -> bool {
    // Deals with +infinity and -infinity representations etc.
    if x == y {
        return true;
    }

    let diff = (x - y).abs();
    let tolerance = n as f64 * f64::EPSILON;

    if x * y == 0.0 {
        // x or y is zero
        return diff < tolerance * tolerance;
    }

    diff <= tolerance * x.abs() && diff <= tolerance * y.abs()
}

/// Checks whether two values are close relative to either operand.
///
/// Returns `true` when `|x - y| <= n·ε·|x|` **or** `|x - y| <= n·ε·|y|`,
/// with `n = 42`. This is the comparator used for time-grid lookups and
/// step-condition time matching, where one side may legitimately be zero.
///
/// # Example
///
/// ```
/// use trellis_math::comparison::close_enough;
///
/// assert!(close_enough(2.0, 2.0 + 10.0 * f64::EPSILON));
/// assert!(!close_enough(1.0, 1.1));
/// ```
#[must_use]
pub fn close_enough(x: f64, y: f64) -> bool {
    close_enough_n(x, y, DEFAULT_ULPS)
}

/// Checks whether two values are close relative to either operand, with an
/// explicit epsilon scale.
#[must_use]
pub fn close_enough_n(x: f64, y: f64, n: usize) -> bool {
    if x == y {
        return true;
    }

    let diff = (x - y).abs();
    let tolerance = n as f64 * f64::EPSILON;

    if x * y == 0.0 {
        return diff < tolerance * tolerance;
    }

    diff <= tolerance * x.abs() || diff <= tolerance * y.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_equality() {
        assert!(close(1.5, 1.5));
        assert!(close(0.0, 0.0));
        assert!(close_enough(f64::INFINITY, f64::INFINITY));
    }

    #[test]
    fn test_nearby_values() {
        let x = 1.0;
        let y = 1.0 + 5.0 * f64::EPSILON;
        assert!(close(x, y));
        assert!(close_enough(x, y));
    }

    #[test]
    fn test_distant_values() {
        assert!(!close(1.0, 1.000001));
        assert!(!close_enough(1.0, 1.000001));
    }

    #[test]
    fn test_zero_operand() {
        // No nonzero value of ordinary size is close to zero.
        assert!(!close(1e-10, 0.0));
        assert!(!close_enough(1e-10, 0.0));
        // Values below the squared tolerance are.
        assert!(close(1e-30, 0.0));
        assert!(close_enough(0.0, 1e-30));
    }

    #[test]
    fn test_explicit_scale() {
        let x = 1.0;
        let y = 1.0 + 100.0 * f64::EPSILON;
        assert!(!close_n(x, y, 42));
        assert!(close_n(x, y, 128));
    }

    #[test]
    fn test_negative_values() {
        assert!(close(-3.0, -3.0 - 3.0 * f64::EPSILON));
        assert!(!close(-3.0, 3.0));
    }
}
