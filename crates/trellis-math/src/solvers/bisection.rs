//! Bisection root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Bisection root-finding algorithm.
///
/// A simple and reliable bracketing method that works by repeatedly
/// halving the interval and selecting the subinterval containing the root.
///
/// Requires: `f(a) * f(b) < 0` (opposite signs at endpoints)
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `a` - Lower bound of the bracket
/// * `b` - Upper bound of the bracket
/// * `config` - Solver configuration
///
/// # Returns
///
/// The root and evaluation statistics, or an error if the bracket is invalid
/// or the evaluation budget runs out.
///
/// # Example
///
/// ```rust
/// use trellis_math::solvers::{bisection, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    config.validate()?;

    let mut lo = a.min(b);
    let mut hi = a.max(b);

    let mut evaluations = 2;
    let mut f_lo = f(lo);
    let f_hi = f(hi);

    // Handle case where an endpoint is the root
    if f_lo.abs() < config.accuracy {
        return Ok(SolverResult {
            root: lo,
            evaluations,
            residual: f_lo,
        });
    }
    if f_hi.abs() < config.accuracy {
        return Ok(SolverResult {
            root: hi,
            evaluations,
            residual: f_hi,
        });
    }

    // Check that root is bracketed
    if f_lo * f_hi > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    let mut f_mid = f_lo;
    while evaluations < config.max_evaluations {
        let mid = (lo + hi) / 2.0;
        f_mid = f(mid);
        evaluations += 1;

        // Check for convergence
        if f_mid.abs() < config.accuracy || (hi - lo) / 2.0 < config.accuracy {
            return Ok(SolverResult {
                root: mid,
                evaluations,
                residual: f_mid,
            });
        }

        // Update bracket
        if f_mid * f_lo < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    Err(MathError::max_evaluations_exceeded(
        evaluations,
        f_mid.abs(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-9);
    }

    #[test]
    fn test_reversed_bracket() {
        let f = |x: f64| x * x - 2.0;

        // Reversed bracket should still work
        let result = bisection(f, 2.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| x * x - 2.0;

        // Both endpoints have same sign
        let result = bisection(f, 2.0, 3.0, &SolverConfig::default());

        assert!(result.is_err());
        if let Err(MathError::InvalidBracket { .. }) = result {
            // Expected
        } else {
            panic!("Expected InvalidBracket error");
        }
    }

    #[test]
    fn test_root_at_endpoint() {
        let f = |x: f64| x - 1.0;

        let result = bisection(f, 0.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 1.0, epsilon = 1e-9);
        // No bisection steps were needed
        assert_eq!(result.evaluations, 2);
    }

    #[test]
    fn test_negative_root() {
        let f = |x: f64| x + 1.0;

        let result = bisection(f, -2.0, 0.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_budget_exhaustion() {
        let f = |x: f64| x * x - 2.0;
        let config = SolverConfig::default().with_max_evaluations(4);

        let result = bisection(f, 0.0, 2.0, &config);

        assert!(matches!(
            result,
            Err(MathError::MaxEvaluationsExceeded { evaluations: 4, .. })
        ));
    }
}
