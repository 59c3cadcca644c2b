//! False-position (regula falsi) root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// False-position root-finding algorithm.
///
/// A bracketing method that replaces the midpoint of bisection with the
/// root of the straight line through the bracket endpoints. Faster than
/// bisection on smooth functions, though one endpoint may remain fixed
/// while the other converges.
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
/// use trellis_math::solvers::{false_position, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let result = false_position(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-8);
/// ```
pub fn false_position<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    config.validate()?;

    let lo = a.min(b);
    let hi = a.max(b);

    let mut evaluations = 2;
    let f_lo = f(lo);
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

    // Orient the bracket so that f is negative on the low side
    let (mut x_low, mut f_low, mut x_high, mut f_high) = if f_lo < 0.0 {
        (lo, f_lo, hi, f_hi)
    } else {
        (hi, f_hi, lo, f_lo)
    };

    let mut f_root = f_lo;
    while evaluations < config.max_evaluations {
        // Root of the secant line through the bracket endpoints
        let root = x_low + (x_high - x_low) * f_low / (f_low - f_high);
        f_root = f(root);
        evaluations += 1;

        // Replace the endpoint whose sign matches
        let step;
        if f_root < 0.0 {
            step = x_low - root;
            x_low = root;
            f_low = f_root;
        } else {
            step = x_high - root;
            x_high = root;
            f_high = f_root;
        }

        // Check for convergence
        if f_root.abs() < config.accuracy || step.abs() < config.accuracy {
            return Ok(SolverResult {
                root,
                evaluations,
                residual: f_root,
            });
        }
    }

    Err(MathError::max_evaluations_exceeded(
        evaluations,
        f_root.abs(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result = false_position(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-8);
    }

    #[test]
    fn test_descending_function() {
        // f decreasing across the bracket exercises the orientation step
        let f = |x: f64| 2.0 - x * x;

        let result = false_position(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-8);
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| x * x - 2.0;

        let result = false_position(f, 2.0, 3.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::InvalidBracket { .. })));
    }

    #[test]
    fn test_root_at_endpoint() {
        let f = |x: f64| x - 1.0;

        let result = false_position(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 1.0, epsilon = 1e-9);
        assert_eq!(result.evaluations, 2);
    }

    #[test]
    fn test_one_sided_convergence() {
        // Convex function: the high endpoint sticks, the low one converges
        let f = |x: f64| x * x * x - 2.0 * x - 5.0;

        let result = false_position(f, 2.0, 3.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 2.094_551_481_542_327, epsilon = 1e-7);
    }
}
