//! Ridder's root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Ridder's root-finding algorithm.
///
/// A bracketing method that evaluates the midpoint, then applies an
/// exponential correction factor to place the next trial point. Convergence
/// is superlinear while the bracket remains valid at every step.
///
/// Each iteration spends **two** function evaluations (midpoint and trial
/// point); the evaluation budget still binds on total evaluations.
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
/// use trellis_math::solvers::{ridder, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let result = ridder(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-8);
/// ```
pub fn ridder<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
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

    let mut x_low = lo;
    let mut f_low = f_lo;
    let mut x_high = hi;
    let mut f_high = f_hi;
    let mut previous: Option<f64> = None;
    let mut last_residual = f_lo.abs().min(f_hi.abs());

    // Two evaluations per iteration must fit in the remaining budget
    while evaluations + 1 < config.max_evaluations {
        let x_mid = (x_low + x_high) / 2.0;
        let f_mid = f(x_mid);
        evaluations += 1;

        // The bracket keeps f_low * f_high < 0, so s > |f_mid| > 0
        let s = (f_mid * f_mid - f_low * f_high).sqrt();

        // Exponential updating formula
        let direction = if f_low >= f_high { 1.0 } else { -1.0 };
        let root = x_mid + (x_mid - x_low) * direction * f_mid / s;
        let f_root = f(root);
        evaluations += 1;
        last_residual = f_root.abs();

        // Check for convergence: residual, step from previous trial, or
        // bracket collapse below
        if f_root.abs() < config.accuracy {
            return Ok(SolverResult {
                root,
                evaluations,
                residual: f_root,
            });
        }
        if let Some(prev) = previous {
            if (root - prev).abs() < config.accuracy {
                return Ok(SolverResult {
                    root,
                    evaluations,
                    residual: f_root,
                });
            }
        }
        previous = Some(root);

        // Bookkeeping to keep the root bracketed
        if f_mid * f_root < 0.0 {
            x_low = x_mid;
            f_low = f_mid;
            x_high = root;
            f_high = f_root;
        } else if f_low * f_root < 0.0 {
            x_high = root;
            f_high = f_root;
        } else {
            x_low = root;
            f_low = f_root;
        }

        if (x_high - x_low).abs() < config.accuracy {
            return Ok(SolverResult {
                root,
                evaluations,
                residual: f_root,
            });
        }
    }

    Err(MathError::max_evaluations_exceeded(evaluations, last_residual))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result = ridder(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-8);
    }

    #[test]
    fn test_exponential_function() {
        // e^x - 2 has its root at ln(2)
        let f = |x: f64| x.exp() - 2.0;

        let result = ridder(f, 0.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::LN_2, epsilon = 1e-8);
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| x * x - 2.0;

        let result = ridder(f, 2.0, 3.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::InvalidBracket { .. })));
    }

    #[test]
    fn test_faster_than_bisection() {
        let f = |x: f64| x * x - 2.0;
        let config = SolverConfig::default();

        let result = ridder(f, 1.0, 2.0, &config).unwrap();

        // Superlinear: well under bisection's ~35 evaluations
        assert!(result.evaluations < 20);
    }

    #[test]
    fn test_reversed_bracket() {
        let f = |x: f64| x * x - 2.0;

        let result = ridder(f, 2.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-8);
    }
}
