//! Brent's root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Brent's root-finding algorithm.
///
/// Combines the reliability of bisection with the speed of the secant method
/// and inverse quadratic interpolation, never taking a step that would leave
/// the bracket. This is generally the best choice when a derivative is not
/// available.
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
/// use trellis_math::solvers::{brent, SolverConfig};
///
/// // Find root of x^3 - x - 2
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((f(result.root)).abs() < 1e-8);
/// ```
pub fn brent<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let guess = (a + b) / 2.0;
    brent_with_guess(f, a, b, guess, config)
}

/// Brent's algorithm started from a guess inside the bracket.
///
/// Identical to [`brent`] except that the first trial point is the supplied
/// guess rather than the bracket midpoint. Sequential calibrations that solve
/// a family of nearby problems warm-start each solve with the previous
/// solution and converge in a handful of evaluations.
///
/// Requires: `f(a) * f(b) < 0` and `a < guess < b` (after orienting the
/// bracket).
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `a` - Lower bound of the bracket
/// * `b` - Upper bound of the bracket
/// * `guess` - Starting point strictly inside the bracket
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use trellis_math::solvers::{brent_with_guess, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = brent_with_guess(f, 0.0, 2.0, 1.41, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
#[allow(clippy::many_single_char_names)]
pub fn brent_with_guess<F>(
    f: F,
    a: f64,
    b: f64,
    guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    config.validate()?;

    let x_min = a.min(b);
    let x_max = a.max(b);

    let mut evaluations = 2;
    let f_min = f(x_min);
    let f_max = f(x_max);

    // Handle case where an endpoint is the root
    if f_min.abs() < config.accuracy {
        return Ok(SolverResult {
            root: x_min,
            evaluations,
            residual: f_min,
        });
    }
    if f_max.abs() < config.accuracy {
        return Ok(SolverResult {
            root: x_max,
            evaluations,
            residual: f_max,
        });
    }

    // Check that root is bracketed
    if f_min * f_max > 0.0 {
        return Err(MathError::InvalidBracket {
            a: x_min,
            b: x_max,
            fa: f_min,
            fb: f_max,
        });
    }

    if guess <= x_min || guess >= x_max {
        return Err(MathError::invalid_input(format!(
            "guess {guess} is outside the bracket [{x_min}, {x_max}]"
        )));
    }

    // Start with the guess on one side and the opposite-signed endpoint
    // playing both the contrapoint and the previous iterate.
    let mut root = guess;
    let mut f_root = f(root);
    evaluations += 1;
    if f_root.abs() < config.accuracy {
        return Ok(SolverResult {
            root,
            evaluations,
            residual: f_root,
        });
    }

    let (mut prev, mut f_prev) = if f_root * f_min < 0.0 {
        (x_min, f_min)
    } else {
        (x_max, f_max)
    };
    let mut contra = prev;
    let mut f_contra = f_prev;

    let mut d = root - prev;
    let mut e = d;

    while evaluations < config.max_evaluations {
        if (f_root > 0.0 && f_contra > 0.0) || (f_root < 0.0 && f_contra < 0.0) {
            // The contrapoint lost its sign change; fall back to the
            // previous iterate and restart the step history.
            contra = prev;
            f_contra = f_prev;
            d = root - prev;
            e = d;
        }
        if f_contra.abs() < f_root.abs() {
            prev = root;
            root = contra;
            contra = prev;
            f_prev = f_root;
            f_root = f_contra;
            f_contra = f_prev;
        }

        // Convergence check: half-bracket below the step tolerance, or
        // residual below accuracy.
        let tol = 2.0 * f64::EPSILON * root.abs() + 0.5 * config.accuracy;
        let x_mid = (contra - root) / 2.0;
        if x_mid.abs() <= tol || f_root.abs() < config.accuracy {
            return Ok(SolverResult {
                root,
                evaluations,
                residual: f_root,
            });
        }

        if e.abs() >= tol && f_prev.abs() > f_root.abs() {
            // Attempt inverse quadratic interpolation
            let s = f_root / f_prev;
            let mut p;
            let mut q;
            if prev == contra {
                // Only two distinct points: secant step
                p = 2.0 * x_mid * s;
                q = 1.0 - s;
            } else {
                q = f_prev / f_contra;
                let r = f_root / f_contra;
                p = s * (2.0 * x_mid * q * (q - r) - (root - prev) * (r - 1.0));
                q = (q - 1.0) * (r - 1.0) * (s - 1.0);
            }
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();
            let min1 = 3.0 * x_mid * q - (tol * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                // Accept interpolation
                e = d;
                d = p / q;
            } else {
                // Interpolation failed, use bisection
                d = x_mid;
                e = d;
            }
        } else {
            // Bounds decreasing too slowly, use bisection
            d = x_mid;
            e = d;
        }

        prev = root;
        f_prev = f_root;
        if d.abs() > tol {
            root += d;
        } else {
            root += tol.copysign(x_mid);
        }
        f_root = f(root);
        evaluations += 1;
    }

    Err(MathError::max_evaluations_exceeded(
        evaluations,
        f_root.abs(),
    ))
}
