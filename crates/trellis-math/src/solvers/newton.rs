//! Newton-Raphson root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration:
/// `x_{n+1} = x_n - f(x_n) / f'(x_n)`
///
/// This method has quadratic convergence near the root but requires
/// the derivative of the function and an open search (no bracket is
/// maintained). The evaluation budget counts calls to `f`; derivative
/// calls are the caller's own cost.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `initial_guess` - Starting point for the iteration
/// * `config` - Solver configuration
///
/// # Returns
///
/// The root and evaluation statistics, or an error if convergence fails.
///
/// # Example
///
/// ```rust
/// use trellis_math::solvers::{newton_raphson, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    config.validate()?;

    let mut x = initial_guess;
    let mut evaluations = 0;
    let mut fx = 0.0;

    while evaluations < config.max_evaluations {
        fx = f(x);
        evaluations += 1;

        // Check for convergence
        if fx.abs() < config.accuracy {
            return Ok(SolverResult {
                root: x,
                evaluations,
                residual: fx,
            });
        }

        let dfx = df(x);

        // Check for zero derivative
        if dfx.abs() < 1e-15 {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        // Newton step
        let step = fx / dfx;
        x -= step;

        // Check for step convergence
        if step.abs() < config.accuracy {
            fx = f(x);
            evaluations += 1;
            return Ok(SolverResult {
                root: x,
                evaluations,
                residual: fx,
            });
        }
    }

    Err(MathError::max_evaluations_exceeded(evaluations, fx.abs()))
}

/// Newton-Raphson with numerical derivative estimation.
///
/// Uses central finite differences to estimate the derivative when an
/// analytical derivative is not available. The two difference evaluations
/// per step are not charged against the budget; only the residual
/// evaluations are.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `initial_guess` - Starting point for the iteration
/// * `config` - Solver configuration
pub fn newton_raphson_numerical<F>(
    f: F,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let h = 1e-8; // Step size for numerical differentiation

    let df = |x: f64| {
        let f1 = f(x + h);
        let f2 = f(x - h);
        (f1 - f2) / (2.0 * h)
    };

    newton_raphson(&f, df, initial_guess, config)
}
