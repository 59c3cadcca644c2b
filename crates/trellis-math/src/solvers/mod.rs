//! Root-finding algorithms.
//!
//! This module provides scalar equation solvers used for lattice calibration
//! and model fitting:
//!
//! - [`brent`]: Robust method combining bisection, secant, and inverse quadratic
//! - [`brent_with_guess`]: Brent with a warm-start guess inside the bracket
//! - [`bisection`]: Simple and reliable bracketing method
//! - [`false_position`]: Linear-interpolation bracketing method
//! - [`ridder`]: Exponential-update bracketing method
//! - [`secant`]: Derivative-free open method seeded with two guesses
//! - [`newton_raphson`]: Fast quadratic convergence when a derivative is available
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Brent | Fast (superlinear) | Guaranteed | Bracket |
//! | Ridder | Fast (superlinear) | Guaranteed | Bracket |
//! | False Position | Moderate | Guaranteed | Bracket |
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//! | Secant | Fast (superlinear) | May diverge | Two guesses |
//! | Newton-Raphson | Fastest (quadratic) | May diverge | Derivative |
//!
//! # Evaluation Budget
//!
//! The budget in [`SolverConfig::max_evaluations`] counts **function
//! evaluations**, not loop iterations. Ridder spends two evaluations per
//! iteration; the cap still binds on evaluations. A solver that exhausts the
//! budget returns [`MathError::MaxEvaluationsExceeded`](crate::MathError) with
//! the last residual, so the caller can retry with a relaxed tolerance or a
//! wider bracket.
//!
//! # Stopping Criteria
//!
//! Every solver honors two independent criteria and exits on whichever is
//! met first: the residual criterion `|f(x)| < accuracy` and an algorithm-
//! specific step-size criterion (bracket width or last step below accuracy).
//!
//! # Example: Fitting a Rate Shift
//!
//! ```rust
//! use trellis_math::solvers::{brent, SolverConfig};
//!
//! // Find the rate shift that reprices a one-year discount factor of 0.95
//! // over a 4% base rate.
//! let f = |shift: f64| 0.95 - (-(0.04 + shift)).exp();
//!
//! let result = brent(f, -1.0, 1.0, &SolverConfig::default()).unwrap();
//! assert!(f(result.root).abs() < 1e-8);
//! ```

mod bisection;
mod brent;
mod false_position;
mod newton;
mod ridder;
mod secant;

pub use bisection::bisection;
pub use brent::{brent, brent_with_guess};
pub use false_position::false_position;
pub use newton::{newton_raphson, newton_raphson_numerical};
pub use ridder::ridder;
pub use secant::secant;

use crate::error::{MathError, MathResult};

/// Default accuracy for root-finding algorithms.
pub const DEFAULT_ACCURACY: f64 = 1e-9;

/// Default maximum number of function evaluations.
pub const DEFAULT_MAX_EVALUATIONS: usize = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Accuracy for both stopping criteria (residual and step size).
    pub accuracy: f64,
    /// Maximum number of function evaluations.
    pub max_evaluations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            accuracy: DEFAULT_ACCURACY,
            max_evaluations: DEFAULT_MAX_EVALUATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(accuracy: f64, max_evaluations: usize) -> Self {
        Self {
            accuracy,
            max_evaluations,
        }
    }

    /// Sets the accuracy.
    #[must_use]
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = accuracy;
        self
    }

    /// Sets the maximum number of function evaluations.
    #[must_use]
    pub fn with_max_evaluations(mut self, max_evaluations: usize) -> Self {
        self.max_evaluations = max_evaluations;
        self
    }

    pub(crate) fn validate(&self) -> MathResult<()> {
        if self.accuracy <= 0.0 || !self.accuracy.is_finite() {
            return Err(MathError::invalid_input(format!(
                "accuracy must be positive and finite, got {}",
                self.accuracy
            )));
        }
        Ok(())
    }
}

/// Result of a root-finding run.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of function evaluations used.
    pub evaluations: usize,
    /// Final residual (function value at the root).
    pub residual: f64,
}

/// Trait for bracket-based root-finding solvers.
///
/// Provides a unified interface over the bracketing algorithms so callers
/// can select one at run time.
///
/// # Example
///
/// ```rust
/// use trellis_math::solvers::{BrentSolver, Solver, SolverConfig};
///
/// let solver = BrentSolver;
/// let f = |x: f64| x * x - 2.0;
///
/// let result = solver.solve(&f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
pub trait Solver: Send + Sync {
    /// Solves for a root of `f` inside the bracket `[a, b]`.
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
    /// The solution result including root, evaluations, and residual.
    fn solve(
        &self,
        f: &dyn Fn(f64) -> f64,
        a: f64,
        b: f64,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>;

    /// Returns the name of the solver.
    fn name(&self) -> &'static str;
}

/// Brent's method solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrentSolver;

impl Solver for BrentSolver {
    fn solve(
        &self,
        f: &dyn Fn(f64) -> f64,
        a: f64,
        b: f64,
        config: &SolverConfig,
    ) -> MathResult<SolverResult> {
        brent(f, a, b, config)
    }

    fn name(&self) -> &'static str {
        "Brent"
    }
}

/// Bisection solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BisectionSolver;

impl Solver for BisectionSolver {
    fn solve(
        &self,
        f: &dyn Fn(f64) -> f64,
        a: f64,
        b: f64,
        config: &SolverConfig,
    ) -> MathResult<SolverResult> {
        bisection(f, a, b, config)
    }

    fn name(&self) -> &'static str {
        "Bisection"
    }
}

/// False-position solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FalsePositionSolver;

impl Solver for FalsePositionSolver {
    fn solve(
        &self,
        f: &dyn Fn(f64) -> f64,
        a: f64,
        b: f64,
        config: &SolverConfig,
    ) -> MathResult<SolverResult> {
        false_position(f, a, b, config)
    }

    fn name(&self) -> &'static str {
        "False Position"
    }
}

/// Ridder's method solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RidderSolver;

impl Solver for RidderSolver {
    fn solve(
        &self,
        f: &dyn Fn(f64) -> f64,
        a: f64,
        b: f64,
        config: &SolverConfig,
    ) -> MathResult<SolverResult> {
        ridder(f, a, b, config)
    }

    fn name(&self) -> &'static str {
        "Ridder"
    }
}

/// Secant solver implementation.
///
/// The bracket endpoints seed the two initial guesses; the iteration itself
/// is the open secant method and may leave the bracket.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecantSolver;

impl Solver for SecantSolver {
    fn solve(
        &self,
        f: &dyn Fn(f64) -> f64,
        a: f64,
        b: f64,
        config: &SolverConfig,
    ) -> MathResult<SolverResult> {
        secant(f, a, b, config)
    }

    fn name(&self) -> &'static str {
        "Secant"
    }
}
