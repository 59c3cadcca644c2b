//! One-factor short-rate lattice, optionally fitted to a discount curve.
//!
//! Fitting works slice by slice. With the state prices of slice i in hand,
//! the price of a zero-coupon bond maturing at t_{i+1} is a monotone
//! function of a single scalar shift added to every node's state variable.
//! A bracketing solve picks the shift that reproduces the input curve's
//! discount factor exactly, the slice's state prices are propagated one
//! step forward, and the next slice repeats the procedure. Each solve
//! starts from the previous slice's shift, which is usually within a few
//! iterations of the answer.

use log::{debug, trace};
use trellis_curves::DiscountCurve;
use trellis_math::solvers::{brent_with_guess, SolverConfig};

use crate::dynamics::ShortRateDynamics;
use crate::error::LatticeResult;
use crate::lattice::Lattice;
use crate::time_grid::TimeGrid;
use crate::tree::TrinomialTree;

/// Accuracy target for each per-slice calibration solve.
pub const FIT_ACCURACY: f64 = 1.0e-7;

/// Function-evaluation budget for each per-slice calibration solve.
pub const FIT_MAX_EVALUATIONS: usize = 1000;

/// Half-width of the shift search bracket. Wide enough for any plausible
/// rate scale in either the rate or its log.
const FIT_BRACKET: f64 = 100.0;

/// Starting guess for the first slice's shift; later slices warm-start
/// from the previous solution.
const FIT_INITIAL_GUESS: f64 = 1.0;

/// A trinomial short-rate lattice with per-slice calibration shifts.
///
/// The lattice diffuses the dynamics' state variable on a [`TrinomialTree`]
/// and adds a deterministic shift `theta[i]` to every node of slice i
/// before mapping through [`ShortRateDynamics::short_rate`]. A plain tree
/// carries zero shifts; a fitted tree chooses them so the lattice reprices
/// the input curve's discount factors at every grid time.
///
/// # Example
///
/// ```rust
/// use trellis_curves::{DiscountCurve, FlatCurve};
/// use trellis_lattice::{
///     IdentityDynamics, Lattice, OrnsteinUhlenbeckProcess, ShortRateTree, TimeGrid,
/// };
///
/// let dynamics = IdentityDynamics::new(OrnsteinUhlenbeckProcess::new(0.1, 0.01));
/// let grid = TimeGrid::uniform(5.0, 20).unwrap();
/// let curve = FlatCurve::continuous(0.05);
/// let lattice = ShortRateTree::fitted(Box::new(dynamics), &grid, &curve).unwrap();
///
/// let repriced: f64 = lattice.state_prices(20).iter().sum();
/// assert!((repriced - curve.discount(5.0).unwrap()).abs() < 1e-6);
/// ```
pub struct ShortRateTree {
    tree: TrinomialTree,
    dynamics: Box<dyn ShortRateDynamics>,
    grid: TimeGrid,
    /// Per-slice shift added to the state variable; one entry per grid
    /// point, the terminal entry repeating the last fitted value.
    theta: Vec<f64>,
    /// Constant spread added to the short rate in discounting only.
    spread: f64,
    state_prices: Vec<Vec<f64>>,
}

impl std::fmt::Debug for ShortRateTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShortRateTree")
            .field("tree", &self.tree)
            .field("grid", &self.grid)
            .field("theta", &self.theta)
            .field("spread", &self.spread)
            .field("state_prices", &self.state_prices)
            .finish()
    }
}

impl ShortRateTree {
    /// Builds an unfitted lattice: all shifts are zero and the short rate
    /// comes straight from the dynamics.
    ///
    /// # Errors
    ///
    /// Propagates tree construction failures.
    pub fn new(dynamics: Box<dyn ShortRateDynamics>, grid: &TimeGrid) -> LatticeResult<Self> {
        let tree = TrinomialTree::build(dynamics.process(), grid)?;
        let mut lattice = Self {
            tree,
            dynamics,
            grid: grid.clone(),
            theta: vec![0.0; grid.len()],
            spread: 0.0,
            state_prices: Vec::new(),
        };
        lattice.recompute_state_prices();
        Ok(lattice)
    }

    /// Builds a lattice whose shifts are calibrated so that state prices
    /// reprice `curve` at every grid time.
    ///
    /// # Errors
    ///
    /// Propagates tree construction failures, curve lookups past the
    /// curve's horizon, and calibration solves that fail to bracket a
    /// root or exhaust their evaluation budget.
    pub fn fitted(
        dynamics: Box<dyn ShortRateDynamics>,
        grid: &TimeGrid,
        curve: &dyn DiscountCurve,
    ) -> LatticeResult<Self> {
        let tree = TrinomialTree::build(dynamics.process(), grid)?;
        let config = SolverConfig::new(FIT_ACCURACY, FIT_MAX_EVALUATIONS);

        let mut theta: Vec<f64> = Vec::with_capacity(grid.len());
        let mut state_prices: Vec<Vec<f64>> = Vec::with_capacity(grid.len());
        state_prices.push(vec![1.0]);

        let mut guess = FIT_INITIAL_GUESS;
        for i in 0..grid.step_count() {
            let t = grid.time(i);
            let dt = grid.dt(i);
            let target = curve.discount(grid.time(i + 1))?;
            let prices = &state_prices[i];

            let objective = |shift: f64| {
                let repriced: f64 = (0..tree.size(i))
                    .map(|j| {
                        let rate = dynamics.short_rate(t, tree.underlying(i, j) + shift);
                        prices[j] * (-rate * dt).exp()
                    })
                    .sum();
                target - repriced
            };

            let solved = brent_with_guess(objective, -FIT_BRACKET, FIT_BRACKET, guess, &config)?;
            let shift = solved.root;
            trace!(
                "Fitted slice {}: shift {:.8} in {} evaluations",
                i,
                shift,
                solved.evaluations
            );

            let mut next = vec![0.0; tree.size(i + 1)];
            for j in 0..tree.size(i) {
                let rate = dynamics.short_rate(t, tree.underlying(i, j) + shift);
                let discounted = prices[j] * (-rate * dt).exp();
                for b in 0..3 {
                    next[tree.descendant(i, j, b)] += discounted * tree.probability(i, j, b);
                }
            }
            state_prices.push(next);
            theta.push(shift);
            guess = shift;
        }

        // The terminal slice has no discounting step of its own; repeating
        // the last shift keeps theta aligned with the grid so terminal
        // payoffs see a sensible rate
        theta.push(theta.last().copied().unwrap_or(0.0));

        debug!(
            "Fitted short-rate lattice: {} slices, terminal width {}",
            grid.len(),
            tree.size(grid.step_count())
        );

        Ok(Self {
            tree,
            dynamics,
            grid: grid.clone(),
            theta,
            spread: 0.0,
            state_prices,
        })
    }

    /// Returns the lattice with a constant discounting spread over the
    /// short rate. Shifts are untouched; state prices are rebuilt so
    /// [`Lattice::present_value`] stays consistent.
    #[must_use]
    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self.recompute_state_prices();
        self
    }

    /// Per-slice calibration shifts, one per grid point.
    #[must_use]
    pub fn theta(&self) -> &[f64] {
        &self.theta
    }

    /// The discounting spread.
    #[must_use]
    pub fn spread(&self) -> f64 {
        self.spread
    }

    /// The underlying tree geometry.
    #[must_use]
    pub fn tree(&self) -> &TrinomialTree {
        &self.tree
    }

    fn recompute_state_prices(&mut self) {
        let mut prices = vec![vec![1.0]];
        for i in 0..self.grid.step_count() {
            let mut next = vec![0.0; self.tree.size(i + 1)];
            for j in 0..self.tree.size(i) {
                let discounted = prices[i][j] * self.discount(i, j);
                for b in 0..3 {
                    next[self.tree.descendant(i, j, b)] +=
                        discounted * self.tree.probability(i, j, b);
                }
            }
            prices.push(next);
        }
        self.state_prices = prices;
    }
}

impl Lattice for ShortRateTree {
    fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    fn branch_count(&self) -> usize {
        3
    }

    fn size(&self, i: usize) -> usize {
        self.tree.size(i)
    }

    /// The fitted short rate at the node.
    fn underlying(&self, i: usize, index: usize) -> f64 {
        self.dynamics
            .short_rate(self.grid.time(i), self.tree.underlying(i, index) + self.theta[i])
    }

    fn descendant(&self, i: usize, index: usize, branch: usize) -> usize {
        self.tree.descendant(i, index, branch)
    }

    fn probability(&self, i: usize, index: usize, branch: usize) -> f64 {
        self.tree.probability(i, index, branch)
    }

    fn discount(&self, i: usize, index: usize) -> f64 {
        (-(self.underlying(i, index) + self.spread) * self.grid.dt(i)).exp()
    }

    fn state_prices(&self, i: usize) -> &[f64] {
        &self.state_prices[i]
    }
}
