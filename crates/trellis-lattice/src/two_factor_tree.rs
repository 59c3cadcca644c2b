//! Two-factor short-rate lattice built as a product of trinomial trees.
//!
//! Each factor diffuses on its own [`TrinomialTree`]; a product node is a
//! pair of factor nodes and carries nine branches, one per pair of factor
//! branches. Correlation enters through a fixed adjustment to the product
//! probabilities whose rows and columns sum to zero, so marginals and
//! total mass are preserved for any correlation.

use log::debug;

use crate::dynamics::TwoFactorDynamics;
use crate::error::{LatticeError, LatticeResult};
use crate::lattice::Lattice;
use crate::time_grid::TimeGrid;
use crate::tree::TrinomialTree;

/// Probability adjustment for negative correlation, indexed by
/// `[branch1][branch2]`, applied as `|rho| * m / 36`.
const CORRELATION_ADJUSTMENT_NEGATIVE: [[f64; 3]; 3] = [
    [-1.0, -4.0, 5.0],
    [-4.0, 8.0, -4.0],
    [5.0, -4.0, -1.0],
];

/// Probability adjustment for non-negative correlation.
const CORRELATION_ADJUSTMENT_POSITIVE: [[f64; 3]; 3] = [
    [5.0, -4.0, -1.0],
    [-4.0, 8.0, -4.0],
    [-1.0, -4.0, 5.0],
];

/// A product lattice for two correlated diffusive factors.
///
/// Node `index` at slice i decomposes as `index1 = index % size1` and
/// `index2 = index / size1`; branch `b` of the nine decomposes the same
/// way in base 3. The short rate at a node is the dynamics' map of the two
/// factor states plus a precomputed deterministic shift, one per slice,
/// supplied by the calibrated model.
///
/// The correlation adjustment can push a composed probability slightly
/// outside [0, 1] when both factor branchings are strongly tilted; values
/// are used as computed.
pub struct TwoFactorShortRateTree {
    tree1: TrinomialTree,
    tree2: TrinomialTree,
    dynamics: Box<dyn TwoFactorDynamics>,
    grid: TimeGrid,
    correlation: f64,
    /// Deterministic addition to the short rate, one entry per grid point.
    shift: Vec<f64>,
    state_prices: Vec<Vec<f64>>,
}

impl TwoFactorShortRateTree {
    /// Builds the product lattice with a zero shift at every slice.
    ///
    /// # Errors
    ///
    /// Propagates construction failures from either factor tree.
    pub fn new(dynamics: Box<dyn TwoFactorDynamics>, grid: &TimeGrid) -> LatticeResult<Self> {
        let shift = vec![0.0; grid.len()];
        Self::with_shift(dynamics, grid, shift)
    }

    /// Builds the product lattice with a per-slice shift added to the
    /// short rate, as computed by a curve-calibrated model.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::SizeMismatch`] if `shift` does not have one
    /// entry per grid point, and propagates factor tree failures.
    pub fn with_shift(
        dynamics: Box<dyn TwoFactorDynamics>,
        grid: &TimeGrid,
        shift: Vec<f64>,
    ) -> LatticeResult<Self> {
        if shift.len() != grid.len() {
            return Err(LatticeError::size_mismatch(grid.len(), shift.len()));
        }
        let tree1 = TrinomialTree::build(dynamics.process1(), grid)?;
        let tree2 = TrinomialTree::build(dynamics.process2(), grid)?;
        let correlation = dynamics.correlation();

        let mut lattice = Self {
            tree1,
            tree2,
            dynamics,
            grid: grid.clone(),
            correlation,
            shift,
            state_prices: Vec::new(),
        };
        lattice.recompute_state_prices();

        debug!(
            "Built two-factor lattice: {} slices, terminal width {}",
            lattice.grid.len(),
            lattice.size(lattice.grid.step_count())
        );
        Ok(lattice)
    }

    /// The per-slice shift added to the short rate.
    #[must_use]
    pub fn shift(&self) -> &[f64] {
        &self.shift
    }

    /// The correlation the probabilities were adjusted with.
    #[must_use]
    pub fn correlation(&self) -> f64 {
        self.correlation
    }

    fn recompute_state_prices(&mut self) {
        let mut prices = vec![vec![1.0]];
        for i in 0..self.grid.step_count() {
            let mut next = vec![0.0; self.size(i + 1)];
            for j in 0..self.size(i) {
                let discounted = prices[i][j] * self.discount(i, j);
                for b in 0..9 {
                    next[self.descendant(i, j, b)] += discounted * self.probability(i, j, b);
                }
            }
            prices.push(next);
        }
        self.state_prices = prices;
    }
}

impl Lattice for TwoFactorShortRateTree {
    fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    fn branch_count(&self) -> usize {
        9
    }

    fn size(&self, i: usize) -> usize {
        self.tree1.size(i) * self.tree2.size(i)
    }

    /// The shifted short rate at the node.
    fn underlying(&self, i: usize, index: usize) -> f64 {
        let size1 = self.tree1.size(i);
        let x = self.tree1.underlying(i, index % size1);
        let y = self.tree2.underlying(i, index / size1);
        self.dynamics.short_rate(self.grid.time(i), x, y) + self.shift[i]
    }

    fn descendant(&self, i: usize, index: usize, branch: usize) -> usize {
        let size1 = self.tree1.size(i);
        let d1 = self.tree1.descendant(i, index % size1, branch % 3);
        let d2 = self.tree2.descendant(i, index / size1, branch / 3);
        d1 + d2 * self.tree1.size(i + 1)
    }

    fn probability(&self, i: usize, index: usize, branch: usize) -> f64 {
        let size1 = self.tree1.size(i);
        let branch1 = branch % 3;
        let branch2 = branch / 3;
        let p1 = self.tree1.probability(i, index % size1, branch1);
        let p2 = self.tree2.probability(i, index / size1, branch2);
        let adjustment = if self.correlation < 0.0 {
            CORRELATION_ADJUSTMENT_NEGATIVE[branch1][branch2]
        } else {
            CORRELATION_ADJUSTMENT_POSITIVE[branch1][branch2]
        };
        p1 * p2 + self.correlation.abs() * adjustment / 36.0
    }

    fn discount(&self, i: usize, index: usize) -> f64 {
        (-self.underlying(i, index) * self.grid.dt(i)).exp()
    }

    fn state_prices(&self, i: usize) -> &[f64] {
        &self.state_prices[i]
    }
}
