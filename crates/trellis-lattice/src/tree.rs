//! Recombining trinomial tree for 1-D diffusions.
//!
//! Node positions are spaced on a per-slice ladder `x0 + k·dx`, with
//! `dx = sqrt(3·variance)`: the spacing that lets a three-point
//! distribution match the first two conditional moments of the process
//! with probabilities bounded away from 0 and 1. Each node's center branch
//! targets the ladder point nearest its forecast mean, so branching tilts
//! up or down wherever drift outruns the spacing, and the tree recombines
//! by construction.

use log::debug;
use trellis_math::comparison::close_enough;

use crate::error::{LatticeError, LatticeResult};
use crate::process::DiffusionProcess;
use crate::time_grid::TimeGrid;

/// Tolerance for validating branching probabilities against [0, 1].
pub const PROBABILITY_TOLERANCE: f64 = 1.0e-12;

/// Branching data for one time step: per-node center targets and the three
/// branch probabilities, stored raw (never clamped).
#[derive(Debug, Clone)]
struct Branching {
    /// Center branch target for each node, as a ladder index at the next slice.
    k: Vec<i32>,
    /// Probabilities per branch (0 = down, 1 = mid, 2 = up), per node.
    probs: [Vec<f64>; 3],
    /// Ladder range reachable at the next slice.
    j_min: i32,
    j_max: i32,
}

impl Branching {
    fn new() -> Self {
        Self {
            k: Vec::new(),
            probs: [Vec::new(), Vec::new(), Vec::new()],
            j_min: i32::MAX,
            j_max: i32::MIN,
        }
    }

    fn add(&mut self, k: i32, p_down: f64, p_mid: f64, p_up: f64) {
        self.k.push(k);
        self.probs[0].push(p_down);
        self.probs[1].push(p_mid);
        self.probs[2].push(p_up);
        self.j_min = self.j_min.min(k - 1);
        self.j_max = self.j_max.max(k + 1);
    }

    fn size(&self) -> usize {
        usize::try_from(self.j_max - self.j_min + 1).unwrap_or(0)
    }

    fn descendant(&self, index: usize, branch: usize) -> usize {
        // k - j_min - 1 >= 0 since j_min <= k - 1 by construction
        usize::try_from(self.k[index] - self.j_min - 1).unwrap_or(0) + branch
    }

    fn probability(&self, index: usize, branch: usize) -> f64 {
        self.probs[branch][index]
    }
}

/// A recombining trinomial lattice approximating a 1-D diffusion.
///
/// Requires additive noise: the process variance must not depend on the
/// state variable (it is evaluated once per step at x = 0). Construction
/// validates every branching probability against [0, 1] within
/// [`PROBABILITY_TOLERANCE`] and fails rather than clamping, so a
/// pathological drift-to-variance ratio surfaces as an error instead of a
/// silently inconsistent tree.
///
/// # Example
///
/// ```rust
/// use trellis_lattice::{OrnsteinUhlenbeckProcess, TimeGrid, TrinomialTree};
///
/// let process = OrnsteinUhlenbeckProcess::new(0.1, 0.01);
/// let grid = TimeGrid::uniform(1.0, 12).unwrap();
/// let tree = TrinomialTree::build(&process, &grid).unwrap();
///
/// assert_eq!(tree.size(0), 1);
/// let p_sum: f64 = (0..3).map(|b| tree.probability(0, 0, b)).sum();
/// assert!((p_sum - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct TrinomialTree {
    x0: f64,
    /// Ladder spacing per slice; `dx[0]` is 0 for the root slice.
    dx: Vec<f64>,
    branchings: Vec<Branching>,
    grid: TimeGrid,
}

impl TrinomialTree {
    /// Builds the tree for `process` over `grid`.
    ///
    /// # Errors
    ///
    /// Returns an error if the process produces a negative or non-finite
    /// variance, a non-finite forecast mean, a branching probability
    /// outside [0, 1], or drift on a zero-variance step.
    pub fn build(process: &dyn DiffusionProcess, grid: &TimeGrid) -> LatticeResult<Self> {
        let x0 = process.x0();
        let step_count = grid.step_count();
        let sqrt3 = 3.0_f64.sqrt();

        let mut dx = vec![0.0];
        let mut branchings: Vec<Branching> = Vec::with_capacity(step_count);
        let mut j_min = 0_i32;
        let mut j_max = 0_i32;

        for i in 0..step_count {
            let t = grid.time(i);
            let dt = grid.dt(i);

            // Additive noise: the variance is state-independent
            let v2 = process.variance(t, 0.0, dt);
            if !v2.is_finite() || v2 < 0.0 {
                return Err(LatticeError::invalid_variance(i, v2));
            }
            let degenerate = close_enough(v2, 0.0);
            let v = v2.sqrt();
            let dx_next = if degenerate { 0.0 } else { sqrt3 * v };
            dx.push(dx_next);

            let mut branching = Branching::new();
            for j in j_min..=j_max {
                let node = usize::try_from(j - j_min).unwrap_or(0);
                let x = x0 + f64::from(j) * dx[i];
                let m = process.expectation(t, x, dt);
                if !m.is_finite() {
                    return Err(LatticeError::non_finite_forecast(i, node));
                }

                if degenerate {
                    // Every next-slice node sits at the center; a forecast
                    // that moves off it cannot be represented
                    if !close_enough(m, x0) {
                        return Err(LatticeError::degenerate_drift(i, node));
                    }
                    branching.add(0, 0.0, 1.0, 0.0);
                    continue;
                }

                // Center target: nearest ladder point, halves rounding up
                #[allow(clippy::cast_possible_truncation)]
                let k = ((m - x0) / dx_next + 0.5).floor() as i32;
                let e = m - (x0 + f64::from(k) * dx_next);
                let e2 = e * e;
                let e3 = e * sqrt3;

                let p_down = (1.0 + e2 / v2 - e3 / v) / 6.0;
                let p_mid = (2.0 - e2 / v2) / 3.0;
                let p_up = (1.0 + e2 / v2 + e3 / v) / 6.0;

                for (branch, p) in [p_down, p_mid, p_up].into_iter().enumerate() {
                    if !(-PROBABILITY_TOLERANCE..=1.0 + PROBABILITY_TOLERANCE).contains(&p) {
                        return Err(LatticeError::invalid_probability(i, node, branch, p));
                    }
                }

                branching.add(k, p_down, p_mid, p_up);
            }

            j_min = branching.j_min;
            j_max = branching.j_max;
            branchings.push(branching);
        }

        debug!(
            "Built trinomial tree: {} steps, {} terminal nodes",
            step_count,
            branchings.last().map_or(1, Branching::size)
        );

        Ok(Self {
            x0,
            dx,
            branchings,
            grid: grid.clone(),
        })
    }

    /// Number of nodes at slice `i`.
    #[must_use]
    pub fn size(&self, i: usize) -> usize {
        if i == 0 {
            1
        } else {
            self.branchings[i - 1].size()
        }
    }

    /// The diffused state variable at node `(i, index)`.
    #[must_use]
    pub fn underlying(&self, i: usize, index: usize) -> f64 {
        if i == 0 {
            self.x0
        } else {
            let j_min = self.branchings[i - 1].j_min;
            self.x0 + (f64::from(j_min) + index as f64) * self.dx[i]
        }
    }

    /// Index at slice `i + 1` of the branch `branch` descendant of node
    /// `(i, index)`. Branches are 0 = down, 1 = mid, 2 = up.
    #[must_use]
    pub fn descendant(&self, i: usize, index: usize, branch: usize) -> usize {
        self.branchings[i].descendant(index, branch)
    }

    /// Transition probability along branch `branch` from node `(i, index)`.
    #[must_use]
    pub fn probability(&self, i: usize, index: usize, branch: usize) -> f64 {
        self.branchings[i].probability(index, branch)
    }

    /// The process value at the root.
    #[must_use]
    pub fn x0(&self) -> f64 {
        self.x0
    }

    /// The grid the tree was built on.
    #[must_use]
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Number of time steps.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.branchings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::OrnsteinUhlenbeckProcess;
    use approx::assert_relative_eq;

    fn sample_tree() -> TrinomialTree {
        let process = OrnsteinUhlenbeckProcess::new(0.1, 0.01);
        let grid = TimeGrid::uniform(2.0, 24).unwrap();
        TrinomialTree::build(&process, &grid).unwrap()
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let tree = sample_tree();
        for i in 0..tree.step_count() {
            for j in 0..tree.size(i) {
                let sum: f64 = (0..3).map(|b| tree.probability(i, j, b)).sum();
                assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
                for b in 0..3 {
                    let p = tree.probability(i, j, b);
                    assert!((0.0..=1.0).contains(&p), "p[{i}][{j}][{b}] = {p}");
                }
            }
        }
    }

    #[test]
    fn test_sizes_grow_from_root() {
        let tree = sample_tree();
        assert_eq!(tree.size(0), 1);
        assert_eq!(tree.size(1), 3);
        for i in 1..=tree.step_count() {
            assert!(tree.size(i) >= tree.size(i - 1));
            assert!(tree.size(i) <= 2 * i + 1);
        }
    }

    #[test]
    fn test_descendants_in_bounds() {
        let tree = sample_tree();
        for i in 0..tree.step_count() {
            for j in 0..tree.size(i) {
                for b in 0..3 {
                    assert!(tree.descendant(i, j, b) < tree.size(i + 1));
                }
            }
        }
    }

    #[test]
    fn test_center_branch_targets_nearest_node() {
        let process = OrnsteinUhlenbeckProcess::new(0.3, 0.01)
            .with_initial_value(0.05)
            .with_level(0.02);
        let grid = TimeGrid::uniform(2.0, 24).unwrap();
        let tree = TrinomialTree::build(&process, &grid).unwrap();

        for i in 0..tree.step_count() {
            let half_spacing = if tree.size(i + 1) > 1 {
                0.5 * (tree.underlying(i + 1, 1) - tree.underlying(i + 1, 0))
            } else {
                0.0
            };
            for j in 0..tree.size(i) {
                let m = process.expectation(grid.time(i), tree.underlying(i, j), grid.dt(i));
                let mid = tree.underlying(i + 1, tree.descendant(i, j, 1));
                // The forecast mean lies within half a spacing of the target
                assert!(
                    (m - mid).abs() <= half_spacing + 1e-12,
                    "step {i} node {j}: |{m} - {mid}| > {half_spacing}"
                );
            }
        }
    }

    #[test]
    fn test_node_spacing_matches_variance_rule() {
        let process = OrnsteinUhlenbeckProcess::new(0.1, 0.01);
        let grid = TimeGrid::uniform(1.0, 12).unwrap();
        let tree = TrinomialTree::build(&process, &grid).unwrap();

        let v2 = process.variance(0.0, 0.0, grid.dt(0));
        let spacing = tree.underlying(1, 1) - tree.underlying(1, 0);
        assert_relative_eq!(spacing, (3.0 * v2).sqrt(), epsilon = 1e-14);
    }

    #[test]
    fn test_mean_reversion_bounds_width() {
        // Strong reversion pulls the center branch inward, so the tree
        // stops widening after a few steps
        let process = OrnsteinUhlenbeckProcess::new(2.0, 0.01);
        let grid = TimeGrid::uniform(10.0, 40).unwrap();
        let tree = TrinomialTree::build(&process, &grid).unwrap();
        assert_eq!(tree.size(40), 5);
    }

    #[test]
    fn test_zero_volatility_degenerates_to_mid() {
        let process = OrnsteinUhlenbeckProcess::new(0.1, 0.0)
            .with_initial_value(0.05)
            .with_level(0.05);
        let grid = TimeGrid::uniform(1.0, 12).unwrap();
        let tree = TrinomialTree::build(&process, &grid).unwrap();

        for i in 0..tree.step_count() {
            assert!(tree.size(i) <= 3);
            for j in 0..tree.size(i) {
                assert_eq!(tree.probability(i, j, 0), 0.0);
                assert_eq!(tree.probability(i, j, 1), 1.0);
                assert_eq!(tree.probability(i, j, 2), 0.0);
                assert_eq!(tree.underlying(i, j), 0.05);
            }
        }
    }

    #[test]
    fn test_zero_variance_drift_rejected() {
        // Zero volatility but the mean moves toward a different level
        let process = OrnsteinUhlenbeckProcess::new(0.5, 0.0)
            .with_initial_value(0.05)
            .with_level(0.10);
        let grid = TimeGrid::uniform(1.0, 12).unwrap();
        let result = TrinomialTree::build(&process, &grid);
        assert!(matches!(result, Err(LatticeError::DegenerateDrift { .. })));
    }

    #[test]
    fn test_pathological_drift_to_variance_rejected() {
        // Drift of order 1 against spacing of order 1e-14 cannot produce
        // probabilities in [0, 1]
        let process = OrnsteinUhlenbeckProcess::new(5.0, 1e-13).with_level(1.0);
        let grid = TimeGrid::uniform(1.0, 4).unwrap();
        let result = TrinomialTree::build(&process, &grid);
        assert!(matches!(
            result,
            Err(LatticeError::InvalidProbability { .. })
        ));
    }

    #[test]
    fn test_non_finite_forecast_rejected() {
        struct BrokenForecast;

        impl DiffusionProcess for BrokenForecast {
            fn x0(&self) -> f64 {
                0.0
            }
            fn drift(&self, _t: f64, _x: f64) -> f64 {
                f64::NAN
            }
            fn diffusion(&self, _t: f64, _x: f64) -> f64 {
                0.01
            }
        }

        let grid = TimeGrid::uniform(1.0, 4).unwrap();
        let result = TrinomialTree::build(&BrokenForecast, &grid);
        assert!(matches!(
            result,
            Err(LatticeError::NonFiniteForecast { step: 0, node: 0 })
        ));
    }

    #[test]
    fn test_invalid_variance_rejected() {
        struct NegativeVariance;

        impl DiffusionProcess for NegativeVariance {
            fn x0(&self) -> f64 {
                0.0
            }
            fn drift(&self, _t: f64, _x: f64) -> f64 {
                0.0
            }
            fn diffusion(&self, _t: f64, _x: f64) -> f64 {
                0.01
            }
            fn variance(&self, _t: f64, _x: f64, _dt: f64) -> f64 {
                -1e-6
            }
        }

        let grid = TimeGrid::uniform(1.0, 4).unwrap();
        let result = TrinomialTree::build(&NegativeVariance, &grid);
        assert!(matches!(
            result,
            Err(LatticeError::InvalidVariance { step: 0, .. })
        ));
    }
}
