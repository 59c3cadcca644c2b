//! Backward-induction pricing over a discrete lattice.
//!
//! [`Lattice`] abstracts the geometry (slice sizes, node links, branch
//! probabilities), per-node one-step discounting, and Arrow-Debreu state
//! prices. Everything a pricer needs (initializing a payoff, stepping
//! values backward, applying step conditions, reading off a present
//! value) is built from those primitives as provided methods, so every
//! lattice implementation shares one rollback engine.

use crate::conditions::StepConditionSet;
use crate::discretized::{DiscretizedAsset, Payoff};
use crate::error::{LatticeError, LatticeResult};
use crate::time_grid::TimeGrid;

/// A discrete pricing lattice over a [`TimeGrid`].
///
/// The rollback methods follow a fixed per-slice order: step conditions
/// (dividends, then exercises) are applied to a slice's values before the
/// discounting step that carries them one slice back. A partial rollback
/// stops at the target slice without applying conditions there, so two
/// chained partial rollbacks behave exactly like one; [`Lattice::rollback`]
/// finishes by applying conditions at the target.
pub trait Lattice: Send + Sync {
    /// The grid the lattice is built on.
    fn grid(&self) -> &TimeGrid;

    /// Number of branches leaving each node.
    fn branch_count(&self) -> usize;

    /// Number of nodes at slice `i`.
    fn size(&self, i: usize) -> usize;

    /// The quantity payoffs and exercise decisions see at node `(i, index)`.
    /// For short-rate lattices this is the fitted short rate.
    fn underlying(&self, i: usize, index: usize) -> f64;

    /// Index at slice `i + 1` of the branch `branch` descendant of node
    /// `(i, index)`.
    fn descendant(&self, i: usize, index: usize, branch: usize) -> usize;

    /// Transition probability along branch `branch` from node `(i, index)`.
    fn probability(&self, i: usize, index: usize, branch: usize) -> f64;

    /// One-step discount factor applied to values arriving at node
    /// `(i, index)` from slice `i + 1`.
    fn discount(&self, i: usize, index: usize) -> f64;

    /// Arrow-Debreu state prices of slice `i`: the value today of receiving
    /// one unit at each node of that slice.
    fn state_prices(&self, i: usize) -> &[f64];

    /// The underlying at every node of slice `i`.
    fn slice_underlying(&self, i: usize) -> Vec<f64> {
        (0..self.size(i)).map(|j| self.underlying(i, j)).collect()
    }

    /// Evaluates `payoff` across the slice at `time`.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::TimeNotOnGrid`] if `time` is not a grid point.
    fn initialize(&self, payoff: &dyn Payoff, time: f64) -> LatticeResult<DiscretizedAsset> {
        let i = self.grid().index_of(time)?;
        let values = (0..self.size(i))
            .map(|j| payoff.value(self.underlying(i, j)))
            .collect();
        Ok(DiscretizedAsset::new(i, values))
    }

    /// Carries slice `i + 1` values back to slice `i`: each node takes the
    /// probability-weighted sum of its descendants' values, discounted by
    /// its own one-step factor.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::SizeMismatch`] if `values` does not match
    /// slice `i + 1`.
    fn stepback(&self, i: usize, values: &[f64]) -> LatticeResult<Vec<f64>> {
        if values.len() != self.size(i + 1) {
            return Err(LatticeError::size_mismatch(self.size(i + 1), values.len()));
        }
        Ok((0..self.size(i))
            .map(|j| {
                let expected: f64 = (0..self.branch_count())
                    .map(|b| self.probability(i, j, b) * values[self.descendant(i, j, b)])
                    .sum();
                self.discount(i, j) * expected
            })
            .collect())
    }

    /// Rolls `asset` back to the slice at `to`, applying `conditions` at
    /// every slice strictly after the target. The target slice itself is
    /// left untouched, so further rollback segments compose.
    ///
    /// # Errors
    ///
    /// Returns an error if `to` is not a grid point, lies after the asset's
    /// current slice, or the asset's values do not match its slice.
    fn partial_rollback(
        &self,
        asset: &mut DiscretizedAsset,
        to: f64,
        conditions: &StepConditionSet,
    ) -> LatticeResult<()> {
        let target = self.grid().index_of(to)?;
        let current = asset.time_index();
        if target > current {
            return Err(LatticeError::invalid_rollback(current, target));
        }
        if asset.values().len() != self.size(current) {
            return Err(LatticeError::size_mismatch(
                self.size(current),
                asset.values().len(),
            ));
        }

        for i in (target..current).rev() {
            let underlying = self.slice_underlying(i + 1);
            conditions.apply(asset.values_mut(), &underlying, self.grid().time(i + 1));
            let values = self.stepback(i, asset.values())?;
            asset.reset(i, values);
        }
        Ok(())
    }

    /// Rolls `asset` back to the slice at `to` and applies `conditions`
    /// there as well. Rolling back to the asset's own slice still applies
    /// the conditions.
    ///
    /// # Errors
    ///
    /// Propagates the same errors as [`Lattice::partial_rollback`].
    fn rollback(
        &self,
        asset: &mut DiscretizedAsset,
        to: f64,
        conditions: &StepConditionSet,
    ) -> LatticeResult<()> {
        self.partial_rollback(asset, to, conditions)?;
        let i = asset.time_index();
        let underlying = self.slice_underlying(i);
        conditions.apply(asset.values_mut(), &underlying, self.grid().time(i));
        Ok(())
    }

    /// Present value of `asset` at its current slice: the state-price
    /// weighted sum of its node values. Agrees with rolling the asset all
    /// the way back to time zero.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::SizeMismatch`] if the asset's values do not
    /// match its slice.
    fn present_value(&self, asset: &DiscretizedAsset) -> LatticeResult<f64> {
        let prices = self.state_prices(asset.time_index());
        if prices.len() != asset.values().len() {
            return Err(LatticeError::size_mismatch(
                prices.len(),
                asset.values().len(),
            ));
        }
        Ok(prices
            .iter()
            .zip(asset.values())
            .map(|(q, v)| q * v)
            .sum())
    }
}
