//! Black-Karasinski short-rate model.
//!
//! The Black-Karasinski model diffuses the logarithm of the short rate:
//!
//! ```text
//! d(ln r) = (θ(t) - a*ln r)dt + σ*dW
//! ```
//!
//! Where:
//! - `a` = mean reversion speed of the log-rate
//! - `σ` = log-rate volatility
//! - `θ(t)` = time-dependent drift calibrated to fit the discount curve
//!
//! # Properties
//!
//! - Rates are lognormal and strictly positive
//! - Fits the observed discount curve exactly
//! - No closed-form bond prices; pricing goes through the fitted lattice

use serde::{Deserialize, Serialize};
use trellis_curves::DiscountCurve;
use trellis_lattice::{ExponentialDynamics, OrnsteinUhlenbeckProcess, ShortRateTree, TimeGrid};

use crate::error::{ModelError, ModelResult};

/// Black-Karasinski lognormal short-rate model.
///
/// On the lattice the model is expressed as `r(t) = exp(x(t) + θ(t))`:
/// the diffused state `x` is a zero-centred Ornstein-Uhlenbeck process
/// and the per-slice shift θ comes out of the curve fit, so rates stay
/// positive at every node.
///
/// # Example
///
/// ```rust
/// use trellis_curves::FlatCurve;
/// use trellis_lattice::{Lattice, TimeGrid};
/// use trellis_models::BlackKarasinski;
///
/// let model = BlackKarasinski::new(0.1, 0.15).unwrap();
/// let curve = FlatCurve::continuous(0.04);
/// let grid = TimeGrid::uniform(2.0, 8).unwrap();
///
/// let lattice = model.fitted_tree(&grid, &curve).unwrap();
/// for node in 0..lattice.size(8) {
///     assert!(lattice.underlying(8, node) > 0.0);
/// }
/// ```
///
/// # Parameters
///
/// - **Mean reversion (a)**: Speed at which the log-rate reverts.
///   Typical values: 0.01 - 0.30.
///
/// - **Volatility (σ)**: Volatility of the log-rate, so a relative
///   rate volatility. Typical values: 0.05 - 0.30.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlackKarasinski {
    /// Mean reversion speed of the log-rate (a).
    mean_reversion: f64,

    /// Log-rate volatility (σ).
    volatility: f64,
}

impl BlackKarasinski {
    /// Creates a Black-Karasinski model after validating its parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidParameter`] if either parameter is
    /// non-finite or negative.
    pub fn new(mean_reversion: f64, volatility: f64) -> ModelResult<Self> {
        if !mean_reversion.is_finite() || mean_reversion < 0.0 {
            return Err(ModelError::invalid_parameter(
                "mean_reversion",
                mean_reversion,
                "must be finite and non-negative",
            ));
        }
        if !volatility.is_finite() || volatility < 0.0 {
            return Err(ModelError::invalid_parameter(
                "volatility",
                volatility,
                "must be finite and non-negative",
            ));
        }
        Ok(Self {
            mean_reversion,
            volatility,
        })
    }

    /// Mean reversion speed of the log-rate (a).
    #[must_use]
    pub fn mean_reversion(&self) -> f64 {
        self.mean_reversion
    }

    /// Log-rate volatility (σ).
    #[must_use]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// The dynamics of the diffused state variable.
    ///
    /// The state is the log-rate up to the fitted shift; the lattice
    /// exponentiates it back into a rate.
    #[must_use]
    pub fn dynamics(&self) -> ExponentialDynamics<OrnsteinUhlenbeckProcess> {
        ExponentialDynamics::new(OrnsteinUhlenbeckProcess::new(
            self.mean_reversion,
            self.volatility,
        ))
    }

    /// Builds a trinomial lattice fitted to `curve`.
    ///
    /// # Errors
    ///
    /// Propagates tree construction failures, curve lookups past the
    /// curve's horizon, and fit solves that fail. Fitting requires
    /// strictly positive forward rates; a curve with negative forwards
    /// cannot be matched by positive rates and surfaces as a solver
    /// bracketing error.
    pub fn fitted_tree(
        &self,
        grid: &TimeGrid,
        curve: &dyn DiscountCurve,
    ) -> ModelResult<ShortRateTree> {
        Ok(ShortRateTree::fitted(
            Box::new(self.dynamics()),
            grid,
            curve,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use trellis_curves::FlatCurve;
    use trellis_lattice::Lattice;

    #[test]
    fn test_rejects_negative_parameters() {
        assert!(BlackKarasinski::new(-0.1, 0.15).is_err());
        assert!(BlackKarasinski::new(0.1, -0.15).is_err());
        assert!(BlackKarasinski::new(f64::NAN, 0.15).is_err());
    }

    #[test]
    fn test_fitted_rates_are_strictly_positive() {
        let model = BlackKarasinski::new(0.1, 0.2).unwrap();
        let curve = FlatCurve::continuous(0.04);
        let grid = TimeGrid::uniform(3.0, 24).unwrap();

        let lattice = model.fitted_tree(&grid, &curve).unwrap();
        for i in 0..grid.len() {
            for node in 0..lattice.size(i) {
                let rate = lattice.underlying(i, node);
                assert!(rate > 0.0, "rate {rate} at slice {i}, node {node}");
                assert!(rate.is_finite());
            }
        }
    }

    #[test]
    fn test_fitted_tree_reprices_a_flat_curve() {
        let model = BlackKarasinski::new(0.1, 0.2).unwrap();
        let curve = FlatCurve::continuous(0.04);
        let grid = TimeGrid::uniform(3.0, 24).unwrap();

        let lattice = model.fitted_tree(&grid, &curve).unwrap();
        for i in 1..=grid.step_count() {
            let repriced: f64 = lattice.state_prices(i).iter().sum();
            let target = curve.discount(grid.time(i)).unwrap();
            assert_abs_diff_eq!(repriced, target, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_zero_volatility_recovers_the_flat_forward() {
        // With σ = 0 every slice is a single node and the fit forces
        // exp(θ) to equal the one-period forward rate.
        let model = BlackKarasinski::new(0.1, 0.0).unwrap();
        let curve = FlatCurve::continuous(0.04);
        let grid = TimeGrid::uniform(2.0, 8).unwrap();

        let lattice = model.fitted_tree(&grid, &curve).unwrap();
        for i in 0..grid.step_count() {
            assert_eq!(lattice.size(i), 1);
            assert_abs_diff_eq!(lattice.underlying(i, 0), 0.04, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let model = BlackKarasinski::new(0.1, 0.15).unwrap();
        let json = serde_json::to_string(&model).unwrap();
        let back: BlackKarasinski = serde_json::from_str(&json).unwrap();
        assert_eq!(model, back);
    }
}
