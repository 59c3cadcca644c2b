//! Hull-White one-factor short-rate model.
//!
//! The Hull-White model is defined by:
//!
//! ```text
//! dr = (θ(t) - a*r)dt + σ*dW
//! ```
//!
//! Where:
//! - `a` = mean reversion speed
//! - `σ` = volatility
//! - `θ(t)` = time-dependent drift calibrated to fit the discount curve
//!
//! # Properties
//!
//! - Fits the observed discount curve exactly
//! - Analytically tractable: bond prices conditional on the rate are in
//!   closed form
//! - Rates are Gaussian and can go negative (use
//!   [`BlackKarasinski`](crate::BlackKarasinski) if this is a concern)
//! - Industry standard for callable bond pricing
//!
//! On the lattice the model is expressed as `r(t) = x(t) + θ(t)`: the
//! diffused state `x` is a zero-centred Ornstein-Uhlenbeck process and
//! the per-slice shift θ comes out of the curve fit.

use serde::{Deserialize, Serialize};
use trellis_curves::DiscountCurve;
use trellis_lattice::{IdentityDynamics, OrnsteinUhlenbeckProcess, ShortRateTree, TimeGrid};

use crate::error::{ModelError, ModelResult};

/// Below this speed the mean-reversion terms use their `a -> 0` limits.
const ZERO_SPEED_TOLERANCE: f64 = 1.0e-12;

/// Hull-White one-factor short-rate model.
///
/// # Example
///
/// ```rust
/// use trellis_curves::{DiscountCurve, FlatCurve};
/// use trellis_lattice::{Lattice, TimeGrid};
/// use trellis_models::HullWhite;
///
/// let model = HullWhite::new(0.03, 0.01).unwrap();
/// let curve = FlatCurve::continuous(0.04);
/// let grid = TimeGrid::uniform(5.0, 20).unwrap();
///
/// // The fitted lattice reprices the curve at the horizon.
/// let lattice = model.fitted_tree(&grid, &curve).unwrap();
/// let repriced: f64 = lattice.state_prices(20).iter().sum();
/// assert!((repriced - curve.discount(5.0).unwrap()).abs() < 1e-6);
/// ```
///
/// # Parameters
///
/// - **Mean reversion (a)**: Speed at which rates revert. Typical
///   values: 0.01 - 0.10 (1% to 10% per year). Higher values mean less
///   rate volatility at long maturities.
///
/// - **Volatility (σ)**: Instantaneous volatility of the short rate.
///   Typical values: 0.005 - 0.02 (50 to 200 bps annualized).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HullWhite {
    /// Mean reversion speed (a).
    mean_reversion: f64,

    /// Short rate volatility (σ).
    volatility: f64,
}

impl HullWhite {
    /// Creates a Hull-White model after validating its parameters.
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

    /// Mean reversion speed (a).
    #[must_use]
    pub fn mean_reversion(&self) -> f64 {
        self.mean_reversion
    }

    /// Short rate volatility (σ).
    #[must_use]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// The dynamics of the diffused state variable.
    ///
    /// The state is a zero-centred Ornstein-Uhlenbeck process; the curve
    /// fit supplies the shift that turns it into the short rate.
    #[must_use]
    pub fn dynamics(&self) -> IdentityDynamics<OrnsteinUhlenbeckProcess> {
        IdentityDynamics::new(OrnsteinUhlenbeckProcess::new(
            self.mean_reversion,
            self.volatility,
        ))
    }

    /// Builds a trinomial lattice fitted to `curve`.
    ///
    /// The fitted lattice reprices the curve's discount factors at every
    /// grid point to solver accuracy.
    ///
    /// # Errors
    ///
    /// Propagates tree construction failures, curve lookups past the
    /// curve's horizon, and fit solves that fail.
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

    /// Closed-form price at `t` of a unit discount bond maturing at
    /// `maturity`, conditional on the short rate being `rate`.
    ///
    /// ```text
    /// P(t,T|r) = D(T)/D(t) * exp(B(t,T)f(0,t) - σ²/(4a)(1-e^{-2at})B(t,T)² - B(t,T)r)
    /// ```
    ///
    /// where `D` is the curve discount factor and `f(0,t)` the curve's
    /// instantaneous forward. Maturities at or before `t` price to 1.
    ///
    /// # Errors
    ///
    /// Propagates curve lookups past the curve's horizon.
    pub fn discount_bond(
        &self,
        t: f64,
        maturity: f64,
        rate: f64,
        curve: &dyn DiscountCurve,
    ) -> ModelResult<f64> {
        if maturity <= t {
            return Ok(1.0);
        }
        let discount_t = curve.discount(t)?;
        let discount_maturity = curve.discount(maturity)?;
        let forward = curve.instantaneous_forward(t)?;

        let a = self.mean_reversion;
        let sigma2 = self.volatility * self.volatility;
        let b = self.b_factor(maturity - t);
        // (1 - e^{-2at}) / (2a), continuous at a -> 0.
        let decay = if a.abs() < ZERO_SPEED_TOLERANCE {
            t
        } else {
            (1.0 - (-2.0 * a * t).exp()) / (2.0 * a)
        };

        let log_a =
            (discount_maturity / discount_t).ln() + b * forward - 0.5 * sigma2 * decay * b * b;
        Ok((log_a - b * rate).exp())
    }

    /// B(τ) = (1 - exp(-a*τ)) / a, with the `a -> 0` limit τ.
    fn b_factor(&self, tau: f64) -> f64 {
        let a = self.mean_reversion;
        if a.abs() < ZERO_SPEED_TOLERANCE {
            return tau;
        }
        (1.0 - (-a * tau).exp()) / a
    }
}
