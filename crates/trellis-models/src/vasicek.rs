//! Vasicek short-rate model.
//!
//! The Vasicek model is defined by:
//!
//! ```text
//! dr = a*(b - r)dt + σ*dW
//! ```
//!
//! Where:
//! - `a` = mean reversion speed
//! - `b` = long-term rate level
//! - `σ` = volatility
//!
//! # Properties
//!
//! - Analytically tractable: zero-coupon bonds price in closed form
//! - Rates are Gaussian and can go negative
//! - Constant parameters; the model does not fit an observed discount
//!   curve (use [`HullWhite`](crate::HullWhite) for an exact fit)

use serde::{Deserialize, Serialize};
use trellis_lattice::{IdentityDynamics, OrnsteinUhlenbeckProcess, ShortRateTree, TimeGrid};

use crate::error::{ModelError, ModelResult};

/// Below this speed the mean-reversion terms use their `a -> 0` limits.
const ZERO_SPEED_TOLERANCE: f64 = 1.0e-12;

/// Vasicek short-rate model with constant parameters.
///
/// The short rate reverts towards the long-term level `b` at speed `a`
/// with Gaussian noise. Discount bonds have the closed form
/// `P(t,T) = A(t,T) * exp(-B(t,T) * r(t))`.
///
/// # Example
///
/// ```rust
/// use trellis_models::Vasicek;
///
/// // 10% reversion speed towards a 5% level, 1% vol, starting at 4%
/// let model = Vasicek::new(0.1, 0.05, 0.01, 0.04).unwrap();
///
/// let price = model.discount(5.0);
/// assert!(price > 0.0 && price < 1.0);
/// ```
///
/// # Parameters
///
/// - **Mean reversion (a)**: Speed at which the rate reverts to `b`.
///   Typical values: 0.01 - 0.30. Zero is admitted and recovers a
///   driftless Gaussian rate.
///
/// - **Level (b)**: Long-term rate the short rate reverts towards.
///   Typical values: 0.02 - 0.06.
///
/// - **Volatility (σ)**: Instantaneous volatility of the short rate.
///   Typical values: 0.005 - 0.02 (50 to 200 bps annualized).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vasicek {
    /// Mean reversion speed (a).
    mean_reversion: f64,

    /// Long-term rate level (b).
    level: f64,

    /// Short rate volatility (σ).
    volatility: f64,

    /// Short rate at time zero.
    initial_rate: f64,
}

impl Vasicek {
    /// Creates a Vasicek model after validating its parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidParameter`] if any parameter is
    /// non-finite, or if `mean_reversion` or `volatility` is negative.
    pub fn new(
        mean_reversion: f64,
        level: f64,
        volatility: f64,
        initial_rate: f64,
    ) -> ModelResult<Self> {
        if !mean_reversion.is_finite() || mean_reversion < 0.0 {
            return Err(ModelError::invalid_parameter(
                "mean_reversion",
                mean_reversion,
                "must be finite and non-negative",
            ));
        }
        if !level.is_finite() {
            return Err(ModelError::invalid_parameter(
                "level",
                level,
                "must be finite",
            ));
        }
        if !volatility.is_finite() || volatility < 0.0 {
            return Err(ModelError::invalid_parameter(
                "volatility",
                volatility,
                "must be finite and non-negative",
            ));
        }
        if !initial_rate.is_finite() {
            return Err(ModelError::invalid_parameter(
                "initial_rate",
                initial_rate,
                "must be finite",
            ));
        }
        Ok(Self {
            mean_reversion,
            level,
            volatility,
            initial_rate,
        })
    }

    /// Mean reversion speed (a).
    #[must_use]
    pub fn mean_reversion(&self) -> f64 {
        self.mean_reversion
    }

    /// Long-term rate level (b).
    #[must_use]
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Short rate volatility (σ).
    #[must_use]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Short rate at time zero.
    #[must_use]
    pub fn initial_rate(&self) -> f64 {
        self.initial_rate
    }

    /// The short-rate dynamics the lattice diffuses.
    ///
    /// The state variable is the rate itself: an Ornstein-Uhlenbeck
    /// process started at the initial rate, reverting towards the level.
    #[must_use]
    pub fn dynamics(&self) -> IdentityDynamics<OrnsteinUhlenbeckProcess> {
        let process = OrnsteinUhlenbeckProcess::new(self.mean_reversion, self.volatility)
            .with_initial_value(self.initial_rate)
            .with_level(self.level);
        IdentityDynamics::new(process)
    }

    /// Builds a trinomial pricing lattice for this model.
    ///
    /// The lattice diffuses the rate around its expected path; no curve
    /// fitting is involved, so lattice discount factors converge to
    /// [`Vasicek::discount`] as the grid refines rather than matching an
    /// observed curve.
    ///
    /// # Errors
    ///
    /// Propagates tree construction failures.
    pub fn tree(&self, grid: &TimeGrid) -> ModelResult<ShortRateTree> {
        Ok(ShortRateTree::new(Box::new(self.dynamics()), grid)?)
    }

    /// Closed-form price at `t` of a unit discount bond maturing at
    /// `maturity`, conditional on the short rate being `rate`.
    ///
    /// Maturities at or before `t` price to 1.
    #[must_use]
    pub fn discount_bond(&self, t: f64, maturity: f64, rate: f64) -> f64 {
        let tau = maturity - t;
        if tau <= 0.0 {
            return 1.0;
        }
        (self.log_a(tau) - self.b_factor(tau) * rate).exp()
    }

    /// Closed-form time-zero discount factor implied by the model.
    #[must_use]
    pub fn discount(&self, maturity: f64) -> f64 {
        self.discount_bond(0.0, maturity, self.initial_rate)
    }

    /// B(τ) = (1 - exp(-a*τ)) / a, with the `a -> 0` limit τ.
    fn b_factor(&self, tau: f64) -> f64 {
        let a = self.mean_reversion;
        if a.abs() < ZERO_SPEED_TOLERANCE {
            return tau;
        }
        (1.0 - (-a * tau).exp()) / a
    }

    /// ln A(τ) = (b - σ²/(2a²))(B(τ) - τ) - σ²B(τ)²/(4a).
    ///
    /// As `a -> 0` the rate is driftless Brownian motion and the
    /// expression tends to σ²τ³/6, independent of the level.
    fn log_a(&self, tau: f64) -> f64 {
        let a = self.mean_reversion;
        let sigma2 = self.volatility * self.volatility;
        if a.abs() < ZERO_SPEED_TOLERANCE {
            return sigma2 * tau.powi(3) / 6.0;
        }
        let b = self.b_factor(tau);
        (b - tau) * (self.level - sigma2 / (2.0 * a * a)) - sigma2 * b * b / (4.0 * a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_rejects_negative_volatility() {
        let err = Vasicek::new(0.1, 0.05, -0.01, 0.04).unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidParameter {
                name: "volatility",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_mean_reversion() {
        let err = Vasicek::new(-0.1, 0.05, 0.01, 0.04).unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidParameter {
                name: "mean_reversion",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_non_finite_level() {
        let err = Vasicek::new(0.1, f64::NAN, 0.01, 0.04).unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidParameter { name: "level", .. }
        ));
    }

    #[test]
    fn test_zero_speed_recovers_driftless_gaussian_bond() {
        // With a = 0 the rate is r0 + σW and
        // P(0,T) = exp(-r0*T + σ²T³/6).
        let model = Vasicek::new(0.0, 0.05, 0.02, 0.04).unwrap();
        let tau: f64 = 3.0;
        let expected = (-0.04 * tau + 0.02_f64.powi(2) * tau.powi(3) / 6.0).exp();
        assert_abs_diff_eq!(model.discount(tau), expected, epsilon = 1e-14);
    }

    #[test]
    fn test_log_a_is_continuous_at_zero_speed() {
        let at_zero = Vasicek::new(0.0, 0.05, 0.01, 0.04).unwrap();
        let near_zero = Vasicek::new(1.0e-8, 0.05, 0.01, 0.04).unwrap();
        assert_relative_eq!(
            at_zero.discount(5.0),
            near_zero.discount(5.0),
            max_relative = 1e-6
        );
    }

    #[test]
    fn test_zero_volatility_prices_the_deterministic_path() {
        // With σ = 0 the rate follows its ODE and the bond is the
        // exponential of minus the integrated rate:
        //   ∫r = b*τ + (r0 - b)(1 - e^{-aτ})/a.
        let model = Vasicek::new(0.2, 0.05, 0.0, 0.03).unwrap();
        let tau: f64 = 4.0;
        let integral = 0.05 * tau + (0.03 - 0.05) * (1.0 - (-0.2 * tau).exp()) / 0.2;
        assert_relative_eq!(model.discount(tau), (-integral).exp(), max_relative = 1e-12);
    }

    #[test]
    fn test_discount_decreases_with_maturity_for_positive_rates() {
        let model = Vasicek::new(0.1, 0.05, 0.01, 0.04).unwrap();
        let mut previous = 1.0;
        for maturity in [1.0, 2.0, 5.0, 10.0] {
            let price = model.discount(maturity);
            assert!(price < previous, "P({maturity}) = {price} did not decrease");
            previous = price;
        }
    }

    #[test]
    fn test_forward_bond_uses_the_supplied_rate() {
        let model = Vasicek::new(0.1, 0.05, 0.01, 0.04).unwrap();
        let low = model.discount_bond(1.0, 4.0, 0.03);
        let high = model.discount_bond(1.0, 4.0, 0.06);
        assert!(low > high);
        assert_abs_diff_eq!(model.discount_bond(2.0, 2.0, 0.05), 1.0);
    }

    #[test]
    fn test_serde_round_trip() {
        let model = Vasicek::new(0.1, 0.05, 0.01, 0.04).unwrap();
        let json = serde_json::to_string(&model).unwrap();
        let back: Vasicek = serde_json::from_str(&json).unwrap();
        assert_eq!(model, back);
    }
}
