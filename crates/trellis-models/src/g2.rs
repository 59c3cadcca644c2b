//! Two-factor additive Gaussian short-rate model.
//!
//! The G2 model writes the short rate as the sum of two correlated
//! Ornstein-Uhlenbeck factors and a deterministic shift:
//!
//! ```text
//! r(t) = x(t) + y(t) + φ(t)
//! dx = -a*x dt + σ*dW₁
//! dy = -b*y dt + η*dW₂
//! dW₁·dW₂ = ρ dt
//! ```
//!
//! # Properties
//!
//! - Two factors give a richer correlation structure across the curve
//!   than any one-factor model
//! - Fits the observed discount curve exactly through the closed-form
//!   shift φ; no per-slice solving is needed
//! - Rates are Gaussian and can go negative

use serde::{Deserialize, Serialize};
use trellis_curves::DiscountCurve;
use trellis_lattice::{
    AdditiveTwoFactorDynamics, OrnsteinUhlenbeckProcess, TimeGrid, TwoFactorShortRateTree,
};

use crate::error::{ModelError, ModelResult};

/// Below this speed the damping factors use their zero-speed limits.
const ZERO_SPEED_TOLERANCE: f64 = 1.0e-12;

/// Two-factor additive Gaussian short-rate model.
///
/// # Example
///
/// ```rust
/// use trellis_curves::{DiscountCurve, FlatCurve};
/// use trellis_lattice::{Lattice, TimeGrid};
/// use trellis_models::G2;
///
/// let model = G2::new(0.5, 0.01, 0.03, 0.005, -0.7).unwrap();
/// let curve = FlatCurve::continuous(0.04);
/// let grid = TimeGrid::uniform(2.0, 12).unwrap();
///
/// let lattice = model.fitted_tree(&grid, &curve).unwrap();
/// let repriced: f64 = lattice.state_prices(12).iter().sum();
/// assert!((repriced - curve.discount(2.0).unwrap()).abs() < 1e-3);
/// ```
///
/// # Parameters
///
/// - **a, b**: Mean reversion speeds of the two factors. One fast and
///   one slow factor is the usual choice, e.g. a = 0.5, b = 0.03.
///
/// - **σ, η**: Factor volatilities. Typical values: 0.005 - 0.02.
///
/// - **ρ**: Instantaneous correlation between the factor drivers, in
///   [-1, 1]. Strongly negative values are typical of fitted G2 models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct G2 {
    /// Mean reversion speed of the first factor (a).
    a: f64,

    /// Volatility of the first factor (σ).
    sigma: f64,

    /// Mean reversion speed of the second factor (b).
    b: f64,

    /// Volatility of the second factor (η).
    eta: f64,

    /// Instantaneous correlation between the factor drivers (ρ).
    rho: f64,
}

impl G2 {
    /// Creates a G2 model after validating its parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidParameter`] if a speed or volatility
    /// is non-finite or negative, or if `rho` is outside `[-1, 1]`.
    pub fn new(a: f64, sigma: f64, b: f64, eta: f64, rho: f64) -> ModelResult<Self> {
        if !a.is_finite() || a < 0.0 {
            return Err(ModelError::invalid_parameter(
                "a",
                a,
                "must be finite and non-negative",
            ));
        }
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(ModelError::invalid_parameter(
                "sigma",
                sigma,
                "must be finite and non-negative",
            ));
        }
        if !b.is_finite() || b < 0.0 {
            return Err(ModelError::invalid_parameter(
                "b",
                b,
                "must be finite and non-negative",
            ));
        }
        if !eta.is_finite() || eta < 0.0 {
            return Err(ModelError::invalid_parameter(
                "eta",
                eta,
                "must be finite and non-negative",
            ));
        }
        if !rho.is_finite() || !(-1.0..=1.0).contains(&rho) {
            return Err(ModelError::invalid_parameter(
                "rho",
                rho,
                "must be a correlation in [-1, 1]",
            ));
        }
        Ok(Self {
            a,
            sigma,
            b,
            eta,
            rho,
        })
    }

    /// Mean reversion speed of the first factor.
    #[must_use]
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Volatility of the first factor.
    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Mean reversion speed of the second factor.
    #[must_use]
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Volatility of the second factor.
    #[must_use]
    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// Instantaneous correlation between the factor drivers.
    #[must_use]
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// The two-factor dynamics the lattice diffuses.
    #[must_use]
    pub fn dynamics(&self) -> AdditiveTwoFactorDynamics {
        AdditiveTwoFactorDynamics::new(
            OrnsteinUhlenbeckProcess::new(self.a, self.sigma),
            OrnsteinUhlenbeckProcess::new(self.b, self.eta),
            self.rho,
        )
    }

    /// The deterministic shift φ evaluated at every grid point.
    ///
    /// # Errors
    ///
    /// Propagates curve lookups past the curve's horizon.
    pub fn shift_values(
        &self,
        grid: &TimeGrid,
        curve: &dyn DiscountCurve,
    ) -> ModelResult<Vec<f64>> {
        (0..grid.len())
            .map(|i| self.phi(grid.time(i), curve))
            .collect()
    }

    /// Builds a correlated two-factor lattice fitted to `curve`.
    ///
    /// The fit is analytic: the shift φ is evaluated at the grid points
    /// and handed to the lattice, which prices `r = x + y + φ`.
    ///
    /// # Errors
    ///
    /// Propagates factor tree construction failures and curve lookups
    /// past the curve's horizon.
    pub fn fitted_tree(
        &self,
        grid: &TimeGrid,
        curve: &dyn DiscountCurve,
    ) -> ModelResult<TwoFactorShortRateTree> {
        let shift = self.shift_values(grid, curve)?;
        Ok(TwoFactorShortRateTree::with_shift(
            Box::new(self.dynamics()),
            grid,
            shift,
        )?)
    }

    /// φ(t) = f(0,t) + ½(σB_a(t))² + ½(ηB_b(t))² + ρσηB_a(t)B_b(t)
    ///
    /// where B_s(t) = (1 - exp(-s*t))/s and f is the curve's
    /// instantaneous forward. The quadratic terms are the accumulated
    /// factor variances, so the shifted lattice reproduces the curve in
    /// expectation.
    fn phi(&self, t: f64, curve: &dyn DiscountCurve) -> ModelResult<f64> {
        let forward = curve.instantaneous_forward(t)?;
        let sigma_term = self.sigma * b_factor(self.a, t);
        let eta_term = self.eta * b_factor(self.b, t);
        Ok(forward
            + 0.5 * sigma_term * sigma_term
            + 0.5 * eta_term * eta_term
            + self.rho * sigma_term * eta_term)
    }
}

/// (1 - exp(-speed*t)) / speed, with the zero-speed limit t.
fn b_factor(speed: f64, t: f64) -> f64 {
    if speed.abs() < ZERO_SPEED_TOLERANCE {
        return t;
    }
    (1.0 - (-speed * t).exp()) / speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use trellis_curves::FlatCurve;
    use trellis_lattice::Lattice;

    #[test]
    fn test_rejects_out_of_range_correlation() {
        for rho in [-1.5, 1.5, f64::NAN] {
            let err = G2::new(0.5, 0.01, 0.03, 0.005, rho).unwrap_err();
            assert!(matches!(
                err,
                ModelError::InvalidParameter { name: "rho", .. }
            ));
        }
    }

    #[test]
    fn test_rejects_negative_factor_volatility() {
        assert!(G2::new(0.5, -0.01, 0.03, 0.005, 0.0).is_err());
        assert!(G2::new(0.5, 0.01, 0.03, -0.005, 0.0).is_err());
    }

    #[test]
    fn test_accepts_boundary_correlations() {
        assert!(G2::new(0.5, 0.01, 0.03, 0.005, -1.0).is_ok());
        assert!(G2::new(0.5, 0.01, 0.03, 0.005, 1.0).is_ok());
    }

    #[test]
    fn test_b_factor_limit_at_zero_speed() {
        assert_abs_diff_eq!(b_factor(0.0, 2.5), 2.5);
        assert_relative_eq!(b_factor(1.0e-9, 2.5), 2.5, max_relative = 1e-8);
    }

    #[test]
    fn test_shift_starts_at_the_instantaneous_forward() {
        // B(0) = 0, so the variance terms vanish at t = 0.
        let model = G2::new(0.5, 0.01, 0.03, 0.005, -0.7).unwrap();
        let curve = FlatCurve::continuous(0.04);
        let grid = TimeGrid::uniform(2.0, 8).unwrap();

        let shift = model.shift_values(&grid, &curve).unwrap();
        assert_eq!(shift.len(), grid.len());
        assert_relative_eq!(
            shift[0],
            curve.instantaneous_forward(0.0).unwrap(),
            max_relative = 1e-12
        );
        // Later shifts sit above the forward: the variance terms are
        // positive and dominate the ρ cross term for these parameters.
        assert!(shift[8] > 0.04);
    }

    #[test]
    fn test_zero_volatility_reprices_a_flat_curve_exactly() {
        let model = G2::new(0.5, 0.0, 0.03, 0.0, 0.0).unwrap();
        let curve = FlatCurve::continuous(0.05);
        let grid = TimeGrid::uniform(2.0, 8).unwrap();

        let lattice = model.fitted_tree(&grid, &curve).unwrap();
        for i in 0..=grid.step_count() {
            assert_eq!(lattice.size(i), 1);
            let repriced: f64 = lattice.state_prices(i).iter().sum();
            assert_abs_diff_eq!(
                repriced,
                curve.discount(grid.time(i)).unwrap(),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let model = G2::new(0.5, 0.01, 0.03, 0.005, -0.7).unwrap();
        let json = serde_json::to_string(&model).unwrap();
        let back: G2 = serde_json::from_str(&json).unwrap();
        assert_eq!(model, back);
    }
}
