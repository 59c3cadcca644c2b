//! Flat curve implementation.
//!
//! A `FlatCurve` applies a single constant rate at all maturities. It is the
//! workhorse for model tests and for quick sanity pricing where the shape of
//! the term structure does not matter.

use serde::{Deserialize, Serialize};

use crate::compounding::Compounding;
use crate::error::{CurveError, CurveResult};
use crate::traits::DiscountCurve;

/// A term structure with one constant rate across all maturities.
///
/// The rate is interpreted under the stored compounding convention, so a
/// flat 5% annual curve and a flat 5% continuous curve discount differently.
///
/// # Example
///
/// ```rust
/// use trellis_curves::{Compounding, DiscountCurve, FlatCurve};
///
/// let curve = FlatCurve::new(0.05, Compounding::Continuous);
/// let df = curve.discount(1.0).unwrap();
/// assert!((df - (-0.05f64).exp()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatCurve {
    /// Constant annual rate as a decimal.
    rate: f64,
    /// Convention under which the rate is quoted.
    compounding: Compounding,
}

impl FlatCurve {
    /// Creates a flat curve from a rate and its compounding convention.
    #[must_use]
    pub fn new(rate: f64, compounding: Compounding) -> Self {
        Self { rate, compounding }
    }

    /// Creates a flat curve quoting a continuously compounded rate.
    #[must_use]
    pub fn continuous(rate: f64) -> Self {
        Self::new(rate, Compounding::Continuous)
    }

    /// Returns the curve's rate.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the compounding convention.
    #[must_use]
    pub fn compounding(&self) -> Compounding {
        self.compounding
    }
}

impl DiscountCurve for FlatCurve {
    fn discount(&self, time: f64) -> CurveResult<f64> {
        if time < 0.0 {
            return Err(CurveError::time_out_of_range(time, 0.0, f64::INFINITY));
        }
        Ok(self.compounding.discount_factor(self.rate, time))
    }

    fn max_time(&self) -> f64 {
        f64::INFINITY
    }

    // Constant forward in closed form; avoids the finite-difference default.
    fn instantaneous_forward(&self, time: f64) -> CurveResult<f64> {
        if time < 0.0 {
            return Err(CurveError::time_out_of_range(time, 0.0, f64::INFINITY));
        }
        match self.compounding {
            Compounding::Simple => {
                // Simple interest forwards decay with maturity: f(t) = r / (1 + rt)
                Ok(self.rate / (1.0 + self.rate * time))
            }
            _ => Ok(self.compounding.continuous_equivalent(self.rate)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_discount_continuous() {
        let curve = FlatCurve::continuous(0.05);
        let df = curve.discount(2.0).unwrap();
        assert_relative_eq!(df, (-0.10_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn test_discount_at_zero() {
        let curve = FlatCurve::continuous(0.05);
        assert_relative_eq!(curve.discount(0.0).unwrap(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_discount_annual() {
        let curve = FlatCurve::new(0.05, Compounding::annual());
        let df = curve.discount(3.0).unwrap();
        assert_relative_eq!(df, 1.05_f64.powi(-3), epsilon = 1e-15);
    }

    #[test]
    fn test_negative_time_rejected() {
        let curve = FlatCurve::continuous(0.05);
        assert!(matches!(
            curve.discount(-1.0),
            Err(CurveError::TimeOutOfRange { .. })
        ));
    }

    #[test]
    fn test_zero_rate_matches_quote() {
        let curve = FlatCurve::new(0.06, Compounding::semi_annual());
        let rate = curve.zero_rate(4.0, Compounding::semi_annual()).unwrap();
        assert_relative_eq!(rate, 0.06, epsilon = 1e-12);
    }

    #[test]
    fn test_instantaneous_forward_continuous() {
        let curve = FlatCurve::continuous(0.045);
        let fwd = curve.instantaneous_forward(7.0).unwrap();
        assert_relative_eq!(fwd, 0.045, epsilon = 1e-15);
    }

    #[test]
    fn test_instantaneous_forward_annual() {
        // Annual 5% has constant continuous forward ln(1.05)
        let curve = FlatCurve::new(0.05, Compounding::annual());
        let fwd = curve.instantaneous_forward(3.0).unwrap();
        assert_relative_eq!(fwd, 1.05_f64.ln(), epsilon = 1e-15);

        // The closed form must agree with the finite-difference default
        let df = curve.discount(3.0).unwrap();
        let df_plus = curve.discount(3.0 + 1.0 / 365.0).unwrap();
        let numeric = -(df_plus.ln() - df.ln()) * 365.0;
        assert_relative_eq!(fwd, numeric, epsilon = 1e-10);
    }

    #[test]
    fn test_negative_rate() {
        // Negative rates are legal; discount factors exceed one
        let curve = FlatCurve::continuous(-0.01);
        let df = curve.discount(1.0).unwrap();
        assert!(df > 1.0);
        assert_relative_eq!(df, 0.01_f64.exp(), epsilon = 1e-15);
    }

    #[test]
    fn test_serde_round_trip() {
        let curve = FlatCurve::new(0.05, Compounding::quarterly());
        let json = serde_json::to_string(&curve).unwrap();
        let back: FlatCurve = serde_json::from_str(&json).unwrap();
        assert_eq!(curve, back);
    }
}
