//! Core traits for discount curves.

use crate::compounding::Compounding;
use crate::error::CurveResult;

/// One calendar day in years, used for the finite-difference forward.
const FORWARD_BUMP: f64 = 1.0 / 365.0;

/// A term structure of discount factors.
///
/// The single source of truth is [`discount`](Self::discount): every rate
/// quote is derived from discount factors, never the other way round. A
/// lattice calibrated to a curve reproduces exactly the values `discount`
/// returns at its grid times.
///
/// Implementors must be `Send + Sync` so curves can be shared across
/// pricing threads.
///
/// # Example
///
/// ```rust
/// use trellis_curves::{Compounding, DiscountCurve, FlatCurve};
///
/// let curve = FlatCurve::new(0.05, Compounding::Continuous);
/// let df = curve.discount(2.0).unwrap();
/// assert!((df - (-0.10f64).exp()).abs() < 1e-12);
///
/// let zero = curve.zero_rate(2.0, Compounding::Continuous).unwrap();
/// assert!((zero - 0.05).abs() < 1e-12);
/// ```
pub trait DiscountCurve: Send + Sync {
    /// The discount factor for a cash flow at time `time` (in years).
    ///
    /// Returns 1.0 at time zero. Implementations reject times outside
    /// their supported range with [`CurveError::TimeOutOfRange`].
    ///
    /// [`CurveError::TimeOutOfRange`]: crate::CurveError::TimeOutOfRange
    fn discount(&self, time: f64) -> CurveResult<f64>;

    /// The latest time (in years) this curve can discount to.
    fn max_time(&self) -> f64;

    /// The zero rate to `time` under the given compounding convention.
    ///
    /// Returns 0.0 at time zero where no rate is defined.
    fn zero_rate(&self, time: f64, compounding: Compounding) -> CurveResult<f64> {
        let df = self.discount(time)?;
        Ok(compounding.zero_rate(df, time))
    }

    /// The simple forward rate between `t1` and `t2`.
    ///
    /// Returns 0.0 for degenerate intervals (`t2 <= t1`).
    fn forward_rate(&self, t1: f64, t2: f64) -> CurveResult<f64> {
        if t2 <= t1 {
            return Ok(0.0);
        }
        let df1 = self.discount(t1)?;
        let df2 = self.discount(t2)?;
        if df2 <= 0.0 {
            return Ok(0.0);
        }
        let tau = t2 - t1;
        Ok((df1 / df2 - 1.0) / tau)
    }

    /// The instantaneous forward rate at `time`.
    ///
    /// Default implementation uses a one-day finite difference of log
    /// discount factors, stepping backward at the end of the curve so the
    /// forward is defined up to `max_time`. Curves with a closed form
    /// should override this.
    fn instantaneous_forward(&self, time: f64) -> CurveResult<f64> {
        let (lo, hi) = if time + FORWARD_BUMP > self.max_time() {
            (time - FORWARD_BUMP, time)
        } else {
            (time, time + FORWARD_BUMP)
        };
        let df_lo = self.discount(lo)?;
        let df_hi = self.discount(hi)?;
        if df_lo <= 0.0 || df_hi <= 0.0 {
            return Ok(0.0);
        }
        Ok(-(df_hi.ln() - df_lo.ln()) / FORWARD_BUMP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Minimal curve for exercising the provided methods.
    struct TestCurve;

    impl DiscountCurve for TestCurve {
        fn discount(&self, time: f64) -> CurveResult<f64> {
            // Flat 4% continuous curve
            Ok((-0.04 * time).exp())
        }

        fn max_time(&self) -> f64 {
            f64::INFINITY
        }
    }

    #[test]
    fn test_zero_rate_continuous() {
        let curve = TestCurve;
        let rate = curve.zero_rate(5.0, Compounding::Continuous).unwrap();
        assert_relative_eq!(rate, 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_rate_annual() {
        let curve = TestCurve;
        let rate = curve.zero_rate(5.0, Compounding::annual()).unwrap();
        // (e^0.04 - 1) is the annually compounded equivalent of 4% continuous
        assert_relative_eq!(rate, 0.04_f64.exp() - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_forward_rate() {
        let curve = TestCurve;
        let fwd = curve.forward_rate(1.0, 2.0).unwrap();
        // Simple forward over [1, 2]: e^0.04 - 1
        assert_relative_eq!(fwd, 0.04_f64.exp() - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_forward_rate_degenerate_interval() {
        let curve = TestCurve;
        assert_eq!(curve.forward_rate(2.0, 2.0).unwrap(), 0.0);
        assert_eq!(curve.forward_rate(3.0, 2.0).unwrap(), 0.0);
    }

    #[test]
    fn test_instantaneous_forward() {
        let curve = TestCurve;
        let fwd = curve.instantaneous_forward(3.0).unwrap();
        // Flat continuous curve: instantaneous forward equals the rate
        assert_relative_eq!(fwd, 0.04, epsilon = 1e-10);
    }
}
