//! Interpolated discount curve implementation.
//!
//! An `InterpolatedDiscountCurve` is constructed from discrete
//! (time, discount factor) pillars and interpolates log-linearly between
//! them, which is equivalent to flat forward rates on each segment.

use log::debug;

use crate::compounding::Compounding;
use crate::error::{CurveError, CurveResult};
use crate::traits::DiscountCurve;

/// A discount curve built from discrete pillars with log-linear interpolation.
///
/// The curve always passes through the implicit anchor (0.0, 1.0); callers
/// supply pillars at strictly positive, strictly increasing times. Requests
/// beyond the last pillar are rejected rather than extrapolated, because a
/// lattice calibrated past the curve's knowledge would fit noise.
///
/// # Example
///
/// ```rust
/// use trellis_curves::{DiscountCurve, InterpolatedDiscountCurve};
///
/// let curve = InterpolatedDiscountCurve::new(
///     vec![1.0, 2.0, 5.0],
///     vec![0.95, 0.90, 0.78],
/// ).unwrap();
///
/// assert!((curve.discount(0.0).unwrap() - 1.0).abs() < 1e-15);
/// assert!((curve.discount(2.0).unwrap() - 0.90).abs() < 1e-12);
/// assert!(curve.discount(6.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedDiscountCurve {
    /// Pillar times in years, anchored at 0.0.
    times: Vec<f64>,
    /// Log discount factors at each pillar, anchored at 0.0 (= ln 1).
    log_discounts: Vec<f64>,
}

impl InterpolatedDiscountCurve {
    /// Creates a curve from discount factor pillars.
    ///
    /// # Arguments
    ///
    /// * `times` - Times in years (strictly positive, strictly increasing)
    /// * `discount_factors` - Discount factor at each time (positive)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Times and discount factors have different lengths
    /// - Fewer than 2 pillars are provided
    /// - Times are not strictly increasing, or the first is not positive
    /// - Any discount factor is non-positive or non-finite
    pub fn new(times: Vec<f64>, discount_factors: Vec<f64>) -> CurveResult<Self> {
        if times.len() != discount_factors.len() {
            return Err(CurveError::invalid_value(format!(
                "Times ({}) and discount factors ({}) must have same length",
                times.len(),
                discount_factors.len()
            )));
        }

        if times.len() < 2 {
            return Err(CurveError::insufficient_points(2, times.len()));
        }

        // Strict monotonicity, measured against the implicit time-zero anchor
        let mut prev = 0.0;
        for (i, &t) in times.iter().enumerate() {
            if t <= prev {
                return Err(CurveError::non_monotonic_times(i, prev, t));
            }
            prev = t;
        }

        for (i, &df) in discount_factors.iter().enumerate() {
            if !df.is_finite() || df <= 0.0 {
                return Err(CurveError::invalid_discount_factor(i, df));
            }
        }

        let mut anchored_times = Vec::with_capacity(times.len() + 1);
        anchored_times.push(0.0);
        anchored_times.extend_from_slice(&times);

        let mut log_discounts = Vec::with_capacity(discount_factors.len() + 1);
        log_discounts.push(0.0);
        log_discounts.extend(discount_factors.iter().map(|df| df.ln()));

        debug!(
            "Built interpolated discount curve: {} pillars, max time {:.4}",
            times.len(),
            anchored_times[anchored_times.len() - 1]
        );

        Ok(Self {
            times: anchored_times,
            log_discounts,
        })
    }

    /// Creates a curve from zero rate pillars.
    ///
    /// Each rate is converted to a discount factor under `compounding`
    /// before the usual pillar validation runs.
    pub fn from_zero_rates(
        times: Vec<f64>,
        rates: &[f64],
        compounding: Compounding,
    ) -> CurveResult<Self> {
        if times.len() != rates.len() {
            return Err(CurveError::invalid_value(format!(
                "Times ({}) and rates ({}) must have same length",
                times.len(),
                rates.len()
            )));
        }

        let discount_factors = times
            .iter()
            .zip(rates)
            .map(|(&t, &r)| compounding.discount_factor(r, t))
            .collect();

        Self::new(times, discount_factors)
    }

    /// Returns the pillar times, including the time-zero anchor.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Returns the discount factor at pillar index `i` (0 is the anchor).
    #[must_use]
    pub fn discount_at_pillar(&self, i: usize) -> Option<f64> {
        self.log_discounts.get(i).map(|log_df| log_df.exp())
    }

    /// Returns the number of pillars, including the time-zero anchor.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns false; a constructed curve always has at least the anchor.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

impl DiscountCurve for InterpolatedDiscountCurve {
    fn discount(&self, time: f64) -> CurveResult<f64> {
        let max = self.max_time();
        if time < 0.0 || time > max {
            return Err(CurveError::time_out_of_range(time, 0.0, max));
        }

        // First pillar at or past `time`; the anchor guarantees hi >= 1
        let hi = self
            .times
            .partition_point(|&pillar| pillar < time)
            .clamp(1, self.times.len() - 1);
        let lo = hi - 1;

        let weight = (time - self.times[lo]) / (self.times[hi] - self.times[lo]);
        let log_df =
            self.log_discounts[lo] + weight * (self.log_discounts[hi] - self.log_discounts[lo]);
        Ok(log_df.exp())
    }

    fn max_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_curve() -> InterpolatedDiscountCurve {
        InterpolatedDiscountCurve::new(
            vec![0.5, 1.0, 2.0, 5.0, 10.0],
            vec![0.98, 0.955, 0.91, 0.78, 0.60],
        )
        .unwrap()
    }

    #[test]
    fn test_curve_creation() {
        let curve = sample_curve();
        // Five user pillars plus the anchor
        assert_eq!(curve.len(), 6);
        assert_relative_eq!(curve.times()[0], 0.0, epsilon = 1e-15);
        assert_relative_eq!(curve.max_time(), 10.0, epsilon = 1e-15);
    }

    #[test]
    fn test_discount_at_pillars() {
        let curve = sample_curve();
        assert_relative_eq!(curve.discount(0.5).unwrap(), 0.98, epsilon = 1e-12);
        assert_relative_eq!(curve.discount(1.0).unwrap(), 0.955, epsilon = 1e-12);
        assert_relative_eq!(curve.discount(10.0).unwrap(), 0.60, epsilon = 1e-12);
    }

    #[test]
    fn test_discount_at_zero_is_one() {
        let curve = sample_curve();
        assert_relative_eq!(curve.discount(0.0).unwrap(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_log_linear_interpolation() {
        let curve = sample_curve();
        // Midpoint of [1, 2] in log space: sqrt(0.955 * 0.91)
        let df = curve.discount(1.5).unwrap();
        assert_relative_eq!(df, (0.955_f64 * 0.91).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_interpolation_below_first_pillar() {
        let curve = sample_curve();
        // Segment [anchor, 0.5] in log space
        let df = curve.discount(0.25).unwrap();
        assert_relative_eq!(df, 0.98_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_out_of_range() {
        let curve = sample_curve();
        assert!(matches!(
            curve.discount(-0.5),
            Err(CurveError::TimeOutOfRange { .. })
        ));
        assert!(matches!(
            curve.discount(10.5),
            Err(CurveError::TimeOutOfRange { .. })
        ));
    }

    #[test]
    fn test_flat_forward_per_segment() {
        let curve = sample_curve();
        // Log-linear interpolation implies one forward rate per segment
        let f_a = curve.forward_rate(2.5, 3.0).unwrap();
        let f_b = curve.forward_rate(3.5, 4.0).unwrap();
        assert_relative_eq!(f_a, f_b, epsilon = 1e-10);
    }

    #[test]
    fn test_from_zero_rates() {
        let curve = InterpolatedDiscountCurve::from_zero_rates(
            vec![1.0, 2.0, 5.0],
            &[0.04, 0.045, 0.05],
            Compounding::Continuous,
        )
        .unwrap();

        let df = curve.discount(2.0).unwrap();
        assert_relative_eq!(df, (-0.045 * 2.0_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_validation_errors() {
        // Mismatched lengths
        assert!(matches!(
            InterpolatedDiscountCurve::new(vec![1.0, 2.0], vec![0.95]),
            Err(CurveError::InvalidValue { .. })
        ));

        // Too few points
        assert!(matches!(
            InterpolatedDiscountCurve::new(vec![1.0], vec![0.95]),
            Err(CurveError::InsufficientPoints { required: 2, got: 1 })
        ));

        // Non-monotonic times
        assert!(matches!(
            InterpolatedDiscountCurve::new(vec![1.0, 0.5, 2.0], vec![0.95, 0.97, 0.90]),
            Err(CurveError::NonMonotonicTimes { index: 1, .. })
        ));

        // First pillar must be strictly positive
        assert!(matches!(
            InterpolatedDiscountCurve::new(vec![0.0, 1.0], vec![1.0, 0.95]),
            Err(CurveError::NonMonotonicTimes { index: 0, .. })
        ));

        // Non-positive discount factor
        assert!(matches!(
            InterpolatedDiscountCurve::new(vec![1.0, 2.0], vec![0.95, -0.1]),
            Err(CurveError::InvalidDiscountFactor { index: 1, .. })
        ));
    }

    #[test]
    fn test_instantaneous_forward_at_curve_end() {
        let curve = sample_curve();
        // Backward difference keeps the forward defined at the last pillar
        let fwd = curve.instantaneous_forward(10.0).unwrap();
        // Last segment [5, 10] carries a constant forward
        let expected = (0.78_f64 / 0.60).ln() / 5.0;
        assert_relative_eq!(fwd, expected, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_rate_consistency() {
        let curve = sample_curve();
        let df = curve.discount(5.0).unwrap();
        let rate = curve.zero_rate(5.0, Compounding::Continuous).unwrap();
        assert_relative_eq!(rate, -df.ln() / 5.0, epsilon = 1e-12);
    }
}
