//! Error types for curve operations.
//!
//! This module provides error handling for curve construction and
//! discount factor queries.

use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Requested time is outside the curve's valid range.
    #[error("Time {requested:.4} out of range [{min:.4}, {max:.4}]")]
    TimeOutOfRange {
        /// The requested time in years.
        requested: f64,
        /// Minimum valid time.
        min: f64,
        /// Maximum valid time.
        max: f64,
    },

    /// Not enough data points to build the curve.
    #[error("Insufficient points: need at least {required}, got {got}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        got: usize,
    },

    /// Times are not monotonically increasing.
    #[error("Non-monotonic times at index {index}: {prev:.4} >= {current:.4}")]
    NonMonotonicTimes {
        /// Index where monotonicity violation occurred.
        index: usize,
        /// Previous time value.
        prev: f64,
        /// Current time value.
        current: f64,
    },

    /// A discount factor is non-positive or non-finite.
    #[error("Invalid discount factor {value:.6} at index {index}")]
    InvalidDiscountFactor {
        /// Index of the offending pillar.
        index: usize,
        /// The discount factor value.
        value: f64,
    },

    /// Invalid value (NaN, Inf, or domain error).
    #[error("Invalid value: {reason}")]
    InvalidValue {
        /// Description of why value is invalid.
        reason: String,
    },

    /// Mathematical error from a lower layer.
    #[error("Math error: {0}")]
    Math(#[from] trellis_math::MathError),
}

impl CurveError {
    /// Creates a time out of range error.
    #[must_use]
    pub fn time_out_of_range(requested: f64, min: f64, max: f64) -> Self {
        Self::TimeOutOfRange {
            requested,
            min,
            max,
        }
    }

    /// Creates an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, got: usize) -> Self {
        Self::InsufficientPoints { required, got }
    }

    /// Creates a non-monotonic times error.
    #[must_use]
    pub fn non_monotonic_times(index: usize, prev: f64, current: f64) -> Self {
        Self::NonMonotonicTimes {
            index,
            prev,
            current,
        }
    }

    /// Creates an invalid discount factor error.
    #[must_use]
    pub fn invalid_discount_factor(index: usize, value: f64) -> Self {
        Self::InvalidDiscountFactor { index, value }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CurveError::time_out_of_range(15.0, 0.0, 10.0);
        let msg = format!("{}", err);
        assert!(msg.contains("15.0"));
        assert!(msg.contains("out of range"));
    }

    #[test]
    fn test_non_monotonic_times() {
        let err = CurveError::non_monotonic_times(3, 2.0, 1.5);
        let msg = format!("{}", err);
        assert!(msg.contains("Non-monotonic"));
        assert!(msg.contains("index 3"));
    }

    #[test]
    fn test_math_error_wrapping() {
        let math_err = trellis_math::MathError::invalid_input("bad accuracy");
        let err: CurveError = math_err.into();
        assert!(matches!(err, CurveError::Math(_)));
    }
}
