//! Error types for numerical operations.

use thiserror::Error;

/// A specialized Result type for numerical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during numerical operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Root-finding algorithm exhausted its function-evaluation budget.
    #[error("Maximum evaluations exceeded after {evaluations} function calls (residual: {residual:.2e})")]
    MaxEvaluationsExceeded {
        /// Number of function evaluations spent.
        evaluations: usize,
        /// Final residual value.
        residual: f64,
    },

    /// Invalid bracket for root-finding.
    #[error("Invalid bracket: f({a}) = {fa:.2e} and f({b}) = {fb:.2e} have same sign")]
    InvalidBracket {
        /// Lower bound of bracket.
        a: f64,
        /// Upper bound of bracket.
        b: f64,
        /// Function value at a.
        fa: f64,
        /// Function value at b.
        fb: f64,
    },

    /// Division by zero or near-zero value.
    #[error("Division by zero or near-zero value: {value:.2e}")]
    DivisionByZero {
        /// The near-zero value.
        value: f64,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a budget-exhaustion error.
    #[must_use]
    pub fn max_evaluations_exceeded(evaluations: usize, residual: f64) -> Self {
        Self::MaxEvaluationsExceeded {
            evaluations,
            residual,
        }
    }

    /// Creates an invalid bracket error.
    #[must_use]
    pub fn invalid_bracket(a: f64, b: f64, fa: f64, fb: f64) -> Self {
        Self::InvalidBracket { a, b, fa, fb }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::max_evaluations_exceeded(1000, 1e-6);
        assert!(err.to_string().contains("1000 function calls"));
    }

    #[test]
    fn test_bracket_display() {
        let err = MathError::invalid_bracket(0.0, 1.0, 2.0, 3.0);
        assert!(err.to_string().contains("same sign"));
    }
}
