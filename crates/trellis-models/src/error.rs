//! Error types for short-rate model construction and pricing.

use thiserror::Error;

/// Errors from model parameter validation and lattice construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A model parameter fails validation.
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the model constructor
        name: &'static str,
        /// The rejected value
        value: f64,
        /// What the parameter must satisfy
        reason: &'static str,
    },

    /// Tree construction, fitting, or rollback failed.
    #[error("Lattice error: {0}")]
    Lattice(#[from] trellis_lattice::LatticeError),

    /// A discount curve query failed.
    #[error("Curve error: {0}")]
    Curve(#[from] trellis_curves::CurveError),
}

impl ModelError {
    /// Creates a [`ModelError::InvalidParameter`] error.
    pub fn invalid_parameter(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
