//! Error types for lattice construction, fitting, and rollback.

use thiserror::Error;

/// Errors from time grids, trinomial trees, and pricing lattices.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    /// A root solve inside a lattice fit failed.
    #[error("Math error: {0}")]
    Math(#[from] trellis_math::MathError),

    /// A discount curve query inside a lattice fit failed.
    #[error("Curve error: {0}")]
    Curve(#[from] trellis_curves::CurveError),

    /// No strictly positive time was supplied for the grid.
    #[error("Time grid requires at least one strictly positive time")]
    EmptyGrid,

    /// A negative time was supplied for the grid.
    #[error("Negative time {time:.4} not allowed in a time grid")]
    NegativeTime {
        /// The offending time
        time: f64,
    },

    /// Two mandatory times coincide within numerical tolerance.
    #[error("Duplicate mandatory time {time:.4} in time grid")]
    DuplicateTime {
        /// The duplicated time
        time: f64,
    },

    /// A queried time does not lie on the grid.
    #[error("Time {time:.4} is not a grid point")]
    TimeNotOnGrid {
        /// The queried time
        time: f64,
    },

    /// The process variance for a step is negative or non-finite.
    #[error("Process variance {value:.6e} at step {step} is not usable")]
    InvalidVariance {
        /// Time step index
        step: usize,
        /// The offending variance
        value: f64,
    },

    /// The process forecast mean at a node is NaN or infinite.
    #[error("Non-finite forecast mean at step {step}, node {node}")]
    NonFiniteForecast {
        /// Time step index
        step: usize,
        /// Node index within the step
        node: usize,
    },

    /// A zero-variance step carries drift away from the tree center.
    #[error("Zero-variance step {step} cannot represent drift at node {node}")]
    DegenerateDrift {
        /// Time step index
        step: usize,
        /// Node index within the step
        node: usize,
    },

    /// A branching probability left [0, 1] beyond tolerance.
    #[error(
        "Branching probability {value:.6} outside [0, 1] at step {step}, node {node}, branch {branch}"
    )]
    InvalidProbability {
        /// Time step index
        step: usize,
        /// Node index within the step
        node: usize,
        /// Branch index (0 = down, 1 = mid, 2 = up)
        branch: usize,
        /// The offending probability
        value: f64,
    },

    /// A value vector does not match the slice it is used on.
    #[error("Size mismatch: expected {expected} values, got {actual}")]
    SizeMismatch {
        /// Number of nodes at the slice
        expected: usize,
        /// Length of the supplied vector
        actual: usize,
    },

    /// A rollback target lies after the asset's current slice.
    #[error("Cannot roll back from slice {current} to later slice {target}")]
    InvalidRollback {
        /// The asset's current slice index
        current: usize,
        /// The requested target slice index
        target: usize,
    },
}

impl LatticeError {
    /// Creates an `InvalidVariance` error.
    #[must_use]
    pub fn invalid_variance(step: usize, value: f64) -> Self {
        Self::InvalidVariance { step, value }
    }

    /// Creates a `NonFiniteForecast` error.
    #[must_use]
    pub fn non_finite_forecast(step: usize, node: usize) -> Self {
        Self::NonFiniteForecast { step, node }
    }

    /// Creates a `DegenerateDrift` error.
    #[must_use]
    pub fn degenerate_drift(step: usize, node: usize) -> Self {
        Self::DegenerateDrift { step, node }
    }

    /// Creates an `InvalidProbability` error.
    #[must_use]
    pub fn invalid_probability(step: usize, node: usize, branch: usize, value: f64) -> Self {
        Self::InvalidProbability {
            step,
            node,
            branch,
            value,
        }
    }

    /// Creates a `SizeMismatch` error.
    #[must_use]
    pub fn size_mismatch(expected: usize, actual: usize) -> Self {
        Self::SizeMismatch { expected, actual }
    }

    /// Creates an `InvalidRollback` error.
    #[must_use]
    pub fn invalid_rollback(current: usize, target: usize) -> Self {
        Self::InvalidRollback { current, target }
    }
}

/// Result type for lattice operations.
pub type LatticeResult<T> = Result<T, LatticeError>;
