//! # Trellis
//!
//! Lattice-based short-rate modeling and pricing.
//!
//! This facade re-exports the public API of the Trellis crates:
//!
//! - [`math`]: Bracketing and derivative-based root solvers
//! - [`curves`]: Discount curves and compounding conventions
//! - [`lattice`]: Time grids, trinomial trees, and the backward-induction
//!   rollback engine
//! - [`models`]: Vasicek, Hull-White, Black-Karasinski, and two-factor
//!   Gaussian short-rate models
//!
//! Depend on `trellis` for the whole stack, or on the individual crates
//! for a narrower dependency graph.
//!
//! # Example
//!
//! ```rust
//! use trellis::prelude::*;
//!
//! // Calibrate Hull-White to a flat 4% curve and price a 5y unit bond
//! // through the lattice.
//! let model = HullWhite::new(0.1, 0.01).unwrap();
//! let curve = FlatCurve::continuous(0.04);
//! let grid = TimeGrid::uniform(5.0, 40).unwrap();
//!
//! let lattice = model.fitted_tree(&grid, &curve).unwrap();
//! let mut bond = lattice.initialize(&|_: f64| 1.0, 5.0).unwrap();
//! lattice.rollback(&mut bond, 0.0, &StepConditionSet::new()).unwrap();
//!
//! let pv = lattice.present_value(&bond).unwrap();
//! assert!((pv - curve.discount(5.0).unwrap()).abs() < 1e-6);
//! ```

#![warn(missing_docs)]

pub use trellis_curves as curves;
pub use trellis_lattice as lattice;
pub use trellis_math as math;
pub use trellis_models as models;

/// Prelude module for convenient imports.
///
/// Flattens the preludes of all Trellis crates. The crates use distinct
/// type names, so the globs do not shadow each other.
pub mod prelude {
    pub use trellis_curves::prelude::*;
    pub use trellis_lattice::prelude::*;
    pub use trellis_math::prelude::*;
    pub use trellis_models::prelude::*;
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn test_prelude_composes_across_crates() {
        // One name from each crate, imported through the same glob.
        let config = SolverConfig::default();
        assert!(config.accuracy > 0.0);

        let curve = FlatCurve::continuous(0.03);
        let grid = TimeGrid::uniform(1.0, 4).unwrap();
        let model = Vasicek::new(0.1, 0.03, 0.005, 0.03).unwrap();

        let lattice = model.tree(&grid).unwrap();
        let total: f64 = lattice.state_prices(4).iter().sum();
        assert!((total - curve.discount(1.0).unwrap()).abs() < 1e-3);
    }
}
