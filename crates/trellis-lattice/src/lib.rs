//! # Trellis Lattice
//!
//! Trinomial tree construction and backward-induction pricing for
//! short-rate models.
//!
//! This crate provides:
//!
//! - **Time grids**: Non-uniform grids that hit mandatory dates exactly
//! - **Trees**: A recombining trinomial tree matching the conditional
//!   moments of a 1-D diffusion, with validated branching probabilities
//! - **Dynamics**: The mapping between a diffused state variable and the
//!   short rate, for normal and lognormal models and two-factor sums
//! - **Lattices**: The [`Lattice`] trait with a shared rollback engine,
//!   a curve-fitted one-factor tree, and a correlated two-factor tree
//! - **Conditions**: Dividend and exercise adjustments applied during
//!   rollback in a fixed order
//!
//! ## Design Philosophy
//!
//! - **Fail Loudly**: Probabilities outside [0, 1], degenerate drift, and
//!   unfittable curves are errors, never silent clamps
//! - **Exact Fitting**: A fitted lattice reprices the input curve's
//!   discount factors at every grid point to solver accuracy
//! - **One Engine**: Initialization, stepback, conditions, and present
//!   value are provided methods on [`Lattice`], shared by every tree

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::if_not_else)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::single_match_else)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::derivable_impls)]

pub mod conditions;
pub mod discretized;
pub mod dynamics;
pub mod error;
pub mod lattice;
pub mod process;
pub mod short_rate_tree;
pub mod time_grid;
pub mod tree;
pub mod two_factor_tree;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::conditions::{
        DividendCondition, ExerciseCondition, StepCondition, StepConditionSet,
    };
    pub use crate::discretized::{DiscretizedAsset, OptionType, Payoff, VanillaPayoff};
    pub use crate::dynamics::{
        AdditiveTwoFactorDynamics, ExponentialDynamics, IdentityDynamics, ShortRateDynamics,
        TwoFactorDynamics,
    };
    pub use crate::error::{LatticeError, LatticeResult};
    pub use crate::lattice::Lattice;
    pub use crate::process::{DiffusionProcess, OrnsteinUhlenbeckProcess};
    pub use crate::short_rate_tree::ShortRateTree;
    pub use crate::time_grid::TimeGrid;
    pub use crate::tree::TrinomialTree;
    pub use crate::two_factor_tree::TwoFactorShortRateTree;
}

pub use conditions::{DividendCondition, ExerciseCondition, StepCondition, StepConditionSet};
pub use discretized::{DiscretizedAsset, OptionType, Payoff, VanillaPayoff};
pub use dynamics::{
    AdditiveTwoFactorDynamics, ExponentialDynamics, IdentityDynamics, ShortRateDynamics,
    TwoFactorDynamics,
};
pub use error::{LatticeError, LatticeResult};
pub use lattice::Lattice;
pub use process::{DiffusionProcess, OrnsteinUhlenbeckProcess};
pub use short_rate_tree::ShortRateTree;
pub use time_grid::TimeGrid;
pub use tree::TrinomialTree;
pub use two_factor_tree::TwoFactorShortRateTree;
