//! # Trellis Math
//!
//! Numerical utilities for the Trellis lattice pricing library.
//!
//! This crate provides:
//!
//! - **Solvers**: Bracketing root-finders (Brent, Bisection, Secant, Ridder,
//!   False Position) and Newton-Raphson
//! - **Comparison**: Ulp-scaled floating-point comparators for time and
//!   probability checks
//!
//! ## Design Philosophy
//!
//! - **Bounded Work**: Every solver enforces a function-evaluation budget
//! - **Explicit Failure**: Non-convergence is a typed error, never a panic
//! - **Dual Criteria**: Residual and step-size stopping rules are both honored

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

pub mod comparison;
pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::comparison::{close, close_enough, close_enough_n, close_n};
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        bisection, brent, brent_with_guess, false_position, newton_raphson,
        newton_raphson_numerical, ridder, secant, BisectionSolver, BrentSolver,
        FalsePositionSolver, RidderSolver, SecantSolver, Solver, SolverConfig, SolverResult,
    };
}

pub use error::{MathError, MathResult};
