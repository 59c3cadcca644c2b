//! # Trellis Curves
//!
//! Discount curve abstractions for the Trellis lattice pricing library.
//!
//! This crate provides:
//!
//! - **Traits**: The [`DiscountCurve`] capability interface with derived
//!   zero-rate and forward-rate queries
//! - **Compounding**: Market compounding conventions and their discount
//!   factor formulas
//! - **Curves**: A flat curve and a log-linearly interpolated pillar curve
//!
//! ## Design Philosophy
//!
//! - **Time-Based**: Curves work in year fractions; date arithmetic and
//!   day-count conventions live with the caller
//! - **Read-Only**: A curve is an immutable market snapshot; consumers
//!   rebuild dependent artifacts when the market moves

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

pub mod compounding;
pub mod curves;
pub mod error;
pub mod traits;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::compounding::Compounding;
    pub use crate::curves::{FlatCurve, InterpolatedDiscountCurve};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::traits::DiscountCurve;
}

pub use compounding::Compounding;
pub use curves::{FlatCurve, InterpolatedDiscountCurve};
pub use error::{CurveError, CurveResult};
pub use traits::DiscountCurve;
