//! # Trellis Models
//!
//! Classical short-rate models on the Trellis lattice engine.
//!
//! This crate provides:
//!
//! - [`Vasicek`]: Constant-parameter Gaussian model with closed-form
//!   discount bonds
//! - [`HullWhite`]: Gaussian model fitted exactly to a discount curve,
//!   with closed-form conditional bonds
//! - [`BlackKarasinski`]: Lognormal model with strictly positive rates,
//!   fitted to a discount curve
//! - [`G2`]: Additive two-factor Gaussian model fitted through its
//!   closed-form shift
//!
//! Each model validates its parameters at construction, exposes its
//! diffusion dynamics, and builds the matching `trellis-lattice` tree.
//! Pricing then goes through the shared
//! [`Lattice`](trellis_lattice::Lattice) rollback engine.
//!
//! ## Design Philosophy
//!
//! - **Validate Loudly**: Constructors return errors for out-of-range
//!   parameters instead of silently clamping them
//! - **Curve Fidelity**: Fitted models reprice the input curve's
//!   discount factors to solver accuracy
//! - **One Engine**: Models only choose dynamics and shifts; trees,
//!   fitting, and rollback are the lattice crate's

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

pub mod black_karasinski;
pub mod error;
pub mod g2;
pub mod hull_white;
pub mod vasicek;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::black_karasinski::BlackKarasinski;
    pub use crate::error::{ModelError, ModelResult};
    pub use crate::g2::G2;
    pub use crate::hull_white::HullWhite;
    pub use crate::vasicek::Vasicek;
}

pub use black_karasinski::BlackKarasinski;
pub use error::{ModelError, ModelResult};
pub use g2::G2;
pub use hull_white::HullWhite;
pub use vasicek::Vasicek;
