//! Concrete discount curve implementations.

pub mod flat;
pub mod interpolated;

pub use flat::FlatCurve;
pub use interpolated::InterpolatedDiscountCurve;
