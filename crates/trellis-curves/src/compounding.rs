//! Compounding conventions for rate and discount factor conversions.
//!
//! This module defines how interest compounds across different market
//! conventions, and the conversions between a quoted rate and the discount
//! factor it implies.

use serde::{Deserialize, Serialize};

/// Compounding convention for rate calculations.
///
/// # Example
///
/// ```rust
/// use trellis_curves::Compounding;
///
/// // A 5% annually compounded rate over one year
/// let annual = Compounding::annual();
/// let df = annual.discount_factor(0.05, 1.0);
/// assert!((df - 1.0 / 1.05).abs() < 1e-12);
///
/// // Derivatives models usually quote continuous rates
/// let cont = Compounding::Continuous;
/// assert!((cont.discount_factor(0.05, 1.0) - (-0.05f64).exp()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compounding {
    /// Periodic compounding: discount factor `(1 + r/n)^(-nt)`.
    ///
    /// - `frequency`: Number of compounding periods per year
    ///   - 1 = Annual
    ///   - 2 = Semi-annual
    ///   - 4 = Quarterly
    ///   - 12 = Monthly
    Periodic {
        /// Compounding periods per year
        frequency: u32,
    },

    /// Continuous compounding: discount factor `e^(-rt)`.
    ///
    /// Used throughout diffusion models; the short rate is a continuously
    /// compounded rate.
    Continuous,

    /// Simple interest: discount factor `1 / (1 + rt)`.
    Simple,
}

impl Compounding {
    /// Returns the base compounding frequency, if applicable.
    ///
    /// Returns `None` for `Continuous` and `Simple`.
    #[must_use]
    pub const fn frequency(&self) -> Option<u32> {
        match self {
            Self::Periodic { frequency } => Some(*frequency),
            Self::Continuous | Self::Simple => None,
        }
    }

    /// Creates an annual periodic compounding convention.
    #[must_use]
    pub const fn annual() -> Self {
        Self::Periodic { frequency: 1 }
    }

    /// Creates a semi-annual periodic compounding convention.
    #[must_use]
    pub const fn semi_annual() -> Self {
        Self::Periodic { frequency: 2 }
    }

    /// Creates a quarterly periodic compounding convention.
    #[must_use]
    pub const fn quarterly() -> Self {
        Self::Periodic { frequency: 4 }
    }

    /// Creates a monthly periodic compounding convention.
    #[must_use]
    pub const fn monthly() -> Self {
        Self::Periodic { frequency: 12 }
    }

    /// Calculate the discount factor for a given rate and time.
    ///
    /// # Arguments
    ///
    /// * `rate` - Annual rate as decimal (e.g., 0.05 for 5%)
    /// * `time` - Time in years
    #[must_use]
    pub fn discount_factor(&self, rate: f64, time: f64) -> f64 {
        match self {
            Self::Periodic { frequency } => {
                let f = *frequency as f64;
                (1.0 + rate / f).powf(-time * f)
            }
            Self::Continuous => (-rate * time).exp(),
            Self::Simple => 1.0 / (1.0 + rate * time),
        }
    }

    /// Recover the rate implied by a discount factor over a period.
    ///
    /// Inverse of [`discount_factor`](Self::discount_factor). Returns 0.0
    /// for non-positive times or discount factors, where no rate is defined.
    #[must_use]
    pub fn zero_rate(&self, discount_factor: f64, time: f64) -> f64 {
        if time <= 0.0 || discount_factor <= 0.0 {
            return 0.0;
        }
        match self {
            Self::Periodic { frequency } => {
                let f = *frequency as f64;
                (discount_factor.powf(-1.0 / (time * f)) - 1.0) * f
            }
            Self::Continuous => -discount_factor.ln() / time,
            Self::Simple => (1.0 / discount_factor - 1.0) / time,
        }
    }

    /// The continuously compounded rate equivalent to `rate` under this
    /// convention.
    ///
    /// A flat curve quoted under any convention has a constant instantaneous
    /// forward equal to this value.
    #[must_use]
    pub fn continuous_equivalent(&self, rate: f64) -> f64 {
        match self {
            Self::Periodic { frequency } => {
                let f = *frequency as f64;
                f * (1.0 + rate / f).ln()
            }
            Self::Continuous => rate,
            // Simple interest has no constant-forward equivalent; the
            // one-period continuous rate is the closest analogue.
            Self::Simple => (1.0 + rate).ln(),
        }
    }
}

impl Default for Compounding {
    fn default() -> Self {
        Self::Continuous
    }
}

impl std::fmt::Display for Compounding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Periodic { frequency: 1 } => write!(f, "Annual"),
            Self::Periodic { frequency: 2 } => write!(f, "Semi-Annual"),
            Self::Periodic { frequency: 4 } => write!(f, "Quarterly"),
            Self::Periodic { frequency: 12 } => write!(f, "Monthly"),
            Self::Periodic { frequency } => write!(f, "Periodic ({frequency}x/year)"),
            Self::Continuous => write!(f, "Continuous"),
            Self::Simple => write!(f, "Simple Interest"),
        }
    }
}
