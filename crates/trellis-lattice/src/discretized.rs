//! Payoffs and the discretized asset rolled backward through a lattice.

use serde::{Deserialize, Serialize};

/// Terminal or exercise payoff as a function of the lattice underlying.
///
/// Implemented for any `Fn(f64) -> f64` closure, so ad-hoc payoffs can be
/// passed inline:
///
/// ```rust
/// use trellis_lattice::Payoff;
///
/// let digital = |rate: f64| if rate > 0.03 { 1.0 } else { 0.0 };
/// assert_eq!(Payoff::value(&digital, 0.05), 1.0);
/// ```
pub trait Payoff: Send + Sync {
    /// Payoff at a node where the underlying takes `underlying`.
    fn value(&self, underlying: f64) -> f64;
}

impl<F> Payoff for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn value(&self, underlying: f64) -> f64 {
        self(underlying)
    }
}

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Pays when the underlying exceeds the strike.
    Call,
    /// Pays when the underlying falls below the strike.
    Put,
}

/// Plain vanilla option payoff on the lattice underlying.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VanillaPayoff {
    option_type: OptionType,
    strike: f64,
}

impl VanillaPayoff {
    /// A payoff of the given type struck at `strike`.
    pub fn new(option_type: OptionType, strike: f64) -> Self {
        Self {
            option_type,
            strike,
        }
    }

    /// A call struck at `strike`.
    pub fn call(strike: f64) -> Self {
        Self::new(OptionType::Call, strike)
    }

    /// A put struck at `strike`.
    pub fn put(strike: f64) -> Self {
        Self::new(OptionType::Put, strike)
    }

    /// Call or put.
    #[must_use]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// The strike level.
    #[must_use]
    pub fn strike(&self) -> f64 {
        self.strike
    }
}

impl Payoff for VanillaPayoff {
    fn value(&self, underlying: f64) -> f64 {
        match self.option_type {
            OptionType::Call => (underlying - self.strike).max(0.0),
            OptionType::Put => (self.strike - underlying).max(0.0),
        }
    }
}

/// Node values pinned to a lattice slice, carried backward by rollback.
///
/// The invariant `values.len() == lattice.size(time_index)` is established
/// at initialization and maintained by every rollback step.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscretizedAsset {
    time_index: usize,
    values: Vec<f64>,
}

impl DiscretizedAsset {
    /// An asset pinned to `time_index` with one value per node.
    pub fn new(time_index: usize, values: Vec<f64>) -> Self {
        Self { time_index, values }
    }

    /// Slice the asset currently sits on.
    #[must_use]
    pub fn time_index(&self) -> usize {
        self.time_index
    }

    /// Node values across the current slice.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Mutable node values, adjusted in place by step conditions.
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Moves the asset to `time_index` with freshly computed `values`.
    pub fn reset(&mut self, time_index: usize, values: Vec<f64>) {
        self.time_index = time_index;
        self.values = values;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vanilla_call_payoff() {
        let payoff = VanillaPayoff::call(0.03);
        assert_eq!(payoff.value(0.05), 0.02);
        assert_eq!(payoff.value(0.02), 0.0);
    }

    #[test]
    fn test_vanilla_put_payoff() {
        let payoff = VanillaPayoff::put(0.03);
        assert_eq!(payoff.value(0.02), 0.01);
        assert_eq!(payoff.value(0.05), 0.0);
    }

    #[test]
    fn test_closure_payoff() {
        let digital = |r: f64| if r > 0.04 { 1.0 } else { 0.0 };
        assert_eq!(Payoff::value(&digital, 0.05), 1.0);
        assert_eq!(Payoff::value(&digital, 0.03), 0.0);
    }

    #[test]
    fn test_asset_reset() {
        let mut asset = DiscretizedAsset::new(5, vec![1.0, 2.0, 3.0]);
        assert_eq!(asset.time_index(), 5);
        asset.reset(4, vec![0.5, 1.5]);
        assert_eq!(asset.time_index(), 4);
        assert_eq!(asset.values(), &[0.5, 1.5]);
    }

    #[test]
    fn test_option_type_serde() {
        let json = serde_json::to_string(&OptionType::Put).unwrap();
        assert_eq!(json, "\"put\"");
        let back: OptionType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OptionType::Put);
    }
}
