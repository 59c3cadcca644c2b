//! Mappings between a diffused state variable and the short rate.
//!
//! A lattice diffuses some convenient variable x; the rate seen by
//! discounting is a function of x plus a deterministic shift chosen during
//! calibration. These traits isolate that mapping so the same tree
//! machinery prices under normal (x is the rate) and lognormal (the rate
//! is e^x) models alike.

use crate::process::{DiffusionProcess, OrnsteinUhlenbeckProcess};

/// Dynamics of a one-factor short-rate model: a driving diffusion plus the
/// map between its state variable and the short rate.
///
/// `short_rate` and `variable` must be mutual inverses in their second
/// argument at every fixed time.
pub trait ShortRateDynamics: Send + Sync {
    /// The diffusion followed by the state variable.
    fn process(&self) -> &dyn DiffusionProcess;

    /// Short rate implied by state `x` at time `t`.
    fn short_rate(&self, t: f64, x: f64) -> f64;

    /// State variable implied by short rate `r` at time `t`.
    fn variable(&self, t: f64, r: f64) -> f64;
}

/// Dynamics of a two-factor short-rate model driven by two correlated
/// diffusions.
pub trait TwoFactorDynamics: Send + Sync {
    /// The diffusion followed by the first factor.
    fn process1(&self) -> &dyn DiffusionProcess;

    /// The diffusion followed by the second factor.
    fn process2(&self) -> &dyn DiffusionProcess;

    /// Instantaneous correlation between the factors, in [-1, 1].
    fn correlation(&self) -> f64;

    /// Short rate implied by factor states `x` and `y` at time `t`.
    fn short_rate(&self, t: f64, x: f64, y: f64) -> f64;
}

/// Dynamics where the diffused variable is the short rate itself, as in
/// normal-rate models (Vasicek, Hull-White).
#[derive(Debug, Clone)]
pub struct IdentityDynamics<P> {
    process: P,
}

impl<P: DiffusionProcess> IdentityDynamics<P> {
    /// Treats the diffused variable of `process` as the short rate.
    pub fn new(process: P) -> Self {
        Self { process }
    }
}

impl<P: DiffusionProcess> ShortRateDynamics for IdentityDynamics<P> {
    fn process(&self) -> &dyn DiffusionProcess {
        &self.process
    }

    fn short_rate(&self, _t: f64, x: f64) -> f64 {
        x
    }

    fn variable(&self, _t: f64, r: f64) -> f64 {
        r
    }
}

/// Dynamics where the diffused variable is the log of the short rate, as
/// in lognormal models (Black-Karasinski). Rates are strictly positive.
#[derive(Debug, Clone)]
pub struct ExponentialDynamics<P> {
    process: P,
}

impl<P: DiffusionProcess> ExponentialDynamics<P> {
    /// Treats the diffused variable of `process` as the log short rate.
    pub fn new(process: P) -> Self {
        Self { process }
    }
}

impl<P: DiffusionProcess> ShortRateDynamics for ExponentialDynamics<P> {
    fn process(&self) -> &dyn DiffusionProcess {
        &self.process
    }

    fn short_rate(&self, _t: f64, x: f64) -> f64 {
        x.exp()
    }

    fn variable(&self, _t: f64, r: f64) -> f64 {
        r.ln()
    }
}

/// Two correlated Ornstein-Uhlenbeck factors whose sum is the short rate,
/// as in the additive two-factor Gaussian model.
#[derive(Debug, Clone)]
pub struct AdditiveTwoFactorDynamics {
    process1: OrnsteinUhlenbeckProcess,
    process2: OrnsteinUhlenbeckProcess,
    correlation: f64,
}

impl AdditiveTwoFactorDynamics {
    /// Combines two factors with the given instantaneous correlation.
    pub fn new(
        process1: OrnsteinUhlenbeckProcess,
        process2: OrnsteinUhlenbeckProcess,
        correlation: f64,
    ) -> Self {
        Self {
            process1,
            process2,
            correlation,
        }
    }
}

impl TwoFactorDynamics for AdditiveTwoFactorDynamics {
    fn process1(&self) -> &dyn DiffusionProcess {
        &self.process1
    }

    fn process2(&self) -> &dyn DiffusionProcess {
        &self.process2
    }

    fn correlation(&self) -> f64 {
        self.correlation
    }

    fn short_rate(&self, _t: f64, x: f64, y: f64) -> f64 {
        x + y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_round_trip() {
        let dynamics = IdentityDynamics::new(OrnsteinUhlenbeckProcess::new(0.1, 0.01));
        assert_eq!(dynamics.short_rate(0.5, 0.03), 0.03);
        assert_eq!(dynamics.variable(0.5, 0.03), 0.03);
    }

    #[test]
    fn test_exponential_round_trip() {
        let dynamics = ExponentialDynamics::new(OrnsteinUhlenbeckProcess::new(0.1, 0.15));
        let x = -3.2;
        assert_relative_eq!(dynamics.variable(1.0, dynamics.short_rate(1.0, x)), x);
        assert!(dynamics.short_rate(1.0, -10.0) > 0.0);
    }

    #[test]
    fn test_additive_two_factor_sums() {
        let p1 = OrnsteinUhlenbeckProcess::new(0.5, 0.01);
        let p2 = OrnsteinUhlenbeckProcess::new(0.05, 0.005);
        let dynamics = AdditiveTwoFactorDynamics::new(p1, p2, -0.7);
        assert_relative_eq!(dynamics.short_rate(0.0, 0.02, 0.01), 0.03);
        assert_eq!(dynamics.correlation(), -0.7);
    }
}
