//! One-dimensional diffusion processes.
//!
//! A process supplies the discretized conditional moments the tree builder
//! consumes. The trinomial scheme requires additive noise: the diffusion
//! term must not depend on the state variable, so the builder evaluates
//! variance once per step at x = 0.

/// A 1-D diffusion `dx = μ(t, x) dt + σ(t, x) dW`.
///
/// The conditional moment methods default to an Euler step; processes with
/// known exact moments should override them, since the tree's geometry is
/// only as good as the moments it matches.
pub trait DiffusionProcess: Send + Sync {
    /// The process value at time zero.
    fn x0(&self) -> f64;

    /// The drift `μ(t, x)`.
    fn drift(&self, t: f64, x: f64) -> f64;

    /// The diffusion coefficient `σ(t, x)`.
    fn diffusion(&self, t: f64, x: f64) -> f64;

    /// Conditional mean of `x(t + dt)` given `x(t) = x`.
    fn expectation(&self, t: f64, x: f64, dt: f64) -> f64 {
        x + self.drift(t, x) * dt
    }

    /// Conditional variance of `x(t + dt)` given `x(t) = x`.
    fn variance(&self, t: f64, x: f64, dt: f64) -> f64 {
        let sigma = self.diffusion(t, x);
        sigma * sigma * dt
    }

    /// Conditional standard deviation of `x(t + dt)` given `x(t) = x`.
    fn std_deviation(&self, t: f64, x: f64, dt: f64) -> f64 {
        self.variance(t, x, dt).sqrt()
    }
}

/// Mean-reverting Gaussian process
/// `dx = speed · (level − x) dt + volatility dW`.
///
/// The workhorse behind Gaussian and lognormal short-rate models. Both
/// conditional moments are known in closed form and are exact here, not
/// Euler approximations.
///
/// # Example
///
/// ```rust
/// use trellis_lattice::{DiffusionProcess, OrnsteinUhlenbeckProcess};
///
/// let process = OrnsteinUhlenbeckProcess::new(0.1, 0.01)
///     .with_initial_value(0.05)
///     .with_level(0.05);
/// assert_eq!(process.x0(), 0.05);
/// // Started at the level, the mean never moves
/// assert!((process.expectation(0.0, 0.05, 1.0) - 0.05).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrnsteinUhlenbeckProcess {
    x0: f64,
    speed: f64,
    level: f64,
    volatility: f64,
}

impl OrnsteinUhlenbeckProcess {
    /// Creates a zero-centered process: `x0 = 0`, reverting to `level = 0`.
    #[must_use]
    pub fn new(speed: f64, volatility: f64) -> Self {
        Self {
            x0: 0.0,
            speed,
            level: 0.0,
            volatility,
        }
    }

    /// Sets the starting value.
    #[must_use]
    pub fn with_initial_value(mut self, x0: f64) -> Self {
        self.x0 = x0;
        self
    }

    /// Sets the reversion level.
    #[must_use]
    pub fn with_level(mut self, level: f64) -> Self {
        self.level = level;
        self
    }

    /// The mean-reversion speed.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// The reversion level.
    #[must_use]
    pub fn level(&self) -> f64 {
        self.level
    }

    /// The volatility.
    #[must_use]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }
}

impl DiffusionProcess for OrnsteinUhlenbeckProcess {
    fn x0(&self) -> f64 {
        self.x0
    }

    fn drift(&self, _t: f64, x: f64) -> f64 {
        self.speed * (self.level - x)
    }

    fn diffusion(&self, _t: f64, _x: f64) -> f64 {
        self.volatility
    }

    /// Exact conditional mean: `level + (x − level) · e^{−speed·dt}`.
    fn expectation(&self, _t: f64, x: f64, dt: f64) -> f64 {
        self.level + (x - self.level) * (-self.speed * dt).exp()
    }

    /// Exact conditional variance:
    /// `σ² · (1 − e^{−2·speed·dt}) / (2·speed)`, with the `σ²·dt` limit
    /// as the speed vanishes.
    fn variance(&self, _t: f64, _x: f64, dt: f64) -> f64 {
        let sigma2 = self.volatility * self.volatility;
        if self.speed.abs() < 1e-15 {
            sigma2 * dt
        } else {
            sigma2 * (1.0 - (-2.0 * self.speed * dt).exp()) / (2.0 * self.speed)
        }
    }
}
