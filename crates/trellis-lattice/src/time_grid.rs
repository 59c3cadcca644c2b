//! Simulation time grid with mandatory event times.
//!
//! A grid is the union of caller-supplied mandatory times (payment dates,
//! exercise dates, maturities as year fractions) and uniformly spaced
//! refinement points between them. Mandatory times are stored exactly, so a
//! payoff evaluated at an event date never sees interpolation error.

use log::debug;
use trellis_math::comparison::close_enough;

use crate::error::{LatticeError, LatticeResult};

/// An ordered, strictly increasing set of simulation times starting at 0.
///
/// Immutable once built. All lattice geometry (tree slices, state prices,
/// rollback steps) is indexed against this grid.
///
/// # Example
///
/// ```rust
/// use trellis_lattice::TimeGrid;
///
/// // Two payment dates, refined to roughly monthly steps
/// let grid = TimeGrid::with_mandatory_times(&[0.5, 1.0], 12).unwrap();
/// assert_eq!(grid.len(), 13);
/// assert!(grid.times().contains(&0.5));
/// assert_eq!(grid.max_time(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    times: Vec<f64>,
    dts: Vec<f64>,
}

impl TimeGrid {
    /// Builds a uniform grid over `[0, horizon]` with `steps` equal steps.
    ///
    /// # Errors
    ///
    /// Returns an error if `horizon` is not strictly positive.
    pub fn uniform(horizon: f64, steps: usize) -> LatticeResult<Self> {
        Self::with_mandatory_times(&[horizon], steps)
    }

    /// Builds a grid containing every mandatory time exactly, refined so the
    /// total step count is at least `steps`.
    ///
    /// A `steps` of zero means "refine to the smallest gap between mandatory
    /// times" (the first time counts as its own gap from zero).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No strictly positive time is supplied
    /// - Any time is negative
    /// - Two times coincide within numerical tolerance
    pub fn with_mandatory_times(mandatory: &[f64], steps: usize) -> LatticeResult<Self> {
        if mandatory.is_empty() {
            return Err(LatticeError::EmptyGrid);
        }

        let mut sorted = mandatory.to_vec();
        sorted.sort_by(f64::total_cmp);

        if sorted[0] < 0.0 {
            return Err(LatticeError::NegativeTime { time: sorted[0] });
        }
        for window in sorted.windows(2) {
            if close_enough(window[0], window[1]) {
                return Err(LatticeError::DuplicateTime { time: window[1] });
            }
        }

        let last = sorted[sorted.len() - 1];
        if last <= 0.0 {
            return Err(LatticeError::EmptyGrid);
        }

        // Target spacing for the refinement points
        let dt_max = if steps == 0 {
            let mut smallest = f64::MAX;
            let mut prev = 0.0;
            for &t in &sorted {
                let gap = t - prev;
                if gap > 0.0 {
                    smallest = smallest.min(gap);
                }
                prev = t;
            }
            smallest
        } else {
            last / steps as f64
        };

        let mut times = vec![0.0];
        let mut period_begin = 0.0;
        for &period_end in &sorted {
            if period_end == 0.0 {
                continue;
            }
            let length = period_end - period_begin;
            #[allow(clippy::cast_possible_truncation)]
            let sub_steps = ((length / dt_max).round() as usize).max(1);
            let dt = length / sub_steps as f64;
            for n in 1..sub_steps {
                times.push(period_begin + n as f64 * dt);
            }
            // The period end is stored exactly, never as an accumulated sum
            times.push(period_end);
            period_begin = period_end;
        }

        let dts = times.windows(2).map(|w| w[1] - w[0]).collect();

        debug!(
            "Built time grid: {} points over [0, {:.4}]",
            times.len(),
            last
        );

        Ok(Self { times, dts })
    }

    /// Number of grid points (steps + 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns false; a constructed grid always holds at least two points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Number of steps (intervals) in the grid.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.dts.len()
    }

    /// The time at grid point `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[must_use]
    pub fn time(&self, i: usize) -> f64 {
        self.times[i]
    }

    /// All grid times, in increasing order.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// The interval `time(i + 1) - time(i)`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[must_use]
    pub fn dt(&self, i: usize) -> f64 {
        self.dts[i]
    }

    /// The last grid time.
    #[must_use]
    pub fn max_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// The index of the grid point matching `time` within tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::TimeNotOnGrid`] if no grid point matches.
    pub fn index_of(&self, time: f64) -> LatticeResult<usize> {
        self.times
            .iter()
            .position(|&t| close_enough(t, time))
            .ok_or(LatticeError::TimeNotOnGrid { time })
    }
}
