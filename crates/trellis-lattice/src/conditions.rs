//! Step conditions applied to asset values during rollback.
//!
//! A condition inspects a slice the rollback is passing through and may
//! adjust the node values: add a cash payment, floor them at an exercise
//! value. Conditions fire after the slice's values exist but before the
//! discounting step that carries them one slice back, so an early-exercise
//! decision always compares against the value including any payment made
//! at that instant.

use trellis_math::comparison::close_enough;

use crate::discretized::Payoff;

/// A value adjustment applied at lattice slices during rollback.
pub trait StepCondition: Send + Sync {
    /// Adjusts `values` in place at time `t`. `underlying` holds the
    /// lattice underlying at each node of the slice, aligned with `values`.
    fn apply(&self, values: &mut [f64], underlying: &[f64], t: f64);

    /// Times this condition must see exactly on the grid.
    fn mandatory_times(&self) -> Vec<f64> {
        Vec::new()
    }
}

/// A fixed cash amount paid at one date, added to every node value when
/// the rollback passes that date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DividendCondition {
    amount: f64,
    time: f64,
}

impl DividendCondition {
    /// A payment of `amount` at `time`.
    pub fn new(amount: f64, time: f64) -> Self {
        Self { amount, time }
    }

    /// The paid amount.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The payment time.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }
}

impl StepCondition for DividendCondition {
    fn apply(&self, values: &mut [f64], _underlying: &[f64], t: f64) {
        if close_enough(t, self.time) {
            for v in values.iter_mut() {
                *v += self.amount;
            }
        }
    }

    fn mandatory_times(&self) -> Vec<f64> {
        vec![self.time]
    }
}

enum ExerciseSchedule {
    /// Exercisable at every slice the rollback passes.
    American,
    /// Exercisable only at the listed times.
    Bermudan(Vec<f64>),
}

/// Floors node values at an exercise payoff on the slices where exercise
/// is allowed.
pub struct ExerciseCondition {
    payoff: Box<dyn Payoff>,
    schedule: ExerciseSchedule,
}

impl ExerciseCondition {
    /// Continuously exercisable: the floor applies at every slice.
    pub fn american(payoff: impl Payoff + 'static) -> Self {
        Self {
            payoff: Box::new(payoff),
            schedule: ExerciseSchedule::American,
        }
    }

    /// Exercisable only at `times`.
    pub fn bermudan(payoff: impl Payoff + 'static, times: Vec<f64>) -> Self {
        Self {
            payoff: Box::new(payoff),
            schedule: ExerciseSchedule::Bermudan(times),
        }
    }
}

impl StepCondition for ExerciseCondition {
    fn apply(&self, values: &mut [f64], underlying: &[f64], t: f64) {
        let active = match &self.schedule {
            ExerciseSchedule::American => true,
            ExerciseSchedule::Bermudan(times) => times.iter().any(|&ti| close_enough(ti, t)),
        };
        if active {
            for (v, &u) in values.iter_mut().zip(underlying) {
                *v = v.max(self.payoff.value(u));
            }
        }
    }

    fn mandatory_times(&self) -> Vec<f64> {
        match &self.schedule {
            ExerciseSchedule::American => Vec::new(),
            ExerciseSchedule::Bermudan(times) => times.clone(),
        }
    }
}

/// An ordered set of conditions applied at each rollback slice.
///
/// Dividends always run before exercises: the holder decides against the
/// value that includes any payment at that instant.
#[derive(Default)]
pub struct StepConditionSet {
    dividends: Vec<DividendCondition>,
    exercises: Vec<Box<dyn StepCondition>>,
}

impl StepConditionSet {
    /// An empty set; rollback with it is pure discounting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a cash payment of `amount` at `time`.
    #[must_use]
    pub fn with_dividend(mut self, amount: f64, time: f64) -> Self {
        self.dividends.push(DividendCondition::new(amount, time));
        self
    }

    /// Adds an exercise condition.
    #[must_use]
    pub fn with_exercise(mut self, condition: impl StepCondition + 'static) -> Self {
        self.exercises.push(Box::new(condition));
        self
    }

    /// Applies all conditions to one slice, dividends first.
    pub fn apply(&self, values: &mut [f64], underlying: &[f64], t: f64) {
        for dividend in &self.dividends {
            dividend.apply(values, underlying, t);
        }
        for exercise in &self.exercises {
            exercise.apply(values, underlying, t);
        }
    }

    /// All times any member condition needs on the grid.
    #[must_use]
    pub fn mandatory_times(&self) -> Vec<f64> {
        let mut times: Vec<f64> = self
            .dividends
            .iter()
            .flat_map(StepCondition::mandatory_times)
            .collect();
        for exercise in &self.exercises {
            times.extend(exercise.mandatory_times());
        }
        times
    }

    /// True when no conditions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dividends.is_empty() && self.exercises.is_empty()
    }
}
