use crate::common::{Int, Sides};
use rand::Rng;

/// A source of uniformly distributed integers.
///
/// Every [rand::Rng] is a roller; tests substitute scripted ones to get exact totals.
pub trait Roller {
    /// Draws an integer from `low..=high`. Callers guarantee `low <= high`.
    fn roll_between(&mut self, low: Int, high: Int) -> Int;

    /// Rolls one die.
    fn roll(&mut self, sides: Sides) -> Int {
        self.roll_between(1, Int::from(sides.get()))
    }
}

impl<R: Rng> Roller for R {
    fn roll_between(&mut self, low: Int, high: Int) -> Int {
        self.gen_range(low..=high)
    }
}

#[cfg(test)]
pub(crate) use stub::{ScriptedRoller, StepRoller};
