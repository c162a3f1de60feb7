use super::{roller::Roller, RResult};
use crate::common::*;
use crate::error::{InvalidReason, RollError};
use crate::parse::{self, ast::Expression};
use serde::Deserialize;

pub type DefaultRoller = rand::prelude::ThreadRng;

/// Limits applied while evaluating expressions.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct RollConfig {
    /// Largest dice count a single compound roll may throw; `None` lifts the cap.
    pub max_dice: Option<Count>,
}

impl RollConfig {
    pub const fn bounded(max_dice: Count) -> Self {
        Self {
            max_dice: Some(max_dice),
        }
    }

    pub const fn unbounded() -> Self {
        Self { max_dice: None }
    }
}

impl Default for RollConfig {
    fn default() -> Self {
        Self::bounded(DEFAULT_MAX_DICE)
    }
}

/// Evaluates dice expressions against a [Roller].
pub struct RollContext<R = DefaultRoller> {
    config: RollConfig,
    roller: R,
}

impl<R: Roller> RollContext<R> {
    pub fn new(config: RollConfig, roller: R) -> Self {
        Self { config, roller }
    }

    pub fn with_roller(roller: R) -> Self {
        Self::new(RollConfig::default(), roller)
    }

    pub fn config(&self) -> &RollConfig {
        &self.config
    }

    pub fn into_roller(self) -> R {
        self.roller
    }

    /// Parses and rolls `s`.
    pub fn roll(&mut self, s: &str) -> Result<Int, RollError> {
        let expr = parse::parse(s)?;
        let total = self.eval(&expr).map_err(|why| RollError::invalid(s, why))?;
        tracing::debug!(expression = s, total, "rolled dice");
        Ok(total)
    }

    /// Rolls an already parsed expression.
    pub fn eval(&mut self, expr: &Expression) -> RResult<Int> {
        match *expr {
            Expression::Die(sides) => Ok(self.roller.roll(sides)),
            Expression::Dice {
                count,
                sides,
                modifier,
            } => {
                self.check_count(count)?;
                tracing::trace!(count, sides = sides.get(), "rolling dice");
                let mut total: Int = 0;
                for _ in 0..count {
                    total = total
                        .checked_add(self.roller.roll(sides))
                        .ok_or(InvalidReason::Overflow)?;
                }
                total.checked_add(modifier).ok_or(InvalidReason::Overflow)
            }
            Expression::Range { low, high } if low > high => {
                Err(InvalidReason::InvertedRange { low, high })
            }
            Expression::Range { low, high } => Ok(self.roller.roll_between(low, high)),
            Expression::Literal(x) => Ok(x),
        }
    }

    fn check_count(&self, count: Count) -> RResult<()> {
        match self.config.max_dice {
            Some(max) if count > max => Err(InvalidReason::TooManyDice { count, max }),
            _ => Ok(()),
        }
    }
}

impl Default for RollContext {
    fn default() -> Self {
        Self::new(RollConfig::default(), rand::thread_rng())
    }
}
