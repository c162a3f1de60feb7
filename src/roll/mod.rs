mod ctx;
mod roller;

use crate::error::InvalidReason;

type RResult<T> = Result<T, InvalidReason>;

pub use ctx::{DefaultRoller, RollConfig, RollContext};
pub use roller::Roller;

#[cfg(test)]
pub(crate) use roller::ScriptedRoller;
