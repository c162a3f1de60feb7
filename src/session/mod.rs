//! The parts of a campaign session that consume dice rolls.

pub mod history;
pub mod mob;

pub use history::{CharacterId, DiceRollRequest, DiceRollResponse, RollLog, RollRecord};
pub use mob::{MobInstance, MobTemplate, RolledStats};
