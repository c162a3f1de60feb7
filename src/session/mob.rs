use crate::common::Int;
use crate::roll::{RollContext, Roller};
use serde::{Deserialize, Serialize};

pub type MobId = u64;
pub type LocationId = u64;

const fn default_hp() -> Int {
    50
}

const fn default_damage() -> Int {
    1
}

/// A monster as the game master configured it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobTemplate {
    pub id: MobId,
    pub name: String,
    #[serde(default = "default_hp")]
    pub base_hp: Int,
    #[serde(default = "default_damage")]
    pub base_damage: Int,
    /// Dice rolled for a spawned copy's hit points, e.g. `"2d6+1"`.
    #[serde(default)]
    pub dice_pattern: Option<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolledStats {
    pub hp: Int,
    pub damage: Int,
}

/// A copy of a [MobTemplate] placed in a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobInstance {
    pub mob_id: MobId,
    pub location_id: LocationId,
    pub rolled_stats: Option<RolledStats>,
    pub hp_current: Int,
}

impl MobTemplate {
    pub fn new(id: MobId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            base_hp: default_hp(),
            base_damage: default_damage(),
            dice_pattern: None,
        }
    }

    pub fn with_dice_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.dice_pattern = Some(pattern.into());
        self
    }

    /// Rolls this template's hit points, if it has a pattern.
    ///
    /// A pattern that fails to roll is logged and treated as absent, so a bad template never
    /// stops a spawn.
    pub fn roll_stats<R: Roller>(&self, ctx: &mut RollContext<R>) -> Option<RolledStats> {
        let pattern = self.dice_pattern.as_deref().filter(|p| !p.is_empty())?;
        match ctx.roll(pattern) {
            Ok(hp) => Some(RolledStats {
                hp,
                damage: self.base_damage,
            }),
            Err(why) => {
                tracing::warn!(mob_id = self.id, %why, "falling back to base hit points");
                None
            }
        }
    }

    pub fn spawn<R: Roller>(
        &self,
        location_id: LocationId,
        ctx: &mut RollContext<R>,
    ) -> MobInstance {
        let rolled_stats = self.roll_stats(ctx);
        MobInstance {
            mob_id: self.id,
            location_id,
            rolled_stats,
            hp_current: rolled_stats.map_or(self.base_hp, |s| s.hp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::ScriptedRoller;

    fn ctx(script: &[Int]) -> RollContext<ScriptedRoller> {
        RollContext::with_roller(ScriptedRoller::new(script.iter().copied()))
    }

    #[test]
    fn test_spawn_rolls_hit_points() {
        let goblin = MobTemplate::new(1, "Goblin").with_dice_pattern("2d6+1");
        let spawned = goblin.spawn(4, &mut ctx(&[3, 5]));
        assert_eq!(
            spawned,
            MobInstance {
                mob_id: 1,
                location_id: 4,
                rolled_stats: Some(RolledStats { hp: 9, damage: 1 }),
                hp_current: 9,
            }
        );
    }

    #[test]
    fn test_spawn_without_pattern() {
        let mut rat = MobTemplate::new(2, "Rat");
        rat.base_hp = 5;
        let spawned = rat.spawn(1, &mut ctx(&[]));
        assert_eq!(spawned.rolled_stats, None);
        assert_eq!(spawned.hp_current, 5);

        let rat = rat.with_dice_pattern("");
        assert_eq!(rat.spawn(1, &mut ctx(&[])).hp_current, 5);
    }

    #[test]
    fn test_spawn_with_corrupt_pattern_falls_back() {
        let ogre = MobTemplate::new(3, "Ogre").with_dice_pattern("lots");
        let spawned = ogre.spawn(2, &mut ctx(&[]));
        assert_eq!(spawned.rolled_stats, None);
        assert_eq!(spawned.hp_current, 50);
    }

    #[test]
    fn test_template_json_defaults() {
        let mob: MobTemplate = serde_json::from_str(r#"{"id": 9, "name": "Wolf"}"#).unwrap();
        assert_eq!(mob, MobTemplate::new(9, "Wolf"));
        assert_eq!(mob.base_hp, 50);
        assert_eq!(mob.base_damage, 1);
    }
}
