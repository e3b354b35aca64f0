//! Stat blocks shared by heroes, guardians and combatants.

use serde::{Deserialize, Serialize};

/// A single combat stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    /// Damage dealt by attacks.
    Force,
    /// Hit points.
    Health,
    /// Turn order.
    Speed,
    /// Elemental power.
    Aura,
}

/// Values for every stat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatBlock {
    /// Force.
    #[serde(default)]
    pub force: u32,
    /// Health.
    #[serde(default)]
    pub health: u32,
    /// Speed.
    #[serde(default)]
    pub speed: u32,
    /// Aura.
    #[serde(default)]
    pub aura: u32,
}

impl StatBlock {
    /// Create a stat block.
    #[must_use]
    pub const fn new(force: u32, health: u32, speed: u32, aura: u32) -> Self {
        Self {
            force,
            health,
            speed,
            aura,
        }
    }

    /// Value of one stat.
    #[must_use]
    pub const fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Force => self.force,
            Stat::Health => self.health,
            Stat::Speed => self.speed,
            Stat::Aura => self.aura,
        }
    }

    /// `self + per_level × level`, saturating per stat.
    #[must_use]
    pub const fn scaled(&self, per_level: &StatBlock, level: u32) -> Self {
        Self {
            force: self.force.saturating_add(per_level.force.saturating_mul(level)),
            health: self.health.saturating_add(per_level.health.saturating_mul(level)),
            speed: self.speed.saturating_add(per_level.speed.saturating_mul(level)),
            aura: self.aura.saturating_add(per_level.aura.saturating_mul(level)),
        }
    }
}
