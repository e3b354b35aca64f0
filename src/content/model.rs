//! Content definitions as authored in the catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::game::{Element, GameCurrency, LocationType, StatBlock};
use crate::ids::{FestivalId, GuardianId, ItemId, SkillId, TalentId, WorldConfigId};

/// Inclusive placement-count range for one location type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    /// Fewest instances to place.
    pub min: u32,
    /// Most instances to place.
    pub max: u32,
}

impl CountRange {
    /// Create a range.
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Shape of a world to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldConfig {
    /// Catalog id.
    pub id: WorldConfigId,
    /// Display name, e.g. "Small".
    pub name: String,
    /// Grid width.
    pub width: u16,
    /// Grid height.
    pub height: u16,
    /// Highest encounter level, reached at the map edge.
    pub max_level: u32,
    /// Placement-count range per location type.
    #[serde(default)]
    pub node_count: BTreeMap<LocationType, CountRange>,
}

/// Guardian template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardianData {
    /// Catalog id.
    pub id: GuardianId,
    /// Display name.
    pub name: String,
    /// Sprite key.
    #[serde(default)]
    pub sprite: String,
    /// Animation frame count.
    #[serde(default = "default_frames")]
    pub frames: u32,
    /// Stats at encounter level 0.
    pub stats: StatBlock,
    /// Stats gained per encounter level.
    #[serde(default)]
    pub stat_scaling: StatBlock,
    /// Skills known in addition to the baseline attack.
    #[serde(default)]
    pub skill_ids: Vec<SkillId>,
    /// Talent allocation.
    #[serde(default)]
    pub talent_ids: BTreeMap<TalentId, u32>,
    /// Elemental affinity overrides.
    #[serde(default)]
    pub affinity: BTreeMap<Element, f64>,
    /// Elemental resistance overrides.
    #[serde(default)]
    pub resistance: BTreeMap<Element, f64>,
}

const fn default_frames() -> u32 {
    1
}

/// Equipment slot of an item, taken from the catalog section it came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemSlot {
    /// Weapons.
    #[default]
    Weapon,
    /// Armor.
    Armor,
    /// Accessories.
    Accessory,
    /// Trinkets.
    Trinket,
}

/// Item definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDefinition {
    /// Catalog id.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Sprite key.
    #[serde(default)]
    pub sprite: String,
    /// Slot, assigned during ingestion.
    #[serde(default)]
    pub slot: ItemSlot,
    /// Lowest encounter level that can drop this item.
    #[serde(default)]
    pub drop_level: u32,
    /// Never drops as loot.
    #[serde(default)]
    pub prevent_drop: bool,
    /// Stats granted while equipped.
    #[serde(default)]
    pub stats: StatBlock,
}

/// Skill definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDefinition {
    /// Catalog id.
    pub id: SkillId,
    /// Display name.
    pub name: String,
    /// Sprite key.
    #[serde(default)]
    pub sprite: String,
    /// Lowest encounter level that can drop this skill.
    #[serde(default)]
    pub drop_level: u32,
    /// Never drops as loot.
    #[serde(default)]
    pub prevent_drop: bool,
    /// Rounds between uses.
    #[serde(default)]
    pub cooldown: u32,
}

/// Talent definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalentDefinition {
    /// Catalog id.
    pub id: TalentId,
    /// Display name.
    pub name: String,
    /// Talent that must be owned first.
    #[serde(default)]
    pub require_talent_id: Option<TalentId>,
    /// Flavor text.
    #[serde(default)]
    pub description: String,
}

/// Festival definition: a timed production bonus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FestivalData {
    /// Catalog id.
    pub id: FestivalId,
    /// Display name.
    pub name: String,
    /// Ticks the festival stays active.
    pub duration: u64,
    /// Bonus multiplier per currency, added to 1.
    #[serde(default)]
    pub production: BTreeMap<GameCurrency, f64>,
}
