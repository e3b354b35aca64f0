//! Heroes, equipment instances and talent bookkeeping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::content::{ItemDefinition, ItemSlot, SkillDefinition, TalentDefinition};
use crate::game::StatBlock;
use crate::ids::{EquipmentId, HeroId, ItemId, SkillId, TalentId};

/// Name of the placeholder talent that fills empty tree cells.
pub const BLANK_TALENT_NAME: &str = "Blank Talent";

/// Number of skill slots a hero starts with.
pub const SKILL_SLOTS: usize = 3;

/// Names of the default party, in party order.
pub const STARTING_HERO_NAMES: [&str; 4] = ["Ignatius", "Aquara", "Terrus", "Zephyra"];

/// An owned instance of an item definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentItem {
    /// Instance id, `"<definition>|<uuid>"`.
    pub id: EquipmentId,
    /// Definition this instance was created from.
    pub definition_id: ItemId,
    /// Display name.
    pub name: String,
    /// Sprite key.
    pub sprite: String,
    /// Equipment slot.
    pub slot: ItemSlot,
    /// Stats granted while equipped.
    pub stats: StatBlock,
}

impl EquipmentItem {
    /// Create a fresh instance of an item definition.
    #[must_use]
    pub fn from_definition(definition: &ItemDefinition) -> Self {
        Self {
            id: EquipmentId::instance_of(definition.id.as_str()),
            definition_id: definition.id.clone(),
            name: definition.name.clone(),
            sprite: definition.sprite.clone(),
            slot: definition.slot,
            stats: definition.stats,
        }
    }
}

/// An owned instance of a skill definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentSkill {
    /// Instance id, `"<definition>|<uuid>"`.
    pub id: EquipmentId,
    /// Definition this instance was created from.
    pub definition_id: SkillId,
    /// Display name.
    pub name: String,
    /// Sprite key.
    pub sprite: String,
    /// Rounds between uses.
    pub cooldown: u32,
}

impl EquipmentSkill {
    /// Create a fresh instance of a skill definition.
    #[must_use]
    pub fn from_definition(definition: &SkillDefinition) -> Self {
        Self {
            id: EquipmentId::instance_of(definition.id.as_str()),
            definition_id: definition.id.clone(),
            name: definition.name.clone(),
            sprite: definition.sprite.clone(),
            cooldown: definition.cooldown,
        }
    }
}

/// A member of the player's party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    /// Identifier.
    pub id: HeroId,
    /// Display name.
    pub name: String,
    /// Level; also the total number of talent points earned.
    pub level: u32,
    /// Stats before equipment.
    pub base_stats: StatBlock,
    /// Sprite key.
    pub sprite: String,
    /// Animation frame count.
    pub frames: u32,
    /// Skill slots; `None` is an empty slot.
    pub skills: Vec<Option<EquipmentSkill>>,
    /// Points spent per talent.
    pub talents: BTreeMap<TalentId, u32>,
}

impl Hero {
    /// A level 1 hero with empty skill slots and no talents.
    #[must_use]
    pub fn new(name: impl Into<String>, base_stats: StatBlock) -> Self {
        Self {
            id: HeroId::new(),
            name: name.into(),
            level: 1,
            base_stats,
            sprite: String::new(),
            frames: 4,
            skills: vec![None; SKILL_SLOTS],
            talents: BTreeMap::new(),
        }
    }

    /// The default four-hero party.
    #[must_use]
    pub fn starting_party() -> Vec<Hero> {
        STARTING_HERO_NAMES
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let mut hero = Hero::new(*name, StatBlock::new(5, 10, 1, 1));
                hero.sprite = format!("{:04}", idx * 4);
                hero
            })
            .collect()
    }

    /// Equipped skills, in slot order.
    pub fn equipped_skills(&self) -> impl Iterator<Item = &EquipmentSkill> {
        self.skills.iter().flatten()
    }

    /// Put a skill into a slot, returning whatever was there.
    ///
    /// Slots past the end are created empty.
    pub fn equip_skill(&mut self, slot: usize, skill: EquipmentSkill) -> Option<EquipmentSkill> {
        if slot >= self.skills.len() {
            self.skills.resize(slot + 1, None);
        }
        self.skills[slot].replace(skill)
    }

    /// Talent points earned but not spent.
    #[must_use]
    pub fn remaining_talent_points(&self) -> i64 {
        let spent: u64 = self.talents.values().map(|&points| u64::from(points)).sum();
        i64::from(self.level) - i64::try_from(spent).unwrap_or(i64::MAX)
    }

    /// Put one point into a talent.
    pub fn spend_talent_point(&mut self, talent: &TalentId) {
        let points = self.talents.entry(talent.clone()).or_insert(0);
        *points = points.saturating_add(1);
    }

    /// Whether at least one point is in a talent.
    #[must_use]
    pub fn has_talent(&self, talent: &TalentId) -> bool {
        self.talents.get(talent).is_some_and(|&points| points > 0)
    }

    /// Whether the hero may put a point into `talent`.
    ///
    /// The blank talent is never purchasable, the prerequisite must be owned,
    /// the talent must not be owned yet, the hero must have reached
    /// `required_level` and must have a point left.
    #[must_use]
    pub fn can_buy_talent(&self, talent: &TalentDefinition, required_level: u32) -> bool {
        talent.name != BLANK_TALENT_NAME
            && talent
                .require_talent_id
                .as_ref()
                .is_none_or(|required| self.has_talent(required))
            && !self.has_talent(&talent.id)
            && self.level >= required_level
            && self.remaining_talent_points() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn talent(id: &str, name: &str, requires: Option<&str>) -> TalentDefinition {
        TalentDefinition {
            id: TalentId::new(id),
            name: name.to_string(),
            require_talent_id: requires.map(TalentId::new),
            description: String::new(),
        }
    }

    #[test]
    fn test_starting_party() {
        let party = Hero::starting_party();
        let names: Vec<_> = party.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, STARTING_HERO_NAMES);
        assert!(party.iter().all(|h| h.level == 1 && h.skills.len() == SKILL_SLOTS));
        assert_ne!(party[0].id, party[1].id);
    }

    #[test]
    fn test_equipment_instance_ids_are_unique() {
        let def = SkillDefinition {
            id: SkillId::new("fireball"),
            name: "Fireball".to_string(),
            sprite: String::new(),
            drop_level: 0,
            prevent_drop: false,
            cooldown: 2,
        };
        let a = EquipmentSkill::from_definition(&def);
        let b = EquipmentSkill::from_definition(&def);
        assert!(a.id.as_str().starts_with("fireball|"));
        assert_ne!(a.id, b.id);
        assert_eq!(a.definition_id, def.id);
    }

    #[test]
    fn test_equip_skill_replaces_slot() {
        let def = SkillDefinition {
            id: SkillId::new("heal"),
            name: "Heal".to_string(),
            sprite: String::new(),
            drop_level: 0,
            prevent_drop: false,
            cooldown: 0,
        };
        let mut hero = Hero::new("Test", StatBlock::default());
        assert!(hero.equip_skill(1, EquipmentSkill::from_definition(&def)).is_none());
        assert!(hero.equip_skill(1, EquipmentSkill::from_definition(&def)).is_some());
        assert!(hero.equip_skill(5, EquipmentSkill::from_definition(&def)).is_none());
        assert_eq!(hero.equipped_skills().count(), 2);
        assert_eq!(hero.skills.len(), 6);
    }

    #[test]
    fn test_talent_points() {
        let mut hero = Hero::new("Test", StatBlock::default());
        hero.level = 3;
        assert_eq!(hero.remaining_talent_points(), 3);

        let id = TalentId::new("t1");
        hero.spend_talent_point(&id);
        hero.spend_talent_point(&id);
        assert!(hero.has_talent(&id));
        assert_eq!(hero.remaining_talent_points(), 1);
    }

    #[test]
    fn test_can_buy_talent_rules() {
        let mut hero = Hero::new("Test", StatBlock::default());
        hero.level = 2;

        let root = talent("root", "Root", None);
        let child = talent("child", "Child", Some("root"));
        let blank = talent("blank", BLANK_TALENT_NAME, None);

        assert!(hero.can_buy_talent(&root, 1));
        assert!(!hero.can_buy_talent(&root, 3), "level too low");
        assert!(!hero.can_buy_talent(&child, 1), "prerequisite missing");
        assert!(!hero.can_buy_talent(&blank, 1), "blank talent");

        hero.spend_talent_point(&root.id);
        assert!(!hero.can_buy_talent(&root, 1), "already owned");
        assert!(hero.can_buy_talent(&child, 1));

        hero.spend_talent_point(&child.id);
        let other = talent("other", "Other", None);
        assert!(!hero.can_buy_talent(&other, 1), "no points left");
    }
}
