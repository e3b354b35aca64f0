//! Combat roster instantiation.
//!
//! A combat owns independent copies of everything it needs: later changes to
//! the party or the world do not leak into a running fight.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::content::ContentRepository;
use crate::error::GameError;
use crate::game::session::claim_in_state;
use crate::game::{
    ElementBlock, EquipmentSkill, Guardian, Hero, StatBlock, StateStore, WorldLocation,
    WorldPosition,
};
use crate::ids::{CombatId, CombatantId, GuardianId, HeroId, LootId, SkillId, TalentId};

/// Where a combatant came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum CombatantSource {
    /// A party member.
    Hero(HeroId),
    /// A guardian template.
    Guardian(GuardianId),
}

/// One participant of a combat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combatant {
    /// Unique within the combat.
    pub id: CombatantId,
    /// Hero or guardian this combatant was built from.
    pub source: CombatantSource,
    /// Display name.
    pub name: String,
    /// Whether the combatant fights against the party.
    pub is_enemy: bool,
    /// Stats before modifiers.
    pub base_stats: StatBlock,
    /// Stats after modifiers.
    pub total_stats: StatBlock,
    /// Current hit points.
    pub hp: u32,
    /// Level.
    pub level: u32,
    /// Sprite key.
    pub sprite: String,
    /// Animation frame count.
    pub frames: u32,
    /// Skills available by id.
    pub skill_ids: Vec<SkillId>,
    /// Equipped skill snapshots.
    pub skill_refs: Vec<EquipmentSkill>,
    /// Talent allocation.
    pub talents: BTreeMap<TalentId, u32>,
    /// Elemental affinity.
    pub affinity: ElementBlock,
    /// Elemental resistance.
    pub resistance: ElementBlock,
}

impl Combatant {
    /// Snapshot a hero.
    #[must_use]
    pub fn from_hero(hero: &Hero) -> Self {
        Self {
            id: CombatantId::new(),
            source: CombatantSource::Hero(hero.id),
            name: hero.name.clone(),
            is_enemy: false,
            base_stats: hero.base_stats,
            total_stats: hero.base_stats,
            hp: hero.base_stats.health,
            level: hero.level,
            sprite: hero.sprite.clone(),
            frames: hero.frames,
            skill_ids: vec![SkillId::attack()],
            skill_refs: hero.equipped_skills().cloned().collect(),
            talents: hero.talents.clone(),
            affinity: ElementBlock::default(),
            resistance: ElementBlock::default(),
        }
    }

    /// Snapshot a guardian already scaled to its level.
    #[must_use]
    pub fn from_guardian(guardian: &Guardian) -> Self {
        let mut skill_ids = Vec::with_capacity(guardian.skill_ids.len() + 1);
        skill_ids.push(SkillId::attack());
        skill_ids.extend(guardian.skill_ids.iter().cloned());

        Self {
            id: CombatantId::new(),
            source: CombatantSource::Guardian(guardian.id.clone()),
            name: format!("{} Lv.{}", guardian.name, guardian.level),
            is_enemy: true,
            base_stats: guardian.stats,
            total_stats: guardian.stats,
            hp: guardian.stats.health,
            level: guardian.level,
            sprite: guardian.sprite.clone(),
            frames: guardian.frames,
            skill_ids,
            skill_refs: Vec::new(),
            talents: guardian.talents.clone(),
            affinity: guardian.affinity,
            resistance: guardian.resistance,
        }
    }
}

/// A combat session at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combat {
    /// Identifier.
    pub id: CombatId,
    /// Name of the contested location.
    pub location_name: String,
    /// Position of the contested location.
    pub location_position: WorldPosition,
    /// Rounds fought so far.
    pub rounds: u32,
    /// The party.
    pub heroes: Vec<Combatant>,
    /// The defenders.
    pub guardians: Vec<Combatant>,
}

/// How a combat ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatOutcome {
    /// Every guardian fell; the location is claimed.
    Victory,
    /// Every hero fell.
    Defeat,
    /// The party left the fight.
    Fled,
}

/// Build a combat between the party and a location's guardians.
///
/// Guardian ids that the catalog does not know are dropped.
#[must_use]
pub fn generate_combat(
    location: &WorldLocation,
    heroes: &[Hero],
    catalog: &impl ContentRepository,
) -> Combat {
    let heroes = heroes.iter().map(Combatant::from_hero).collect();

    let guardians = location
        .guardian_ids
        .iter()
        .filter_map(|id| {
            let data = catalog.guardian(id);
            if data.is_none() {
                debug!(guardian = %id, location = %location.name, "unknown guardian dropped");
            }
            data
        })
        .map(|data| Guardian::for_location(data, location.encounter_level))
        .map(|guardian| Combatant::from_guardian(&guardian))
        .collect();

    Combat {
        id: CombatId::new(),
        location_name: location.name.clone(),
        location_position: location.position(),
        rounds: 0,
        heroes,
        guardians,
    }
}

/// Engage the location at `pos` with the current party.
///
/// # Errors
///
/// Fails if a combat is already running, the position is off the grid, or
/// the location is already claimed.
pub fn start_combat(
    store: &mut impl StateStore,
    pos: WorldPosition,
    catalog: &impl ContentRepository,
) -> Result<CombatId, GameError> {
    store.try_update(|state| {
        if state.combat.is_some() {
            return Err(GameError::CombatInProgress);
        }
        let location = state
            .world
            .get(pos)
            .ok_or(GameError::LocationNotFound(pos))?;
        if location.currently_claimed {
            return Err(GameError::AlreadyClaimed(pos));
        }

        let combat = generate_combat(location, &state.heroes, catalog);
        let id = combat.id;
        info!(
            combat = %id,
            location = %combat.location_name,
            heroes = combat.heroes.len(),
            guardians = combat.guardians.len(),
            "combat started"
        );
        state.combat = Some(combat);
        Ok(id)
    })
}

/// End the running combat. A victory claims the contested location and
/// returns the loot collected from it.
///
/// # Errors
///
/// Returns [`GameError::NoActiveCombat`] if nothing is running, or the claim
/// error if the location cannot be claimed.
pub fn finish_combat(
    store: &mut impl StateStore,
    outcome: CombatOutcome,
    catalog: &impl ContentRepository,
) -> Result<Vec<LootId>, GameError> {
    store.try_update(|state| {
        let combat = state.combat.take().ok_or(GameError::NoActiveCombat)?;
        info!(combat = %combat.id, ?outcome, rounds = combat.rounds, "combat finished");

        match outcome {
            CombatOutcome::Victory => claim_in_state(state, combat.location_position, catalog),
            CombatOutcome::Defeat | CombatOutcome::Fled => Ok(Vec::new()),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Catalog, GuardianData, SkillDefinition};
    use crate::game::{Element, LocationType, MemoryStore, NodeCounts, World};
    use crate::ids::LocationId;

    fn guardian_data(id: &str, name: &str) -> GuardianData {
        let mut resistance = BTreeMap::new();
        resistance.insert(Element::Earth, 0.5);
        GuardianData {
            id: GuardianId::new(id),
            name: name.to_string(),
            sprite: "0001".to_string(),
            frames: 3,
            stats: StatBlock::new(2, 10, 1, 0),
            stat_scaling: StatBlock::new(1, 2, 0, 0),
            skill_ids: vec![SkillId::new("bite")],
            talent_ids: BTreeMap::new(),
            affinity: BTreeMap::new(),
            resistance,
        }
    }

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert_guardian(guardian_data("wolf", "Wolf"));
        catalog
    }

    fn contested(level: u32, guardians: &[&str]) -> WorldLocation {
        let mut loc = WorldLocation::blank(LocationId::new(), WorldPosition::new(1, 0));
        loc.node_type = LocationType::Cave;
        loc.name = "cave 1".to_string();
        loc.encounter_level = level;
        loc.guardian_ids = guardians.iter().map(|id| GuardianId::new(*id)).collect();
        loc
    }

    fn store_with(location: WorldLocation) -> MemoryStore {
        let mut cells = vec![WorldLocation::blank(LocationId::new(), WorldPosition::new(0, 0))];
        cells.push(location);
        let world = World::from_cells(2, 1, cells, WorldPosition::new(0, 0), NodeCounts::default())
            .unwrap();
        MemoryStore::new(crate::game::GameState::new(
            crate::ids::GameId::new("seed"),
            world,
            Hero::starting_party(),
        ))
    }

    #[test]
    fn test_roster_sizes() {
        let heroes = Hero::starting_party();
        let location = contested(3, &["wolf", "wolf", "ghost"]);
        let combat = generate_combat(&location, &heroes, &catalog());

        assert_eq!(combat.heroes.len(), 4);
        assert_eq!(combat.guardians.len(), 2, "unknown guardian dropped");
        assert_eq!(combat.rounds, 0);
        assert_eq!(combat.location_name, "cave 1");
        assert_eq!(combat.location_position, WorldPosition::new(1, 0));
    }

    #[test]
    fn test_guardian_combatant() {
        let combat = generate_combat(&contested(3, &["wolf"]), &[], &catalog());
        let wolf = &combat.guardians[0];

        assert_eq!(wolf.name, "Wolf Lv.3");
        assert!(wolf.is_enemy);
        assert_eq!(wolf.level, 3);
        assert_eq!(wolf.base_stats, StatBlock::new(5, 16, 1, 0));
        assert_eq!(wolf.hp, 16);
        assert_eq!(wolf.skill_ids, vec![SkillId::attack(), SkillId::new("bite")]);
        assert!(wolf.skill_refs.is_empty());
        assert!((wolf.resistance.get(Element::Earth) - 0.5).abs() < f64::EPSILON);
        assert!(wolf.affinity.get(Element::Fire).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hero_combatant() {
        let mut heroes = Hero::starting_party();
        let skill = SkillDefinition {
            id: SkillId::new("spark"),
            name: "Spark".to_string(),
            sprite: String::new(),
            drop_level: 0,
            prevent_drop: false,
            cooldown: 1,
        };
        heroes[0].equip_skill(0, EquipmentSkill::from_definition(&skill));

        let combat = generate_combat(&contested(0, &[]), &heroes, &catalog());
        let first = &combat.heroes[0];
        assert!(!first.is_enemy);
        assert_eq!(first.name, "Ignatius");
        assert_eq!(first.skill_ids, vec![SkillId::attack()]);
        assert_eq!(first.skill_refs.len(), 1);
        assert_eq!(first.hp, heroes[0].base_stats.health);
        assert_eq!(first.source, CombatantSource::Hero(heroes[0].id));
        assert!(combat.heroes[1].skill_refs.is_empty());
    }

    #[test]
    fn test_combat_ids_differ() {
        let loc = contested(1, &["wolf"]);
        let a = generate_combat(&loc, &[], &catalog());
        let b = generate_combat(&loc, &[], &catalog());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_start_and_win_combat_claims_location() {
        let catalog = catalog();
        let pos = WorldPosition::new(1, 0);
        let mut store = store_with(contested(2, &["wolf"]));

        start_combat(&mut store, pos, &catalog).unwrap();
        assert!(store.read().combat.is_some());
        assert_eq!(
            start_combat(&mut store, pos, &catalog),
            Err(GameError::CombatInProgress)
        );

        finish_combat(&mut store, CombatOutcome::Victory, &catalog).unwrap();
        let state = store.read();
        assert!(state.combat.is_none());
        assert!(state.world.get(pos).unwrap().currently_claimed);
        assert!(state.world.get(pos).unwrap().guardian_ids.is_empty());
    }

    #[test]
    fn test_defeat_leaves_location_unclaimed() {
        let catalog = catalog();
        let pos = WorldPosition::new(1, 0);
        let mut store = store_with(contested(2, &["wolf"]));

        start_combat(&mut store, pos, &catalog).unwrap();
        finish_combat(&mut store, CombatOutcome::Defeat, &catalog).unwrap();
        assert!(!store.read().world.get(pos).unwrap().currently_claimed);
        assert_eq!(
            finish_combat(&mut store, CombatOutcome::Victory, &catalog),
            Err(GameError::NoActiveCombat)
        );
    }
}
