//! Guardian and loot population of unclaimed locations.
//!
//! Every draw for a location comes from its location stream, so the same
//! location at the same claim count always receives the same defenders and
//! loot, no matter when or in which order it is stocked.

use tracing::debug;

use crate::content::{ContentRepository, ItemDefinition, SkillDefinition};
use crate::error::{DrawError, GameError, PoolKind};
use crate::game::{Guardian, LocationType, World, WorldLocation, WorldPosition};
use crate::ids::{GameId, LootId};
use crate::rng::SeededRng;

/// Number of guardians defending a location type.
#[must_use]
pub const fn guardian_count(node_type: LocationType) -> u32 {
    match node_type {
        LocationType::Castle => 10,
        // The town starts claimed and is never stocked.
        LocationType::Town => 7,
        LocationType::Dungeon => 5,
        LocationType::Village => 3,
        LocationType::Cave => 1,
        LocationType::Empty => 0,
    }
}

/// Number of loot slots of a location type.
#[must_use]
pub const fn loot_count(node_type: LocationType) -> u32 {
    match node_type {
        LocationType::Castle => 5,
        LocationType::Town => 4,
        LocationType::Dungeon => 3,
        LocationType::Village => 2,
        LocationType::Cave => 1,
        LocationType::Empty => 0,
    }
}

/// Draw the guardians for one claim cycle of a location.
#[must_use]
pub fn guardians_for_location(
    location: &WorldLocation,
    world_seed: &GameId,
    catalog: &impl ContentRepository,
) -> Vec<Guardian> {
    let mut rng = SeededRng::for_location(world_seed, location.id, location.claim_count);
    let templates = catalog.guardians();

    (0..guardian_count(location.node_type))
        .filter_map(|_| {
            let drawn = rng.choose(templates).ok_or(DrawError::EmptyPool {
                kind: PoolKind::Guardian,
                level: location.encounter_level,
            });
            match drawn {
                Ok(data) => Some(Guardian::for_location(data, location.encounter_level)),
                Err(err) => {
                    debug!(location = %location.name, %err, "guardian draw failed");
                    None
                }
            }
        })
        .collect()
}

fn droppable_items(catalog: &impl ContentRepository, level: u32) -> Vec<&ItemDefinition> {
    catalog
        .items()
        .iter()
        .filter(|item| !item.prevent_drop && item.drop_level <= level)
        .collect()
}

fn droppable_skills(catalog: &impl ContentRepository, level: u32) -> Vec<&SkillDefinition> {
    catalog
        .skills()
        .iter()
        .filter(|skill| !skill.prevent_drop && skill.drop_level <= level)
        .collect()
}

/// Draw the loot for one claim cycle of a location.
///
/// Each slot draws an item candidate, then a skill candidate, then picks one
/// of the two. A candidate from an empty pool fails; slots where the picked
/// candidate failed yield nothing.
#[must_use]
pub fn loot_for_location(
    location: &WorldLocation,
    world_seed: &GameId,
    catalog: &impl ContentRepository,
) -> Vec<LootId> {
    let mut rng = SeededRng::for_location(world_seed, location.id, location.claim_count);
    let level = location.encounter_level;
    let items = droppable_items(catalog, level);
    let skills = droppable_skills(catalog, level);

    (0..loot_count(location.node_type))
        .filter_map(|_| {
            let item = rng
                .choose(&items)
                .map(|item| LootId::Item(item.id.clone()))
                .ok_or(DrawError::EmptyPool {
                    kind: PoolKind::Item,
                    level,
                });
            let skill = rng
                .choose(&skills)
                .map(|skill| LootId::Skill(skill.id.clone()))
                .ok_or(DrawError::EmptyPool {
                    kind: PoolKind::Skill,
                    level,
                });

            let candidates = [item, skill];
            match rng.choose(&candidates) {
                Some(Ok(loot)) => Some(loot.clone()),
                Some(Err(err)) => {
                    debug!(location = %location.name, %err, "loot draw failed");
                    None
                }
                None => None,
            }
        })
        .collect()
}

/// Give an unclaimed location its guardians and loot. Claimed locations and
/// the town are left alone.
pub fn stock_location(
    location: &mut WorldLocation,
    world_seed: &GameId,
    catalog: &impl ContentRepository,
) {
    if !location.is_stockable() {
        return;
    }

    location.guardian_ids = guardians_for_location(location, world_seed, catalog)
        .into_iter()
        .map(|guardian| guardian.id)
        .collect();
    location.claim_loot_ids = loot_for_location(location, world_seed, catalog);
}

/// Release a claimed location and re-stock it for its next claim cycle.
///
/// # Errors
///
/// Fails if the position is off the grid, unclaimed, or the home base.
pub fn relinquish_location(
    world: &mut World,
    pos: WorldPosition,
    world_seed: &GameId,
    catalog: &impl ContentRepository,
) -> Result<(), GameError> {
    let location = world.release(pos)?;
    stock_location(location, world_seed, catalog);
    debug!(
        position = %pos,
        claim_count = location.claim_count,
        guardians = location.guardian_ids.len(),
        loot = location.claim_loot_ids.len(),
        "location re-stocked"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::content::{Catalog, GuardianData, ItemSlot};
    use crate::game::StatBlock;
    use crate::ids::{GuardianId, ItemId, LocationId, SkillId};

    fn location(node_type: LocationType, level: u32) -> WorldLocation {
        let mut loc = WorldLocation::blank(LocationId::new(), WorldPosition::new(2, 3));
        loc.node_type = node_type;
        loc.name = format!("{node_type} 1");
        loc.encounter_level = level;
        loc
    }

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        for (id, name) in [("rat", "Rat"), ("bat", "Bat")] {
            catalog.insert_guardian(GuardianData {
                id: GuardianId::new(id),
                name: name.to_string(),
                sprite: String::new(),
                frames: 1,
                stats: StatBlock::new(1, 5, 1, 0),
                stat_scaling: StatBlock::new(1, 1, 0, 0),
                skill_ids: Vec::new(),
                talent_ids: BTreeMap::new(),
                affinity: BTreeMap::new(),
                resistance: BTreeMap::new(),
            });
        }
        catalog.insert_item(ItemDefinition {
            id: ItemId::new("stick"),
            name: "Stick".to_string(),
            sprite: String::new(),
            slot: ItemSlot::Weapon,
            drop_level: 0,
            prevent_drop: false,
            stats: StatBlock::default(),
        });
        catalog.insert_item(ItemDefinition {
            id: ItemId::new("crown"),
            name: "Crown".to_string(),
            sprite: String::new(),
            slot: ItemSlot::Accessory,
            drop_level: 0,
            prevent_drop: true,
            stats: StatBlock::default(),
        });
        catalog.insert_skill(SkillDefinition {
            id: SkillId::new("flare"),
            name: "Flare".to_string(),
            sprite: String::new(),
            drop_level: 5,
            prevent_drop: false,
            cooldown: 0,
        });
        catalog
    }

    #[test]
    fn test_counts_by_type() {
        assert_eq!(guardian_count(LocationType::Castle), 10);
        assert_eq!(guardian_count(LocationType::Town), 7);
        assert_eq!(guardian_count(LocationType::Empty), 0);
        assert_eq!(loot_count(LocationType::Dungeon), 3);
        assert_eq!(loot_count(LocationType::Cave), 1);
        assert_eq!(loot_count(LocationType::Empty), 0);
    }

    #[test]
    fn test_guardians_sized_and_scaled() {
        let seed = GameId::new("stock");
        let loc = location(LocationType::Dungeon, 4);
        let guardians = guardians_for_location(&loc, &seed, &catalog());
        assert_eq!(guardians.len(), 5);
        assert!(guardians.iter().all(|g| g.level == 4 && g.stats.force == 5));
    }

    #[test]
    fn test_no_templates_means_no_guardians() {
        let seed = GameId::new("stock");
        let loc = location(LocationType::Castle, 1);
        assert!(guardians_for_location(&loc, &seed, &Catalog::new()).is_empty());
    }

    #[test]
    fn test_loot_respects_drop_rules() {
        let seed = GameId::new("stock");
        let catalog = catalog();

        // Level 0: only the stick is eligible, the skill pool is empty.
        let low = loot_for_location(&location(LocationType::Castle, 0), &seed, &catalog);
        assert!(low.len() <= 5);
        assert!(low.iter().all(|loot| *loot == LootId::Item(ItemId::new("stick"))));

        // Level 5: the skill becomes eligible; every slot yields something.
        let high = loot_for_location(&location(LocationType::Castle, 5), &seed, &catalog);
        assert_eq!(high.len(), 5);
        assert!(!high.contains(&LootId::Item(ItemId::new("crown"))));
    }

    #[test]
    fn test_stock_is_deterministic_per_claim_count() {
        let seed = GameId::new("stock");
        let catalog = catalog();
        let mut a = location(LocationType::Castle, 5);
        let mut b = a.clone();

        stock_location(&mut a, &seed, &catalog);
        stock_location(&mut b, &seed, &catalog);
        assert_eq!(a.guardian_ids, b.guardian_ids);
        assert_eq!(a.claim_loot_ids, b.claim_loot_ids);
    }

    #[test]
    fn test_claimed_and_town_not_stocked() {
        let seed = GameId::new("stock");
        let catalog = catalog();

        let mut claimed = location(LocationType::Castle, 2);
        claimed.currently_claimed = true;
        stock_location(&mut claimed, &seed, &catalog);
        assert!(claimed.guardian_ids.is_empty());

        let mut town = location(LocationType::Town, 0);
        stock_location(&mut town, &seed, &catalog);
        assert!(town.guardian_ids.is_empty());
        assert!(town.claim_loot_ids.is_empty());
    }
}
