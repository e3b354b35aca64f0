//! Whole-game transitions: starting a game, claiming and releasing
//! locations, buying talents.

use tracing::{debug, info};

use crate::content::ContentRepository;
use crate::error::GameError;
use crate::game::{
    currency_claims, EquipmentItem, EquipmentSkill, GameState, Hero, StateStore, WorldPosition,
};
use crate::ids::{GameId, HeroId, LootId, TalentId, WorldConfigId};
use crate::rng::random_world_seed;
use crate::worldgen::{generate_world, relinquish_location};

/// Generate a world and replace the stored state with a fresh game.
///
/// Without an explicit seed a random one is drawn. The town starts claimed,
/// so the initial income is already non-zero.
///
/// # Errors
///
/// Fails if the configuration is unknown or the world cannot be generated.
pub fn start_game(
    store: &mut impl StateStore,
    catalog: &impl ContentRepository,
    config_id: &WorldConfigId,
    seed: Option<GameId>,
) -> Result<GameId, GameError> {
    let config = catalog
        .world_config(config_id)
        .ok_or_else(|| GameError::UnknownWorldConfig(config_id.clone()))?;
    let seed = seed.unwrap_or_else(random_world_seed);

    let world = generate_world(config, &seed, catalog)?;
    let mut state = GameState::new(seed.clone(), world, Hero::starting_party());
    state.meta.world_config = Some(config_id.clone());
    state.currency.per_tick_earnings = currency_claims(&state.world);

    info!(
        seed = %seed,
        config = %config.name,
        width = config.width,
        height = config.height,
        "game started"
    );
    store.update(|_| state);
    Ok(seed)
}

/// Claim a location inside a state: collect its loot into the inventory,
/// mark it claimed and recompute income.
pub(crate) fn claim_in_state(
    state: &mut GameState,
    pos: WorldPosition,
    catalog: &impl ContentRepository,
) -> Result<Vec<LootId>, GameError> {
    let location = state.world.get(pos).ok_or(GameError::LocationNotFound(pos))?;
    if location.currently_claimed {
        return Err(GameError::AlreadyClaimed(pos));
    }
    let loot = location.claim_loot_ids.clone();

    for id in &loot {
        match id {
            LootId::Item(item) => match catalog.item(item) {
                Some(definition) => state
                    .inventory
                    .items
                    .push(EquipmentItem::from_definition(definition)),
                None => debug!(item = %item, "unknown loot item dropped"),
            },
            LootId::Skill(skill) => match catalog.skill(skill) {
                Some(definition) => state
                    .inventory
                    .skills
                    .push(EquipmentSkill::from_definition(definition)),
                None => debug!(skill = %skill, "unknown loot skill dropped"),
            },
        }
    }

    state.world.claim(pos)?;
    state.currency.per_tick_earnings = currency_claims(&state.world);

    info!(position = %pos, loot = loot.len(), "location claimed");
    Ok(loot)
}

/// Claim the location at `pos`, returning the loot collected.
///
/// # Errors
///
/// Fails if the position is off the grid or already claimed.
pub fn claim_location(
    store: &mut impl StateStore,
    pos: WorldPosition,
    catalog: &impl ContentRepository,
) -> Result<Vec<LootId>, GameError> {
    store.try_update(|state| claim_in_state(state, pos, catalog))
}

/// Give up a claimed location. It is re-stocked from its next location seed
/// and income is recomputed.
///
/// # Errors
///
/// Fails if the position is off the grid, unclaimed, or the home base.
pub fn release_location(
    store: &mut impl StateStore,
    pos: WorldPosition,
    catalog: &impl ContentRepository,
) -> Result<(), GameError> {
    store.try_update(|state| {
        let seed = state.game_id.clone();
        relinquish_location(&mut state.world, pos, &seed, catalog)?;
        state.currency.per_tick_earnings = currency_claims(&state.world);
        Ok(())
    })
}

/// Spend one of a hero's talent points.
///
/// # Errors
///
/// Fails if the hero or talent is unknown or the hero may not buy it.
pub fn buy_talent(
    store: &mut impl StateStore,
    catalog: &impl ContentRepository,
    hero_id: HeroId,
    talent_id: &TalentId,
    required_level: u32,
) -> Result<(), GameError> {
    let talent = catalog
        .talent(talent_id)
        .ok_or_else(|| GameError::TalentUnavailable(talent_id.clone()))?;

    store.try_update(|state| {
        let hero = state
            .heroes
            .iter_mut()
            .find(|hero| hero.id == hero_id)
            .ok_or(GameError::UnknownHero(hero_id))?;
        if !hero.can_buy_talent(talent, required_level) {
            return Err(GameError::TalentUnavailable(talent_id.clone()));
        }
        hero.spend_talent_point(talent_id);
        debug!(hero = %hero.name, talent = %talent_id, "talent bought");
        Ok(())
    })
}
