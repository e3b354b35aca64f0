//! Game state and the store it lives in.
//!
//! All state transitions go through a [`StateStore`]. A transition reads the
//! current state, builds the next one and hands it back in a single
//! `update` call, so a failed transition leaves the store untouched.

use serde::{Deserialize, Serialize};

use crate::game::{
    ActiveFestival, Combat, CurrencyBlock, EquipmentItem, EquipmentSkill, Hero, World,
};
use crate::ids::{GameId, HeroId, WorldConfigId};

/// Current save format version.
pub const STATE_VERSION: u32 = 1;

/// Bookkeeping about the game itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMeta {
    /// Save format version.
    pub version: u32,
    /// Whether a world has been generated.
    pub is_setup: bool,
    /// World configuration the world was generated from.
    pub world_config: Option<WorldConfigId>,
}

impl Default for GameMeta {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            is_setup: false,
            world_config: None,
        }
    }
}

/// Owned equipment not currently worn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// Item instances.
    pub items: Vec<EquipmentItem>,
    /// Skill instances.
    pub skills: Vec<EquipmentSkill>,
}

/// The currency ledger and its per-tick income.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyState {
    /// Income added on every tick, before festival bonuses.
    pub per_tick_earnings: CurrencyBlock,
    /// Current balances; never negative.
    pub currencies: CurrencyBlock,
}

/// Everything a running game consists of.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Game bookkeeping.
    pub meta: GameMeta,
    /// World seed; every location stream derives from it.
    pub game_id: GameId,
    /// The world grid.
    pub world: World,
    /// The party.
    pub heroes: Vec<Hero>,
    /// Owned, unequipped equipment.
    pub inventory: Inventory,
    /// Ledger and income.
    pub currency: CurrencyState,
    /// Festivals in effect.
    pub festivals: Vec<ActiveFestival>,
    /// Combat in progress, if any.
    pub combat: Option<Combat>,
    /// Ticks elapsed since the game started.
    pub ticks: u64,
}

impl GameState {
    /// A freshly set up game.
    #[must_use]
    pub fn new(game_id: GameId, world: World, heroes: Vec<Hero>) -> Self {
        Self {
            meta: GameMeta {
                is_setup: true,
                ..GameMeta::default()
            },
            game_id,
            world,
            heroes,
            ..Self::default()
        }
    }

    /// Hero by id.
    #[must_use]
    pub fn hero(&self, id: HeroId) -> Option<&Hero> {
        self.heroes.iter().find(|hero| hero.id == id)
    }
}

/// Owner of the current [`GameState`].
pub trait StateStore {
    /// The current state.
    fn read(&self) -> &GameState;

    /// Replace the state with `transform(current)`.
    fn update<F>(&mut self, transform: F)
    where
        F: FnOnce(GameState) -> GameState;

    /// Apply a fallible transition to a copy of the state and commit it only
    /// on success.
    ///
    /// # Errors
    ///
    /// Returns whatever `transform` returns; the stored state is unchanged.
    fn try_update<T, E, F>(&mut self, transform: F) -> Result<T, E>
    where
        F: FnOnce(&mut GameState) -> Result<T, E>,
    {
        let mut next = self.read().clone();
        let value = transform(&mut next)?;
        self.update(move |_| next);
        Ok(value)
    }
}

/// A [`StateStore`] holding the state in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: GameState,
}

impl MemoryStore {
    /// Wrap an existing state.
    #[must_use]
    pub const fn new(state: GameState) -> Self {
        Self { state }
    }

    /// Take the state out of the store.
    #[must_use]
    pub fn into_inner(self) -> GameState {
        self.state
    }
}

impl StateStore for MemoryStore {
    fn read(&self) -> &GameState {
        &self.state
    }

    fn update<F>(&mut self, transform: F)
    where
        F: FnOnce(GameState) -> GameState,
    {
        let current = std::mem::take(&mut self.state);
        self.state = transform(current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;

    #[test]
    fn test_default_state_is_not_setup() {
        let store = MemoryStore::default();
        assert!(!store.read().meta.is_setup);
        assert_eq!(store.read().meta.version, STATE_VERSION);
        assert!(store.read().world.locations().is_empty());
    }

    #[test]
    fn test_update_replaces_state() {
        let mut store = MemoryStore::default();
        store.update(|mut state| {
            state.ticks = 7;
            state
        });
        assert_eq!(store.read().ticks, 7);
    }

    #[test]
    fn test_try_update_rolls_back_on_error() {
        let mut store = MemoryStore::default();
        let result: Result<(), GameError> = store.try_update(|state| {
            state.ticks = 99;
            Err(GameError::NoActiveCombat)
        });
        assert_eq!(result, Err(GameError::NoActiveCombat));
        assert_eq!(store.read().ticks, 0);

        let ticks = store
            .try_update(|state| {
                state.ticks += 1;
                Ok::<_, GameError>(state.ticks)
            })
            .unwrap();
        assert_eq!(ticks, 1);
        assert_eq!(store.read().ticks, 1);
    }

    #[test]
    fn test_state_serializes() {
        let state = GameState::new(GameId::new("seed"), World::default(), Hero::starting_party());
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
