//! Claim economy: per-tick income from claimed locations and the ledger.
//!
//! # Yield Model
//!
//! Each claimed location yields a fixed amount per tick:
//! - cave: `intensity / 100` Sliver of each element present
//! - dungeon: `intensity / 100` Shard of each element present
//! - castle: `intensity / 100` Crystal of each element present
//! - village: 2 Mana
//! - town: 1 Mana
//!
//! The sum over all claimed locations is cached as the per-tick rate and
//! applied to the ledger once per tick, scaled by `1 + festival bonus`.
//! Balances never go below zero.

use tracing::debug;

use crate::content::ContentRepository;
use crate::game::festival::age_festivals;
use crate::game::{
    festival_multiplier, CurrencyBlock, CurrencyTier, GameCurrency, GameState, LocationType,
    StateStore, World, WorldLocation,
};

/// Mana produced per tick by a claimed village.
const VILLAGE_MANA: f64 = 2.0;

/// Mana produced per tick by the town.
const TOWN_MANA: f64 = 1.0;

/// Add `amount` to one balance, flooring the result at zero.
///
/// Non-finite amounts, and sums that overflow, leave the balance unchanged.
#[inline]
fn credit(ledger: &mut CurrencyBlock, currency: GameCurrency, amount: f64) {
    if !amount.is_finite() {
        return;
    }
    let next = ledger.get(currency) + amount;
    if next.is_finite() {
        ledger.set(currency, next.max(0.0));
    }
}

/// Per-tick yield of a single location, regardless of claim state.
#[must_use]
pub fn claims_for_location(location: &WorldLocation) -> CurrencyBlock {
    let mut block = CurrencyBlock::new();

    let tier = match location.node_type {
        LocationType::Cave => Some(CurrencyTier::Sliver),
        LocationType::Dungeon => Some(CurrencyTier::Shard),
        LocationType::Castle => Some(CurrencyTier::Crystal),
        LocationType::Village => {
            block.add(GameCurrency::Mana, VILLAGE_MANA);
            None
        }
        LocationType::Town => {
            block.add(GameCurrency::Mana, TOWN_MANA);
            None
        }
        LocationType::Empty => None,
    };

    if let Some(tier) = tier {
        for entry in &location.elements {
            block.add(
                GameCurrency::elemental(entry.element, tier),
                f64::from(entry.intensity) / 100.0,
            );
        }
    }

    block
}

/// Total per-tick yield of every claimed location.
#[must_use]
pub fn currency_claims(world: &World) -> CurrencyBlock {
    let mut total = CurrencyBlock::new();
    for location in world.claimed_locations() {
        total.merge(&claims_for_location(location));
    }
    total
}

/// Recompute the per-tick rate from the world. Idempotent.
pub fn update_claims(store: &mut impl StateStore) {
    store.update(|mut state| {
        state.currency.per_tick_earnings = currency_claims(&state.world);
        state
    });
}

/// Add a delta to the cached per-tick rate.
pub fn merge_currency_claims(store: &mut impl StateStore, delta: &CurrencyBlock) {
    store.update(|mut state| {
        state.currency.per_tick_earnings.merge(delta);
        state
    });
}

/// Apply one tick of income to the ledger, scaled by active festivals.
pub fn apply_claims(store: &mut impl StateStore, catalog: &impl ContentRepository) {
    store.update(|mut state| {
        collect_income(&mut state, catalog);
        state
    });
}

fn collect_income(state: &mut GameState, catalog: &impl ContentRepository) {
    let income: Vec<(GameCurrency, f64)> = state
        .currency
        .per_tick_earnings
        .iter()
        .map(|(currency, rate)| {
            let multiplier = 1.0 + festival_multiplier(state, catalog, currency);
            (currency, rate * multiplier)
        })
        .collect();

    for (currency, amount) in income {
        credit(&mut state.currency.currencies, currency, amount);
    }
}

/// Add every entry of `delta` to the ledger. Negative entries spend.
pub fn gain_currencies(store: &mut impl StateStore, delta: &CurrencyBlock) {
    store.update(|mut state| {
        for (currency, amount) in delta.iter() {
            credit(&mut state.currency.currencies, currency, amount);
        }
        state
    });
}

/// Add to one balance.
pub fn gain_currency(store: &mut impl StateStore, currency: GameCurrency, amount: f64) {
    store.update(|mut state| {
        credit(&mut state.currency.currencies, currency, amount);
        state
    });
}

/// Spend from one balance. Overdrawing leaves the balance at zero.
pub fn lose_currency(store: &mut impl StateStore, currency: GameCurrency, amount: f64) {
    gain_currency(store, currency, -amount);
}

/// Current balance of one currency.
#[must_use]
pub fn get_currency(state: &GameState, currency: GameCurrency) -> f64 {
    state.currency.currencies.get(currency)
}

/// Whether the balance covers `needed`.
#[must_use]
pub fn has_currency(state: &GameState, currency: GameCurrency, needed: f64) -> bool {
    get_currency(state, currency) >= needed
}

/// Advance the game by one tick: collect income, age festivals, count the tick.
pub fn advance_tick(store: &mut impl StateStore, catalog: &impl ContentRepository) {
    store.update(|mut state| {
        collect_income(&mut state, catalog);
        age_festivals(&mut state.festivals);
        state.ticks += 1;
        debug!(tick = state.ticks, "tick advanced");
        state
    });
}


/// Kani proofs for the ledger.
///
/// Run with: `cargo kani`
#[cfg(kani)]
mod kani_proofs {
    use super::*;

    /// Crediting any amount to any non-negative balance leaves it non-negative.
    #[kani::proof]
    fn prove_credit_never_negative() {
        let start: f64 = kani::any();
        let amount: f64 = kani::any();
        kani::assume(start.is_finite() && start >= 0.0);

        let mut ledger = CurrencyBlock::new();
        ledger.set(GameCurrency::Mana, start);
        credit(&mut ledger, GameCurrency::Mana, amount);

        assert!(ledger.get(GameCurrency::Mana) >= 0.0);
    }
}
