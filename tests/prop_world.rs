//! Property-based tests for world generation and the claim economy.
//!
//! These tests verify structural properties of generated worlds, restocking
//! and the ledger for arbitrary seeds, sizes and operation sequences.
//! Run with: cargo test --release prop_world

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;

use proptest::prelude::*;

use frontier::content::{Catalog, CountRange, WorldConfig};
use frontier::game::invariants::check_world;
use frontier::game::{
    gain_currency, generate_combat, lose_currency, Element, GameCurrency, GameState, Hero,
    LocationType, MemoryStore, StateStore, World,
};
use frontier::generate_world;
use frontier::ids::{GameId, WorldConfigId};
use frontier::worldgen::{
    guardian_count, guardians_for_location, loot_for_location, relinquish_location,
};

fn builtin() -> Catalog {
    Catalog::builtin().unwrap()
}

fn config(width: u16, height: u16, max_level: u32, counts: [u32; 4]) -> WorldConfig {
    let node_count: BTreeMap<_, _> = LocationType::PLACEABLE
        .into_iter()
        .zip(counts)
        .map(|(node_type, n)| (node_type, CountRange::new(n / 2, n)))
        .collect();
    WorldConfig {
        id: WorldConfigId::new("prop"),
        name: "Prop".to_string(),
        width,
        height,
        max_level,
        node_count,
    }
}

fn currency_strategy() -> impl Strategy<Value = GameCurrency> {
    prop::sample::select(GameCurrency::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every cell exists exactly once, in row-major order.
    #[test]
    fn prop_grid_complete(
        width in 1u16..24,
        height in 1u16..24,
        counts in prop::array::uniform4(0u32..40),
        seed in "[a-z0-9]{1,12}",
    ) {
        let catalog = builtin();
        let world = generate_world(&config(width, height, 10, counts), &GameId::new(seed), &catalog)
            .unwrap();

        prop_assert_eq!(world.locations().len(), usize::from(width) * usize::from(height));
        for (idx, loc) in world.locations().iter().enumerate() {
            let w = usize::from(width);
            prop_assert_eq!(loc.x, i32::try_from(idx % w).unwrap());
            prop_assert_eq!(loc.y, i32::try_from(idx / w).unwrap());
        }

        // Placed plus shortfall accounts for every requested location
        let free = u32::try_from(world.locations().len() - 1).unwrap();
        prop_assert!(world.node_counts().total() - 1 <= free);
        prop_assert!(check_world(&world).is_empty());
    }

    /// The same seed and config always produce the same world.
    #[test]
    fn prop_generation_deterministic(
        width in 1u16..16,
        height in 1u16..16,
        counts in prop::array::uniform4(0u32..12),
        seed in "[a-z0-9]{1,12}",
    ) {
        let catalog = builtin();
        let cfg = config(width, height, 20, counts);
        let seed = GameId::new(seed);

        let a = generate_world(&cfg, &seed, &catalog).unwrap();
        let b = generate_world(&cfg, &seed, &catalog).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Intensities stay in [0, 100], each element appears at most once and
    /// the dominant element comes first.
    #[test]
    fn prop_intensity_bounds(
        width in 1u16..30,
        height in 1u16..30,
        seed in "[a-z0-9]{1,12}",
    ) {
        let cfg = config(width, height, 10, [0; 4]);
        let world = generate_world(&cfg, &GameId::new(seed), &Catalog::new()).unwrap();

        for loc in world.locations() {
            let mut seen = Vec::<Element>::new();
            for entry in &loc.elements {
                prop_assert!(entry.intensity <= 100);
                prop_assert!(entry.intensity > 0);
                prop_assert!(!seen.contains(&entry.element));
                seen.push(entry.element);
            }
            if let Some(first) = loc.elements.first() {
                prop_assert!(loc.elements.iter().all(|e| e.intensity <= first.intensity));
            }
        }
    }

    /// Levels never exceed the maximum and the town sits at level zero.
    #[test]
    fn prop_level_envelope(
        width in 1u16..24,
        height in 1u16..24,
        max_level in 0u32..200,
        counts in prop::array::uniform4(0u32..30),
        seed in "[a-z0-9]{1,12}",
    ) {
        let world = generate_world(
            &config(width, height, max_level, counts),
            &GameId::new(seed),
            &Catalog::new(),
        )
        .unwrap();

        prop_assert_eq!(world.home().unwrap().encounter_level, 0);
        for loc in world.locations() {
            prop_assert!(loc.encounter_level <= max_level);
        }
    }

    /// No sequence of gains and losses drives a balance below zero.
    #[test]
    fn prop_ledger_non_negative(
        ops in prop::collection::vec((currency_strategy(), -1.0e6f64..1.0e6, any::<bool>()), 0..64),
    ) {
        let mut store = MemoryStore::default();
        for (currency, amount, gain) in ops {
            if gain {
                gain_currency(&mut store, currency, amount);
            } else {
                lose_currency(&mut store, currency, amount);
            }
            prop_assert!(store.read().currency.currencies.get(currency) >= 0.0);
        }
        for (_, amount) in store.read().currency.currencies.iter() {
            prop_assert!(amount >= 0.0 && amount.is_finite());
        }
    }

    /// A location's restock depends only on its own claim history, not on
    /// what else was released before it.
    #[test]
    fn prop_reclaim_independent(
        seed in "[a-z0-9]{1,12}",
        first in 0usize..64,
        second in 0usize..64,
    ) {
        let catalog = builtin();
        let seed = GameId::new(seed);
        let world = generate_world(&config(12, 10, 30, [6, 10, 4, 2]), &seed, &catalog).unwrap();

        let targets: Vec<_> = world
            .locations()
            .iter()
            .filter(|loc| loc.node_type != LocationType::Empty && !loc.currently_claimed)
            .map(|loc| loc.position())
            .collect();
        prop_assume!(targets.len() >= 2);
        let a = targets[first % targets.len()];
        let b = targets[second % targets.len()];
        prop_assume!(a != b);

        let mut claimed = world.clone();
        claimed.claim(a).unwrap();
        claimed.claim(b).unwrap();

        let mut alone: World = claimed.clone();
        relinquish_location(&mut alone, a, &seed, &catalog).unwrap();

        let mut after_other = claimed;
        relinquish_location(&mut after_other, b, &seed, &catalog).unwrap();
        relinquish_location(&mut after_other, a, &seed, &catalog).unwrap();

        prop_assert_eq!(alone.get(a), after_other.get(a));
    }

    /// Restocking draws depend on the claim count: the same count always
    /// yields the same guardians and loot, the next count yields new ones.
    #[test]
    fn prop_claim_count_reseeds_stock(seed in "[a-z0-9]{1,12}", k in 0u32..1000) {
        let catalog = builtin();
        let seed = GameId::new(seed);
        let world = generate_world(&config(12, 10, 30, [6, 10, 4, 2]), &seed, &catalog).unwrap();

        let strongholds: Vec<_> = world
            .locations()
            .iter()
            .filter(|loc| matches!(loc.node_type, LocationType::Castle | LocationType::Dungeon))
            .collect();
        prop_assert!(!strongholds.is_empty());

        for loc in strongholds {
            let mut at_k = loc.clone();
            at_k.claim_count = k;
            let mut at_next = loc.clone();
            at_next.claim_count = k + 1;

            let guardians = guardians_for_location(&at_k, &seed, &catalog);
            let loot = loot_for_location(&at_k, &seed, &catalog);
            prop_assert_eq!(&guardians, &guardians_for_location(&at_k, &seed, &catalog));
            prop_assert_eq!(&loot, &loot_for_location(&at_k, &seed, &catalog));

            let next_guardians = guardians_for_location(&at_next, &seed, &catalog);
            let next_loot = loot_for_location(&at_next, &seed, &catalog);
            prop_assert_eq!(
                &next_guardians,
                &guardians_for_location(&at_next, &seed, &catalog)
            );

            // Ten draws over the guardian catalog make a repeat negligible
            if loc.node_type == LocationType::Castle {
                prop_assert_ne!((&guardians, &loot), (&next_guardians, &next_loot));
            }
        }
    }

    /// A combat fields the whole party against every stocked guardian.
    #[test]
    fn prop_combat_roster_sized(seed in "[a-z0-9]{1,12}") {
        let catalog = builtin();
        let seed = GameId::new(seed);
        let world = generate_world(&config(10, 10, 15, [4, 6, 3, 2]), &seed, &catalog).unwrap();
        let state = GameState::new(seed, world, Hero::starting_party());

        for loc in state.world.locations().iter().filter(|loc| !loc.currently_claimed) {
            let combat = generate_combat(loc, &state.heroes, &catalog);
            prop_assert_eq!(combat.heroes.len(), state.heroes.len());
            prop_assert_eq!(combat.guardians.len(), loc.guardian_ids.len());
            prop_assert_eq!(
                u32::try_from(combat.guardians.len()).unwrap(),
                guardian_count(loc.node_type)
            );
            prop_assert_eq!(combat.rounds, 0);
        }
    }
}
