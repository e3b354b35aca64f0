//! Benchmarks for world generation and the tick loop.
//!
//! World generation runs once per game, ticks run continuously; both are
//! measured on the bundled catalog.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use frontier::content::{Catalog, ContentRepository};
use frontier::game::{
    advance_tick, currency_claims, start_game, LocationType, MemoryStore, StateStore,
};
use frontier::generate_world;
use frontier::ids::GameId;

fn bench_generate(c: &mut Criterion) {
    let catalog = Catalog::builtin().unwrap();

    for config in catalog.world_configs() {
        let name = format!("generate_{}", config.name.to_lowercase());
        c.bench_function(&name, |b| {
            b.iter(|| {
                let world = generate_world(
                    black_box(config),
                    black_box(&GameId::new("bench")),
                    black_box(&catalog),
                );
                black_box(world)
            });
        });
    }
}

fn claimed_game(catalog: &Catalog) -> MemoryStore {
    let config = catalog.world_config_by_name("Large").unwrap().id.clone();
    let mut store = MemoryStore::default();
    start_game(&mut store, catalog, &config, Some(GameId::new("bench"))).unwrap();

    // Claim everything so every location contributes income
    store.update(|mut state| {
        let targets: Vec<_> = state
            .world
            .locations()
            .iter()
            .filter(|loc| loc.node_type != LocationType::Empty && !loc.currently_claimed)
            .map(|loc| loc.position())
            .collect();
        for pos in targets {
            state.world.claim(pos).unwrap();
        }
        state.currency.per_tick_earnings = currency_claims(&state.world);
        state
    });
    store
}

fn bench_currency_claims(c: &mut Criterion) {
    let catalog = Catalog::builtin().unwrap();
    let store = claimed_game(&catalog);

    c.bench_function("currency_claims_large", |b| {
        b.iter(|| black_box(currency_claims(black_box(&store.read().world))));
    });
}

fn bench_ticks(c: &mut Criterion) {
    let catalog = Catalog::builtin().unwrap();
    let mut store = claimed_game(&catalog);

    c.bench_function("1000_ticks", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                advance_tick(black_box(&mut store), black_box(&catalog));
            }
        });
    });
}

criterion_group!(benches, bench_generate, bench_currency_claims, bench_ticks);
criterion_main!(benches);
