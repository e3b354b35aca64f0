//! Simulate command implementation.

use super::output::{format_currencies, format_map, JsonSimulation};
use super::{load_catalog, resolve_world, CliError, OutputFormat, WorldOptions};
use frontier::game::{
    advance_tick, finish_combat, start_combat, start_festival, start_game, CombatOutcome,
    LocationType, MemoryStore, StateStore, WorldPosition,
};
use frontier::ids::FestivalId;
use tracing::info;

/// Execute the simulate command.
///
/// Every unclaimed location within `radius` of home is fought and won in
/// row-major order, then the economy advances `ticks` times.
///
/// # Errors
///
/// Returns an error if the catalog, world config or festival is unknown, or
/// a claim fails.
pub(crate) fn execute(
    options: &WorldOptions,
    ticks: u64,
    radius: f64,
    festival: Option<&str>,
) -> Result<(), CliError> {
    let catalog = load_catalog(options.catalog.as_deref())?;
    let config = resolve_world(&catalog, &options.world)?;

    let mut store = MemoryStore::default();
    start_game(&mut store, &catalog, &config.id, Some(options.seed()))?;

    let home = store.read().world.home_base();
    let targets: Vec<WorldPosition> = store
        .read()
        .world
        .locations()
        .iter()
        .filter(|loc| loc.node_type != LocationType::Empty && !loc.currently_claimed)
        .filter(|loc| loc.position().distance(home) <= radius)
        .map(|loc| loc.position())
        .collect();

    let mut loot = 0;
    for pos in targets {
        start_combat(&mut store, pos, &catalog)?;
        loot += finish_combat(&mut store, CombatOutcome::Victory, &catalog)?.len();
    }
    info!(claimed = store.read().world.claimed_locations().count(), loot, "claims resolved");

    if let Some(name) = festival {
        let id = catalog
            .id_by_name(name)
            .map_or_else(|| FestivalId::new(name), FestivalId::new);
        start_festival(&mut store, &catalog, &id)?;
    }

    for _ in 0..ticks {
        advance_tick(&mut store, &catalog);
    }

    let state = store.read();
    match options.format {
        OutputFormat::Text => {
            println!("Simulation of '{}' (seed: {})", config.name, state.game_id);
            println!();
            print!("{}", format_map(&state.world));
            println!();
            println!(
                "Claimed {} locations, collected {loot} loot",
                state.world.claimed_locations().count()
            );
            println!();
            println!("Income per tick:");
            print!("{}", format_currencies(&state.currency.per_tick_earnings));
            println!();
            println!("Ledger after {} ticks:", state.ticks);
            print!("{}", format_currencies(&state.currency.currencies));
        }
        OutputFormat::Json => {
            let summary = JsonSimulation::from_state(state, loot);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
