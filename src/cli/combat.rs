//! Combat command implementation.

use super::output::format_combat;
use super::{load_catalog, resolve_world, CliError, OutputFormat, WorldOptions};
use frontier::game::{
    start_combat, start_game, LocationType, MemoryStore, StateStore, WorldPosition,
};

/// Execute the combat command.
///
/// Without coordinates the unclaimed location nearest to home is contested.
///
/// # Errors
///
/// Returns an error if the world cannot be built or the location cannot be
/// engaged.
pub(crate) fn execute(
    options: &WorldOptions,
    x: Option<i32>,
    y: Option<i32>,
) -> Result<(), CliError> {
    let catalog = load_catalog(options.catalog.as_deref())?;
    let config = resolve_world(&catalog, &options.world)?;

    let mut store = MemoryStore::default();
    start_game(&mut store, &catalog, &config.id, Some(options.seed()))?;

    let pos = match (x, y) {
        (Some(x), Some(y)) => WorldPosition::new(x, y),
        (None, None) => nearest_unclaimed(&store)
            .ok_or_else(|| CliError::new("No unclaimed location to fight for"))?,
        _ => return Err(CliError::new("Pass both --x and --y, or neither")),
    };

    start_combat(&mut store, pos, &catalog)?;
    let Some(combat) = store.read().combat.as_ref() else {
        return Err(CliError::new("Combat did not start"));
    };

    match options.format {
        OutputFormat::Text => print!("{}", format_combat(combat)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(combat)?),
    }

    Ok(())
}

fn nearest_unclaimed(store: &MemoryStore) -> Option<WorldPosition> {
    let world = &store.read().world;
    let home = world.home_base();
    world
        .locations()
        .iter()
        .filter(|loc| loc.node_type != LocationType::Empty && !loc.currently_claimed)
        .min_by(|a, b| {
            a.position()
                .distance(home)
                .total_cmp(&b.position().distance(home))
        })
        .map(|loc| loc.position())
}
