//! Procedural world generation.
//!
//! A world is built in fixed stages from a [`WorldConfig`] and a world seed:
//!
//! 1. the home town is placed at the grid center and claimed;
//! 2. villages, caves, dungeons and castles take random free cells;
//! 3. every remaining cell becomes empty;
//! 4. encounter levels grow with distance from the town;
//! 5. elements follow the compass direction from the center;
//! 6. unclaimed locations are stocked with guardians and loot;
//! 7. terrain and object sprites are assigned.
//!
//! Stages 1-3 draw from the world stream. Stocking draws from per-location
//! streams and terrain sprites from per-location terrain streams, so they do
//! not depend on the order in which cells are visited.

// Levels and indices are small non-negative values computed in f64
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]

mod cartography;
mod sprite;
mod stocking;

pub use cartography::{
    angle_between, element_weights, elements_at, CompassDirection, FULL, MAJOR, MINOR, SPLIT,
};
pub use sprite::{index_to_sprite, object_sprite, terrain_sprite, terrain_start};
pub use stocking::{
    guardian_count, guardians_for_location, loot_count, loot_for_location, relinquish_location,
    stock_location,
};

use tracing::{debug, info, warn};

use crate::content::{ContentRepository, WorldConfig};
use crate::error::WorldGenError;
use crate::game::{LocationType, NodeCounts, World, WorldLocation, WorldPosition};
use crate::ids::{GameId, LocationId};
use crate::rng::SeededRng;

/// Name of the home town.
pub const HOME_TOWN_NAME: &str = "LaFlotte";

/// Center cell of a grid, where the home town goes.
#[must_use]
pub fn home_position(width: u16, height: u16) -> WorldPosition {
    WorldPosition::new(i32::from(width / 2), i32::from(height / 2))
}

/// Distance from the home position to the middle of the top edge.
///
/// Encounter levels and elemental intensities are scaled by this radius.
#[must_use]
pub fn max_distance(home: WorldPosition) -> f64 {
    WorldPosition::new(home.x, 0).distance(home)
}

/// Encounter level of a cell `distance` away from home.
///
/// `floor(max_level × distance / radius)`, capped at `max_level`. A zero
/// radius gives level 0 everywhere.
#[must_use]
pub fn encounter_level(distance: f64, radius: f64, max_level: u32) -> u32 {
    if radius <= 0.0 {
        return 0;
    }
    let level = (f64::from(max_level) * distance / radius).floor();
    (level.max(0.0) as u32).min(max_level)
}

/// Remove a random cell from `free`.
///
/// Returns [`WorldPosition::UNPLACED`] when no free cell is left.
pub fn take_free_position(free: &mut Vec<WorldPosition>, rng: &mut SeededRng) -> WorldPosition {
    if free.is_empty() {
        return WorldPosition::UNPLACED;
    }
    let len = u32::try_from(free.len()).unwrap_or(u32::MAX);
    let idx = rng.below(len) as usize;
    free.swap_remove(idx)
}

/// Generate a world.
///
/// # Errors
///
/// Returns [`WorldGenError::InvalidDimensions`] if either dimension is zero.
pub fn generate_world(
    config: &WorldConfig,
    seed: &GameId,
    catalog: &impl ContentRepository,
) -> Result<World, WorldGenError> {
    let (width, height) = (config.width, config.height);
    let invalid = WorldGenError::InvalidDimensions { width, height };
    if width == 0 || height == 0 {
        return Err(invalid);
    }

    let mut rng = SeededRng::for_world(seed);
    let home = home_position(width, height);
    let columns = usize::from(width);
    let index_of = |pos: WorldPosition| pos.y as usize * columns + pos.x as usize;

    let mut cells: Vec<Option<WorldLocation>> = vec![None; columns * usize::from(height)];
    let mut free: Vec<WorldPosition> = (0..i32::from(height))
        .flat_map(|y| (0..i32::from(width)).map(move |x| WorldPosition::new(x, y)))
        .filter(|&pos| pos != home)
        .collect();

    // Stage 1: home town
    let mut town = WorldLocation::blank(LocationId::from_uuid(rng.uuid()), home);
    town.node_type = LocationType::Town;
    town.name = HOME_TOWN_NAME.to_string();
    town.currently_claimed = true;
    cells[index_of(home)] = Some(town);

    // Stage 2: random placement
    for node_type in config.node_count.keys() {
        if !LocationType::PLACEABLE.contains(node_type) {
            warn!(node_type = %node_type, "node count for unplaceable type ignored");
        }
    }

    let mut shortfall = NodeCounts::default();
    for node_type in LocationType::PLACEABLE {
        let Some(range) = config.node_count.get(&node_type) else {
            continue;
        };
        let count = rng.range_inclusive(range.min, range.max);

        for n in 1..=count {
            let pos = take_free_position(&mut free, &mut rng);
            if !pos.is_placed() {
                shortfall.add(node_type, count - n + 1);
                break;
            }

            let mut location = WorldLocation::blank(LocationId::from_uuid(rng.uuid()), pos);
            location.node_type = node_type;
            location.name = format!("{node_type} {n}");
            cells[index_of(pos)] = Some(location);
        }

        debug!(
            node_type = %node_type,
            requested = count,
            shortfall = shortfall.get(node_type),
            "placed locations"
        );
    }

    // Stage 3: fill
    let mut locations = Vec::with_capacity(cells.len());
    for (idx, cell) in cells.into_iter().enumerate() {
        let location = cell.unwrap_or_else(|| {
            let x = (idx % columns) as i32;
            let y = (idx / columns) as i32;
            WorldLocation::blank(LocationId::from_uuid(rng.uuid()), WorldPosition::new(x, y))
        });
        locations.push(location);
    }

    // Stages 4-7
    let radius = max_distance(home);
    for location in &mut locations {
        let pos = location.position();
        location.encounter_level = encounter_level(pos.distance(home), radius, config.max_level);
        location.elements = elements_at(home, pos, radius);
        stock_location(location, seed, catalog);

        let mut terrain = SeededRng::for_terrain(seed, location.id);
        location.sprite = terrain_sprite(&location.elements, &mut terrain);
        location.object_sprite = object_sprite(location.node_type);
    }

    let world = World::from_cells(width, height, locations, home, shortfall).ok_or(invalid)?;

    info!(
        seed = %seed,
        width,
        height,
        locations = world.node_counts().total(),
        shortfall = world.shortfall().total(),
        "world generated"
    );
    Ok(world)
}
