#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use frontier::content::{Catalog, CountRange, WorldConfig};
use frontier::game::invariants::check_world;
use frontier::game::LocationType;
use frontier::generate_world;
use frontier::ids::{GameId, WorldConfigId};
use libfuzzer_sys::fuzz_target;

/// Structured input for world generation fuzzing.
#[derive(Arbitrary, Debug)]
struct WorldInput {
    /// Grid width (capped to keep runs short).
    width: u8,
    /// Grid height (capped to keep runs short).
    height: u8,
    /// Highest encounter level.
    max_level: u32,
    /// Requested (min, max) per placeable type, including inverted ranges.
    counts: [(u16, u16); 4],
    /// World seed.
    seed: String,
}

fuzz_target!(|input: WorldInput| {
    let width = u16::from(input.width % 48);
    let height = u16::from(input.height % 48);

    let node_count: BTreeMap<_, _> = LocationType::PLACEABLE
        .into_iter()
        .zip(input.counts)
        .map(|(node_type, (min, max))| {
            (node_type, CountRange::new(u32::from(min), u32::from(max)))
        })
        .collect();
    let config = WorldConfig {
        id: WorldConfigId::new("fuzz"),
        name: "Fuzz".to_string(),
        width,
        height,
        max_level: input.max_level,
        node_count,
    };

    let catalog = match Catalog::builtin() {
        Ok(catalog) => catalog,
        Err(_) => return,
    };

    // Zero dimensions must be rejected, everything else must succeed
    let world = match generate_world(&config, &GameId::new(input.seed), &catalog) {
        Ok(world) => world,
        Err(_) => {
            assert!(width == 0 || height == 0, "valid dimensions rejected");
            return;
        }
    };

    assert_eq!(
        world.locations().len(),
        usize::from(width) * usize::from(height)
    );
    for loc in world.locations() {
        assert!(loc.encounter_level <= input.max_level);
    }

    let violations = check_world(&world);
    assert!(
        violations.is_empty(),
        "Invariants violated after generation: {:?}",
        violations
    );
});
