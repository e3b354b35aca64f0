//! Sprite keys for terrain and location objects.

use crate::game::{Element, ElementalIntensity, LocationType};
use crate::rng::SeededRng;

/// Terrain variants per element.
const TERRAIN_VARIANTS: u32 = 4;

/// First terrain sprite index of an element's tile set.
#[must_use]
pub const fn terrain_start(element: Element) -> u32 {
    match element {
        Element::Air => 16,
        Element::Earth => 0,
        Element::Fire => 24,
        Element::Water => 12,
    }
}

/// Four-digit, zero-padded sprite key.
#[must_use]
pub fn index_to_sprite(index: u32) -> String {
    format!("{index:04}")
}

/// Terrain sprite for a location's elemental profile.
///
/// Uses the dominant element's tile set, or air when there is none.
pub fn terrain_sprite(elements: &[ElementalIntensity], rng: &mut SeededRng) -> String {
    let dominant = elements.first().map_or(Element::Air, |entry| entry.element);
    index_to_sprite(terrain_start(dominant) + rng.below(TERRAIN_VARIANTS))
}

/// Object sprite drawn on top of the terrain. Empty cells have none.
#[must_use]
pub fn object_sprite(node_type: LocationType) -> Option<String> {
    let index = match node_type {
        LocationType::Town => 0,
        LocationType::Village => 1,
        LocationType::Cave => 2,
        LocationType::Dungeon => 3,
        LocationType::Castle => 4,
        LocationType::Empty => return None,
    };
    Some(index_to_sprite(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_to_sprite_pads() {
        assert_eq!(index_to_sprite(7), "0007");
        assert_eq!(index_to_sprite(24), "0024");
    }

    #[test]
    fn test_terrain_sprite_in_element_range() {
        let mut rng = SeededRng::from_seed_str("sprites");
        let water = [ElementalIntensity {
            element: Element::Water,
            intensity: 40,
        }];
        for _ in 0..50 {
            let index: u32 = terrain_sprite(&water, &mut rng).parse().unwrap();
            assert!((12..16).contains(&index));
        }

        for _ in 0..50 {
            let index: u32 = terrain_sprite(&[], &mut rng).parse().unwrap();
            assert!((16..20).contains(&index));
        }
    }

    #[test]
    fn test_object_sprite() {
        assert!(object_sprite(LocationType::Empty).is_none());
        assert_eq!(object_sprite(LocationType::Castle).as_deref(), Some("0004"));
    }
}
