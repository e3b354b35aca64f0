//! Elemental cartography: direction and distance from the center decide
//! which elements a location carries and how strongly.

// Intensities are small non-negative integers computed in f64
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::game::{Element, ElementalIntensity, WorldPosition};

/// Weight of the only element of a pure cardinal direction.
pub const FULL: f64 = 1.0;
/// Weight of the dominant element of a secondary intercardinal direction.
pub const MAJOR: f64 = 0.5;
/// Weight of each element of a primary intercardinal direction.
pub const SPLIT: f64 = 0.3;
/// Weight of the lesser element of a secondary intercardinal direction.
pub const MINOR: f64 = 0.2;

/// Width of one compass sector in degrees.
const SECTOR_DEGREES: f64 = 22.5;

/// One of the 16 compass directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum CompassDirection {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl CompassDirection {
    /// All directions, clockwise from north.
    pub const ALL: [CompassDirection; 16] = [
        CompassDirection::N,
        CompassDirection::NNE,
        CompassDirection::NE,
        CompassDirection::ENE,
        CompassDirection::E,
        CompassDirection::ESE,
        CompassDirection::SE,
        CompassDirection::SSE,
        CompassDirection::S,
        CompassDirection::SSW,
        CompassDirection::SW,
        CompassDirection::WSW,
        CompassDirection::W,
        CompassDirection::WNW,
        CompassDirection::NW,
        CompassDirection::NNW,
    ];

    /// Direction whose sector contains `degrees`. North is centered on 0.
    ///
    /// Returns `None` for a non-finite angle.
    #[must_use]
    pub fn from_degrees(degrees: f64) -> Option<Self> {
        if !degrees.is_finite() {
            return None;
        }
        let sector = (degrees.rem_euclid(360.0) / SECTOR_DEGREES).round() as usize % 16;
        Self::ALL.get(sector).copied()
    }

    /// Element weights of this direction, heaviest first.
    #[must_use]
    pub fn weights(self) -> &'static [(Element, f64)] {
        use Element::{Air, Earth, Fire, Water};

        match self {
            CompassDirection::N => &[(Fire, FULL)],
            CompassDirection::NNE => &[(Fire, MAJOR), (Air, MINOR)],
            CompassDirection::NE => &[(Fire, SPLIT), (Air, SPLIT)],
            CompassDirection::ENE => &[(Air, MAJOR), (Fire, MINOR)],
            CompassDirection::E => &[(Air, FULL)],
            CompassDirection::ESE => &[(Air, MAJOR), (Water, MINOR)],
            CompassDirection::SE => &[(Air, SPLIT), (Water, SPLIT)],
            CompassDirection::SSE => &[(Water, MAJOR), (Air, MINOR)],
            CompassDirection::S => &[(Water, FULL)],
            CompassDirection::SSW => &[(Water, MAJOR), (Earth, MINOR)],
            CompassDirection::SW => &[(Water, SPLIT), (Earth, SPLIT)],
            CompassDirection::WSW => &[(Earth, MAJOR), (Water, MINOR)],
            CompassDirection::W => &[(Earth, FULL)],
            CompassDirection::WNW => &[(Earth, MAJOR), (Fire, MINOR)],
            CompassDirection::NW => &[(Earth, SPLIT), (Fire, SPLIT)],
            CompassDirection::NNW => &[(Fire, MAJOR), (Earth, MINOR)],
        }
    }
}

/// Weights used when no direction can be determined.
static UNDIRECTED: [(Element, f64); 4] = [
    (Element::Fire, MINOR),
    (Element::Air, MINOR),
    (Element::Water, MINOR),
    (Element::Earth, MINOR),
];

/// Element weights for an optional direction.
#[must_use]
pub fn element_weights(direction: Option<CompassDirection>) -> &'static [(Element, f64)] {
    direction.map_or(&UNDIRECTED[..], CompassDirection::weights)
}

/// Angle from `center` to `point` in degrees, normalised to `[0, 360)`.
///
/// Measured with `atan2(dy, dx)` in grid coordinates.
#[must_use]
pub fn angle_between(center: WorldPosition, point: WorldPosition) -> f64 {
    let dy = f64::from(point.y) - f64::from(center.y);
    let dx = f64::from(point.x) - f64::from(center.x);
    dy.atan2(dx).to_degrees().rem_euclid(360.0)
}

/// Elemental profile of `point`, dominant element first.
///
/// `max_distance` is the center-to-edge radius; a zero radius yields no
/// elements at all.
#[must_use]
pub fn elements_at(
    center: WorldPosition,
    point: WorldPosition,
    max_distance: f64,
) -> Vec<ElementalIntensity> {
    let base = if max_distance > 0.0 {
        (100.0 * point.distance(center) / max_distance).floor()
    } else {
        0.0
    };

    let direction = CompassDirection::from_degrees(angle_between(center, point));
    let mut weighted: Vec<(f64, ElementalIntensity)> = element_weights(direction)
        .iter()
        .map(|&(element, weight)| {
            let intensity = (weight * base).floor().clamp(0.0, 100.0) as u8;
            (weight, ElementalIntensity { element, intensity })
        })
        .filter(|(_, entry)| entry.intensity != 0)
        .collect();

    weighted.sort_by(|a, b| b.0.total_cmp(&a.0));
    weighted.into_iter().map(|(_, entry)| entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_boundaries() {
        assert_eq!(CompassDirection::from_degrees(0.0), Some(CompassDirection::N));
        assert_eq!(CompassDirection::from_degrees(11.0), Some(CompassDirection::N));
        assert_eq!(CompassDirection::from_degrees(12.0), Some(CompassDirection::NNE));
        assert_eq!(CompassDirection::from_degrees(90.0), Some(CompassDirection::E));
        assert_eq!(CompassDirection::from_degrees(180.0), Some(CompassDirection::S));
        assert_eq!(CompassDirection::from_degrees(270.0), Some(CompassDirection::W));
        assert_eq!(CompassDirection::from_degrees(350.0), Some(CompassDirection::N));
        assert_eq!(CompassDirection::from_degrees(-90.0), Some(CompassDirection::W));
        assert_eq!(CompassDirection::from_degrees(f64::NAN), None);
    }

    #[test]
    fn test_weights_are_heaviest_first() {
        for direction in CompassDirection::ALL {
            let weights = direction.weights();
            assert!(!weights.is_empty());
            assert!(weights.windows(2).all(|w| w[0].1 >= w[1].1), "{direction:?}");
        }
        assert_eq!(element_weights(None).len(), 4);
    }

    #[test]
    fn test_angle_normalised() {
        let center = WorldPosition::new(5, 5);
        assert!(angle_between(center, WorldPosition::new(6, 5)).abs() < 1e-9);
        assert!((angle_between(center, WorldPosition::new(5, 6)) - 90.0).abs() < 1e-9);
        assert!((angle_between(center, WorldPosition::new(5, 4)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_elements_scale_with_distance() {
        let center = WorldPosition::new(5, 5);
        let near = elements_at(center, WorldPosition::new(6, 5), 5.0);
        let far = elements_at(center, WorldPosition::new(10, 5), 5.0);

        assert_eq!(near, vec![ElementalIntensity { element: Element::Fire, intensity: 20 }]);
        assert_eq!(far, vec![ElementalIntensity { element: Element::Fire, intensity: 100 }]);
    }

    #[test]
    fn test_blended_direction_keeps_order() {
        let center = WorldPosition::new(0, 0);
        // atan2(1, 2) is about 26.6 degrees: NNE.
        let entries = elements_at(center, WorldPosition::new(2, 1), 2.0);
        assert_eq!(entries[0].element, Element::Fire);
        assert_eq!(entries[1].element, Element::Air);
        assert!(entries[0].intensity > entries[1].intensity);
    }

    #[test]
    fn test_center_and_zero_radius_have_no_elements() {
        let center = WorldPosition::new(3, 3);
        assert!(elements_at(center, center, 3.0).is_empty());
        assert!(elements_at(center, WorldPosition::new(4, 3), 0.0).is_empty());
    }

    #[test]
    fn test_intensity_clamped_beyond_radius() {
        let center = WorldPosition::new(0, 0);
        let entries = elements_at(center, WorldPosition::new(9, 0), 3.0);
        assert_eq!(entries[0].intensity, 100);
    }
}
