//! Elements and per-element value blocks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One of the four elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Element {
    /// Fire, strongest to the north.
    Fire,
    /// Water, strongest to the south.
    Water,
    /// Earth, strongest to the west.
    Earth,
    /// Air, strongest to the east.
    Air,
}

impl Element {
    /// All elements in declaration order.
    pub const ALL: [Element; 4] = [Element::Fire, Element::Water, Element::Earth, Element::Air];
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Element::Fire => "Fire",
            Element::Water => "Water",
            Element::Earth => "Earth",
            Element::Air => "Air",
        };
        f.write_str(name)
    }
}

/// Strength of one element at a location, 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementalIntensity {
    /// The element.
    pub element: Element,
    /// Strength in `[0, 100]`.
    pub intensity: u8,
}

/// A value per element, used for combat affinity and resistance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementBlock {
    /// Fire value.
    pub fire: f64,
    /// Water value.
    pub water: f64,
    /// Earth value.
    pub earth: f64,
    /// Air value.
    pub air: f64,
}

impl ElementBlock {
    /// Value for one element.
    #[must_use]
    pub const fn get(&self, element: Element) -> f64 {
        match element {
            Element::Fire => self.fire,
            Element::Water => self.water,
            Element::Earth => self.earth,
            Element::Air => self.air,
        }
    }

    /// Overwrite the value for one element.
    pub fn set(&mut self, element: Element, value: f64) {
        match element {
            Element::Fire => self.fire = value,
            Element::Water => self.water = value,
            Element::Earth => self.earth = value,
            Element::Air => self.air = value,
        }
    }

    /// Defaults with every entry of `overrides` applied on top.
    #[must_use]
    pub fn merged(overrides: &BTreeMap<Element, f64>) -> Self {
        let mut block = Self::default();
        for (&element, &value) in overrides {
            block.set(element, value);
        }
        block
    }
}
