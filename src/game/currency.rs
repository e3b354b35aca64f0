//! Currency kinds and currency blocks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::game::Element;

/// Refinement tier of an elemental currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurrencyTier {
    /// Produced by claimed caves.
    Sliver,
    /// Produced by claimed dungeons.
    Shard,
    /// Produced by claimed castles.
    Crystal,
}

/// Every currency the ledger tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GameCurrency {
    /// Generic currency produced by settlements.
    Mana,
    #[serde(rename = "Fire Sliver")]
    /// Fire Sliver.
    FireSliver,
    #[serde(rename = "Fire Shard")]
    /// Fire Shard.
    FireShard,
    #[serde(rename = "Fire Crystal")]
    /// Fire Crystal.
    FireCrystal,
    #[serde(rename = "Water Sliver")]
    /// Water Sliver.
    WaterSliver,
    #[serde(rename = "Water Shard")]
    /// Water Shard.
    WaterShard,
    #[serde(rename = "Water Crystal")]
    /// Water Crystal.
    WaterCrystal,
    #[serde(rename = "Earth Sliver")]
    /// Earth Sliver.
    EarthSliver,
    #[serde(rename = "Earth Shard")]
    /// Earth Shard.
    EarthShard,
    #[serde(rename = "Earth Crystal")]
    /// Earth Crystal.
    EarthCrystal,
    #[serde(rename = "Air Sliver")]
    /// Air Sliver.
    AirSliver,
    #[serde(rename = "Air Shard")]
    /// Air Shard.
    AirShard,
    #[serde(rename = "Air Crystal")]
    /// Air Crystal.
    AirCrystal,
}

impl GameCurrency {
    /// All currencies.
    pub const ALL: [GameCurrency; 13] = [
        GameCurrency::Mana,
        GameCurrency::FireSliver,
        GameCurrency::FireShard,
        GameCurrency::FireCrystal,
        GameCurrency::WaterSliver,
        GameCurrency::WaterShard,
        GameCurrency::WaterCrystal,
        GameCurrency::EarthSliver,
        GameCurrency::EarthShard,
        GameCurrency::EarthCrystal,
        GameCurrency::AirSliver,
        GameCurrency::AirShard,
        GameCurrency::AirCrystal,
    ];

    /// The elemental currency of the given tier.
    #[must_use]
    pub const fn elemental(element: Element, tier: CurrencyTier) -> Self {
        match (element, tier) {
            (Element::Fire, CurrencyTier::Sliver) => GameCurrency::FireSliver,
            (Element::Fire, CurrencyTier::Shard) => GameCurrency::FireShard,
            (Element::Fire, CurrencyTier::Crystal) => GameCurrency::FireCrystal,
            (Element::Water, CurrencyTier::Sliver) => GameCurrency::WaterSliver,
            (Element::Water, CurrencyTier::Shard) => GameCurrency::WaterShard,
            (Element::Water, CurrencyTier::Crystal) => GameCurrency::WaterCrystal,
            (Element::Earth, CurrencyTier::Sliver) => GameCurrency::EarthSliver,
            (Element::Earth, CurrencyTier::Shard) => GameCurrency::EarthShard,
            (Element::Earth, CurrencyTier::Crystal) => GameCurrency::EarthCrystal,
            (Element::Air, CurrencyTier::Sliver) => GameCurrency::AirSliver,
            (Element::Air, CurrencyTier::Shard) => GameCurrency::AirShard,
            (Element::Air, CurrencyTier::Crystal) => GameCurrency::AirCrystal,
        }
    }
}

impl std::fmt::Display for GameCurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameCurrency::Mana => "Mana",
            GameCurrency::FireSliver => "Fire Sliver",
            GameCurrency::FireShard => "Fire Shard",
            GameCurrency::FireCrystal => "Fire Crystal",
            GameCurrency::WaterSliver => "Water Sliver",
            GameCurrency::WaterShard => "Water Shard",
            GameCurrency::WaterCrystal => "Water Crystal",
            GameCurrency::EarthSliver => "Earth Sliver",
            GameCurrency::EarthShard => "Earth Shard",
            GameCurrency::EarthCrystal => "Earth Crystal",
            GameCurrency::AirSliver => "Air Sliver",
            GameCurrency::AirShard => "Air Shard",
            GameCurrency::AirCrystal => "Air Crystal",
        };
        f.write_str(name)
    }
}

/// An amount per currency. Missing entries read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyBlock {
    amounts: BTreeMap<GameCurrency, f64>,
}

impl CurrencyBlock {
    /// A block with every currency at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Amount of one currency.
    #[must_use]
    pub fn get(&self, currency: GameCurrency) -> f64 {
        self.amounts.get(&currency).copied().unwrap_or(0.0)
    }

    /// Overwrite the amount of one currency.
    pub fn set(&mut self, currency: GameCurrency, amount: f64) {
        self.amounts.insert(currency, amount);
    }

    /// Add to one currency.
    pub fn add(&mut self, currency: GameCurrency, amount: f64) {
        *self.amounts.entry(currency).or_insert(0.0) += amount;
    }

    /// Add every entry of another block.
    pub fn merge(&mut self, other: &CurrencyBlock) {
        for (currency, amount) in other.iter() {
            self.add(currency, amount);
        }
    }

    /// Iterate over the stored entries.
    pub fn iter(&self) -> impl Iterator<Item = (GameCurrency, f64)> + '_ {
        self.amounts.iter().map(|(&currency, &amount)| (currency, amount))
    }

    /// Whether every stored amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amounts.values().all(|amount| amount.abs() < f64::EPSILON)
    }
}

impl FromIterator<(GameCurrency, f64)> for CurrencyBlock {
    fn from_iter<I: IntoIterator<Item = (GameCurrency, f64)>>(iter: I) -> Self {
        let mut block = Self::new();
        for (currency, amount) in iter {
            block.add(currency, amount);
        }
        block
    }
}
