//! World grid, locations and claim bookkeeping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GameError;
use crate::game::ElementalIntensity;
use crate::ids::{GuardianId, LocationId, LootId};

/// Kind of a world location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    /// The home base; always claimed.
    Town,
    /// Small settlement producing generic currency.
    Village,
    /// Produces sliver-tier elemental currency.
    Cave,
    /// Produces shard-tier elemental currency.
    Dungeon,
    /// Produces crystal-tier elemental currency.
    Castle,
    /// Walkable cell with no content.
    Empty,
}

impl LocationType {
    /// Types placed at random positions, in placement order.
    pub const PLACEABLE: [LocationType; 4] = [
        LocationType::Village,
        LocationType::Cave,
        LocationType::Dungeon,
        LocationType::Castle,
    ];

    /// Lowercase name as used in configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LocationType::Town => "town",
            LocationType::Village => "village",
            LocationType::Cave => "cave",
            LocationType::Dungeon => "dungeon",
            LocationType::Castle => "castle",
            LocationType::Empty => "empty",
        }
    }
}

impl std::fmt::Display for LocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A grid position.
///
/// Signed so that [`WorldPosition::UNPLACED`] can flag a placement that found
/// no free cell.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct WorldPosition {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl WorldPosition {
    /// Sentinel returned when no free cell is left for a placement.
    pub const UNPLACED: WorldPosition = WorldPosition { x: -1, y: -1 };

    /// Create a position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether this is a real grid position rather than the sentinel.
    #[must_use]
    pub const fn is_placed(self) -> bool {
        self.x >= 0 && self.y >= 0
    }

    /// The `"x,y"` key of this position.
    #[must_use]
    pub fn key(self) -> String {
        format!("{},{}", self.x, self.y)
    }

    /// Parse an `"x,y"` key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let (x, y) = key.split_once(',')?;
        Some(Self::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
    }

    /// Euclidean distance to another position.
    #[must_use]
    pub fn distance(self, other: WorldPosition) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }
}

impl std::fmt::Display for WorldPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// A single grid cell of the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldLocation {
    /// Identifier, stable for the lifetime of the world.
    pub id: LocationId,
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Kind of location.
    pub node_type: LocationType,
    /// Display name.
    pub name: String,
    /// Difficulty scalar driving guardian and loot eligibility.
    pub encounter_level: u32,
    /// Elemental profile, dominant element first.
    pub elements: Vec<ElementalIntensity>,
    /// Terrain sprite key.
    pub sprite: String,
    /// Object sprite key, if the location shows an object.
    pub object_sprite: Option<String>,
    /// Whether the player currently holds this location.
    pub currently_claimed: bool,
    /// Number of times this location has been released for re-claiming.
    pub claim_count: u32,
    /// Guardian templates currently defending the location.
    pub guardian_ids: Vec<GuardianId>,
    /// Loot currently available at the location.
    pub claim_loot_ids: Vec<LootId>,
}

impl WorldLocation {
    /// An unclaimed, contentless location.
    #[must_use]
    pub fn blank(id: LocationId, position: WorldPosition) -> Self {
        Self {
            id,
            x: position.x,
            y: position.y,
            node_type: LocationType::Empty,
            name: String::new(),
            encounter_level: 0,
            elements: Vec::new(),
            sprite: String::new(),
            object_sprite: None,
            currently_claimed: false,
            claim_count: 0,
            guardian_ids: Vec::new(),
            claim_loot_ids: Vec::new(),
        }
    }

    /// Grid position of this location.
    #[must_use]
    pub const fn position(&self) -> WorldPosition {
        WorldPosition::new(self.x, self.y)
    }

    /// The `"x,y"` key of this location.
    #[must_use]
    pub fn key(&self) -> String {
        self.position().key()
    }

    /// Whether the location would receive guardians and loot when unclaimed.
    #[must_use]
    pub fn is_stockable(&self) -> bool {
        !self.currently_claimed && self.node_type != LocationType::Town
    }
}

/// Location counts by type. Missing and zero entries compare equal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeCounts {
    counts: BTreeMap<LocationType, u32>,
}

impl NodeCounts {
    /// Count for one type.
    #[must_use]
    pub fn get(&self, node_type: LocationType) -> u32 {
        self.counts.get(&node_type).copied().unwrap_or(0)
    }

    /// Add one to a type.
    pub fn increment(&mut self, node_type: LocationType) {
        *self.counts.entry(node_type).or_insert(0) += 1;
    }

    /// Add `n` to a type.
    pub fn add(&mut self, node_type: LocationType, n: u32) {
        let count = self.counts.entry(node_type).or_insert(0);
        *count = count.saturating_add(n);
    }

    /// Remove one from a type, stopping at zero.
    pub fn decrement(&mut self, node_type: LocationType) {
        if let Some(count) = self.counts.get_mut(&node_type) {
            *count = count.saturating_sub(1);
        }
    }

    /// Sum over all types.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.values().fold(0, |acc, &n| acc.saturating_add(n))
    }

    /// Iterate over non-zero entries.
    pub fn iter(&self) -> impl Iterator<Item = (LocationType, u32)> + '_ {
        self.counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(&node_type, &count)| (node_type, count))
    }
}

impl PartialEq for NodeCounts {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for NodeCounts {}

/// A generated world. The default value is the empty, ungenerated world.
///
/// Deserializing goes through [`World::from_cells`]; the stored counts are
/// recomputed from the cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "WorldRecord")]
pub struct World {
    /// Width of the grid.
    width: u16,
    /// Height of the grid.
    height: u16,
    /// Every cell, row-major.
    locations: Vec<WorldLocation>,
    /// Position of the home base.
    home_base: WorldPosition,
    /// Number of locations per type.
    node_counts: NodeCounts,
    /// Number of claimed locations per type.
    claimed_counts: NodeCounts,
    /// Placements that found no free cell, per type.
    shortfall: NodeCounts,
}

/// Serialized form of a [`World`], checked before use.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorldRecord {
    width: u16,
    height: u16,
    locations: Vec<WorldLocation>,
    home_base: WorldPosition,
    #[serde(default)]
    shortfall: NodeCounts,
}

impl TryFrom<WorldRecord> for World {
    type Error = GameError;

    fn try_from(record: WorldRecord) -> Result<Self, Self::Error> {
        let WorldRecord {
            width,
            height,
            locations,
            home_base,
            shortfall,
        } = record;

        // An ungenerated world has no cells
        if locations.is_empty() && (width == 0 || height == 0) {
            return Ok(Self {
                width,
                height,
                home_base,
                shortfall,
                ..Self::default()
            });
        }

        let cells = locations.len();
        Self::from_cells(width, height, locations, home_base, shortfall).ok_or(
            GameError::MalformedWorld {
                width,
                height,
                cells,
            },
        )
    }
}

impl World {
    /// Assemble a world from row-major cells.
    ///
    /// Returns `None` unless `locations` holds exactly one cell per grid
    /// position in row-major order.
    #[must_use]
    pub fn from_cells(
        width: u16,
        height: u16,
        locations: Vec<WorldLocation>,
        home_base: WorldPosition,
        shortfall: NodeCounts,
    ) -> Option<Self> {
        let size = usize::from(width) * usize::from(height);
        if size == 0 || locations.len() != size {
            return None;
        }

        let w = i32::from(width);
        let in_order = locations.iter().enumerate().all(|(idx, loc)| {
            i32::try_from(idx).is_ok_and(|idx| loc.x == idx % w && loc.y == idx / w)
        });
        if !in_order {
            return None;
        }

        let mut node_counts = NodeCounts::default();
        let mut claimed_counts = NodeCounts::default();
        for loc in &locations {
            if loc.node_type != LocationType::Empty {
                node_counts.increment(loc.node_type);
            }
            if loc.currently_claimed {
                claimed_counts.increment(loc.node_type);
            }
        }

        Some(Self {
            width,
            height,
            locations,
            home_base,
            node_counts,
            claimed_counts,
            shortfall,
        })
    }

    /// Width of the grid.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height of the grid.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Position of the home base.
    #[must_use]
    pub const fn home_base(&self) -> WorldPosition {
        self.home_base
    }

    /// Number of locations per type (empty cells excluded).
    #[must_use]
    pub const fn node_counts(&self) -> &NodeCounts {
        &self.node_counts
    }

    /// Number of claimed locations per type.
    #[must_use]
    pub const fn claimed_counts(&self) -> &NodeCounts {
        &self.claimed_counts
    }

    /// Requested placements that did not fit on the grid.
    #[must_use]
    pub const fn shortfall(&self) -> &NodeCounts {
        &self.shortfall
    }

    /// All locations in row-major order.
    #[must_use]
    #[inline]
    pub fn locations(&self) -> &[WorldLocation] {
        &self.locations
    }

    /// Mutable access to all locations in row-major order.
    #[must_use]
    #[inline]
    pub fn locations_mut(&mut self) -> &mut [WorldLocation] {
        &mut self.locations
    }

    /// Check if a position is on the grid.
    #[must_use]
    pub fn in_bounds(&self, pos: WorldPosition) -> bool {
        pos.is_placed() && pos.x < i32::from(self.width) && pos.y < i32::from(self.height)
    }

    fn index(&self, pos: WorldPosition) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        let idx = y * usize::from(self.width) + x;
        (idx < self.locations.len()).then_some(idx)
    }

    /// Location at a position.
    #[must_use]
    pub fn get(&self, pos: WorldPosition) -> Option<&WorldLocation> {
        self.index(pos).and_then(|idx| self.locations.get(idx))
    }

    /// Mutable location at a position.
    #[must_use]
    pub fn get_mut(&mut self, pos: WorldPosition) -> Option<&mut WorldLocation> {
        self.index(pos).and_then(|idx| self.locations.get_mut(idx))
    }

    /// Location by its `"x,y"` key.
    #[must_use]
    pub fn get_by_key(&self, key: &str) -> Option<&WorldLocation> {
        WorldPosition::from_key(key).and_then(|pos| self.get(pos))
    }

    /// Location by id.
    #[must_use]
    pub fn find(&self, id: LocationId) -> Option<&WorldLocation> {
        self.locations.iter().find(|loc| loc.id == id)
    }

    /// The home base location.
    #[must_use]
    pub fn home(&self) -> Option<&WorldLocation> {
        self.get(self.home_base)
    }

    /// Iterate over currently claimed locations.
    pub fn claimed_locations(&self) -> impl Iterator<Item = &WorldLocation> {
        self.locations.iter().filter(|loc| loc.currently_claimed)
    }

    /// Claim a location: it stops being defended and starts producing.
    ///
    /// # Errors
    ///
    /// Fails if the position is off the grid or already claimed.
    pub fn claim(&mut self, pos: WorldPosition) -> Result<&WorldLocation, GameError> {
        let idx = self.index(pos).ok_or(GameError::LocationNotFound(pos))?;
        let loc = &mut self.locations[idx];
        if loc.currently_claimed {
            return Err(GameError::AlreadyClaimed(pos));
        }

        loc.currently_claimed = true;
        loc.guardian_ids.clear();
        loc.claim_loot_ids.clear();
        self.claimed_counts.increment(loc.node_type);

        debug!(position = %pos, node_type = %loc.node_type, "location claimed");
        Ok(&self.locations[idx])
    }

    /// Give up a claimed location so it can be fought over again.
    ///
    /// Bumps `claim_count`; the caller re-stocks the returned location. The
    /// home base cannot be released.
    ///
    /// # Errors
    ///
    /// Fails if the position is off the grid, unclaimed, or the home base.
    pub fn release(&mut self, pos: WorldPosition) -> Result<&mut WorldLocation, GameError> {
        let idx = self.index(pos).ok_or(GameError::LocationNotFound(pos))?;
        let node_type = self.locations[idx].node_type;
        if node_type == LocationType::Town {
            return Err(GameError::CannotRelinquish(node_type));
        }
        if !self.locations[idx].currently_claimed {
            return Err(GameError::NotClaimed(pos));
        }

        self.claimed_counts.decrement(node_type);
        let loc = &mut self.locations[idx];
        loc.currently_claimed = false;
        loc.claim_count += 1;

        debug!(position = %pos, claim_count = loc.claim_count, "location released");
        Ok(loc)
    }
}
