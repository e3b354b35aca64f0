//! Error types for world generation, content loading and state transitions.

use thiserror::Error;

use crate::game::{LocationType, WorldPosition};
use crate::ids::{FestivalId, HeroId, TalentId, WorldConfigId};

/// Failure to build a world from a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorldGenError {
    /// The grid would have no cells.
    #[error("invalid world dimensions {width}x{height} (both must be > 0)")]
    InvalidDimensions {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
    },
}

/// Which pool a single random draw was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    /// Droppable item definitions.
    Item,
    /// Droppable skill definitions.
    Skill,
    /// Guardian templates.
    Guardian,
}

impl std::fmt::Display for PoolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolKind::Item => write!(f, "item"),
            PoolKind::Skill => write!(f, "skill"),
            PoolKind::Guardian => write!(f, "guardian"),
        }
    }
}

/// Failure of one individual random draw.
///
/// Population loops filter these out; they never abort a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DrawError {
    /// No eligible template exists for the draw.
    #[error("no eligible {kind} for encounter level {level}")]
    EmptyPool {
        /// Pool the draw was taken from.
        kind: PoolKind,
        /// Encounter level used to filter the pool.
        level: u32,
    },
}

/// Failure to load or parse a content catalog.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The catalog file could not be read.
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    /// The catalog file is not valid catalog JSON.
    #[error("failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of a game-state operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The position is outside the world grid.
    #[error("no location at {0}")]
    LocationNotFound(WorldPosition),
    /// The location is already claimed.
    #[error("location at {0} is already claimed")]
    AlreadyClaimed(WorldPosition),
    /// The location is not claimed.
    #[error("location at {0} is not claimed")]
    NotClaimed(WorldPosition),
    /// The location type can never be relinquished.
    #[error("{0} locations cannot be relinquished")]
    CannotRelinquish(LocationType),
    /// A combat was expected but none is running.
    #[error("no combat in progress")]
    NoActiveCombat,
    /// A combat is already running.
    #[error("a combat is already in progress")]
    CombatInProgress,
    /// The catalog has no world configuration with this id.
    #[error("unknown world config {0}")]
    UnknownWorldConfig(WorldConfigId),
    /// The catalog has no festival with this id.
    #[error("unknown festival {0}")]
    UnknownFestival(FestivalId),
    /// The party has no hero with this id.
    #[error("unknown hero {0}")]
    UnknownHero(HeroId),
    /// The hero may not take this talent right now.
    #[error("talent {0} cannot be bought")]
    TalentUnavailable(TalentId),
    /// A saved world does not hold one cell per grid position in row-major
    /// order.
    #[error("saved world has {cells} cells, expected {width}x{height} in row-major order")]
    MalformedWorld {
        /// Saved width.
        width: u16,
        /// Saved height.
        height: u16,
        /// Number of saved cells.
        cells: usize,
    },
    /// World generation failed.
    #[error(transparent)]
    WorldGen(#[from] WorldGenError),
}
