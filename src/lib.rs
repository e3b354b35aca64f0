// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Frontier: the deterministic simulation core of an elemental idle
//! exploration game.
//!
//! This crate provides:
//! - Seeded random streams that replay identically from a world seed
//! - A world generator placing towns, villages, caves, dungeons and castles
//!   on a grid with compass-derived elemental terrain
//! - Guardian and loot stocking of unclaimed locations
//! - A claim economy that turns owned locations into per-tick income
//! - Combat roster instantiation from heroes and guardian templates
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │    Session (start, claim, tick)     │
//! ├──────────────────┬──────────────────┤
//! │     Economy      │      Combat      │
//! ├──────────────────┴──────────────────┤
//! │   World generator + stocking        │
//! ├─────────────────────────────────────┤
//! │   Content catalog   │  Seeded RNG   │
//! └─────────────────────────────────────┘
//! ```

pub mod content;
pub mod error;
pub mod game;
pub mod ids;
pub mod rng;
pub mod worldgen;

pub use content::{Catalog, ContentRepository, WorldConfig};
pub use error::{ContentError, GameError, WorldGenError};

// Re-export key game types at crate root for convenience
pub use game::{
    GameCurrency, GameState, LocationType, MemoryStore, StateStore, World, WorldLocation,
    WorldPosition,
};
pub use rng::SeededRng;
pub use worldgen::generate_world;
