//! CLI command implementations for Frontier.

pub(crate) mod combat;
pub(crate) mod generate;
pub(crate) mod simulate;
pub(crate) mod validate;

mod output;

use clap::ValueEnum;
use frontier::content::{Catalog, ContentRepository, WorldConfig};
use frontier::error::{ContentError, GameError, WorldGenError};
use frontier::ids::GameId;
use frontier::rng::random_world_seed;
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

/// Output format for world commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Options shared by the world-building commands.
#[derive(Debug, Clone)]
pub(crate) struct WorldOptions {
    /// Catalog file, or the bundled catalog.
    pub(crate) catalog: Option<PathBuf>,
    /// World seed, or a random one.
    pub(crate) seed: Option<String>,
    /// World configuration name.
    pub(crate) world: String,
    /// Output format.
    pub(crate) format: OutputFormat,
}

impl WorldOptions {
    /// The requested seed, or a freshly drawn one.
    pub(crate) fn seed(&self) -> GameId {
        self.seed
            .as_deref()
            .map_or_else(random_world_seed, GameId::new)
    }
}

/// Load the catalog at `path`, or the bundled one.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<Catalog, CliError> {
    let catalog = match path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };
    Ok(catalog)
}

/// Find a world configuration by name.
pub(crate) fn resolve_world<'a>(
    catalog: &'a Catalog,
    name: &str,
) -> Result<&'a WorldConfig, CliError> {
    catalog.world_config_by_name(name).ok_or_else(|| {
        let known: Vec<_> = catalog
            .world_configs()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        CliError::new(format!(
            "Unknown world config '{name}' (available: {})",
            known.join(", ")
        ))
    })
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<ContentError> for CliError {
    fn from(e: ContentError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<GameError> for CliError {
    fn from(e: GameError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<WorldGenError> for CliError {
    fn from(e: WorldGenError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}
