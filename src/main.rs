//! Frontier CLI - Command-line interface for generating and simulating worlds.

// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Frontier - deterministic world generation and claim economy
#[derive(Parser, Debug)]
#[command(name = "frontier")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every world-building command.
#[derive(ClapArgs, Debug, Clone)]
struct WorldArgs {
    /// Catalog JSON file (default: bundled catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// World seed (default: random)
    #[arg(short, long)]
    seed: Option<String>,

    /// World configuration name, e.g. Small
    #[arg(short, long, default_value = "Small")]
    world: String,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    format: cli::OutputFormat,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a world and print its map
    Generate {
        #[command(flatten)]
        world: WorldArgs,
    },

    /// Start a game, claim nearby locations and advance the economy
    Simulate {
        #[command(flatten)]
        world: WorldArgs,

        /// Ticks to advance (default: 100)
        #[arg(short, long, default_value = "100")]
        ticks: u64,

        /// Claim every location within this distance of home
        #[arg(short, long, default_value = "3.0")]
        radius: f64,

        /// Festival to start before ticking
        #[arg(long)]
        festival: Option<String>,
    },

    /// Build the combat roster for one location
    Combat {
        #[command(flatten)]
        world: WorldArgs,

        /// Column of the contested location
        #[arg(short, long)]
        x: Option<i32>,

        /// Row of the contested location
        #[arg(short, long)]
        y: Option<i32>,
    },

    /// Load a catalog, generate every world config and check invariants
    Validate {
        /// Catalog JSON file (default: bundled catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Seed used for the trial worlds
        #[arg(short, long, default_value = "validate")]
        seed: String,
    },
}

impl From<WorldArgs> for cli::WorldOptions {
    fn from(args: WorldArgs) -> Self {
        Self {
            catalog: args.catalog,
            seed: args.seed,
            world: args.world,
            format: args.format,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr so stdout stays clean for JSON output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "frontier=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match args.command {
        Commands::Generate { world } => cli::generate::execute(&world.into()),

        Commands::Simulate {
            world,
            ticks,
            radius,
            festival,
        } => cli::simulate::execute(&world.into(), ticks, radius, festival.as_deref()),

        Commands::Combat { world, x, y } => cli::combat::execute(&world.into(), x, y),

        Commands::Validate { catalog, seed } => cli::validate::execute(catalog.as_deref(), &seed),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
