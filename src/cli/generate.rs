//! Generate command implementation.

use super::output::{format_map, format_world_summary};
use super::{load_catalog, resolve_world, CliError, OutputFormat, WorldOptions};
use frontier::generate_world;

/// Execute the generate command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the world config is
/// unknown or malformed.
pub(crate) fn execute(options: &WorldOptions) -> Result<(), CliError> {
    let catalog = load_catalog(options.catalog.as_deref())?;
    let config = resolve_world(&catalog, &options.world)?;
    let seed = options.seed();

    let world = generate_world(config, &seed, &catalog)?;

    match options.format {
        OutputFormat::Text => {
            println!("World '{}' (seed: {seed})", config.name);
            println!();
            print!("{}", format_map(&world));
            println!();
            print!("{}", format_world_summary(&world));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&world)?);
        }
    }

    Ok(())
}
