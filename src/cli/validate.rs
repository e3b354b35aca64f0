//! Catalog validation command implementation.

use super::{load_catalog, CliError};
use frontier::game::invariants::check_world;
use frontier::generate_world;
use frontier::ids::GameId;
use frontier::ContentRepository;
use std::path::Path;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read, or any world config
/// produces a world that breaks an invariant.
pub(crate) fn execute(catalog_path: Option<&Path>, seed: &str) -> Result<(), CliError> {
    let source = catalog_path.map_or_else(
        || "bundled catalog".to_string(),
        |p| p.display().to_string(),
    );
    println!("Validating: {source}");
    println!();

    let catalog = load_catalog(catalog_path)?;
    print_check("Catalog parses", true);
    print_check(
        &format!("No duplicate entries ({} skipped)", catalog.skipped()),
        catalog.skipped() == 0,
    );
    print_check("Guardian templates present", !catalog.guardians().is_empty());
    print_check("Droppable loot present", catalog.items().iter().any(|i| !i.prevent_drop));

    println!();
    println!("Trial worlds (seed: {seed}):");

    let seed = GameId::new(seed);
    let mut failures = 0;
    for config in catalog.world_configs() {
        let world = generate_world(config, &seed, &catalog)?;
        let violations = check_world(&world);
        print_check(
            &format!("{} ({}x{})", config.name, config.width, config.height),
            violations.is_empty(),
        );
        for violation in &violations {
            println!("      {violation}");
        }
        if world.shortfall().total() > 0 {
            println!("      {} locations did not fit", world.shortfall().total());
        }
        failures += violations.len();
    }

    println!();
    if failures > 0 {
        return Err(CliError::new(format!("{failures} invariant violations")));
    }
    println!("Validation successful!");

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "WARN" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
