//! Output formatting utilities for CLI.

use frontier::game::{Combat, Combatant, CurrencyBlock, GameState, LocationType, World};
use serde::Serialize;

/// Map glyph of a location type. Claimed locations are upper-cased.
fn glyph(node_type: LocationType, claimed: bool) -> char {
    let c = match node_type {
        LocationType::Town => 't',
        LocationType::Village => 'v',
        LocationType::Cave => 'c',
        LocationType::Dungeon => 'd',
        LocationType::Castle => 'k',
        LocationType::Empty => '.',
    };
    if claimed { c.to_ascii_uppercase() } else { c }
}

/// Render the world grid, one row per line.
pub(super) fn format_map(world: &World) -> String {
    let width = usize::from(world.width());
    let mut output = String::with_capacity(world.locations().len() + usize::from(world.height()));

    for row in world.locations().chunks(width.max(1)) {
        output.extend(row.iter().map(|loc| glyph(loc.node_type, loc.currently_claimed)));
        output.push('\n');
    }

    output
}

/// Format per-type counts and shortfall of a world.
pub(super) fn format_world_summary(world: &World) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "  Size: {}x{}  Home: {}\n",
        world.width(),
        world.height(),
        world.home_base()
    ));
    for node_type in LocationType::PLACEABLE {
        output.push_str(&format!(
            "  {:<8} {:>4} placed, {:>4} claimed",
            node_type.as_str(),
            world.node_counts().get(node_type),
            world.claimed_counts().get(node_type)
        ));
        let missing = world.shortfall().get(node_type);
        if missing > 0 {
            output.push_str(&format!(" [{missing} did not fit]"));
        }
        output.push('\n');
    }

    output
}

/// Format the non-zero entries of a currency block.
pub(super) fn format_currencies(block: &CurrencyBlock) -> String {
    let mut output = String::new();
    for (currency, amount) in block.iter().filter(|(_, amount)| *amount > 0.0) {
        output.push_str(&format!("  {:<14} {amount:>12.2}\n", currency.to_string()));
    }
    if output.is_empty() {
        output.push_str("  (nothing)\n");
    }
    output
}

fn format_combatant(combatant: &Combatant) -> String {
    let stats = &combatant.total_stats;
    format!(
        "  {:<20} hp {:>5}  F{} H{} S{} A{}  skills: {}\n",
        combatant.name,
        combatant.hp,
        stats.force,
        stats.health,
        stats.speed,
        stats.aura,
        combatant
            .skill_ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    )
}

/// Format a combat roster.
pub(super) fn format_combat(combat: &Combat) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Combat at {} ({})\n\nHeroes:\n",
        combat.location_name, combat.location_position
    ));
    for hero in &combat.heroes {
        output.push_str(&format_combatant(hero));
    }
    output.push_str("\nGuardians:\n");
    if combat.guardians.is_empty() {
        output.push_str("  (undefended)\n");
    }
    for guardian in &combat.guardians {
        output.push_str(&format_combatant(guardian));
    }

    output
}

/// JSON-serializable simulation result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSimulation<'a> {
    /// World seed used.
    pub(super) seed: &'a str,
    /// Ticks advanced.
    pub(super) ticks: u64,
    /// Locations claimed, including the town.
    pub(super) claimed: usize,
    /// Items and skills collected from claims.
    pub(super) loot: usize,
    /// Income per tick at the end of the run.
    pub(super) per_tick: &'a CurrencyBlock,
    /// Ledger at the end of the run.
    pub(super) ledger: &'a CurrencyBlock,
}

impl<'a> JsonSimulation<'a> {
    /// Summarize a finished simulation.
    pub(super) fn from_state(state: &'a GameState, loot: usize) -> Self {
        Self {
            seed: state.game_id.as_str(),
            ticks: state.ticks,
            claimed: state.world.claimed_locations().count(),
            loot,
            per_tick: &state.currency.per_tick_earnings,
            ledger: &state.currency.currencies,
        }
    }
}
