//! Game invariants - sanity checks that detect bugs.
//!
//! These should NEVER trigger on a world produced by the generator or a
//! state advanced only through the public transitions. If they do, it
//! indicates a bug.

use std::collections::HashSet;

use crate::game::{GameState, LocationType, NodeCounts, World};

/// Sanity bound: no balance or rate should ever exceed this.
pub const SANITY_MAX_CURRENCY: f64 = 1e15;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

fn violation(message: String) -> InvariantViolation {
    InvariantViolation { message }
}

/// Check the structural invariants of a world.
#[must_use]
pub fn check_world(world: &World) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    let expected = usize::from(world.width()) * usize::from(world.height());
    if world.locations().len() != expected {
        violations.push(violation(format!(
            "World has {} locations, expected {expected}",
            world.locations().len()
        )));
    }

    let mut ids = HashSet::new();
    let mut node_counts = NodeCounts::default();
    let mut claimed_counts = NodeCounts::default();

    for loc in world.locations() {
        let key = loc.key();

        if !ids.insert(loc.id) {
            violations.push(violation(format!("Duplicate location id {} at {key}", loc.id)));
        }

        // Claimed locations hold nothing to fight or collect
        let stocked = !(loc.guardian_ids.is_empty() && loc.claim_loot_ids.is_empty());
        if loc.currently_claimed && stocked {
            violations.push(violation(format!(
                "Claimed location {key} still has {} guardians and {} loot",
                loc.guardian_ids.len(),
                loc.claim_loot_ids.len()
            )));
        }

        let mut seen = HashSet::new();
        for entry in &loc.elements {
            if entry.intensity > 100 {
                violations.push(violation(format!(
                    "Location {key} has {} intensity {} > 100",
                    entry.element, entry.intensity
                )));
            }
            if !seen.insert(entry.element) {
                violations.push(violation(format!(
                    "Location {key} lists {} more than once",
                    entry.element
                )));
            }
        }

        if loc.node_type != LocationType::Empty {
            node_counts.increment(loc.node_type);
        }
        if loc.currently_claimed {
            claimed_counts.increment(loc.node_type);
        }
    }

    match world.home() {
        Some(home) if home.node_type == LocationType::Town && home.currently_claimed => {}
        Some(home) => violations.push(violation(format!(
            "Home base {} is a {} (claimed: {})",
            home.key(),
            home.node_type,
            home.currently_claimed
        ))),
        None => violations.push(violation(format!(
            "Home base {} is off the grid",
            world.home_base()
        ))),
    }

    if &node_counts != world.node_counts() {
        violations.push(violation(format!(
            "Node counts {:?} disagree with locations {node_counts:?}",
            world.node_counts()
        )));
    }
    if &claimed_counts != world.claimed_counts() {
        violations.push(violation(format!(
            "Claimed counts {:?} disagree with locations {claimed_counts:?}",
            world.claimed_counts()
        )));
    }

    violations
}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
/// These are bug detectors, not gameplay limits.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = if state.meta.is_setup {
        check_world(&state.world)
    } else {
        Vec::new()
    };

    // Ledger bounds
    for (currency, amount) in state.currency.currencies.iter() {
        if !amount.is_finite() || !(0.0..=SANITY_MAX_CURRENCY).contains(&amount) {
            violations.push(violation(format!(
                "Balance of {currency} is {amount}, outside [0, {SANITY_MAX_CURRENCY}]"
            )));
        }
    }
    for (currency, rate) in state.currency.per_tick_earnings.iter() {
        if !rate.is_finite() || rate.abs() > SANITY_MAX_CURRENCY {
            violations.push(violation(format!("Income of {currency} is {rate}")));
        }
    }

    for hero in &state.heroes {
        if hero.remaining_talent_points() < 0 {
            violations.push(violation(format!(
                "Hero {} spent more talent points than level {}",
                hero.name, hero.level
            )));
        }
    }

    // A running combat always targets an unclaimed location
    if let Some(combat) = &state.combat {
        match state.world.get(combat.location_position) {
            Some(loc) if !loc.currently_claimed => {}
            Some(_) => violations.push(violation(format!(
                "Combat {} targets claimed location {}",
                combat.id, combat.location_position
            ))),
            None => violations.push(violation(format!(
                "Combat {} targets missing location {}",
                combat.id, combat.location_position
            ))),
        }
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameCurrency, Hero, WorldLocation, WorldPosition};
    use crate::ids::{GameId, GuardianId, LocationId};

    fn create_valid_game() -> GameState {
        let mut cells = Vec::new();
        for y in 0..3 {
            for x in 0..3 {
                cells.push(WorldLocation::blank(LocationId::new(), WorldPosition::new(x, y)));
            }
        }
        let home = WorldPosition::new(1, 1);
        cells[4].node_type = LocationType::Town;
        cells[4].currently_claimed = true;
        cells[0].node_type = LocationType::Cave;
        cells[0].guardian_ids.push(GuardianId::new("bat"));

        let world = World::from_cells(3, 3, cells, home, NodeCounts::default()).unwrap();
        GameState::new(GameId::new("inv"), world, Hero::starting_party())
    }

    #[test]
    fn test_valid_game_passes() {
        let game = create_valid_game();
        let violations = check_invariants(&game);
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_claimed_with_guardians_detected() {
        let mut game = create_valid_game();
        game.world.get_mut(WorldPosition::new(0, 0)).unwrap().currently_claimed = true;

        let violations = check_world(&game.world);
        assert!(violations.iter().any(|v| v.message.contains("guardians")));
        assert!(violations.iter().any(|v| v.message.contains("Claimed counts")));
    }

    #[test]
    fn test_negative_balance_detected() {
        let mut game = create_valid_game();
        game.currency.currencies.set(GameCurrency::Mana, -1.0);

        let violations = check_invariants(&game);
        assert!(!violations.is_empty());
        assert!(violations[0].message.contains("Mana"));
    }

    #[test]
    fn test_overspent_talents_detected() {
        let mut game = create_valid_game();
        let talent = crate::ids::TalentId::new("t");
        game.heroes[0].spend_talent_point(&talent);
        game.heroes[0].spend_talent_point(&talent);

        let violations = check_invariants(&game);
        assert!(violations.iter().any(|v| v.message.contains("talent points")));
    }

    #[test]
    fn test_home_must_be_town() {
        let mut game = create_valid_game();
        game.world.get_mut(WorldPosition::new(1, 1)).unwrap().node_type = LocationType::Village;

        let violations = check_world(&game.world);
        assert!(violations.iter().any(|v| v.message.contains("Home base")));
    }
}
