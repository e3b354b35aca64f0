//! Game layer for Frontier.
//!
//! Implements the rules on top of a generated world:
//! - World grid with towns, villages, caves, dungeons and castles
//! - Claim economy (per-tick income, ledger, festivals)
//! - Heroes, equipment and talents
//! - Guardians and combat roster instantiation
//! - Game state store and whole-game transitions

mod combat;
mod currency;
mod economy;
mod element;
mod festival;
mod guardian;
mod hero;
pub mod invariants;
mod session;
mod state;
mod stats;
mod world;

pub use combat::{
    finish_combat, generate_combat, start_combat, Combat, CombatOutcome, Combatant,
    CombatantSource,
};
pub use currency::{CurrencyBlock, CurrencyTier, GameCurrency};
pub use economy::{
    advance_tick, apply_claims, claims_for_location, currency_claims, gain_currencies,
    gain_currency, get_currency, has_currency, lose_currency, merge_currency_claims,
    update_claims,
};
pub use element::{Element, ElementBlock, ElementalIntensity};
pub use festival::{festival_multiplier, start_festival, ActiveFestival};
pub use guardian::Guardian;
pub use hero::{
    EquipmentItem, EquipmentSkill, Hero, BLANK_TALENT_NAME, SKILL_SLOTS, STARTING_HERO_NAMES,
};
pub use session::{buy_talent, claim_location, release_location, start_game};
pub use state::{
    CurrencyState, GameMeta, GameState, Inventory, MemoryStore, StateStore, STATE_VERSION,
};
pub use stats::{Stat, StatBlock};
pub use world::{LocationType, NodeCounts, World, WorldLocation, WorldPosition};
