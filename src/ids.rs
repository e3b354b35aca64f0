//! Strongly-typed identifiers.
//!
//! Runtime instances (locations, heroes, combats) are keyed by UUIDs. Content
//! entries keep the string ids they were authored with in the catalog.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a fresh, process-random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Borrow the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

macro_rules! define_content_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw id string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw id string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

define_uuid_id!(
    /// A single grid location of a generated world.
    LocationId
);
define_uuid_id!(
    /// A hero of the player's party.
    HeroId
);
define_uuid_id!(
    /// A combat session.
    CombatId
);
define_uuid_id!(
    /// One participant of a combat session.
    CombatantId
);

define_content_id!(
    /// A game, doubling as the world seed.
    GameId
);
define_content_id!(
    /// A world-size configuration entry.
    WorldConfigId
);
define_content_id!(
    /// A guardian template.
    GuardianId
);
define_content_id!(
    /// An item definition.
    ItemId
);
define_content_id!(
    /// A skill definition (or the built-in attack).
    SkillId
);
define_content_id!(
    /// A talent definition.
    TalentId
);
define_content_id!(
    /// A festival definition.
    FestivalId
);
define_content_id!(
    /// A concrete equipment instance, `"<definition>|<uuid>"`.
    EquipmentId
);

/// Id of the baseline attack every combatant knows.
pub const ATTACK_SKILL: &str = "Attack";

impl SkillId {
    /// The baseline attack skill.
    #[must_use]
    pub fn attack() -> Self {
        Self::new(ATTACK_SKILL)
    }
}

impl EquipmentId {
    /// Build a unique instance id for the given definition.
    #[must_use]
    pub fn instance_of(definition: &str) -> Self {
        Self(format!("{definition}|{}", Uuid::new_v4()))
    }
}

/// Loot available at a location: either an item or a skill definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum LootId {
    /// An item definition.
    Item(ItemId),
    /// A skill definition.
    Skill(SkillId),
}

impl std::fmt::Display for LootId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LootId::Item(id) => write!(f, "item:{id}"),
            LootId::Skill(id) => write!(f, "skill:{id}"),
        }
    }
}
