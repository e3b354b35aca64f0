//! Content repository: read-only catalogs of world configs, guardians,
//! items, skills, talents and festivals.
//!
//! The core never reaches for global content. Every algorithm that needs a
//! catalog takes a [`ContentRepository`] argument.

mod catalog;
mod model;

pub use catalog::{Catalog, ContentRef};
pub use model::{
    CountRange, FestivalData, GuardianData, ItemDefinition, ItemSlot, SkillDefinition,
    TalentDefinition, WorldConfig,
};

use crate::ids::{FestivalId, GuardianId, ItemId, SkillId, TalentId, WorldConfigId};

/// Lookup over already-validated content.
pub trait ContentRepository {
    /// World configuration by id.
    fn world_config(&self, id: &WorldConfigId) -> Option<&WorldConfig>;
    /// All world configurations.
    fn world_configs(&self) -> &[WorldConfig];
    /// Guardian template by id.
    fn guardian(&self, id: &GuardianId) -> Option<&GuardianData>;
    /// All guardian templates.
    fn guardians(&self) -> &[GuardianData];
    /// Item definition by id.
    fn item(&self, id: &ItemId) -> Option<&ItemDefinition>;
    /// All item definitions.
    fn items(&self) -> &[ItemDefinition];
    /// Skill definition by id.
    fn skill(&self, id: &SkillId) -> Option<&SkillDefinition>;
    /// All skill definitions.
    fn skills(&self) -> &[SkillDefinition];
    /// Talent definition by id.
    fn talent(&self, id: &TalentId) -> Option<&TalentDefinition>;
    /// Festival definition by id.
    fn festival(&self, id: &FestivalId) -> Option<&FestivalData>;

    /// World configuration by display name, case-insensitive.
    fn world_config_by_name(&self, name: &str) -> Option<&WorldConfig> {
        self.world_configs()
            .iter()
            .find(|config| config.name.eq_ignore_ascii_case(name))
    }
}
