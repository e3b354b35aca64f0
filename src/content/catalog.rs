//! JSON-backed content catalog.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::content::{
    ContentRepository, FestivalData, GuardianData, ItemDefinition, ItemSlot, SkillDefinition,
    TalentDefinition, WorldConfig,
};
use crate::error::ContentError;
use crate::ids::{FestivalId, GuardianId, ItemId, SkillId, TalentId, WorldConfigId};

/// Catalog bundled with the crate.
const BUILTIN_CATALOG: &str = include_str!("../../data/content.json");

/// On-disk layout: one array per content type.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    worldconfig: Vec<WorldConfig>,
    guardian: Vec<GuardianData>,
    skill: Vec<SkillDefinition>,
    accessory: Vec<ItemDefinition>,
    armor: Vec<ItemDefinition>,
    trinket: Vec<ItemDefinition>,
    weapon: Vec<ItemDefinition>,
    festival: Vec<FestivalData>,
    talent: Vec<TalentDefinition>,
}

/// A borrowed catalog entry of any type.
#[derive(Debug, Clone, Copy)]
pub enum ContentRef<'a> {
    /// A world configuration.
    WorldConfig(&'a WorldConfig),
    /// A guardian template.
    Guardian(&'a GuardianData),
    /// An item definition.
    Item(&'a ItemDefinition),
    /// A skill definition.
    Skill(&'a SkillDefinition),
    /// A talent definition.
    Talent(&'a TalentDefinition),
    /// A festival definition.
    Festival(&'a FestivalData),
}

/// Read-only content, keyed by id.
///
/// Ids and names are unique across all content types. A later entry that
/// repeats an earlier id or name is discarded with a warning.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    world_configs: Vec<WorldConfig>,
    guardians: Vec<GuardianData>,
    items: Vec<ItemDefinition>,
    skills: Vec<SkillDefinition>,
    talents: Vec<TalentDefinition>,
    festivals: Vec<FestivalData>,
    ids_by_name: HashMap<String, String>,
    seen_ids: HashSet<String>,
    skipped: usize,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled JSON does not parse.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&text)?;
        info!(path = %path.display(), entries = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Parse a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid catalog JSON.
    pub fn from_json_str(text: &str) -> Result<Self, ContentError> {
        let file: CatalogFile = serde_json::from_str(text)?;
        let mut catalog = Self::new();

        for config in file.worldconfig {
            catalog.insert_world_config(config);
        }
        for guardian in file.guardian {
            catalog.insert_guardian(guardian);
        }
        for skill in file.skill {
            catalog.insert_skill(skill);
        }
        let slotted = [
            (ItemSlot::Accessory, file.accessory),
            (ItemSlot::Armor, file.armor),
            (ItemSlot::Trinket, file.trinket),
            (ItemSlot::Weapon, file.weapon),
        ];
        for (slot, items) in slotted {
            for mut item in items {
                item.slot = slot;
                catalog.insert_item(item);
            }
        }
        for festival in file.festival {
            catalog.insert_festival(festival);
        }
        for talent in file.talent {
            catalog.insert_talent(talent);
        }

        Ok(catalog)
    }

    /// Total number of accepted entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen_ids.len()
    }

    /// Whether the catalog holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen_ids.is_empty()
    }

    /// Number of entries discarded as duplicates.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Id registered for a display name.
    #[must_use]
    pub fn id_by_name(&self, name: &str) -> Option<&str> {
        self.ids_by_name.get(name).map(String::as_str)
    }

    /// Any entry by raw id.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<ContentRef<'_>> {
        if !self.seen_ids.contains(id) {
            return None;
        }
        let world_config = || {
            self.world_configs
                .iter()
                .find(|c| c.id.as_str() == id)
                .map(ContentRef::WorldConfig)
        };
        let guardian = || {
            self.guardians
                .iter()
                .find(|g| g.id.as_str() == id)
                .map(ContentRef::Guardian)
        };
        let item = || {
            self.items
                .iter()
                .find(|i| i.id.as_str() == id)
                .map(ContentRef::Item)
        };
        let skill = || {
            self.skills
                .iter()
                .find(|s| s.id.as_str() == id)
                .map(ContentRef::Skill)
        };
        let talent = || {
            self.talents
                .iter()
                .find(|t| t.id.as_str() == id)
                .map(ContentRef::Talent)
        };
        let festival = || {
            self.festivals
                .iter()
                .find(|f| f.id.as_str() == id)
                .map(ContentRef::Festival)
        };

        world_config()
            .or_else(guardian)
            .or_else(item)
            .or_else(skill)
            .or_else(talent)
            .or_else(festival)
    }

    /// Add a world configuration. Returns `false` if it was a duplicate.
    pub fn insert_world_config(&mut self, config: WorldConfig) -> bool {
        let admitted = self.admit(config.id.as_str(), &config.name);
        if admitted {
            self.world_configs.push(config);
        }
        admitted
    }

    /// Add a guardian template. Returns `false` if it was a duplicate.
    pub fn insert_guardian(&mut self, guardian: GuardianData) -> bool {
        let admitted = self.admit(guardian.id.as_str(), &guardian.name);
        if admitted {
            self.guardians.push(guardian);
        }
        admitted
    }

    /// Add an item definition. Returns `false` if it was a duplicate.
    pub fn insert_item(&mut self, item: ItemDefinition) -> bool {
        let admitted = self.admit(item.id.as_str(), &item.name);
        if admitted {
            self.items.push(item);
        }
        admitted
    }

    /// Add a skill definition. Returns `false` if it was a duplicate.
    pub fn insert_skill(&mut self, skill: SkillDefinition) -> bool {
        let admitted = self.admit(skill.id.as_str(), &skill.name);
        if admitted {
            self.skills.push(skill);
        }
        admitted
    }

    /// Add a talent definition. Returns `false` if it was a duplicate.
    pub fn insert_talent(&mut self, talent: TalentDefinition) -> bool {
        let admitted = self.admit(talent.id.as_str(), &talent.name);
        if admitted {
            self.talents.push(talent);
        }
        admitted
    }

    /// Add a festival definition. Returns `false` if it was a duplicate.
    pub fn insert_festival(&mut self, festival: FestivalData) -> bool {
        let admitted = self.admit(festival.id.as_str(), &festival.name);
        if admitted {
            self.festivals.push(festival);
        }
        admitted
    }

    fn admit(&mut self, id: &str, name: &str) -> bool {
        if let Some(existing) = self.ids_by_name.get(name) {
            warn!(name, id, existing = %existing, "duplicate content name, skipping");
            self.skipped += 1;
            return false;
        }
        if self.seen_ids.contains(id) {
            warn!(name, id, "duplicate content id, skipping");
            self.skipped += 1;
            return false;
        }

        self.ids_by_name.insert(name.to_string(), id.to_string());
        self.seen_ids.insert(id.to_string());
        true
    }
}

impl ContentRepository for Catalog {
    fn world_config(&self, id: &WorldConfigId) -> Option<&WorldConfig> {
        self.world_configs.iter().find(|c| &c.id == id)
    }

    fn world_configs(&self) -> &[WorldConfig] {
        &self.world_configs
    }

    fn guardian(&self, id: &GuardianId) -> Option<&GuardianData> {
        self.guardians.iter().find(|g| &g.id == id)
    }

    fn guardians(&self) -> &[GuardianData] {
        &self.guardians
    }

    fn item(&self, id: &ItemId) -> Option<&ItemDefinition> {
        self.items.iter().find(|i| &i.id == id)
    }

    fn items(&self) -> &[ItemDefinition] {
        &self.items
    }

    fn skill(&self, id: &SkillId) -> Option<&SkillDefinition> {
        self.skills.iter().find(|s| &s.id == id)
    }

    fn skills(&self) -> &[SkillDefinition] {
        &self.skills
    }

    fn talent(&self, id: &TalentId) -> Option<&TalentDefinition> {
        self.talents.iter().find(|t| &t.id == id)
    }

    fn festival(&self, id: &FestivalId) -> Option<&FestivalData> {
        self.festivals.iter().find(|f| &f.id == id)
    }
}
