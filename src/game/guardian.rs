//! Guardians: templates scaled to a location's encounter level.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::content::GuardianData;
use crate::game::{ElementBlock, StatBlock};
use crate::ids::{GuardianId, SkillId, TalentId};

/// A guardian template instantiated at a specific level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guardian {
    /// Template id.
    pub id: GuardianId,
    /// Template name.
    pub name: String,
    /// Sprite key.
    pub sprite: String,
    /// Animation frame count.
    pub frames: u32,
    /// Level the stats were scaled to.
    pub level: u32,
    /// Scaled stats.
    pub stats: StatBlock,
    /// Template skills.
    pub skill_ids: Vec<SkillId>,
    /// Talent allocation.
    pub talents: BTreeMap<TalentId, u32>,
    /// Affinity with unspecified elements at zero.
    pub affinity: ElementBlock,
    /// Resistance with unspecified elements at zero.
    pub resistance: ElementBlock,
}

impl Guardian {
    /// Scale a template to an encounter level.
    #[must_use]
    pub fn for_location(data: &GuardianData, level: u32) -> Self {
        Self {
            id: data.id.clone(),
            name: data.name.clone(),
            sprite: data.sprite.clone(),
            frames: data.frames,
            level,
            stats: data.stats.scaled(&data.stat_scaling, level),
            skill_ids: data.skill_ids.clone(),
            talents: data.talent_ids.clone(),
            affinity: ElementBlock::merged(&data.affinity),
            resistance: ElementBlock::merged(&data.resistance),
        }
    }
}
