//! Static skill-tree definitions and their validation.

use std::collections::HashMap;

use crate::error::{ErrorSeverity, GameError};
use crate::stats::StatKind;

/// What one level of a skill grants.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEffect {
    /// `magnitude` per learned level.
    Stat(StatKind, f64),
    /// Unlocks automatic mining up to the named tier.
    AutoMine(String),
    Berserker,
    Immortal,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: String,
    pub name: String,
    /// Depth in the prerequisite graph; 1 = root.
    pub tier: u32,
    /// Skill points spent per level.
    pub cost: u32,
    pub max_level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prerequisites: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<SkillEffect>,
}

impl SkillDefinition {
    pub fn new(id: impl Into<String>, tier: u32, cost: u32, max_level: u32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            tier,
            cost,
            max_level,
            prerequisites: Vec::new(),
            effects: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn requires(mut self, prerequisite: impl Into<String>) -> Self {
        self.prerequisites.push(prerequisite.into());
        self
    }

    pub fn with_effect(mut self, effect: SkillEffect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// A named tree of skills (e.g. combat, mining, defense).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillTreeDefinition {
    pub id: String,
    pub name: String,
    pub skills: Vec<SkillDefinition>,
}

/// Structural problems in a skill-tree definition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillTreeError {
    #[error("skill '{0}' is defined more than once")]
    DuplicateSkill(String),

    #[error("tree '{0}' is defined more than once")]
    DuplicateTree(String),

    #[error("skill '{skill}' requires unknown skill '{prerequisite}'")]
    UnknownPrerequisite { skill: String, prerequisite: String },

    #[error("skill '{0}' has max level 0")]
    ZeroMaxLevel(String),

    /// Tier 1 must have no prerequisites and every other tier must have some.
    #[error("skill '{skill}' has tier {tier} but {prerequisites} prerequisites")]
    TierMismatch {
        skill: String,
        tier: u32,
        prerequisites: usize,
    },

    #[error("skill '{skill}' (tier {tier}) must sit above prerequisite '{prerequisite}'")]
    TierNotAbovePrerequisite {
        skill: String,
        tier: u32,
        prerequisite: String,
    },
}

impl GameError for SkillTreeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use SkillTreeError::*;
        match self {
            DuplicateSkill(_) => "SKILL_TREE_DUPLICATE_SKILL",
            DuplicateTree(_) => "SKILL_TREE_DUPLICATE_TREE",
            UnknownPrerequisite { .. } => "SKILL_TREE_UNKNOWN_PREREQUISITE",
            ZeroMaxLevel(_) => "SKILL_TREE_ZERO_MAX_LEVEL",
            TierMismatch { .. } => "SKILL_TREE_TIER_MISMATCH",
            TierNotAbovePrerequisite { .. } => "SKILL_TREE_TIER_ORDER",
        }
    }
}

impl SkillTreeDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            skills: Vec::new(),
        }
    }

    pub fn with_skill(mut self, skill: SkillDefinition) -> Self {
        self.skills.push(skill);
        self
    }

    pub fn skill(&self, id: &str) -> Option<&SkillDefinition> {
        self.skills.iter().find(|skill| skill.id == id)
    }

    /// Checks that the prerequisite graph is well tiered.
    ///
    /// Every prerequisite sits on a strictly lower tier, so the graph is
    /// acyclic once this passes.
    pub fn validate(&self) -> Result<(), SkillTreeError> {
        let mut by_id: HashMap<&str, &SkillDefinition> = HashMap::new();
        for skill in &self.skills {
            if by_id.insert(skill.id.as_str(), skill).is_some() {
                return Err(SkillTreeError::DuplicateSkill(skill.id.clone()));
            }
        }

        for skill in &self.skills {
            if skill.max_level == 0 {
                return Err(SkillTreeError::ZeroMaxLevel(skill.id.clone()));
            }
            let is_root = skill.tier == 1;
            if is_root != skill.prerequisites.is_empty() {
                return Err(SkillTreeError::TierMismatch {
                    skill: skill.id.clone(),
                    tier: skill.tier,
                    prerequisites: skill.prerequisites.len(),
                });
            }
            for prerequisite in &skill.prerequisites {
                let Some(required) = by_id.get(prerequisite.as_str()) else {
                    return Err(SkillTreeError::UnknownPrerequisite {
                        skill: skill.id.clone(),
                        prerequisite: prerequisite.clone(),
                    });
                };
                if required.tier >= skill.tier {
                    return Err(SkillTreeError::TierNotAbovePrerequisite {
                        skill: skill.id.clone(),
                        tier: skill.tier,
                        prerequisite: prerequisite.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
