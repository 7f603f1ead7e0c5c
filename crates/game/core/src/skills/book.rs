//! Per-player skill ledger: point economy and learned levels.

use std::collections::{BTreeMap, HashSet};

use super::definition::{SkillDefinition, SkillEffect, SkillTreeDefinition, SkillTreeError};
use crate::error::{ErrorSeverity, GameError};
use crate::stats::StatBlock;

/// Reasons a skill level cannot be bought.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillError {
    #[error("unknown skill tree '{0}'")]
    UnknownTree(String),

    #[error("skill '{skill}' not found in tree '{tree}'")]
    UnknownSkill { tree: String, skill: String },

    #[error("skill '{skill}' is already at max level {max_level}")]
    MaxLevelReached { skill: String, max_level: u32 },

    #[error("need {required} skill points, have {available}")]
    InsufficientPoints { required: u32, available: u32 },

    /// Prerequisites must be at their own max level, not merely unlocked.
    #[error("prerequisite '{prerequisite}' is level {level} of {required}")]
    PrerequisiteNotMastered {
        prerequisite: String,
        level: u32,
        required: u32,
    },
}

impl GameError for SkillError {
    fn severity(&self) -> ErrorSeverity {
        use SkillError::*;
        match self {
            UnknownTree(_) | UnknownSkill { .. } | MaxLevelReached { .. } => {
                ErrorSeverity::Validation
            }
            InsufficientPoints { .. } | PrerequisiteNotMastered { .. } => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use SkillError::*;
        match self {
            UnknownTree(_) => "SKILL_UNKNOWN_TREE",
            UnknownSkill { .. } => "SKILL_UNKNOWN_SKILL",
            MaxLevelReached { .. } => "SKILL_MAX_LEVEL",
            InsufficientPoints { .. } => "SKILL_INSUFFICIENT_POINTS",
            PrerequisiteNotMastered { .. } => "SKILL_PREREQUISITE_NOT_MASTERED",
        }
    }
}

/// Aggregate contribution of every learned skill.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkillTotals {
    /// `magnitude * level` summed per stat.
    pub stats: StatBlock,
    /// Auto-mine tier of the highest-tier learned skill that grants one.
    pub auto_mine: Option<String>,
    pub berserker: bool,
    pub immortal: bool,
}

/// Skill trees plus the player's point economy.
#[derive(Clone, Debug, PartialEq)]
pub struct SkillBook {
    trees: BTreeMap<String, SkillTreeDefinition>,
    learned: BTreeMap<String, u32>,
    skill_points: u32,
    total_earned: u32,
    revision: u64,
}

impl SkillBook {
    /// Validates every tree and builds an empty ledger.
    ///
    /// Skill ids must be unique across all trees since learned levels are
    /// keyed by skill id alone.
    pub fn new(
        trees: impl IntoIterator<Item = SkillTreeDefinition>,
    ) -> Result<Self, SkillTreeError> {
        let mut by_id = BTreeMap::new();
        let mut seen_skills = HashSet::new();
        for tree in trees {
            tree.validate()?;
            for skill in &tree.skills {
                if !seen_skills.insert(skill.id.clone()) {
                    return Err(SkillTreeError::DuplicateSkill(skill.id.clone()));
                }
            }
            let tree_id = tree.id.clone();
            if by_id.insert(tree_id.clone(), tree).is_some() {
                return Err(SkillTreeError::DuplicateTree(tree_id));
            }
        }
        Ok(Self {
            trees: by_id,
            learned: BTreeMap::new(),
            skill_points: 0,
            total_earned: 0,
            revision: 0,
        })
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn skill_points(&self) -> u32 {
        self.skill_points
    }

    /// Lifetime points earned; the refund target of [`SkillBook::reset_skills`].
    pub fn total_earned(&self) -> u32 {
        self.total_earned
    }

    pub fn spent_points(&self) -> u32 {
        self.total_earned.saturating_sub(self.skill_points)
    }

    pub fn trees(&self) -> impl Iterator<Item = &SkillTreeDefinition> {
        self.trees.values()
    }

    pub fn skill_level(&self, skill_id: &str) -> u32 {
        self.learned.get(skill_id).copied().unwrap_or(0)
    }

    /// Grants `points` to both the spendable pool and the lifetime total.
    pub fn add_skill_points(&mut self, points: u32) {
        self.skill_points += points;
        self.total_earned += points;
        self.revision += 1;
    }

    /// Checks every unlock rule without spending anything.
    pub fn check_unlock(
        &self,
        skill_id: &str,
        tree_id: &str,
    ) -> Result<&SkillDefinition, SkillError> {
        let tree = self
            .trees
            .get(tree_id)
            .ok_or_else(|| SkillError::UnknownTree(tree_id.to_owned()))?;
        let skill = tree.skill(skill_id).ok_or_else(|| SkillError::UnknownSkill {
            tree: tree_id.to_owned(),
            skill: skill_id.to_owned(),
        })?;

        if self.skill_level(skill_id) >= skill.max_level {
            return Err(SkillError::MaxLevelReached {
                skill: skill_id.to_owned(),
                max_level: skill.max_level,
            });
        }
        if self.skill_points < skill.cost {
            return Err(SkillError::InsufficientPoints {
                required: skill.cost,
                available: self.skill_points,
            });
        }
        for prerequisite_id in &skill.prerequisites {
            // Validation guarantees the prerequisite lives in the same tree.
            let required = tree.skill(prerequisite_id).map_or(0, |p| p.max_level);
            let level = self.skill_level(prerequisite_id);
            if level < required {
                return Err(SkillError::PrerequisiteNotMastered {
                    prerequisite: prerequisite_id.clone(),
                    level,
                    required,
                });
            }
        }
        Ok(skill)
    }

    pub fn can_unlock_skill(&self, skill_id: &str, tree_id: &str) -> bool {
        self.check_unlock(skill_id, tree_id).is_ok()
    }

    /// Buys one level of `skill_id`. Returns the new level.
    pub fn unlock_skill(&mut self, skill_id: &str, tree_id: &str) -> Result<u32, SkillError> {
        let cost = self.check_unlock(skill_id, tree_id)?.cost;
        self.skill_points -= cost;
        let level = self.learned.entry(skill_id.to_owned()).or_insert(0);
        *level += 1;
        let level = *level;
        self.revision += 1;
        tracing::debug!(skill = skill_id, tree = tree_id, level, cost, "skill unlocked");
        Ok(level)
    }

    /// Zeroes every learned level and refunds all points ever earned.
    pub fn reset_skills(&mut self) {
        for level in self.learned.values_mut() {
            *level = 0;
        }
        self.skill_points = self.total_earned;
        self.revision += 1;
        tracing::debug!(refunded = self.total_earned, "skills reset");
    }

    /// Sums every learned skill's effects.
    pub fn total_stats_from_skills(&self) -> SkillTotals {
        let mut totals = SkillTotals::default();
        let mut auto_mine_tier = 0;
        for tree in self.trees.values() {
            for skill in &tree.skills {
                let level = self.skill_level(&skill.id);
                if level == 0 {
                    continue;
                }
                for effect in &skill.effects {
                    match effect {
                        SkillEffect::Stat(stat, magnitude) => {
                            totals.stats.add(*stat, magnitude * f64::from(level));
                        }
                        SkillEffect::AutoMine(tier) => {
                            if skill.tier > auto_mine_tier {
                                auto_mine_tier = skill.tier;
                                totals.auto_mine = Some(tier.clone());
                            }
                        }
                        SkillEffect::Berserker => totals.berserker = true,
                        SkillEffect::Immortal => totals.immortal = true,
                    }
                }
            }
        }
        totals
    }

    pub fn snapshot(&self) -> SkillLedgerSnapshot {
        SkillLedgerSnapshot {
            learned: self
                .learned
                .iter()
                .filter(|(_, level)| **level > 0)
                .map(|(id, level)| (id.clone(), *level))
                .collect(),
            skill_points: self.skill_points,
            total_earned: self.total_earned,
        }
    }

    /// Rebuilds a ledger on top of `trees`.
    ///
    /// Learned ids that no longer exist are dropped and levels above a
    /// skill's current max level are clamped.
    pub fn restore(
        snapshot: SkillLedgerSnapshot,
        trees: impl IntoIterator<Item = SkillTreeDefinition>,
    ) -> Result<Self, SkillTreeError> {
        let mut book = Self::new(trees)?;
        for (skill_id, level) in snapshot.learned {
            let max_level = book
                .trees
                .values()
                .find_map(|tree| tree.skill(&skill_id))
                .map(|skill| skill.max_level);
            match max_level {
                Some(max_level) => {
                    book.learned.insert(skill_id, level.min(max_level));
                }
                None => tracing::warn!(skill = %skill_id, "dropping unknown learned skill"),
            }
        }
        book.skill_points = snapshot.skill_points;
        book.total_earned = snapshot.total_earned.max(snapshot.skill_points);
        Ok(book)
    }
}

/// Persisted skill ledger: learned levels keyed by skill id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillLedgerSnapshot {
    pub learned: BTreeMap<String, u32>,
    pub skill_points: u32,
    pub total_earned: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatKind;

    fn trees() -> Vec<SkillTreeDefinition> {
        vec![
            SkillTreeDefinition::new("combat", "Combat")
                .with_skill(
                    SkillDefinition::new("power_1", 1, 1, 5)
                        .with_effect(SkillEffect::Stat(StatKind::Attack, 2.0)),
                )
                .with_skill(
                    SkillDefinition::new("power_2", 2, 2, 3)
                        .requires("power_1")
                        .with_effect(SkillEffect::Stat(StatKind::Attack, 5.0))
                        .with_effect(SkillEffect::Berserker),
                ),
            SkillTreeDefinition::new("mining", "Mining")
                .with_skill(
                    SkillDefinition::new("prospector", 1, 1, 2)
                        .with_effect(SkillEffect::Stat(StatKind::MiningPower, 1.0))
                        .with_effect(SkillEffect::AutoMine("stone".into())),
                )
                .with_skill(
                    SkillDefinition::new("deep_digger", 2, 1, 1)
                        .requires("prospector")
                        .with_effect(SkillEffect::AutoMine("iron".into())),
                ),
        ]
    }

    fn book_with_points(points: u32) -> SkillBook {
        let mut book = SkillBook::new(trees()).unwrap();
        book.add_skill_points(points);
        book
    }

    #[test]
    fn prerequisite_must_reach_its_own_max_level() {
        let mut book = book_with_points(20);

        for level in 1..=4 {
            assert_eq!(book.unlock_skill("power_1", "combat"), Ok(level));
            assert_eq!(
                book.unlock_skill("power_2", "combat"),
                Err(SkillError::PrerequisiteNotMastered {
                    prerequisite: "power_1".into(),
                    level,
                    required: 5
                })
            );
        }
        assert_eq!(book.unlock_skill("power_1", "combat"), Ok(5));
        assert_eq!(book.unlock_skill("power_2", "combat"), Ok(1));
    }

    #[test]
    fn unlock_deducts_cost_and_never_overspends() {
        let mut book = book_with_points(1);
        assert_eq!(book.unlock_skill("power_1", "combat"), Ok(1));
        assert_eq!(book.skill_points(), 0);
        assert_eq!(
            book.unlock_skill("power_1", "combat"),
            Err(SkillError::InsufficientPoints {
                required: 1,
                available: 0
            })
        );
        assert_eq!(book.skill_level("power_1"), 1);
    }

    #[test]
    fn max_level_is_enforced() {
        let mut book = book_with_points(10);
        book.unlock_skill("prospector", "mining").unwrap();
        book.unlock_skill("prospector", "mining").unwrap();
        assert!(!book.can_unlock_skill("prospector", "mining"));
        assert!(matches!(
            book.unlock_skill("prospector", "mining"),
            Err(SkillError::MaxLevelReached { .. })
        ));
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut book = book_with_points(10);
        assert_eq!(
            book.unlock_skill("power_1", "magic"),
            Err(SkillError::UnknownTree("magic".into()))
        );
        assert!(matches!(
            book.unlock_skill("prospector", "combat"),
            Err(SkillError::UnknownSkill { .. })
        ));
    }

    #[test]
    fn reset_refunds_every_earned_point() {
        let mut book = book_with_points(10);
        for _ in 0..5 {
            book.unlock_skill("power_1", "combat").unwrap();
        }
        book.unlock_skill("power_2", "combat").unwrap();
        assert_eq!(book.spent_points(), 7);
        assert_eq!(book.skill_points(), 3);

        book.reset_skills();

        assert_eq!(book.skill_points(), 10);
        assert_eq!(book.total_earned(), 10);
        assert_eq!(book.skill_level("power_1"), 0);
        assert_eq!(book.skill_level("power_2"), 0);
        assert_eq!(book.total_stats_from_skills(), SkillTotals::default());
    }

    #[test]
    fn totals_scale_with_level_and_surface_specials() {
        let mut book = book_with_points(20);
        for _ in 0..5 {
            book.unlock_skill("power_1", "combat").unwrap();
        }
        book.unlock_skill("power_2", "combat").unwrap();
        book.unlock_skill("prospector", "mining").unwrap();
        book.unlock_skill("prospector", "mining").unwrap();
        book.unlock_skill("deep_digger", "mining").unwrap();

        let totals = book.total_stats_from_skills();
        assert_eq!(totals.stats.get(StatKind::Attack), 2.0 * 5.0 + 5.0);
        assert_eq!(totals.stats.get(StatKind::MiningPower), 2.0);
        assert_eq!(totals.auto_mine.as_deref(), Some("iron"));
        assert!(totals.berserker);
        assert!(!totals.immortal);
    }

    #[test]
    fn duplicate_skill_ids_across_trees_are_rejected() {
        let mut all = trees();
        all.push(
            SkillTreeDefinition::new("defense", "Defense")
                .with_skill(SkillDefinition::new("power_1", 1, 1, 1)),
        );
        assert_eq!(
            SkillBook::new(all),
            Err(SkillTreeError::DuplicateSkill("power_1".into()))
        );
    }

    #[test]
    fn restore_drops_unknown_and_clamps_levels() {
        let snapshot = SkillLedgerSnapshot {
            learned: BTreeMap::from([
                ("power_1".to_string(), 9),
                ("retired_skill".to_string(), 2),
            ]),
            skill_points: 4,
            total_earned: 12,
        };
        let book = SkillBook::restore(snapshot, trees()).unwrap();
        assert_eq!(book.skill_level("power_1"), 5);
        assert_eq!(book.skill_level("retired_skill"), 0);
        assert_eq!(book.skill_points(), 4);
        assert_eq!(book.total_earned(), 12);
    }
}
