//! Skill tree loader.

use std::path::Path;

use anyhow::Context;
use mine_core::{SkillBook, SkillTreeDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Skill tree catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillTreeCatalog {
    pub trees: Vec<SkillTreeDefinition>,
}

/// Loader for skill trees from RON files.
pub struct SkillTreeLoader;

impl SkillTreeLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<SkillTreeDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parses and validates every tree: prerequisites, tiers, cycles and
    /// skill ids unique across the whole catalog.
    pub fn parse(content: &str) -> LoadResult<Vec<SkillTreeDefinition>> {
        let catalog: SkillTreeCatalog =
            ron::from_str(content).context("Failed to parse skill tree RON")?;

        SkillBook::new(catalog.trees.iter().cloned()).context("Invalid skill tree definition")?;
        Ok(catalog.trees)
    }
}
