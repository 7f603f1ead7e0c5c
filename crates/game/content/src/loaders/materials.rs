//! Material catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use mine_core::MaterialDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, index_by_id, read_file};

/// Material catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialCatalog {
    pub materials: Vec<MaterialDefinition>,
}

/// Loader for the material catalog from RON files.
pub struct MaterialLoader;

impl MaterialLoader {
    pub fn load(path: &Path) -> LoadResult<BTreeMap<String, MaterialDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<BTreeMap<String, MaterialDefinition>> {
        let catalog: MaterialCatalog =
            ron::from_str(content).context("Failed to parse material catalog RON")?;

        for material in &catalog.materials {
            anyhow::ensure!(
                material.hardness >= 0.0,
                "material '{}' has negative hardness {}",
                material.id,
                material.hardness
            );
        }
        index_by_id(catalog.materials, "material", |m| &m.id)
    }
}
