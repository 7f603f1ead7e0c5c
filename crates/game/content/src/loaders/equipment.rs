//! Equipment template loader.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use mine_core::EquipmentTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, index_by_id, read_file};

/// Equipment catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentCatalog {
    pub equipment: Vec<EquipmentTemplate>,
}

/// Loader for equipment templates from RON files.
pub struct EquipmentLoader;

impl EquipmentLoader {
    pub fn load(path: &Path) -> LoadResult<BTreeMap<String, EquipmentTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<BTreeMap<String, EquipmentTemplate>> {
        let catalog: EquipmentCatalog =
            ron::from_str(content).context("Failed to parse equipment catalog RON")?;

        for template in &catalog.equipment {
            if let Some(durability) = template.durability {
                anyhow::ensure!(
                    durability > 0,
                    "equipment '{}' has zero durability; omit it for unbreakable gear",
                    template.id
                );
            }
        }
        index_by_id(catalog.equipment, "equipment", |t| &t.id)
    }
}
