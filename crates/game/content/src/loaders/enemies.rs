//! Enemy catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use mine_core::{DropCount, EnemyTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, index_by_id, read_file};

/// Enemy catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemyTemplate>,
}

/// Loader for enemies and their drop tables from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    pub fn load(path: &Path) -> LoadResult<BTreeMap<String, EnemyTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<BTreeMap<String, EnemyTemplate>> {
        let catalog: EnemyCatalog =
            ron::from_str(content).context("Failed to parse enemy catalog RON")?;

        for enemy in &catalog.enemies {
            anyhow::ensure!(
                enemy.health > 0.0,
                "enemy '{}' must start with positive health",
                enemy.id
            );
            for entry in &enemy.drop_table {
                anyhow::ensure!(
                    (0.0..=1.0).contains(&entry.chance),
                    "enemy '{}' has drop chance {} outside [0, 1]",
                    enemy.id,
                    entry.chance
                );
                if let DropCount::Range(min, max) = entry.count {
                    anyhow::ensure!(
                        min <= max,
                        "enemy '{}' has inverted drop range {}..={}",
                        enemy.id,
                        min,
                        max
                    );
                }
            }
        }
        index_by_id(catalog.enemies, "enemy", |e| &e.id)
    }
}
