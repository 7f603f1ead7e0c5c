//! Content factory for building oracles from data files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use mine_core::{
    DropKind, EnemyOracle, EnemyTemplate, EquipmentOracle, EquipmentTemplate, GameConfig,
    GameEngine, GameEnv, MaterialDefinition, MaterialOracle, RngOracle, SkillTreeDefinition,
    StaticTables,
};

use crate::loaders::{
    ConfigLoader, EnemyLoader, EquipmentLoader, LoadResult, MaterialLoader, SkillTreeLoader,
};

/// Everything a game session needs from disk.
///
/// Implements every lookup oracle by delegating to its [`StaticTables`].
#[derive(Clone, Debug, PartialEq)]
pub struct ContentTables {
    pub config: GameConfig,
    pub tables: StaticTables,
    pub skill_trees: Vec<SkillTreeDefinition>,
}

impl ContentTables {
    /// Oracle bundle for one engine call.
    pub fn env<'a>(&'a self, rng: &'a dyn RngOracle) -> GameEnv<'a> {
        GameEnv::from_tables(&self.tables, rng)
    }

    /// A fresh level-1 engine using this content's config and skill trees.
    pub fn new_engine(&self, game_seed: u64) -> LoadResult<GameEngine> {
        let engine = GameEngine::new(self.config.clone(), self.skill_trees.clone(), game_seed)?;
        Ok(engine)
    }

    /// Checks that every drop table names an existing material or template.
    pub fn validate(&self) -> LoadResult<()> {
        for enemy in self.tables.enemies.values() {
            for entry in &enemy.drop_table {
                let known = match &entry.kind {
                    DropKind::Material(id) => self.tables.materials.contains_key(id),
                    DropKind::Equipment(id) => self.tables.equipment.contains_key(id),
                };
                anyhow::ensure!(
                    known,
                    "enemy '{}' drops unknown {:?}",
                    enemy.id,
                    entry.kind
                );
            }
        }
        Ok(())
    }
}

impl MaterialOracle for ContentTables {
    fn material(&self, id: &str) -> Option<&MaterialDefinition> {
        self.tables.material(id)
    }
}

impl EquipmentOracle for ContentTables {
    fn template(&self, id: &str) -> Option<&EquipmentTemplate> {
        self.tables.template(id)
    }
}

impl EnemyOracle for ContentTables {
    fn enemy(&self, id: &str) -> Option<&EnemyTemplate> {
        self.tables.enemy(id)
    }
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── materials.ron
/// ├── equipment.ron
/// ├── skills.ron
/// └── enemies.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    pub fn load_materials(&self) -> LoadResult<BTreeMap<String, MaterialDefinition>> {
        MaterialLoader::load(&self.data_dir.join("materials.ron"))
    }

    pub fn load_equipment(&self) -> LoadResult<BTreeMap<String, EquipmentTemplate>> {
        EquipmentLoader::load(&self.data_dir.join("equipment.ron"))
    }

    pub fn load_skill_trees(&self) -> LoadResult<Vec<SkillTreeDefinition>> {
        SkillTreeLoader::load(&self.data_dir.join("skills.ron"))
    }

    pub fn load_enemies(&self) -> LoadResult<BTreeMap<String, EnemyTemplate>> {
        EnemyLoader::load(&self.data_dir.join("enemies.ron"))
    }

    /// Loads and cross-checks every file in the data directory.
    pub fn load(&self) -> LoadResult<ContentTables> {
        let content = ContentTables {
            config: self.load_config()?,
            tables: StaticTables {
                materials: self.load_materials()?,
                equipment: self.load_equipment()?,
                enemies: self.load_enemies()?,
            },
            skill_trees: self.load_skill_trees()?,
        };
        content.validate()?;

        tracing::info!(
            dir = %self.data_dir.display(),
            materials = content.tables.materials.len(),
            equipment = content.tables.equipment.len(),
            enemies = content.tables.enemies.len(),
            skill_trees = content.skill_trees.len(),
            "content loaded"
        );
        Ok(content)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
