//! Loaders that turn RON/TOML data files into core definitions.
//!
//! Each loader reads one file and returns plain `mine-core` types. Cross-file
//! checks (drop tables naming real materials, for instance) live in
//! [`ContentFactory`].

pub mod config;
pub mod enemies;
pub mod equipment;
pub mod factory;
pub mod materials;
pub mod skills;

pub use config::ConfigLoader;
pub use enemies::EnemyLoader;
pub use equipment::EquipmentLoader;
pub use factory::{ContentFactory, ContentTables};
pub use materials::MaterialLoader;
pub use skills::SkillTreeLoader;

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}

/// Keys `entries` by id, rejecting duplicates.
pub(crate) fn index_by_id<T>(
    entries: Vec<T>,
    what: &str,
    id: impl Fn(&T) -> &str,
) -> LoadResult<BTreeMap<String, T>> {
    let mut indexed = BTreeMap::new();
    for entry in entries {
        let key = id(&entry).to_owned();
        if indexed.contains_key(&key) {
            anyhow::bail!("Duplicate {} id '{}'", what, key);
        }
        indexed.insert(key, entry);
    }
    Ok(indexed)
}
