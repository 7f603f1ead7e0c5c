//! Game configuration loader.

use std::path::Path;

use anyhow::Context;
use mine_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their [`GameConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig =
            toml::from_str(content).context("Failed to parse config TOML")?;

        anyhow::ensure!(
            config.inventory_slots > 0,
            "inventory_slots must be positive"
        );
        anyhow::ensure!(
            config.xp_base > 0.0 && config.xp_multiplier >= 1.0,
            "experience curve must be positive and non-decreasing (base {}, multiplier {})",
            config.xp_base,
            config.xp_multiplier
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            xp_base = 50.0

            [starting_stats]
            attack = 12.0
            "#,
        )
        .unwrap();

        assert_eq!(config.xp_base, 50.0);
        assert_eq!(config.xp_multiplier, GameConfig::DEFAULT_XP_MULTIPLIER);
        assert_eq!(config.starting_stats.attack, 12.0);
        assert_eq!(config.starting_stats.max_health, 100.0);
    }

    #[test]
    fn shrinking_curve_is_rejected() {
        let error = ConfigLoader::parse("xp_multiplier = 0.5").unwrap_err();
        assert!(error.to_string().contains("experience curve"));
    }
}
