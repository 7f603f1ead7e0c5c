//! Data-driven content for the mining RPG.
//!
//! This crate turns RON/TOML data files into the static definitions
//! `mine-core` consults through its oracles:
//! - Materials (data-driven via RON)
//! - Equipment templates (data-driven via RON)
//! - Skill trees (data-driven via RON)
//! - Enemies and drop tables (data-driven via RON)
//! - Game configuration (data-driven via TOML)
//!
//! Content is consumed through oracles and never appears in player state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, ContentTables, EnemyLoader, EquipmentLoader, LoadResult,
    MaterialLoader, SkillTreeLoader,
};
