//! Deterministic character progression and action resolution for a mining RPG.
//!
//! `mine-core` turns a player's possessions (inventory, equipped gear),
//! learned skills and transient status effects into one resolved stat
//! snapshot, then uses that snapshot to resolve mining and combat. It is
//! pure and synchronous: no I/O, no threads, no clocks. Hosts drive time
//! through [`GameEngine::tick`] and [`GameEngine::advance_mining`] and feed
//! static data through a [`GameEnv`].
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod mining;
pub mod skills;
pub mod state;
pub mod stats;

pub use combat::{CombatError, DamageOutcome, DamageRolls, EnemyState, LootDrop};
pub use config::GameConfig;
pub use engine::{AttackReport, GameEngine, GearError, MiningAdvance, MiningReward};
pub use env::{
    DropCount, DropEntry, DropKind, EnemyOracle, EnemyTemplate, Env, EquipmentOracle,
    EquipmentTemplate, GameEnv, MaterialDefinition, MaterialOracle, MaterialTrait, OracleError,
    PcgRng, RngOracle, StaticTables,
};
pub use error::{ErrorSeverity, GameError};
pub use events::{EventBus, EventKind, GameEvent, SubscriptionId};
pub use mining::{MiningError, MiningSession, mining_time};
pub use skills::{
    SkillBook, SkillDefinition, SkillEffect, SkillError, SkillTreeDefinition, SkillTreeError,
};
pub use state::{
    EquipError, Equipment, EquipmentSlot, Inventory, InventoryError, Item, ItemType, ItemVisual,
    PlayerSnapshot, PlayerState, Progression, StatusEffectKind, StatusEffectLedger,
};
pub use stats::{BaseStats, ResolvedStats, SpecialFlags, StatBlock, StatKind};
