//! Authoritative player state.
//!
//! Each leaf component owns its own invariants and revision counter. Runtime
//! layers read this state freely but mutate it through [`crate::GameEngine`]
//! so that events fire and derived stats stay coherent.

mod equipment;
mod inventory;
mod item;
mod progression;
mod status;

pub use equipment::{DurabilityOutcome, EquipError, Equipment, EquipmentSnapshot};
pub use inventory::{Inventory, InventoryError, InventorySnapshot};
pub use item::{Durability, EquipmentSlot, Item, ItemType, ItemVisual};
pub use progression::{LevelUpReport, Progression, ProgressionSnapshot};
pub use status::{StatusEffect, StatusEffectKind, StatusEffectLedger, StatusSnapshot};

use crate::config::GameConfig;
use crate::skills::{
    SkillBook, SkillLedgerSnapshot, SkillTotals, SkillTreeDefinition, SkillTreeError,
};
use crate::stats::{ResolutionKey, StatSources};

/// Everything that describes one player.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub progression: Progression,
    pub inventory: Inventory,
    pub equipment: Equipment,
    pub skills: SkillBook,
    pub status: StatusEffectLedger,
}

impl PlayerState {
    /// A level-1 player with empty containers and no learned skills.
    pub fn new(config: &GameConfig, skills: SkillBook) -> Self {
        Self {
            progression: Progression::new(config),
            inventory: Inventory::new(config.inventory_slots),
            equipment: Equipment::empty(),
            skills,
            status: StatusEffectLedger::new(),
        }
    }

    /// Cache key covering every stat source.
    pub fn resolution_key(&self) -> ResolutionKey {
        ResolutionKey {
            progression: self.progression.revision(),
            equipment: self.equipment.revision(),
            skills: self.skills.revision(),
            status: self.status.revision(),
            health_bits: self.progression.health().to_bits(),
        }
    }

    /// Borrowed resolver inputs. `skills` is computed by the caller since
    /// skill totals are an owned aggregate.
    pub fn stat_sources<'a>(&'a self, skills: &'a SkillTotals) -> StatSources<'a> {
        StatSources {
            base: self.progression.base_stats(),
            current_health: self.progression.health(),
            equipment: self.equipment.stat_bonuses(),
            status: &self.status,
            skills,
        }
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            progression: self.progression.snapshot(),
            inventory: self.inventory.snapshot(),
            equipment: self.equipment.snapshot(),
            skills: self.skills.snapshot(),
            status: self.status.snapshot(),
        }
    }

    /// Rebuilds a player from a snapshot against the current skill trees.
    pub fn restore(
        snapshot: PlayerSnapshot,
        config: &GameConfig,
        trees: impl IntoIterator<Item = SkillTreeDefinition>,
    ) -> Result<Self, SkillTreeError> {
        Ok(Self {
            progression: Progression::restore(snapshot.progression, config),
            inventory: Inventory::restore(snapshot.inventory),
            equipment: Equipment::restore(snapshot.equipment),
            skills: SkillBook::restore(snapshot.skills, trees)?,
            status: StatusEffectLedger::restore(snapshot.status),
        })
    }
}

/// Aggregate persisted shape handed to the save layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSnapshot {
    pub progression: ProgressionSnapshot,
    pub inventory: InventorySnapshot,
    pub equipment: EquipmentSnapshot,
    pub skills: SkillLedgerSnapshot,
    pub status: StatusSnapshot,
}
