//! Domain events emitted by the engine.

use strum::{Display, EnumDiscriminants, EnumIter};

use crate::combat::LootDrop;
use crate::state::{EquipmentSlot, StatusEffectKind};

/// Outward-facing notifications for UI and audio layers.
#[derive(Clone, Debug, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(EventKind))]
#[strum_discriminants(derive(Hash, Display, EnumIter))]
#[strum_discriminants(strum(serialize_all = "snake_case"))]
#[cfg_attr(feature = "serde", strum_discriminants(derive(serde::Serialize, serde::Deserialize)))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    MaterialMined {
        material: String,
        experience: u64,
    },
    RareFind {
        material: String,
    },
    LegendaryFind {
        material: String,
    },
    LevelUp {
        level: u32,
        levels_gained: u32,
    },
    SkillUnlocked {
        skill: String,
        tree: String,
        level: u32,
    },
    SkillsReset {
        refunded: u32,
    },
    ItemBroken {
        slot: EquipmentSlot,
        item: String,
    },
    StatusApplied {
        kind: StatusEffectKind,
        duration_ms: u32,
        magnitude: f64,
    },
    StatusExpired {
        kind: StatusEffectKind,
    },
    EnemyDefeated {
        enemy: String,
        experience: u64,
        loot: Vec<LootDrop>,
    },
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        EventKind::from(self)
    }
}
