use crate::state::{EquipmentSlot, Item};
use crate::stats::StatBlock;

pub trait EquipmentOracle: Send + Sync {
    fn template(&self, id: &str) -> Option<&EquipmentTemplate>;
}

/// Catalog entry for a piece of gear.
///
/// Equipped items are clones built by [`EquipmentTemplate::instantiate`];
/// wear on an instance never reaches the catalog.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentTemplate {
    pub id: String,
    pub name: String,
    pub slot: EquipmentSlot,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: StatBlock,
    /// `None` for gear that never wears out.
    #[cfg_attr(feature = "serde", serde(default))]
    pub durability: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub level_requirement: u32,
}

impl EquipmentTemplate {
    pub fn new(id: impl Into<String>, slot: EquipmentSlot) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            slot,
            stats: StatBlock::new(),
            durability: None,
            value: 0,
            level_requirement: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_stats(mut self, stats: StatBlock) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_durability(mut self, max: u32) -> Self {
        self.durability = Some(max);
        self
    }

    pub fn with_value(mut self, value: u32) -> Self {
        self.value = value;
        self
    }

    pub fn with_level_requirement(mut self, level: u32) -> Self {
        self.level_requirement = level;
        self
    }

    /// A fresh, fully repaired item built from this template.
    pub fn instantiate(&self) -> Item {
        let item = Item::equipment(self.id.as_str(), self.name.as_str(), self.slot)
            .with_stats(self.stats.clone())
            .with_value(self.value)
            .with_level_requirement(self.level_requirement);
        match self.durability {
            Some(max) => item.with_durability(max),
            None => item,
        }
    }
}
