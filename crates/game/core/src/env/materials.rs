use strum::{Display, EnumString};

use crate::state::Item;

pub trait MaterialOracle: Send + Sync {
    fn material(&self, id: &str) -> Option<&MaterialDefinition>;
}

/// Special properties a material can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MaterialTrait {
    Magical,
    /// Emits a rare-find event when mined.
    Rare,
    /// Emits a legendary-find event when mined.
    Legendary,
    /// Curses the miner.
    Cursed,
    Slippery,
}

/// Static description of a minable material.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaterialDefinition {
    pub id: String,
    pub name: String,
    /// Minimum resolved mining power needed to mine it at all.
    pub hardness: f64,
    pub value: u32,
    pub base_mining_time_ms: u32,
    /// Experience granted per unit mined.
    #[cfg_attr(feature = "serde", serde(default))]
    pub experience: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub traits: Vec<MaterialTrait>,
}

impl MaterialDefinition {
    pub fn new(id: impl Into<String>, hardness: f64, value: u32, base_mining_time_ms: u32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            hardness,
            value,
            base_mining_time_ms,
            experience: 0,
            traits: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_experience(mut self, experience: u64) -> Self {
        self.experience = experience;
        self
    }

    pub fn with_trait(mut self, material_trait: MaterialTrait) -> Self {
        self.traits.push(material_trait);
        self
    }

    pub fn has(&self, material_trait: MaterialTrait) -> bool {
        self.traits.contains(&material_trait)
    }

    /// One unit of this material as an inventory resource.
    pub fn to_item(&self) -> Item {
        Item::resource(self.id.as_str(), self.name.as_str(), self.value)
    }
}
