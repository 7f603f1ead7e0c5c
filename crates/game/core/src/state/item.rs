//! Item instances held in inventories and equipment slots.
//!
//! Items are plain values: creating one clones whatever static template it
//! came from, so mutating durability on an equipped pickaxe never touches the
//! catalog entry it was built from.

use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

use crate::stats::StatBlock;

/// Broad item category; drives stacking and sort order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemType {
    Resource,
    Equipment,
    Consumable,
    Quest,
    Misc,
}

impl ItemType {
    /// Inventory sort priority; lower sorts first.
    pub const fn sort_priority(self) -> u8 {
        match self {
            Self::Equipment => 0,
            Self::Consumable => 1,
            Self::Resource => 2,
            Self::Misc => 3,
            Self::Quest => 4,
        }
    }
}

/// The six capability slots a character can fill.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EquipmentSlot {
    Helmet,
    Armor,
    Boots,
    Pickaxe,
    Gloves,
    Amulet,
}

impl EquipmentSlot {
    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }
}

/// Visual key for the rendering layer.
///
/// Resolved once when the item is built instead of being re-derived from
/// optional fields at every draw call.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemVisual {
    Sprite(String),
    Generic,
}

impl ItemVisual {
    fn resolve(slot: Option<EquipmentSlot>, material: Option<&str>) -> Self {
        match (slot, material) {
            (Some(slot), _) => Self::Sprite(<&'static str>::from(slot).to_owned()),
            (None, Some(material)) => Self::Sprite(material.to_owned()),
            (None, None) => Self::Generic,
        }
    }

    pub fn sprite_key(&self) -> Option<&str> {
        match self {
            Self::Sprite(key) => Some(key),
            Self::Generic => None,
        }
    }
}

/// Remaining uses before an equipped item breaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Durability {
    pub current: u32,
    pub max: u32,
}

impl Durability {
    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    pub const fn is_broken(&self) -> bool {
        self.current == 0
    }
}

/// A stack of one logical item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: String,
    pub name: String,
    pub item_type: ItemType,
    pub material: Option<String>,
    pub count: u32,
    pub value: u32,
    pub durability: Option<Durability>,
    pub stats: StatBlock,
    /// Enhancement overlays stacked on top of `stats`.
    pub bonus_stats: StatBlock,
    pub slot: Option<EquipmentSlot>,
    pub level_requirement: u32,
    pub visual: ItemVisual,
}

impl Item {
    /// Creates a plain item of `item_type` with a count of one.
    pub fn new(id: impl Into<String>, name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            item_type,
            material: None,
            count: 1,
            value: 0,
            durability: None,
            stats: StatBlock::new(),
            bonus_stats: StatBlock::new(),
            slot: None,
            level_requirement: 0,
            visual: ItemVisual::Generic,
        }
    }

    /// Creates a single resource unit of `material`.
    pub fn resource(material: impl Into<String>, name: impl Into<String>, value: u32) -> Self {
        let material = material.into();
        Self::new(material.clone(), name, ItemType::Resource)
            .with_value(value)
            .with_material(material)
    }

    /// Creates an equipment piece for `slot`.
    pub fn equipment(id: impl Into<String>, name: impl Into<String>, slot: EquipmentSlot) -> Self {
        Self::new(id, name, ItemType::Equipment).with_slot(slot)
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_value(mut self, value: u32) -> Self {
        self.value = value;
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self.visual = ItemVisual::resolve(self.slot, self.material.as_deref());
        self
    }

    pub fn with_slot(mut self, slot: EquipmentSlot) -> Self {
        self.slot = Some(slot);
        self.visual = ItemVisual::resolve(self.slot, self.material.as_deref());
        self
    }

    pub fn with_durability(mut self, max: u32) -> Self {
        self.durability = Some(Durability::full(max));
        self
    }

    pub fn with_stats(mut self, stats: StatBlock) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_bonus_stats(mut self, bonus_stats: StatBlock) -> Self {
        self.bonus_stats = bonus_stats;
        self
    }

    pub fn with_level_requirement(mut self, level: u32) -> Self {
        self.level_requirement = level;
        self
    }

    /// Items with durability are unique instances and never stack.
    pub fn is_stackable(&self) -> bool {
        self.durability.is_none()
    }

    /// Two stacks merge iff both are stackable and agree on type, material,
    /// name and value.
    pub fn stacks_with(&self, other: &Item) -> bool {
        self.is_stackable()
            && other.is_stackable()
            && self.item_type == other.item_type
            && self.material == other.material
            && self.name == other.name
            && self.value == other.value
    }

    /// Combined `stats` and `bonus_stats`.
    pub fn total_stats(&self) -> StatBlock {
        let mut total = self.stats.clone();
        total.merge(&self.bonus_stats);
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visual_key_prefers_slot_then_material() {
        let pick = Item::equipment("iron_pickaxe", "Iron Pickaxe", EquipmentSlot::Pickaxe)
            .with_material("iron");
        assert_eq!(pick.visual, ItemVisual::Sprite("pickaxe".into()));

        let ore = Item::resource("copper", "Copper Ore", 5);
        assert_eq!(ore.visual.sprite_key(), Some("copper"));

        let note = Item::new("note", "Torn Note", ItemType::Quest);
        assert_eq!(note.visual, ItemVisual::Generic);
    }

    #[test]
    fn durability_blocks_stacking() {
        let a = Item::resource("coal", "Coal", 2);
        let b = Item::resource("coal", "Coal", 2).with_durability(10);
        assert!(a.stacks_with(&a.clone()));
        assert!(!a.stacks_with(&b));
        assert!(!b.stacks_with(&b.clone()));
    }

    #[test]
    fn differing_value_blocks_stacking() {
        let a = Item::resource("coal", "Coal", 2);
        let b = Item::resource("coal", "Coal", 3);
        assert!(!a.stacks_with(&b));
    }
}
