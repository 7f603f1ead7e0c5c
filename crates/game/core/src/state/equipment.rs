//! Equipped gear.
//!
//! Six fixed capability slots plus a lazily computed aggregate of every
//! equipped item's stats. The aggregate lives in a [`OnceCell`] that is
//! replaced on every mutation, and each mutation also bumps a revision
//! counter that downstream caches key on. Reading a stale aggregate is
//! therefore impossible without going through `&mut self`.

use std::cell::OnceCell;

use strum::{EnumCount, IntoEnumIterator};

use crate::error::{ErrorSeverity, GameError};
use crate::state::item::{EquipmentSlot, Item};
use crate::stats::StatBlock;

/// Errors returned when equipping fails.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipError {
    /// Item declares a different slot (or none at all).
    #[error("item fits {actual:?}, not {expected}")]
    WrongSlot {
        expected: EquipmentSlot,
        actual: Option<EquipmentSlot>,
    },

    #[error("requires level {required}, current level is {current}")]
    LevelTooLow { required: u32, current: u32 },

    #[error("slot {0} is empty")]
    EmptySlot(EquipmentSlot),

    /// Item has no durability left.
    #[error("item '{0}' is broken")]
    Broken(String),
}

impl GameError for EquipError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            EquipError::WrongSlot { .. } | EquipError::EmptySlot(_) => ErrorSeverity::Validation,
            EquipError::LevelTooLow { .. } | EquipError::Broken(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            EquipError::WrongSlot { .. } => "EQUIP_WRONG_SLOT",
            EquipError::LevelTooLow { .. } => "EQUIP_LEVEL_TOO_LOW",
            EquipError::EmptySlot(_) => "EQUIP_EMPTY_SLOT",
            EquipError::Broken(_) => "EQUIP_BROKEN",
        }
    }
}

/// Result of wearing down an equipped item.
#[derive(Clone, Debug, PartialEq)]
pub enum DurabilityOutcome {
    /// Item has no durability and cannot wear out.
    Unbreakable,
    Intact { remaining: u32 },
    /// Durability hit zero; the item was removed from its slot.
    Broken(Item),
}

/// Equipment state for the player.
#[derive(Clone, Debug)]
pub struct Equipment {
    slots: [Option<Item>; EquipmentSlot::COUNT],
    revision: u64,
    bonuses: OnceCell<StatBlock>,
}

impl Equipment {
    /// Creates empty equipment.
    pub fn empty() -> Self {
        Self {
            slots: Default::default(),
            revision: 0,
            bonuses: OnceCell::new(),
        }
    }

    /// Monotonic counter bumped whenever the equipped set or any durability
    /// changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        self.slots[slot.as_index()].as_ref()
    }

    /// Iterates occupied slots in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (EquipmentSlot, &Item)> {
        EquipmentSlot::iter().filter_map(|slot| self.get(slot).map(|item| (slot, item)))
    }

    /// Equips a copy of `item` into `slot`, returning the previous occupant.
    pub fn equip(
        &mut self,
        item: &Item,
        slot: EquipmentSlot,
        player_level: u32,
    ) -> Result<Option<Item>, EquipError> {
        if item.slot != Some(slot) {
            return Err(EquipError::WrongSlot {
                expected: slot,
                actual: item.slot,
            });
        }
        if player_level < item.level_requirement {
            return Err(EquipError::LevelTooLow {
                required: item.level_requirement,
                current: player_level,
            });
        }
        if item.durability.is_some_and(|durability| durability.is_broken()) {
            return Err(EquipError::Broken(item.name.clone()));
        }

        let previous = self.slots[slot.as_index()].replace(item.clone().with_count(1));
        self.invalidate();
        tracing::debug!(%slot, item = %item.name, "equipped");
        Ok(previous)
    }

    /// Clears `slot`, returning the removed item if any.
    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<Item> {
        let removed = self.slots[slot.as_index()].take();
        if removed.is_some() {
            self.invalidate();
            tracing::debug!(%slot, "unequipped");
        }
        removed
    }

    /// Per-stat sum of every equipped item's `stats` and `bonus_stats`.
    ///
    /// Computed on first read after a mutation and cached until the next one.
    pub fn stat_bonuses(&self) -> &StatBlock {
        self.bonuses.get_or_init(|| {
            let mut total = StatBlock::new();
            for (_, item) in self.iter() {
                total.merge(&item.stats);
                total.merge(&item.bonus_stats);
            }
            total
        })
    }

    /// Wears down the item in `slot`. Reaching zero unequips it.
    pub fn damage_item(
        &mut self,
        slot: EquipmentSlot,
        amount: u32,
    ) -> Result<DurabilityOutcome, EquipError> {
        let item = self.slots[slot.as_index()]
            .as_mut()
            .ok_or(EquipError::EmptySlot(slot))?;
        let Some(durability) = item.durability.as_mut() else {
            return Ok(DurabilityOutcome::Unbreakable);
        };

        durability.current = durability.current.saturating_sub(amount);
        let remaining = durability.current;
        self.invalidate();

        if remaining > 0 {
            return Ok(DurabilityOutcome::Intact { remaining });
        }
        match self.slots[slot.as_index()].take() {
            Some(broken) => {
                tracing::warn!(%slot, item = %broken.name, "equipment broke");
                Ok(DurabilityOutcome::Broken(broken))
            }
            None => Err(EquipError::EmptySlot(slot)),
        }
    }

    /// Restores durability on the item in `slot`, capped at its maximum.
    ///
    /// Returns the new durability, or `None` for unbreakable items.
    pub fn repair_item(
        &mut self,
        slot: EquipmentSlot,
        amount: u32,
    ) -> Result<Option<u32>, EquipError> {
        let item = self.slots[slot.as_index()]
            .as_mut()
            .ok_or(EquipError::EmptySlot(slot))?;
        let Some(durability) = item.durability.as_mut() else {
            return Ok(None);
        };
        durability.current = durability.current.saturating_add(amount).min(durability.max);
        let current = durability.current;
        self.invalidate();
        Ok(Some(current))
    }

    fn invalidate(&mut self) {
        self.revision += 1;
        self.bonuses = OnceCell::new();
    }

    pub fn snapshot(&self) -> EquipmentSnapshot {
        EquipmentSnapshot {
            slots: self
                .iter()
                .map(|(slot, item)| (slot, item.clone()))
                .collect(),
        }
    }

    pub fn restore(snapshot: EquipmentSnapshot) -> Self {
        let mut equipment = Self::empty();
        for (slot, item) in snapshot.slots {
            equipment.slots[slot.as_index()] = Some(item);
        }
        equipment
    }
}

impl Default for Equipment {
    fn default() -> Self {
        Self::empty()
    }
}

/// Equality ignores the revision counter and the cache.
impl PartialEq for Equipment {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

/// Persisted equipment shape: a map from slot name to item.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentSnapshot {
    pub slots: std::collections::BTreeMap<EquipmentSlot, Item>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::item::Durability;
    use crate::stats::StatKind;

    fn helmet() -> Item {
        Item::equipment("iron_helmet", "Iron Helmet", EquipmentSlot::Helmet)
            .with_stats(StatBlock::new().with(StatKind::Defense, 3.0))
            .with_durability(2)
    }

    fn pickaxe() -> Item {
        Item::equipment("steel_pickaxe", "Steel Pickaxe", EquipmentSlot::Pickaxe)
            .with_stats(StatBlock::new().with(StatKind::MiningPower, 2.0))
            .with_bonus_stats(StatBlock::new().with(StatKind::MiningPower, 1.0))
            .with_level_requirement(3)
    }

    #[test]
    fn rejects_mismatched_slot() {
        let mut equipment = Equipment::empty();
        let result = equipment.equip(&helmet(), EquipmentSlot::Boots, 1);
        assert_eq!(
            result,
            Err(EquipError::WrongSlot {
                expected: EquipmentSlot::Boots,
                actual: Some(EquipmentSlot::Helmet)
            })
        );
        assert_eq!(equipment.revision(), 0);
    }

    #[test]
    fn rejects_item_with_no_durability_left() {
        let mut worn = helmet();
        worn.durability = Some(Durability { current: 0, max: 2 });
        let mut equipment = Equipment::empty();

        assert_eq!(
            equipment.equip(&worn, EquipmentSlot::Helmet, 1),
            Err(EquipError::Broken("Iron Helmet".into()))
        );
        assert!(equipment.get(EquipmentSlot::Helmet).is_none());
        assert_eq!(equipment.revision(), 0);
    }

    #[test]
    fn rejects_unmet_level_requirement() {
        let mut equipment = Equipment::empty();
        let result = equipment.equip(&pickaxe(), EquipmentSlot::Pickaxe, 2);
        assert_eq!(
            result,
            Err(EquipError::LevelTooLow {
                required: 3,
                current: 2
            })
        );
    }

    #[test]
    fn bonuses_include_enhancement_overlays() {
        let mut equipment = Equipment::empty();
        equipment.equip(&pickaxe(), EquipmentSlot::Pickaxe, 3).unwrap();
        equipment.equip(&helmet(), EquipmentSlot::Helmet, 3).unwrap();

        let bonuses = equipment.stat_bonuses();
        assert_eq!(bonuses.get(StatKind::MiningPower), 3.0);
        assert_eq!(bonuses.get(StatKind::Defense), 3.0);
    }

    #[test]
    fn equip_then_unequip_restores_prior_state() {
        let mut equipment = Equipment::empty();
        equipment.equip(&helmet(), EquipmentSlot::Helmet, 1).unwrap();
        let before = equipment.clone();
        let before_bonuses = equipment.stat_bonuses().clone();

        let previous = equipment.equip(&pickaxe(), EquipmentSlot::Pickaxe, 5).unwrap();
        assert!(previous.is_none());
        assert_ne!(equipment.stat_bonuses(), &before_bonuses);

        let removed = equipment.unequip(EquipmentSlot::Pickaxe);
        assert_eq!(removed.map(|item| item.id), Some("steel_pickaxe".to_string()));
        assert_eq!(equipment, before);
        assert_eq!(equipment.stat_bonuses(), &before_bonuses);
    }

    #[test]
    fn equip_returns_previous_occupant() {
        let mut equipment = Equipment::empty();
        equipment.equip(&helmet(), EquipmentSlot::Helmet, 1).unwrap();
        let previous = equipment.equip(&helmet(), EquipmentSlot::Helmet, 1).unwrap();
        assert_eq!(previous.map(|item| item.name), Some("Iron Helmet".to_string()));
    }

    #[test]
    fn breaking_unequips_and_refreshes_bonuses() {
        let mut equipment = Equipment::empty();
        equipment.equip(&helmet(), EquipmentSlot::Helmet, 1).unwrap();
        assert_eq!(equipment.stat_bonuses().get(StatKind::Defense), 3.0);

        assert_eq!(
            equipment.damage_item(EquipmentSlot::Helmet, 1),
            Ok(DurabilityOutcome::Intact { remaining: 1 })
        );
        let outcome = equipment.damage_item(EquipmentSlot::Helmet, 5).unwrap();
        assert!(matches!(outcome, DurabilityOutcome::Broken(ref item) if item.id == "iron_helmet"));
        assert!(equipment.get(EquipmentSlot::Helmet).is_none());
        assert_eq!(equipment.stat_bonuses().get(StatKind::Defense), 0.0);
    }

    #[test]
    fn repair_caps_at_maximum() {
        let mut equipment = Equipment::empty();
        equipment.equip(&helmet(), EquipmentSlot::Helmet, 1).unwrap();
        equipment.damage_item(EquipmentSlot::Helmet, 1).unwrap();

        assert_eq!(equipment.repair_item(EquipmentSlot::Helmet, 10), Ok(Some(2)));
        assert_eq!(
            equipment.damage_item(EquipmentSlot::Pickaxe, 1),
            Err(EquipError::EmptySlot(EquipmentSlot::Pickaxe))
        );
    }

    #[test]
    fn unbreakable_items_ignore_damage() {
        let mut equipment = Equipment::empty();
        equipment.equip(&pickaxe(), EquipmentSlot::Pickaxe, 3).unwrap();
        assert_eq!(
            equipment.damage_item(EquipmentSlot::Pickaxe, 100),
            Ok(DurabilityOutcome::Unbreakable)
        );
    }
}
