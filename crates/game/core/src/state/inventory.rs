//! Slotted, stack-aware item container.
//!
//! The inventory is a fixed-length array of optional stacks. Stack counts
//! never exceed [`GameConfig::MAX_STACK`]; empty slots are `None`.

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::item::Item;

/// Errors returned by inventory operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryError {
    /// No empty slot was left for the remaining units.
    ///
    /// Units placed before the inventory filled up stay placed.
    #[error("inventory full: placed {placed}, rejected {rejected}")]
    Full { placed: u32, rejected: u32 },

    #[error("slot {0} does not exist")]
    InvalidSlot(usize),

    #[error("slot {0} is empty")]
    EmptySlot(usize),

    #[error("count must be greater than zero")]
    ZeroCount,

    /// Split amount must leave at least one unit behind.
    #[error("cannot split {requested} from a stack of {available}")]
    InsufficientCount { requested: u32, available: u32 },

    #[error("slot {0} holds an incompatible item")]
    SlotOccupied(usize),

    #[error("stack in slot {0} has no room for the split")]
    StackOverflow(usize),
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        use InventoryError::*;
        match self {
            Full { .. } | SlotOccupied(_) | StackOverflow(_) => ErrorSeverity::Recoverable,
            InvalidSlot(_) | EmptySlot(_) | ZeroCount | InsufficientCount { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use InventoryError::*;
        match self {
            Full { .. } => "INVENTORY_FULL",
            InvalidSlot(_) => "INVENTORY_INVALID_SLOT",
            EmptySlot(_) => "INVENTORY_EMPTY_SLOT",
            ZeroCount => "INVENTORY_ZERO_COUNT",
            InsufficientCount { .. } => "INVENTORY_INSUFFICIENT_COUNT",
            SlotOccupied(_) => "INVENTORY_SLOT_OCCUPIED",
            StackOverflow(_) => "INVENTORY_STACK_OVERFLOW",
        }
    }
}

/// Player inventory.
#[derive(Clone, Debug, PartialEq)]
pub struct Inventory {
    slots: Vec<Option<Item>>,
    revision: u64,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            revision: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Monotonic counter bumped on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Iterates `(slot index, item)` over occupied slots.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Item)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|item| (index, item)))
    }

    pub fn free_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    pub fn is_full(&self) -> bool {
        self.free_slots() == 0
    }

    /// Total units across all stacks named `name`.
    pub fn total_count(&self, name: &str) -> u32 {
        self.iter()
            .filter(|(_, item)| item.name == name)
            .map(|(_, item)| item.count)
            .sum()
    }

    /// Adds `count` units of `item`.
    ///
    /// Existing compatible stacks are topped up first, in slot order; the rest
    /// goes into empty slots one stack at a time. The operation is not atomic:
    /// when the empty slots run out the units already placed are kept and the
    /// error reports how many were placed and how many were rejected.
    pub fn add_item(&mut self, item: &Item, count: u32) -> Result<(), InventoryError> {
        if count == 0 {
            return Err(InventoryError::ZeroCount);
        }
        let mut remaining = count;

        if item.is_stackable() {
            for stack in self.slots.iter_mut().flatten() {
                if remaining == 0 {
                    break;
                }
                if !stack.stacks_with(item) || stack.count >= GameConfig::MAX_STACK {
                    continue;
                }
                let moved = remaining.min(GameConfig::MAX_STACK - stack.count);
                stack.count += moved;
                remaining -= moved;
            }
        }

        let per_slot = if item.is_stackable() {
            GameConfig::MAX_STACK
        } else {
            1
        };
        while remaining > 0 {
            let Some(empty) = self.slots.iter_mut().find(|slot| slot.is_none()) else {
                break;
            };
            let placed = remaining.min(per_slot);
            *empty = Some(item.clone().with_count(placed));
            remaining -= placed;
        }

        if remaining != count {
            self.revision += 1;
        }
        if remaining > 0 {
            tracing::debug!(
                item = %item.name,
                placed = count - remaining,
                rejected = remaining,
                "inventory full"
            );
            return Err(InventoryError::Full {
                placed: count - remaining,
                rejected: remaining,
            });
        }
        Ok(())
    }

    /// Removes up to `count` units from slot `index` and returns them.
    ///
    /// Requests larger than the stack clear the slot.
    pub fn remove_item(&mut self, index: usize, count: u32) -> Result<Item, InventoryError> {
        if count == 0 {
            return Err(InventoryError::ZeroCount);
        }
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(InventoryError::InvalidSlot(index))?;
        let stack = slot.as_mut().ok_or(InventoryError::EmptySlot(index))?;

        let removed = if count >= stack.count {
            slot.take().ok_or(InventoryError::EmptySlot(index))?
        } else {
            stack.count -= count;
            stack.clone().with_count(count)
        };
        self.revision += 1;
        Ok(removed)
    }

    /// Moves the stack in `from` onto `to`.
    ///
    /// Compatible stacks merge, with any overflow past the stack cap staying
    /// in `from`; anything else swaps the two slots.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), InventoryError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if self.slots[from].is_none() {
            return Err(InventoryError::EmptySlot(from));
        }
        if from == to {
            return Ok(());
        }

        let mergeable = match (&self.slots[from], &self.slots[to]) {
            (Some(source), Some(target)) => source.stacks_with(target),
            _ => false,
        };

        if mergeable {
            let source_count = self.slots[from].as_ref().map_or(0, |item| item.count);
            let target_count = self.slots[to].as_ref().map_or(0, |item| item.count);
            let moved = source_count.min(GameConfig::MAX_STACK.saturating_sub(target_count));
            if let Some(target) = self.slots[to].as_mut() {
                target.count += moved;
            }
            if moved == source_count {
                self.slots[from] = None;
            } else if let Some(source) = self.slots[from].as_mut() {
                source.count -= moved;
            }
        } else {
            self.slots.swap(from, to);
        }
        self.revision += 1;
        Ok(())
    }

    /// Carves `amount` units out of `from` into `to`.
    ///
    /// `from` must keep at least one unit. `to` may be empty or hold a
    /// compatible stack with enough headroom.
    pub fn split_item(
        &mut self,
        from: usize,
        to: usize,
        amount: u32,
    ) -> Result<(), InventoryError> {
        if amount == 0 {
            return Err(InventoryError::ZeroCount);
        }
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Err(InventoryError::SlotOccupied(to));
        }
        let source = self.slots[from]
            .clone()
            .ok_or(InventoryError::EmptySlot(from))?;
        if source.count <= amount {
            return Err(InventoryError::InsufficientCount {
                requested: amount,
                available: source.count,
            });
        }

        let target_count = match &self.slots[to] {
            None => None,
            Some(target) if target.stacks_with(&source) => Some(target.count),
            Some(_) => return Err(InventoryError::SlotOccupied(to)),
        };
        match target_count {
            None => self.slots[to] = Some(source.with_count(amount)),
            Some(count) => {
                if count + amount > GameConfig::MAX_STACK {
                    return Err(InventoryError::StackOverflow(to));
                }
                if let Some(target) = self.slots[to].as_mut() {
                    target.count += amount;
                }
            }
        }

        if let Some(source) = self.slots[from].as_mut() {
            source.count -= amount;
        }
        self.revision += 1;
        Ok(())
    }

    /// Re-packs every stack to the front ordered by type priority, then name,
    /// then value descending. The sort is stable.
    pub fn sort_items(&mut self) {
        let mut items: Vec<Item> = self.slots.iter_mut().filter_map(Option::take).collect();
        items.sort_by(|a, b| {
            a.item_type
                .sort_priority()
                .cmp(&b.item_type.sort_priority())
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| b.value.cmp(&a.value))
        });
        for (slot, item) in self.slots.iter_mut().zip(items) {
            *slot = Some(item);
        }
        self.revision += 1;
    }

    fn check_index(&self, index: usize) -> Result<(), InventoryError> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(InventoryError::InvalidSlot(index))
        }
    }

    pub fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            slots: self.slots.clone(),
        }
    }

    pub fn restore(snapshot: InventorySnapshot) -> Self {
        Self {
            slots: snapshot.slots,
            revision: 0,
        }
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(GameConfig::DEFAULT_INVENTORY_SLOTS)
    }
}

/// Persisted inventory shape: one entry per slot, `null` when empty.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventorySnapshot {
    pub slots: Vec<Option<Item>>,
}
