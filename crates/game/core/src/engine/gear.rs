use super::{GameEngine, GearError};
use crate::events::GameEvent;
use crate::state::{DurabilityOutcome, EquipError, EquipmentSlot, InventoryError, Item};

impl GameEngine {
    /// Equips a copy of `item` into `slot`, returning the previous occupant.
    pub fn equip(&mut self, item: &Item, slot: EquipmentSlot) -> Result<Option<Item>, EquipError> {
        let level = self.player.progression.level();
        let previous = self.player.equipment.equip(item, slot, level)?;
        self.clamp_health();
        Ok(previous)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<Item> {
        let removed = self.player.equipment.unequip(slot);
        if removed.is_some() {
            self.clamp_health();
        }
        removed
    }

    /// Equips one unit from inventory slot `index` into the item's own slot.
    ///
    /// The previous occupant, if any, goes back into the inventory. Nothing
    /// changes unless the whole swap succeeds.
    pub fn equip_from_inventory(&mut self, index: usize) -> Result<(), GearError> {
        let item = self
            .player
            .inventory
            .get(index)
            .cloned()
            .ok_or(InventoryError::EmptySlot(index))?;
        let slot = item
            .slot
            .ok_or_else(|| GearError::NotEquipment(item.name.clone()))?;

        let frees_a_slot = item.count == 1;
        if self.player.equipment.get(slot).is_some()
            && !frees_a_slot
            && self.player.inventory.is_full()
        {
            return Err(InventoryError::Full {
                placed: 0,
                rejected: 1,
            }
            .into());
        }

        let level = self.player.progression.level();
        let previous = self.player.equipment.equip(&item, slot, level)?;
        self.player.inventory.remove_item(index, 1)?;
        if let Some(previous) = previous {
            self.player.inventory.add_item(&previous, 1)?;
        }
        self.clamp_health();
        Ok(())
    }

    /// Moves the item in `slot` into the inventory.
    ///
    /// A full inventory leaves the item equipped.
    pub fn unequip_to_inventory(&mut self, slot: EquipmentSlot) -> Result<Item, GearError> {
        let item = self
            .player
            .equipment
            .get(slot)
            .cloned()
            .ok_or(EquipError::EmptySlot(slot))?;
        self.player.inventory.add_item(&item, 1)?;
        self.player.equipment.unequip(slot);
        self.clamp_health();
        Ok(item)
    }

    /// Wears down the item in `slot`; a break unequips it and emits `ItemBroken`.
    pub fn damage_equipment(
        &mut self,
        slot: EquipmentSlot,
        amount: u32,
    ) -> Result<DurabilityOutcome, EquipError> {
        let outcome = self.player.equipment.damage_item(slot, amount)?;
        if let DurabilityOutcome::Broken(item) = &outcome {
            let item = item.name.clone();
            self.clamp_health();
            self.emit(GameEvent::ItemBroken { slot, item });
        }
        Ok(outcome)
    }

    pub fn repair_equipment(
        &mut self,
        slot: EquipmentSlot,
        amount: u32,
    ) -> Result<Option<u32>, EquipError> {
        self.player.equipment.repair_item(slot, amount)
    }

    /// Adds `count` units of `item` to the inventory (non-atomic, see
    /// [`crate::state::Inventory::add_item`]).
    pub fn add_item(&mut self, item: &Item, count: u32) -> Result<(), InventoryError> {
        self.player.inventory.add_item(item, count)
    }
}
