/// Inventory snapshot
///
/// The agent's 36 storage slots plus the off-hand, as observed on one tick.
/// Slots 0-8 are the hotbar, 9-35 the main inventory.

use serde::{Deserialize, Serialize};

use crate::types::{ItemId, ItemStack};

/// Number of storage slots, hotbar included
pub const INVENTORY_SIZE: usize = 36;
/// Number of hotbar slots
pub const HOTBAR_SIZE: usize = 9;
/// Hotbar slot kept for the best tool
pub const TOOL_HOTBAR_SLOT: usize = 0;
/// Hotbar slot kept for throwaway blocks
pub const THROWAWAY_HOTBAR_SLOT: usize = 8;

/// Inventory snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    /// Storage slots, `None` when empty
    slots: Vec<Option<ItemStack>>,
    /// Off-hand slot
    #[serde(default)]
    offhand: Option<ItemStack>,
    /// Active hotbar slot
    #[serde(default)]
    selected: usize,
}

impl Inventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Self {
            slots: vec![None; INVENTORY_SIZE],
            offhand: None,
            selected: 0,
        }
    }

    /// Whether `slot` is a hotbar index
    pub fn is_hotbar(slot: usize) -> bool {
        slot < HOTBAR_SIZE
    }

    /// Get item at slot
    pub fn get_slot(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot)?.as_ref()
    }

    /// Set item at slot
    pub fn set_slot(&mut self, slot: usize, item: Option<ItemStack>) {
        if slot < self.slots.len() {
            self.slots[slot] = item;
        }
    }

    pub fn is_empty_slot(&self, slot: usize) -> bool {
        self.get_slot(slot).is_none()
    }

    pub fn offhand(&self) -> Option<&ItemStack> {
        self.offhand.as_ref()
    }

    pub fn set_offhand(&mut self, item: Option<ItemStack>) {
        self.offhand = item;
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Make a hotbar slot active; out-of-range indices are ignored
    pub fn select(&mut self, slot: usize) {
        if Self::is_hotbar(slot) {
            self.selected = slot;
        }
    }

    /// Item in the main hand
    pub fn held(&self) -> Option<&ItemStack> {
        self.get_slot(self.selected)
    }

    /// Exchange a storage slot with a hotbar slot
    pub fn swap_with_hotbar(&mut self, slot: usize, hotbar: usize) {
        if slot < self.slots.len() && Self::is_hotbar(hotbar) {
            self.slots.swap(slot, hotbar);
        }
    }

    /// Iterate `(index, item)` over every storage slot
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<&ItemStack>)> {
        self.slots.iter().map(Option::as_ref).enumerate()
    }

    /// Clear all slots
    pub fn clear(&mut self) {
        self.slots = vec![None; INVENTORY_SIZE];
        self.offhand = None;
    }

    /// Find the first slot holding `id`
    pub fn find_by_id(&self, id: &ItemId) -> Option<usize> {
        self.iter()
            .find(|(_, item)| item.map_or(false, |stack| stack.is(id)))
            .map(|(i, _)| i)
    }

    /// Fix up a deserialized snapshot that has the wrong slot count
    pub fn normalized(mut self) -> Self {
        self.slots.resize(INVENTORY_SIZE, None);
        if !Self::is_hotbar(self.selected) {
            self.selected = 0;
        }
        self
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}
