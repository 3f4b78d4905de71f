use rand::Rng;
use tracing::debug;

use crate::bot::{Agent, PlacementOracle};
use crate::config::Settings;
use crate::inventory::controller::InventoryController;
use crate::inventory::{Inventory, HOTBAR_SIZE, INVENTORY_SIZE, THROWAWAY_HOTBAR_SLOT};
use crate::types::{BlockPos, ItemStack};

/// Lowest slot (0-35) holding an acceptable throwaway item
pub fn first_valid_throwaway(inventory: &Inventory, settings: &Settings) -> Option<usize> {
    inventory
        .iter()
        .find(|(_, item)| {
            item.map_or(false, |stack| settings.acceptable_throwaway_items.contains(&stack.id))
        })
        .map(|(i, _)| i)
}

/// Hotbar slot that does nothing on right click, so the off-hand item gets used.
///
/// Empty slots win over tools.
fn inert_hotbar_slot(inventory: &Inventory) -> Option<usize> {
    (0..HOTBAR_SIZE)
        .find(|&i| inventory.is_empty_slot(i))
        .or_else(|| (0..HOTBAR_SIZE).find(|&i| inventory.get_slot(i).map_or(false, ItemStack::is_tool)))
}

fn stack_matches<F>(item: Option<&ItemStack>, desired: &F) -> bool
where
    F: Fn(&ItemStack) -> bool,
{
    item.map_or(false, desired)
}

impl<R: Rng> InventoryController<R> {
    /// Find a reachable item matching `desired`, main inventory allowed per settings
    pub fn throwaway<A, F>(&mut self, agent: &mut A, settings: &Settings, select: bool, desired: F) -> bool
    where
        A: Agent,
        F: Fn(&ItemStack) -> bool,
    {
        self.throwaway_with(agent, settings, select, desired, settings.allow_inventory)
    }

    /// Find a reachable item matching `desired` and optionally put it in hand.
    ///
    /// Looks at the hotbar, then the off-hand, then (if `allow_inventory`)
    /// the main inventory. A main inventory match is swapped into hotbar 8;
    /// that swap may be deferred, but the search still reports success.
    pub fn throwaway_with<A, F>(
        &mut self,
        agent: &mut A,
        settings: &Settings,
        select: bool,
        desired: F,
        allow_inventory: bool,
    ) -> bool
    where
        A: Agent,
        F: Fn(&ItemStack) -> bool,
    {
        let inventory = agent.inventory();

        if let Some(slot) = (0..HOTBAR_SIZE).find(|&i| stack_matches(inventory.get_slot(i), &desired)) {
            if select {
                agent.select_hotbar_slot(slot);
            }
            return true;
        }

        if stack_matches(inventory.offhand(), &desired) {
            // main hand takes precedence over off hand, so hold something that
            // won't act on the block: nothing, or a tool
            if let Some(slot) = inert_hotbar_slot(inventory) {
                if select {
                    agent.select_hotbar_slot(slot);
                }
                return true;
            }
        }

        if allow_inventory {
            if let Some(slot) = (HOTBAR_SIZE..INVENTORY_SIZE).find(|&i| stack_matches(inventory.get_slot(i), &desired)) {
                if select {
                    if !self.request_swap_with_hotbar(agent, settings, slot, THROWAWAY_HOTBAR_SLOT) {
                        debug!("Throwaway in slot {} waits for the hotbar", slot);
                    }
                    agent.select_hotbar_slot(THROWAWAY_HOTBAR_SLOT);
                }
                return true;
            }
        }

        false
    }

    /// Whether any acceptable throwaway item can be reached
    pub fn has_generic_throwaway<A: Agent>(&mut self, agent: &mut A, settings: &Settings) -> bool {
        settings
            .acceptable_throwaway_items
            .iter()
            .any(|item| self.throwaway(agent, settings, false, |stack| stack.is(item)))
    }

    /// Pick the block to place at `pos`.
    ///
    /// Prefers an item whose placed state is exactly what the world wants
    /// there, then one placing the same block kind, then the acceptable
    /// throwaway items in configured order.
    pub fn select_throwaway_for_location<A, O>(
        &mut self,
        agent: &mut A,
        settings: &Settings,
        oracle: &O,
        select: bool,
        pos: BlockPos,
    ) -> bool
    where
        A: Agent,
        O: PlacementOracle,
    {
        let wanted = oracle.place_at(pos, &oracle.state_at(pos));
        if let Some(wanted) = wanted.as_ref() {
            let exact = |stack: &ItemStack| {
                stack
                    .places
                    .as_ref()
                    .map_or(false, |block| oracle.state_for_placement(block, pos) == *wanted)
            };
            if self.throwaway(agent, settings, select, exact) {
                return true;
            }

            let same_block = |stack: &ItemStack| stack.places.as_ref() == Some(&wanted.block);
            if self.throwaway(agent, settings, select, same_block) {
                return true;
            }
        }

        for item in &settings.acceptable_throwaway_items {
            if self.throwaway(agent, settings, select, |stack| stack.is(item)) {
                return true;
            }
        }
        false
    }
}
