use tracing::debug;

use super::agent::Agent;
use crate::inventory::Inventory;
use crate::state::SwapRequest;
use crate::types::{ItemStack, Material, ToolProfile};

/// In-process agent backed by a plain inventory snapshot.
///
/// Drives the binary's simulation loop and serves as the test double.
/// Every executed swap is recorded so callers can inspect what moved.
#[derive(Debug, Clone)]
pub struct SimAgent {
    inventory: Inventory,
    /// Whether the agent is standing still
    stationary: bool,
    /// Whether a secondary screen is open
    container_open: bool,
    /// Swaps performed, oldest first
    swaps: Vec<SwapRequest>,
}

impl SimAgent {
    /// Create a stationary agent with no screen open
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inventory,
            stationary: true,
            container_open: false,
            swaps: Vec::new(),
        }
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn set_stationary(&mut self, stationary: bool) {
        self.stationary = stationary;
    }

    pub fn set_container_open(&mut self, open: bool) {
        self.container_open = open;
    }

    /// Swaps performed so far
    pub fn swaps(&self) -> &[SwapRequest] {
        &self.swaps
    }
}

impl Default for SimAgent {
    fn default() -> Self {
        Self::new(Inventory::new())
    }
}

impl Agent for SimAgent {
    fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    fn select_hotbar_slot(&mut self, slot: usize) {
        self.inventory.select(slot);
    }

    fn swap_with_hotbar(&mut self, slot: usize, hotbar: usize) {
        debug!("[Sim] swap slot {} <-> hotbar {}", slot, hotbar);
        self.inventory.swap_with_hotbar(slot, hotbar);
        self.swaps.push(SwapRequest::new(slot, hotbar));
    }

    fn stationary_for_inventory_move(&self) -> bool {
        self.stationary
    }

    fn has_open_container(&self) -> bool {
        self.container_open
    }
}

/// Starting loadout for the simulation: blocks and tools scattered in main inventory
pub fn demo_inventory() -> Inventory {
    let mut inventory = Inventory::new();
    let stone = || vec![Material::new("stone"), Material::new("cobblestone")];

    inventory.set_slot(0, Some(ItemStack::new("bread", 12)));
    inventory.set_slot(
        3,
        Some(ItemStack::tool(
            "stone_pickaxe",
            131,
            ToolProfile { speed: 4.0, effective_on: stone(), efficiency: 0 },
        )),
    );
    inventory.set_slot(14, Some(ItemStack::block("cobblestone", 64)));
    inventory.set_slot(
        22,
        Some(ItemStack::tool(
            "iron_pickaxe",
            250,
            ToolProfile { speed: 6.0, effective_on: stone(), efficiency: 3 },
        )),
    );
    inventory.set_slot(
        27,
        Some(
            ItemStack::tool(
                "diamond_pickaxe",
                1561,
                ToolProfile { speed: 8.0, effective_on: stone(), efficiency: 5 },
            )
            .with_damage(1555),
        ),
    );
    inventory
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::inventory::{best_tool_against, first_valid_throwaway};

    #[test]
    fn test_demo_loadout_needs_both_moves() {
        let inventory = demo_inventory();
        let settings = Settings {
            item_saver: true,
            ..Settings::default()
        };

        assert_eq!(first_valid_throwaway(&inventory, &settings), Some(14));
        // the diamond pick is nearly broken
        assert_eq!(best_tool_against(&inventory, &Material::new("stone"), &settings), Some(22));
        assert_eq!(best_tool_against(&inventory, &Material::new("stone"), &Settings::default()), Some(27));
    }

    #[test]
    fn test_records_swaps() {
        let mut agent = SimAgent::new(demo_inventory());
        agent.swap_with_hotbar(14, 8);
        assert_eq!(agent.swaps(), &[SwapRequest::new(14, 8)]);
        assert_eq!(agent.inventory().get_slot(8).unwrap().id.as_str(), "cobblestone");
        assert!(agent.stationary_for_inventory_move());
        assert!(!agent.has_open_container());
    }
}
