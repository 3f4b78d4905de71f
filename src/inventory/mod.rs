pub mod controller;
pub mod hotbar;
pub mod manager;
pub mod throwaway;
pub mod tools;

pub use controller::InventoryController;
pub use hotbar::{temp_hotbar_slot, TEMP_HOTBAR_SLOTS};
pub use manager::{Inventory, HOTBAR_SIZE, INVENTORY_SIZE, THROWAWAY_HOTBAR_SLOT, TOOL_HOTBAR_SLOT};
pub use throwaway::first_valid_throwaway;
pub use tools::{best_tool_against, mining_speed, too_damaged};
