//! hotbar_keeper
//!
//! Inventory and hotbar management for an autonomous block-game agent.
//! Each tick the controller keeps a throwaway block and the best tool within
//! reach, moving items through a throttled swap that survives across ticks.

pub mod bot;
pub mod config;
pub mod control;
pub mod inventory;
pub mod logging;
pub mod state;
pub mod types;

pub use bot::{Agent, PlacementOracle, SimAgent};
pub use config::{Settings, SettingsStore};
pub use inventory::{Inventory, InventoryController};
pub use state::{MoveState, SwapRequest};
pub use types::{BlockKind, BlockPos, BlockState, ItemId, ItemStack, Material, ToolProfile};
