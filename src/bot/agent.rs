use crate::inventory::Inventory;
use crate::types::{BlockKind, BlockPos, BlockState};

/// The player-side collaborator the inventory controller acts through.
///
/// `swap_with_hotbar` is the only call that rearranges items. It must be
/// atomic; the controller calls it at most once per tick.
pub trait Agent {
    /// Inventory snapshot for the current tick
    fn inventory(&self) -> &Inventory;

    /// Make a hotbar slot the active one
    fn select_hotbar_slot(&mut self, slot: usize);

    /// Swap storage slot `slot` (0-35) with hotbar slot `hotbar` (0-8)
    fn swap_with_hotbar(&mut self, slot: usize, hotbar: usize);

    /// Whether the agent has stopped moving enough to rearrange items
    fn stationary_for_inventory_move(&self) -> bool;

    /// True while a chest, crafting table or other secondary screen is open
    fn has_open_container(&self) -> bool;
}

/// World knowledge needed for placement-aware throwaway selection
pub trait PlacementOracle {
    /// State currently at `pos`
    fn state_at(&self, pos: BlockPos) -> BlockState;

    /// State the agent wants at `pos` given what is there now, if any
    fn place_at(&self, pos: BlockPos, current: &BlockState) -> Option<BlockState>;

    /// State `block` would take if placed at `pos` with a default interaction
    fn state_for_placement(&self, block: &BlockKind, pos: BlockPos) -> BlockState;
}
