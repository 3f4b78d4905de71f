/// Inventory controller
///
/// Runs once per simulation tick and keeps the hotbar stocked: throwaway
/// blocks in slot 8 and the best tool for the configured material in slot 0.
/// Every rearrangement goes through one throttled swap gate that remembers
/// a single deferred request across ticks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::bot::Agent;
use crate::config::Settings;
use crate::inventory::hotbar::temp_hotbar_slot;
use crate::inventory::throwaway::first_valid_throwaway;
use crate::inventory::tools::best_tool_against;
use crate::inventory::{Inventory, THROWAWAY_HOTBAR_SLOT, TOOL_HOTBAR_SLOT};
use crate::state::{MoveState, SwapRequest, ThrottleClock};

/// Inventory controller
pub struct InventoryController<R = StdRng> {
    /// Deferred request, if any
    state: MoveState,
    /// Ticks since the last executed swap
    clock: ThrottleClock,
    /// Set once a swap runs; cleared at the start of each tick
    swapped_this_tick: bool,
    /// Source of randomness for temporary hotbar slots
    rng: R,
}

impl InventoryController<StdRng> {
    /// Create a controller seeded from the OS
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for InventoryController<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> InventoryController<R> {
    /// Create a controller with an explicit random source
    pub fn with_rng(rng: R) -> Self {
        Self {
            state: MoveState::Idle,
            clock: ThrottleClock::default(),
            swapped_this_tick: false,
            rng,
        }
    }

    /// Start the throttle clock at `ticks` instead of zero
    pub fn with_clock(mut self, ticks: u32) -> Self {
        self.clock = ThrottleClock::starting_at(ticks);
        self
    }

    pub fn state(&self) -> MoveState {
        self.state
    }

    pub fn ticks_since_last_move(&self) -> u32 {
        self.clock.ticks()
    }

    /// Per-tick entry point
    pub fn on_tick<A: Agent>(&mut self, agent: &mut A, settings: &Settings) {
        self.swapped_this_tick = false;
        if !settings.allow_inventory {
            return;
        }
        if agent.has_open_container() {
            // a chest, crafting table or similar is open
            return;
        }
        self.clock.advance();

        if let Some(request) = self.state.pending() {
            debug!(
                "Remembering to move {} {} from a previous tick",
                request.from, request.to
            );
            if !self.request_swap_with_hotbar(agent, settings, request.from, request.to) {
                // still waiting; needs found below are recomputed next tick
                // and must not displace it
                return;
            }
        }

        if let Some(slot) = Self::throwaway_outside_hotbar(agent.inventory(), settings) {
            self.request_swap_with_hotbar(agent, settings, slot, THROWAWAY_HOTBAR_SLOT);
        }

        let pick = best_tool_against(agent.inventory(), &settings.hotbar_tool_target, settings);
        if let Some(pick) = pick.filter(|&i| !Inventory::is_hotbar(i)) {
            self.request_swap_with_hotbar(agent, settings, pick, TOOL_HOTBAR_SLOT);
        }
    }

    /// Throwaway slot in main inventory when neither hotbar nor off-hand has one
    fn throwaway_outside_hotbar(inventory: &Inventory, settings: &Settings) -> Option<usize> {
        let in_offhand = inventory
            .offhand()
            .map_or(false, |stack| settings.acceptable_throwaway_items.contains(&stack.id));
        if in_offhand {
            return None;
        }
        first_valid_throwaway(inventory, settings).filter(|&i| !Inventory::is_hotbar(i))
    }

    /// Move `slot` onto a temporary hotbar position (1-7).
    ///
    /// Returns false when no position is allowed or the move was deferred.
    pub fn attempt_to_put_on_hotbar<A, F>(
        &mut self,
        agent: &mut A,
        settings: &Settings,
        slot: usize,
        disallowed: F,
    ) -> bool
    where
        A: Agent,
        F: Fn(usize) -> bool,
    {
        let Some(destination) = temp_hotbar_slot(agent.inventory(), disallowed, &mut self.rng) else {
            debug!("No temporary hotbar slot available for slot {}", slot);
            return false;
        };
        self.request_swap_with_hotbar(agent, settings, slot, destination)
    }

    /// Swap `from` into hotbar slot `to` now, or remember it for a later tick.
    ///
    /// At most one swap runs per tick. Returns true when the swap was performed.
    pub fn request_swap_with_hotbar<A: Agent>(
        &mut self,
        agent: &mut A,
        settings: &Settings,
        from: usize,
        to: usize,
    ) -> bool {
        let request = SwapRequest::new(from, to);
        if self.swapped_this_tick {
            debug!("Inventory move requested but one already ran this tick");
            self.state = MoveState::AwaitingThrottle { request };
            return false;
        }
        if !self.clock.elapsed(settings.ticks_between_inventory_moves) {
            debug!(
                "Inventory move requested but delaying {} {}",
                self.clock.ticks(),
                settings.ticks_between_inventory_moves
            );
            self.state = MoveState::AwaitingThrottle { request };
            return false;
        }
        if settings.inventory_move_only_if_stationary && !agent.stationary_for_inventory_move() {
            debug!("Inventory move requested but delaying until stationary");
            self.state = MoveState::AwaitingThrottle { request };
            return false;
        }
        agent.swap_with_hotbar(from, to);
        debug!("Moved slot {} to hotbar {}", from, to);
        self.clock.reset();
        self.swapped_this_tick = true;
        self.state = MoveState::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::SimAgent;
    use crate::types::{ItemStack, Material, ToolProfile};

    fn settings() -> Settings {
        Settings {
            allow_inventory: true,
            ticks_between_inventory_moves: 5,
            acceptable_throwaway_items: vec!["dirt".into()],
            ..Settings::default()
        }
    }

    fn controller() -> InventoryController<StdRng> {
        InventoryController::with_rng(StdRng::seed_from_u64(11))
    }

    fn pickaxe() -> ItemStack {
        ItemStack::tool(
            "iron_pickaxe",
            250,
            ToolProfile {
                speed: 6.0,
                effective_on: vec![Material::new("stone")],
                efficiency: 0,
            },
        )
    }

    #[test]
    fn test_deferred_until_interval_then_executed() {
        let settings = settings();
        let mut inv = Inventory::new();
        inv.set_slot(20, Some(ItemStack::new("stick", 1)));
        let mut agent = SimAgent::new(inv);
        let mut ctl = controller();

        assert!(!ctl.request_swap_with_hotbar(&mut agent, &settings, 20, 0));
        assert_eq!(ctl.ticks_since_last_move(), 0);
        assert_eq!(ctl.state().pending(), Some(SwapRequest::new(20, 0)));

        for expected in 1..5 {
            ctl.on_tick(&mut agent, &settings);
            assert_eq!(ctl.ticks_since_last_move(), expected);
            assert!(agent.swaps().is_empty());
            assert_eq!(ctl.state().pending(), Some(SwapRequest::new(20, 0)));
        }

        ctl.on_tick(&mut agent, &settings);
        assert_eq!(agent.swaps(), &[SwapRequest::new(20, 0)]);
        assert_eq!(ctl.ticks_since_last_move(), 0);
        assert!(ctl.state().is_idle());
        assert_eq!(agent.inventory().get_slot(0).unwrap().id.as_str(), "stick");
    }

    #[test]
    fn test_executes_on_first_eligible_tick() {
        let settings = settings();
        let mut agent = SimAgent::new(Inventory::new());
        let mut ctl = controller().with_clock(9);

        assert!(ctl.request_swap_with_hotbar(&mut agent, &settings, 14, 3));
        assert_eq!(ctl.ticks_since_last_move(), 0);
        assert_eq!(agent.swaps(), &[SwapRequest::new(14, 3)]);
        assert!(ctl.state().is_idle());
    }

    #[test]
    fn test_newer_request_overwrites_pending() {
        let settings = settings();
        let mut agent = SimAgent::new(Inventory::new());
        let mut ctl = controller();

        ctl.request_swap_with_hotbar(&mut agent, &settings, 10, 1);
        ctl.request_swap_with_hotbar(&mut agent, &settings, 11, 2);
        assert_eq!(ctl.state().pending(), Some(SwapRequest::new(11, 2)));
    }

    #[test]
    fn test_waits_until_stationary() {
        let settings = Settings {
            inventory_move_only_if_stationary: true,
            ..settings()
        };
        let mut agent = SimAgent::new(Inventory::new());
        agent.set_stationary(false);
        let mut ctl = controller().with_clock(10);

        assert!(!ctl.request_swap_with_hotbar(&mut agent, &settings, 12, 0));
        assert_eq!(ctl.state().pending(), Some(SwapRequest::new(12, 0)));

        agent.set_stationary(true);
        ctl.on_tick(&mut agent, &settings);
        assert_eq!(agent.swaps(), &[SwapRequest::new(12, 0)]);
        assert!(ctl.state().is_idle());
    }

    #[test]
    fn test_gate_blocks_tick() {
        let mut inv = Inventory::new();
        inv.set_slot(20, Some(pickaxe()));
        let mut agent = SimAgent::new(inv);
        let mut ctl = controller().with_clock(10);

        ctl.on_tick(&mut agent, &Settings { allow_inventory: false, ..settings() });
        assert_eq!(ctl.ticks_since_last_move(), 10);

        agent.set_container_open(true);
        ctl.on_tick(&mut agent, &settings());
        assert_eq!(ctl.ticks_since_last_move(), 10);
        assert!(agent.swaps().is_empty());
    }

    #[test]
    fn test_tick_moves_tool_to_slot_zero() {
        let mut inv = Inventory::new();
        inv.set_slot(20, Some(pickaxe()));
        let mut agent = SimAgent::new(inv);
        let mut ctl = controller().with_clock(10);

        ctl.on_tick(&mut agent, &settings());
        assert_eq!(agent.swaps(), &[SwapRequest::new(20, TOOL_HOTBAR_SLOT)]);
        assert!(agent.inventory().get_slot(0).unwrap().is_tool());
    }

    #[test]
    fn test_tool_already_on_hotbar_is_left_alone() {
        let mut inv = Inventory::new();
        inv.set_slot(4, Some(pickaxe()));
        let mut agent = SimAgent::new(inv);
        let mut ctl = controller().with_clock(10);

        ctl.on_tick(&mut agent, &settings());
        assert!(agent.swaps().is_empty());
        assert!(ctl.state().is_idle());
    }

    #[test]
    fn test_tick_moves_throwaway_to_slot_eight() {
        let mut inv = Inventory::new();
        inv.set_slot(25, Some(ItemStack::block("dirt", 32)));
        let mut agent = SimAgent::new(inv);
        let mut ctl = controller().with_clock(10);

        ctl.on_tick(&mut agent, &settings());
        assert_eq!(agent.swaps(), &[SwapRequest::new(25, THROWAWAY_HOTBAR_SLOT)]);
    }

    #[test]
    fn test_throwaway_in_offhand_needs_no_move() {
        let mut inv = Inventory::new();
        inv.set_slot(25, Some(ItemStack::block("dirt", 32)));
        inv.set_offhand(Some(ItemStack::block("dirt", 16)));
        let mut agent = SimAgent::new(inv);
        let mut ctl = controller().with_clock(10);

        ctl.on_tick(&mut agent, &settings());
        assert!(agent.swaps().is_empty());
    }

    #[test]
    fn test_one_swap_per_tick_second_need_deferred() {
        let mut inv = Inventory::new();
        inv.set_slot(25, Some(ItemStack::block("dirt", 32)));
        inv.set_slot(30, Some(pickaxe()));
        let mut agent = SimAgent::new(inv);
        let mut ctl = controller().with_clock(10);

        ctl.on_tick(&mut agent, &settings());
        assert_eq!(agent.swaps(), &[SwapRequest::new(25, THROWAWAY_HOTBAR_SLOT)]);
        assert_eq!(ctl.state().pending(), Some(SwapRequest::new(30, TOOL_HOTBAR_SLOT)));
    }

    #[test]
    fn test_remembered_request_retried_before_new_needs() {
        let settings = Settings {
            ticks_between_inventory_moves: 1,
            ..settings()
        };
        let mut inv = Inventory::new();
        inv.set_slot(30, Some(pickaxe()));
        let mut agent = SimAgent::new(inv);
        let mut ctl = controller();

        // tick N: an unrelated move gets deferred
        assert!(!ctl.request_swap_with_hotbar(&mut agent, &settings, 15, 4));

        // tick N+1: the remembered move runs first, the tool move waits
        ctl.on_tick(&mut agent, &settings);
        assert_eq!(agent.swaps(), &[SwapRequest::new(15, 4)]);
        assert_eq!(ctl.state().pending(), Some(SwapRequest::new(30, TOOL_HOTBAR_SLOT)));

        // tick N+2: the tool move goes through
        ctl.on_tick(&mut agent, &settings);
        assert_eq!(
            agent.swaps(),
            &[SwapRequest::new(15, 4), SwapRequest::new(30, TOOL_HOTBAR_SLOT)]
        );
        assert!(ctl.state().is_idle());
    }

    #[test]
    fn test_attempt_to_put_on_hotbar() {
        let settings = settings();
        let mut inv = Inventory::new();
        for i in 0..9 {
            inv.set_slot(i, Some(ItemStack::new("stick", 1)));
        }
        inv.set_slot(3, None);
        inv.set_slot(19, Some(ItemStack::new("bucket", 1)));
        let mut agent = SimAgent::new(inv);
        let mut ctl = controller().with_clock(10);

        assert!(ctl.attempt_to_put_on_hotbar(&mut agent, &settings, 19, |_| false));
        assert_eq!(agent.swaps(), &[SwapRequest::new(19, 3)]);

        // nothing allowed
        ctl = controller().with_clock(10);
        assert!(!ctl.attempt_to_put_on_hotbar(&mut agent, &settings, 19, |_| true));
        assert!(ctl.state().is_idle());

        // allowed but throttled
        ctl = controller();
        assert!(!ctl.attempt_to_put_on_hotbar(&mut agent, &settings, 3, |_| false));
        assert_eq!(ctl.state().pending().map(|r| r.from), Some(3));
    }

    #[test]
    fn test_at_most_one_swap_per_tick_without_interval() {
        let settings = Settings {
            ticks_between_inventory_moves: 0,
            ..settings()
        };
        let mut inv = Inventory::new();
        inv.set_slot(25, Some(ItemStack::block("dirt", 32)));
        inv.set_slot(30, Some(pickaxe()));
        let mut agent = SimAgent::new(inv);
        let mut ctl = controller();

        ctl.on_tick(&mut agent, &settings);
        assert_eq!(agent.swaps(), &[SwapRequest::new(25, THROWAWAY_HOTBAR_SLOT)]);
        assert_eq!(ctl.state().pending(), Some(SwapRequest::new(30, TOOL_HOTBAR_SLOT)));

        // a caller asking again within the same tick waits too
        assert!(!ctl.request_swap_with_hotbar(&mut agent, &settings, 30, TOOL_HOTBAR_SLOT));
        assert_eq!(agent.swaps().len(), 1);

        ctl.on_tick(&mut agent, &settings);
        assert_eq!(
            agent.swaps(),
            &[
                SwapRequest::new(25, THROWAWAY_HOTBAR_SLOT),
                SwapRequest::new(30, TOOL_HOTBAR_SLOT)
            ]
        );
        assert!(ctl.state().is_idle());
    }

    #[test]
    fn test_deferred_retry_not_displaced_by_new_need() {
        let settings = settings();
        let mut inv = Inventory::new();
        inv.set_slot(12, Some(ItemStack::block("oak_log", 16)));
        inv.set_slot(30, Some(pickaxe()));
        let mut agent = SimAgent::new(inv);
        let mut ctl = controller();

        let is_log = |stack: &ItemStack| stack.id.as_str() == "oak_log";
        assert!(ctl.throwaway(&mut agent, &settings, true, is_log));
        assert_eq!(agent.inventory().selected(), THROWAWAY_HOTBAR_SLOT);
        let log_move = SwapRequest::new(12, THROWAWAY_HOTBAR_SLOT);
        assert_eq!(ctl.state().pending(), Some(log_move));

        // the tool need shows up every tick but the log move keeps its place
        for _ in 1..5 {
            ctl.on_tick(&mut agent, &settings);
            assert_eq!(ctl.state().pending(), Some(log_move));
            assert!(agent.swaps().is_empty());
        }

        ctl.on_tick(&mut agent, &settings);
        assert_eq!(agent.swaps(), &[log_move]);
        assert!(is_log(agent.inventory().held().unwrap()));
        assert_eq!(ctl.state().pending(), Some(SwapRequest::new(30, TOOL_HOTBAR_SLOT)));

        for _ in 0..5 {
            ctl.on_tick(&mut agent, &settings);
        }
        assert_eq!(agent.swaps(), &[log_move, SwapRequest::new(30, TOOL_HOTBAR_SLOT)]);
        assert!(ctl.state().is_idle());
    }
}
