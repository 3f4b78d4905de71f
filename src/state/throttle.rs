/// A request to move a storage slot onto the hotbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapRequest {
    /// Storage slot, 0-35
    pub from: usize,
    /// Hotbar slot, 0-8
    pub to: usize,
}

impl SwapRequest {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

/// Controller state across ticks.
///
/// At most one request is remembered; a newer deferral replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveState {
    #[default]
    Idle,
    AwaitingThrottle { request: SwapRequest },
}

impl MoveState {
    pub fn pending(&self) -> Option<SwapRequest> {
        match self {
            MoveState::Idle => None,
            MoveState::AwaitingThrottle { request } => Some(*request),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, MoveState::Idle)
    }
}

/// Ticks elapsed since the last executed inventory move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThrottleClock {
    ticks: u32,
}

impl ThrottleClock {
    /// A clock that has already waited `ticks`
    pub fn starting_at(ticks: u32) -> Self {
        Self { ticks }
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn advance(&mut self) {
        self.ticks = self.ticks.saturating_add(1);
    }

    pub fn reset(&mut self) {
        self.ticks = 0;
    }

    /// Whether at least `min_ticks` have passed since the last move
    pub fn elapsed(&self, min_ticks: u32) -> bool {
        self.ticks >= min_ticks
    }
}
