pub mod throttle;

pub use throttle::{MoveState, SwapRequest, ThrottleClock};
