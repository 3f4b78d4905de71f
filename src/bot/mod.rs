pub mod agent;
pub mod client;

pub use agent::{Agent, PlacementOracle};
pub use client::{demo_inventory, SimAgent};
