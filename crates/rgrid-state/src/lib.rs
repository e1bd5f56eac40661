//! ResilienceGrid client state
//!
//! A single explicitly constructed store holding the current agent,
//! disaster and report snapshot, plus the derived stats and the
//! display-time helpers the views read through.

pub mod stats;
pub mod store;
pub mod view;

pub use stats::{NoThroughput, SimulatedThroughput, Stats, ThroughputSource};
pub use store::{SharedStore, SwarmStore};
pub use view::{grid_view, AgentFilter, DisasterFilter};
