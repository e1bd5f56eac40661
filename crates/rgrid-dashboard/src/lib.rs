//! ResilienceGrid dashboard
//!
//! The application root that owns the swarm store, the stream client and the
//! timers, the user intents, and the terminal console that renders it all.

pub mod config;
pub mod console;
pub mod dashboard;
pub mod intents;
pub mod simulation;

pub use config::{ConfigOverrides, DashboardConfig};
pub use dashboard::{ActivationState, Dashboard};
