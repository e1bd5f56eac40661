//! ResilienceGrid protocol - records and wire messages
//!
//! Defines the agent, disaster and report records streamed by the swarm
//! backend, the tagged inbound envelope and the outbound command set.

pub mod constants;
pub mod error;
pub mod messages;
pub mod roster;
pub mod types;

pub use constants::*;
pub use error::*;
pub use messages::*;
pub use types::*;
