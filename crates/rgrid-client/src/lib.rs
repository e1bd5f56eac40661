//! ResilienceGrid swarm stream client
//!
//! Owns at most one live connection to the status stream, decodes inbound
//! envelopes into store actions, and reconnects after a fixed delay
//! whenever the connection drops. Also carries the fire-and-forget REST
//! activation trigger.

pub mod activation;
pub mod client;
pub mod connection;
pub mod dialer;
pub mod dispatch;
pub mod error;

pub use activation::ActivationClient;
pub use client::{ClientConfig, ClientHandle, SocketClient};
pub use connection::{ConnectionState, ReconnectPolicy};
pub use dialer::{Dialer, FrameSink, FrameStream, WebSocketDialer};
pub use error::ClientError;
