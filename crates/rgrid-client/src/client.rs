//! The reconnecting swarm stream client.

use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::{mpsc, watch, RwLock};
use tokio::task::JoinHandle;

use rgrid_protocol::{Command, DEFAULT_WS_URL};
use rgrid_state::SharedStore;

use crate::connection::{ConnectionState, ReconnectPolicy};
use crate::dialer::{Dialer, FrameSink, FrameStream, WebSocketDialer};
use crate::dispatch;
use crate::error::ClientError;

/// Sender into the live session, present only while connected.
type OutboundSlot = Arc<RwLock<Option<mpsc::UnboundedSender<String>>>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Stream endpoint.
    pub url: String,
    pub reconnect: ReconnectPolicy,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reconnect: ReconnectPolicy::default(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WS_URL)
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    /// Peer closed or the transport errored; reconnect.
    Closed,
    /// Teardown was requested.
    Shutdown,
}

/// Socket client bound to one store.
///
/// Lifecycle:
/// 1. `new()` with the store it will write into
/// 2. `spawn()` starts the connection task and returns its handle
/// 3. `ClientHandle::shutdown()` closes the connection and cancels any
///    pending reconnect
pub struct SocketClient<D: Dialer> {
    config: ClientConfig,
    dialer: D,
    store: SharedStore,
}

impl SocketClient<WebSocketDialer> {
    pub fn websocket(config: ClientConfig, store: SharedStore) -> Self {
        Self::new(config, WebSocketDialer, store)
    }
}

impl<D: Dialer> SocketClient<D> {
    pub fn new(config: ClientConfig, dialer: D, store: SharedStore) -> Self {
        Self {
            config,
            dialer,
            store,
        }
    }

    /// Start the connection task. The initial state is `Connecting`.
    pub fn spawn(self) -> ClientHandle {
        let (state_tx, state_rx) = watch::channel(ConnectionState::default());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let outbound: OutboundSlot = Arc::new(RwLock::new(None));

        let task = tokio::spawn(self.run(state_tx, outbound.clone(), shutdown_rx));

        ClientHandle {
            state: state_rx,
            outbound,
            shutdown: shutdown_tx,
            task,
        }
    }

    async fn run(
        self,
        state: watch::Sender<ConnectionState>,
        outbound: OutboundSlot,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut failed: u32 = 0;

        loop {
            let attempt = failed + 1;
            state.send_replace(ConnectionState::Connecting { attempt });
            tracing::info!(url = %self.config.url, attempt, "Connecting to swarm stream");

            let dialed = tokio::select! {
                dialed = self.dialer.dial(&self.config.url) => dialed,
                _ = shutdown_requested(&mut shutdown) => break,
            };

            match dialed {
                Ok((sink, stream)) => {
                    failed = 0;
                    let end = self
                        .session(sink, stream, &state, &outbound, &mut shutdown)
                        .await;
                    if end == SessionEnd::Shutdown {
                        break;
                    }
                }
                Err(e) => {
                    failed += 1;
                    tracing::warn!(error = %e, attempt, "Swarm stream connection failed");
                }
            }

            self.store.write().await.set_connection_status(false);
            state.send_replace(ConnectionState::Disconnected);

            if !self.config.reconnect.should_retry(failed) {
                tracing::warn!(attempts = failed, "Giving up on swarm stream");
                break;
            }

            tracing::info!(
                delay_ms = self.config.reconnect.delay.as_millis() as u64,
                "Reconnecting to swarm stream after delay"
            );
            tokio::select! {
                _ = tokio::time::sleep(self.config.reconnect.delay) => {}
                _ = shutdown_requested(&mut shutdown) => break,
            }
        }

        *outbound.write().await = None;
        self.store.write().await.set_connection_status(false);
        state.send_replace(ConnectionState::Disconnected);
        tracing::info!("Swarm stream client stopped");
    }

    /// Pump one live connection until it closes or teardown is requested.
    async fn session(
        &self,
        mut sink: FrameSink,
        mut stream: FrameStream,
        state: &watch::Sender<ConnectionState>,
        outbound: &OutboundSlot,
        shutdown: &mut watch::Receiver<bool>,
    ) -> SessionEnd {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        *outbound.write().await = Some(tx);
        self.store.write().await.set_connection_status(true);
        state.send_replace(ConnectionState::Connected);
        tracing::info!(url = %self.config.url, "Swarm stream connected");

        let end = loop {
            tokio::select! {
                frame = stream.next() => match frame {
                    Some(Ok(text)) => {
                        let mut store = self.store.write().await;
                        dispatch::apply_frame(&mut store, &text);
                    }
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "Swarm stream error");
                        break SessionEnd::Closed;
                    }
                    None => {
                        tracing::info!("Swarm stream closed by peer");
                        break SessionEnd::Closed;
                    }
                },
                Some(text) = rx.recv() => {
                    if let Err(e) = sink.send(text).await {
                        tracing::warn!(error = %e, "Failed to write to swarm stream");
                        break SessionEnd::Closed;
                    }
                }
                _ = shutdown_requested(shutdown) => {
                    if let Err(e) = sink.close().await {
                        tracing::debug!(error = %e, "Error closing swarm stream");
                    }
                    break SessionEnd::Shutdown;
                }
            }
        };

        *outbound.write().await = None;
        end
    }
}

/// Resolves once teardown is requested. A dropped handle counts as a request.
async fn shutdown_requested(rx: &mut watch::Receiver<bool>) {
    let _ = rx.wait_for(|stop| *stop).await;
}

/// Handle to a running socket client, owned by the application root.
pub struct ClientHandle {
    state: watch::Receiver<ConnectionState>,
    outbound: OutboundSlot,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ClientHandle {
    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Watch state transitions.
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state.clone()
    }

    /// Serialize `payload` and hand it to the live connection.
    ///
    /// Returns false with a logged warning if the connection is not open.
    /// Nothing is queued for a later connection.
    pub async fn send<T: Serialize + ?Sized>(&self, payload: &T) -> bool {
        match serde_json::to_string(payload) {
            Ok(text) => self.send_text(text).await,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize outbound message");
                false
            }
        }
    }

    /// Encode a backend command and send it like [`Self::send`].
    pub async fn send_command(&self, command: &Command) -> bool {
        match command.encode().map_err(ClientError::from) {
            Ok(text) => self.send_text(text).await,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode command");
                false
            }
        }
    }

    async fn send_text(&self, text: String) -> bool {
        let slot = self.outbound.read().await;
        match slot.as_ref() {
            Some(tx) if tx.send(text).is_ok() => true,
            _ => {
                tracing::warn!("Swarm stream is not connected; dropping outbound message");
                false
            }
        }
    }

    /// Close the live connection, cancel any pending reconnect, and wait
    /// for the connection task to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "Swarm stream task ended abnormally");
        }
    }
}
