//! Connection state tracking and the reconnect schedule.
//!
//! Lifecycle: `Connecting -> Connected -> Disconnected -> Connecting ...`.
//! Every reconnect waits the same fixed delay; there is no backoff.

use std::time::Duration;

use rgrid_protocol::RECONNECT_DELAY_MS;

/// Liveness of the swarm stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Dialing. `attempt` counts consecutive attempts since the last
    /// successful connection, starting at 1.
    Connecting { attempt: u32 },
    Connected,
    /// Closed, errored, or torn down. A reconnect may be pending.
    Disconnected,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    /// Current attempt number (0 unless connecting).
    pub fn attempt(&self) -> u32 {
        match self {
            ConnectionState::Connecting { attempt } => *attempt,
            _ => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Connecting { .. } => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Disconnected => "disconnected",
        }
    }
}

impl Default for ConnectionState {
    fn default() -> Self {
        ConnectionState::Connecting { attempt: 1 }
    }
}

/// When to try again after the connection drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Fixed wait between a drop and the next dial.
    pub delay: Duration,
    /// Give up after this many consecutive failed attempts. `None` retries forever.
    pub max_attempts: Option<u32>,
}

impl ReconnectPolicy {
    pub fn fixed(delay: Duration) -> Self {
        Self {
            delay,
            max_attempts: None,
        }
    }

    /// Whether another attempt is allowed after `failed` consecutive failures.
    pub fn should_retry(&self, failed: u32) -> bool {
        self.max_attempts.map_or(true, |max| failed < max)
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::fixed(Duration::from_millis(RECONNECT_DELAY_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_connecting() {
        assert_eq!(ConnectionState::default(), ConnectionState::Connecting { attempt: 1 });
        assert!(!ConnectionState::default().is_connected());
    }

    #[test]
    fn test_connection_state_is_connected() {
        assert!(ConnectionState::Connected.is_connected());
        assert!(!ConnectionState::Disconnected.is_connected());
        assert!(!ConnectionState::Connecting { attempt: 3 }.is_connected());
    }

    #[test]
    fn test_connection_state_attempt() {
        assert_eq!(ConnectionState::Connected.attempt(), 0);
        assert_eq!(ConnectionState::Disconnected.attempt(), 0);
        assert_eq!(ConnectionState::Connecting { attempt: 5 }.attempt(), 5);
    }

    #[test]
    fn test_default_policy_is_fixed_three_seconds_forever() {
        let policy = ReconnectPolicy::default();
        assert_eq!(policy.delay, Duration::from_millis(3000));
        assert_eq!(policy.max_attempts, None);
        assert!(policy.should_retry(1));
        assert!(policy.should_retry(10_000));
    }

    #[test]
    fn test_capped_policy() {
        let policy = ReconnectPolicy {
            delay: Duration::from_secs(1),
            max_attempts: Some(3),
        };
        assert!(policy.should_retry(2));
        assert!(!policy.should_retry(3));
    }
}
