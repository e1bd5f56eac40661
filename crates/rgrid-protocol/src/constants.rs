/// Number of agents in a fully activated swarm.
pub const SWARM_SIZE: usize = 100;

/// Agents per row in the 10x10 display grid.
pub const GRID_WIDTH: usize = 10;

/// Fixed delay between a closed connection and the next attempt.
pub const RECONNECT_DELAY_MS: u64 = 3000;

/// Period of the stats refresh timer.
pub const STATS_REFRESH_MS: u64 = 2000;

/// Delay between sending the activation command and marking the swarm active.
pub const ACTIVATION_DELAY_MS: u64 = 500;

/// Local development stream endpoint.
pub const DEFAULT_WS_URL: &str = "ws://localhost:8000/api/v1/ws/swarm";

/// Local development REST base.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Role label given to grid slots the backend has not reported yet.
pub const OFFLINE_ROLE: &str = "Offline";
