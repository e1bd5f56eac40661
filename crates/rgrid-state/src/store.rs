use std::sync::Arc;

use tokio::sync::RwLock;

use rgrid_protocol::{Agent, AgentStatus, Disaster, Report};

use crate::stats::{NoThroughput, Stats, ThroughputSource};

/// Store shared between the socket client and the views.
pub type SharedStore = Arc<RwLock<SwarmStore>>;

/// Single in-memory source of truth for the dashboard.
///
/// Every mutation is synchronous and visible to the next read. Stats are
/// recomputed from the agent list after every agent mutation, so they
/// never drift from it.
pub struct SwarmStore {
    agents: Vec<Agent>,
    /// Insertion order, oldest first.
    active_disasters: Vec<Disaster>,
    /// Newest first.
    reports: Vec<Report>,
    connected: bool,
    selected_agent: Option<Agent>,
    stats: Stats,
    throughput: Box<dyn ThroughputSource>,
}

impl SwarmStore {
    pub fn new() -> Self {
        Self::with_throughput(Box::new(NoThroughput))
    }

    pub fn with_throughput(throughput: Box<dyn ThroughputSource>) -> Self {
        Self {
            agents: Vec::new(),
            active_disasters: Vec::new(),
            reports: Vec::new(),
            connected: false,
            selected_agent: None,
            stats: Stats::default(),
            throughput,
        }
    }

    /// Wrap the store for sharing with the client and views.
    pub fn shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn active_disasters(&self) -> &[Disaster] {
        &self.active_disasters
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn selected_agent(&self) -> Option<&Agent> {
        self.selected_agent.as_ref()
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Replace the whole agent collection. Length and id uniqueness are
    /// the caller's responsibility.
    pub fn set_agents(&mut self, agents: Vec<Agent>) {
        self.agents = agents;
        self.update_stats();
    }

    /// Set one agent's status and refresh its last ping.
    /// Returns false, leaving the collection untouched, if the id is unknown.
    pub fn update_agent_status(&mut self, id: &str, status: AgentStatus) -> bool {
        let Some(agent) = self.agents.iter_mut().find(|a| a.id == id) else {
            tracing::debug!(agent_id = id, %status, "Status update for unknown agent ignored");
            return false;
        };
        agent.status = status;
        agent.last_ping = chrono::Utc::now().timestamp_millis();
        self.update_stats();
        true
    }

    pub fn add_disaster(&mut self, disaster: Disaster) {
        self.active_disasters.push(disaster);
    }

    pub fn add_report(&mut self, report: Report) {
        self.reports.insert(0, report);
    }

    pub fn set_connection_status(&mut self, connected: bool) {
        self.connected = connected;
    }

    pub fn set_selected_agent(&mut self, agent: Option<Agent>) {
        self.selected_agent = agent;
    }

    /// Recount active/alert agents and take a fresh throughput sample.
    pub fn update_stats(&mut self) {
        let mut stats = Stats::count(&self.agents);
        stats.throughput = self.throughput.sample(&self.agents);
        self.stats = stats;
    }
}

impl Default for SwarmStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SwarmStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwarmStore")
            .field("agents", &self.agents.len())
            .field("active_disasters", &self.active_disasters.len())
            .field("reports", &self.reports.len())
            .field("connected", &self.connected)
            .field("stats", &self.stats)
            .finish()
    }
}
