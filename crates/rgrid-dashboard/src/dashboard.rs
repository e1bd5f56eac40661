//! Application root. Owns the store, the socket client and every timer task
//! for the lifetime of the dashboard.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use rgrid_client::{ActivationClient, ClientHandle, ConnectionState, Dialer, SocketClient, WebSocketDialer};
use rgrid_protocol::{Agent, Command, Disaster, Report};
use rgrid_state::{
    grid_view, AgentFilter, DisasterFilter, NoThroughput, SharedStore, SimulatedThroughput,
    SwarmStore,
};

use crate::config::DashboardConfig;
use crate::intents;
use crate::simulation::mock_swarm;

/// Shortest stats refresh period accepted from config.
const MIN_STATS_REFRESH: Duration = Duration::from_millis(100);

/// Progress of the user-triggered swarm activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivationState {
    #[default]
    Idle,
    Activating,
    Activated,
}

impl ActivationState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Activating => "activating",
            Self::Activated => "activated",
        }
    }
}

pub struct Dashboard {
    store: SharedStore,
    client: ClientHandle,
    activation: ActivationClient,
    activation_state: Arc<RwLock<ActivationState>>,
    agent_filter: AgentFilter,
    disaster_filter: DisasterFilter,
    simulation: bool,
    activation_delay: Duration,
    /// Stats ticker, activation delay and REST trigger tasks.
    timers: Vec<JoinHandle<()>>,
}

impl Dashboard {
    /// Connect to the configured backend over WebSocket.
    pub async fn start(config: &DashboardConfig) -> Self {
        Self::with_dialer(config, WebSocketDialer).await
    }

    pub async fn with_dialer<D: Dialer>(config: &DashboardConfig, dialer: D) -> Self {
        let store = build_store(config.simulation_mode);
        store
            .write()
            .await
            .add_report(intents::initial_status_report(chrono::Utc::now()));

        let client = SocketClient::new(config.client_config(), dialer, store.clone()).spawn();
        let stats_ticker = spawn_stats_ticker(store.clone(), config.stats_refresh());

        tracing::info!(
            ws_url = %config.ws_url,
            api_url = %config.api_url,
            simulation = config.simulation_mode,
            "Dashboard started"
        );

        Self {
            store,
            client,
            activation: ActivationClient::new(config.api_url.clone()),
            activation_state: Arc::new(RwLock::new(ActivationState::Idle)),
            agent_filter: AgentFilter::All,
            disaster_filter: DisasterFilter::All,
            simulation: config.simulation_mode,
            activation_delay: config.activation_delay(),
            timers: vec![stats_ticker],
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.client.state()
    }

    pub fn subscribe_connection(&self) -> watch::Receiver<ConnectionState> {
        self.client.subscribe()
    }

    pub async fn activation_state(&self) -> ActivationState {
        *self.activation_state.read().await
    }

    pub fn is_simulation(&self) -> bool {
        self.simulation
    }

    /// Ask the backend to start the swarm.
    ///
    /// Sends the activate command over the stream and fires the REST
    /// trigger, then marks the swarm activated after the activation delay.
    /// In simulation mode the store is populated with a mock swarm at that
    /// point. Returns false if an activation was already requested.
    pub async fn activate_swarm(&mut self) -> bool {
        {
            let mut state = self.activation_state.write().await;
            if *state != ActivationState::Idle {
                tracing::info!(state = state.label(), "Swarm activation already requested");
                return false;
            }
            *state = ActivationState::Activating;
        }

        tracing::info!(simulation = self.simulation, "Activating swarm");
        self.client.send_command(&Command::activate_swarm()).await;
        let trigger = self.activation.spawn_trigger();
        self.track(trigger);

        let state = Arc::clone(&self.activation_state);
        let store = self.store.clone();
        let delay = self.activation_delay;
        let simulation = self.simulation;
        let delayed = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if simulation {
                let agents = mock_swarm(&mut rand::thread_rng());
                store.write().await.set_agents(agents);
            }
            *state.write().await = ActivationState::Activated;
            tracing::info!("Swarm activated");
        });
        self.track(delayed);
        true
    }

    /// Drop a disaster marker at a map position.
    pub async fn add_disaster_at(&self, lat: f64, lng: f64) -> Disaster {
        let disaster =
            intents::synthesize_disaster(lat, lng, chrono::Utc::now(), &mut rand::thread_rng());
        tracing::info!(disaster_id = %disaster.id, lat, lng, "Disaster marker added");
        self.store.write().await.add_disaster(disaster.clone());
        disaster
    }

    pub fn agent_filter(&self) -> AgentFilter {
        self.agent_filter
    }

    /// Local only; the store is untouched.
    pub fn set_filter(&mut self, filter: AgentFilter) {
        self.agent_filter = filter;
    }

    pub fn disaster_filter(&self) -> DisasterFilter {
        self.disaster_filter
    }

    pub fn set_disaster_filter(&mut self, filter: DisasterFilter) {
        self.disaster_filter = filter;
    }

    /// Synthesize a situation report from current state and prepend it.
    pub async fn generate_report(&self) -> Report {
        let mut store = self.store.write().await;
        let report = intents::synthesize_report(
            &store.stats(),
            store.agents().len(),
            store.active_disasters(),
            chrono::Utc::now(),
        );
        tracing::info!(report_id = %report.id, "Report generated");
        store.add_report(report.clone());
        report
    }

    /// Focus a grid slot by id. Unreported slots select their placeholder.
    /// Returns None and leaves the selection alone for ids outside the grid.
    pub async fn select_agent(&self, id: &str) -> Option<Agent> {
        let mut store = self.store.write().await;
        let agent = grid_view(store.agents()).into_iter().find(|a| a.id == id)?;
        store.set_selected_agent(Some(agent.clone()));
        Some(agent)
    }

    pub async fn clear_selection(&self) {
        self.store.write().await.set_selected_agent(None);
    }

    /// One-line summary for headless mode.
    pub async fn status_line(&self) -> String {
        let store = self.store.read().await;
        let stats = store.stats();
        format!(
            "connection={} activation={} agents={} active={} alerts={} throughput={:.0} disasters={} reports={}",
            self.client.state().label(),
            self.activation_state.read().await.label(),
            store.agents().len(),
            stats.active,
            stats.alerts,
            stats.throughput,
            store.active_disasters().len(),
            store.reports().len(),
        )
    }

    /// Abort every timer and close the connection, cancelling any pending
    /// reconnect.
    pub async fn shutdown(self) {
        for timer in &self.timers {
            timer.abort();
        }
        self.client.shutdown().await;
        tracing::info!("Dashboard stopped");
    }

    fn track(&mut self, task: JoinHandle<()>) {
        self.timers.retain(|t| !t.is_finished());
        self.timers.push(task);
    }
}

fn build_store(simulation: bool) -> SharedStore {
    let store = if simulation {
        SwarmStore::with_throughput(Box::new(SimulatedThroughput::default()))
    } else {
        SwarmStore::with_throughput(Box::new(NoThroughput))
    };
    store.shared()
}

fn spawn_stats_ticker(store: SharedStore, period: Duration) -> JoinHandle<()> {
    let period = period.max(MIN_STATS_REFRESH);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            store.write().await.update_stats();
        }
    })
}
