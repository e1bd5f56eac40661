use rand::Rng;
use rgrid_protocol::{Agent, AgentStatus};

/// Aggregate counters shown in the stats bar.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stats {
    pub active: usize,
    pub alerts: usize,
    /// Operations per minute, as reported by the store's throughput source.
    pub throughput: f64,
}

impl Stats {
    /// Count active and alerting agents. Throughput is filled in separately.
    pub fn count(agents: &[Agent]) -> Self {
        let mut stats = Stats::default();
        for agent in agents {
            match agent.status {
                AgentStatus::Active => stats.active += 1,
                AgentStatus::Alert => stats.alerts += 1,
                _ => {}
            }
        }
        stats
    }
}

/// Source of the throughput figure.
///
/// There is no real throughput metric yet; the store asks its source for a
/// sample every time stats are recomputed.
pub trait ThroughputSource: Send + Sync {
    fn sample(&mut self, agents: &[Agent]) -> f64;
}

/// Always reports zero. Used outside simulation mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoThroughput;

impl ThroughputSource for NoThroughput {
    fn sample(&mut self, _agents: &[Agent]) -> f64 {
        0.0
    }
}

/// Random throughput for simulation mode, scaled by the busy agent count.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedThroughput {
    /// Upper bound of the random ops/min contributed by each busy agent.
    pub per_agent_max: f64,
}

impl Default for SimulatedThroughput {
    fn default() -> Self {
        Self { per_agent_max: 12.0 }
    }
}

impl ThroughputSource for SimulatedThroughput {
    fn sample(&mut self, agents: &[Agent]) -> f64 {
        let busy = agents
            .iter()
            .filter(|a| matches!(a.status, AgentStatus::Active | AgentStatus::Processing))
            .count();
        if busy == 0 || self.per_agent_max <= 0.0 {
            return 0.0;
        }
        let mut rng = rand::thread_rng();
        busy as f64 * rng.gen_range(0.0..self.per_agent_max)
    }
}
