//! Display-time projections of the store. None of these mutate it.

use std::collections::HashMap;

use rgrid_protocol::roster::agent_id;
use rgrid_protocol::{Agent, AgentStatus, Disaster, DisasterKind, OFFLINE_ROLE, SWARM_SIZE};

/// The full 100-slot grid in id order. Slots the backend has not reported
/// are filled with offline placeholders; those are never stored.
pub fn grid_view(agents: &[Agent]) -> Vec<Agent> {
    let by_id: HashMap<&str, &Agent> = agents.iter().map(|a| (a.id.as_str(), a)).collect();
    (1..=SWARM_SIZE)
        .map(|i| {
            let id = agent_id(i);
            match by_id.get(id.as_str()) {
                Some(agent) => (*agent).clone(),
                None => Agent::new(id, OFFLINE_ROLE, AgentStatus::Idle),
            }
        })
        .collect()
}

/// Status filter of the agent panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentFilter {
    #[default]
    All,
    Active,
    Alert,
    Processing,
}

impl AgentFilter {
    pub const ALL: [AgentFilter; 4] = [Self::All, Self::Active, Self::Alert, Self::Processing];

    pub fn matches(&self, agent: &Agent) -> bool {
        match self {
            Self::All => true,
            Self::Active => agent.status == AgentStatus::Active,
            Self::Alert => agent.status == AgentStatus::Alert,
            Self::Processing => agent.status == AgentStatus::Processing,
        }
    }

    pub fn apply<'a>(&self, agents: &'a [Agent]) -> Vec<&'a Agent> {
        agents.iter().filter(|a| self.matches(a)).collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Alert => "alert",
            Self::Processing => "processing",
        }
    }
}

impl std::str::FromStr for AgentFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown agent filter '{s}'"))
    }
}

/// Kind filter of the disaster panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisasterFilter {
    #[default]
    All,
    Kind(DisasterKind),
}

impl DisasterFilter {
    pub fn matches(&self, disaster: &Disaster) -> bool {
        match self {
            Self::All => true,
            Self::Kind(kind) => disaster.kind == *kind,
        }
    }

    pub fn apply<'a>(&self, disasters: &'a [Disaster]) -> Vec<&'a Disaster> {
        disasters.iter().filter(|d| self.matches(d)).collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Kind(kind) => kind.as_str(),
        }
    }
}

impl std::str::FromStr for DisasterFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<DisasterKind>().map(Self::Kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_fills_placeholders() {
        let agents = vec![
            Agent::new("A050", "Classifier", AgentStatus::Alert),
            Agent::new("A001", "Social Media", AgentStatus::Active),
        ];
        let grid = grid_view(&agents);
        assert_eq!(grid.len(), SWARM_SIZE);
        assert_eq!(grid[0].status, AgentStatus::Active);
        assert_eq!(grid[49].status, AgentStatus::Alert);
        assert_eq!(grid[1].id, "A002");
        assert_eq!(grid[1].role, OFFLINE_ROLE);
        assert_eq!(grid[1].status, AgentStatus::Idle);
        assert_eq!(grid[1].last_ping, 0);
    }

    #[test]
    fn test_grid_ignores_foreign_ids() {
        let agents = vec![Agent::new("X9", "?", AgentStatus::Error)];
        let grid = grid_view(&agents);
        assert_eq!(grid.len(), SWARM_SIZE);
        assert!(grid.iter().all(|a| a.role == OFFLINE_ROLE));
    }

    #[test]
    fn test_agent_filter() {
        let agents = vec![
            Agent::new("A001", "", AgentStatus::Active),
            Agent::new("A002", "", AgentStatus::Processing),
            Agent::new("A003", "", AgentStatus::Active),
        ];
        assert_eq!(AgentFilter::All.apply(&agents).len(), 3);
        assert_eq!(AgentFilter::Active.apply(&agents).len(), 2);
        assert_eq!(AgentFilter::Alert.apply(&agents).len(), 0);
        assert_eq!("PROCESSING".parse::<AgentFilter>(), Ok(AgentFilter::Processing));
        assert!("busy".parse::<AgentFilter>().is_err());
    }

    #[test]
    fn test_disaster_filter_parse() {
        assert_eq!("all".parse::<DisasterFilter>(), Ok(DisasterFilter::All));
        assert_eq!(
            "flood".parse::<DisasterFilter>(),
            Ok(DisasterFilter::Kind(DisasterKind::Flood))
        );
        assert!("tornado".parse::<DisasterFilter>().is_err());
    }
}
