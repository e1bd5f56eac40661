//! Mock swarm used when no backend populates the stream.

use rand::Rng;

use rgrid_protocol::roster::{agent_id, role_for_index};
use rgrid_protocol::{Agent, AgentStatus, SWARM_SIZE};

/// Status mix of a freshly activated mock swarm, as cumulative weights.
const STATUS_WEIGHTS: &[(AgentStatus, u32)] = &[
    (AgentStatus::Active, 55),
    (AgentStatus::Processing, 20),
    (AgentStatus::Idle, 17),
    (AgentStatus::Alert, 6),
    (AgentStatus::Error, 2),
];

/// All 100 agents with roster roles and random statuses.
pub fn mock_swarm<R: Rng + ?Sized>(rng: &mut R) -> Vec<Agent> {
    let now = chrono::Utc::now().timestamp_millis();
    (1..=SWARM_SIZE)
        .map(|i| Agent {
            id: agent_id(i),
            role: role_for_index(i).to_string(),
            status: random_status(rng),
            last_ping: now,
        })
        .collect()
}

fn random_status<R: Rng + ?Sized>(rng: &mut R) -> AgentStatus {
    let total: u32 = STATUS_WEIGHTS.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen_range(0..total);
    for (status, weight) in STATUS_WEIGHTS {
        if roll < *weight {
            return *status;
        }
        roll -= weight;
    }
    AgentStatus::Idle
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mock_swarm_covers_roster() {
        let mut rng = StdRng::seed_from_u64(42);
        let agents = mock_swarm(&mut rng);

        assert_eq!(agents.len(), SWARM_SIZE);
        assert_eq!(agents[0].id, "A001");
        assert_eq!(agents[0].role, "Social Media");
        assert_eq!(agents[99].id, "A100");
        assert_eq!(agents[99].role, "Alert");
        assert!(agents.iter().all(|a| a.last_ping > 0));
    }

    #[test]
    fn test_mock_swarm_is_mostly_busy() {
        let mut rng = StdRng::seed_from_u64(3);
        let agents = mock_swarm(&mut rng);
        let busy = agents
            .iter()
            .filter(|a| matches!(a.status, AgentStatus::Active | AgentStatus::Processing))
            .count();
        assert!(busy > 50, "busy = {busy}");
    }
}
