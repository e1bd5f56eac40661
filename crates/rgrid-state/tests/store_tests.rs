use rgrid_protocol::roster::agent_id;
use rgrid_protocol::*;
use rgrid_state::*;

fn swarm(active: usize, alert: usize) -> Vec<Agent> {
    (1..=SWARM_SIZE)
        .map(|i| {
            let status = if i <= active {
                AgentStatus::Active
            } else if i <= active + alert {
                AgentStatus::Alert
            } else {
                AgentStatus::Idle
            };
            Agent::new(agent_id(i), "IoT", status)
        })
        .collect()
}

fn disaster(id: &str) -> Disaster {
    Disaster {
        id: id.into(),
        kind: DisasterKind::Flood,
        location: Location { lat: 1.0, lng: 2.0 },
        severity: Severity::Medium,
        timestamp: chrono::Utc::now(),
        affected_area: None,
    }
}

fn report(id: &str) -> Report {
    Report {
        id: id.into(),
        title: format!("Report {id}"),
        content: String::new(),
        timestamp: chrono::Utc::now(),
        confidence: Some(0.9),
    }
}

#[test]
fn test_snapshot_of_forty_active() {
    let mut store = SwarmStore::new();
    store.set_agents(swarm(40, 0));
    assert_eq!(store.agents().len(), SWARM_SIZE);
    assert_eq!(store.stats().active, 40);
    assert_eq!(store.stats().alerts, 0);
}

#[test]
fn test_set_agents_replaces_in_order() {
    let mut store = SwarmStore::new();
    store.set_agents(swarm(10, 0));
    let replacement = vec![
        Agent::new("A003", "News", AgentStatus::Alert),
        Agent::new("A001", "News", AgentStatus::Idle),
    ];
    store.set_agents(replacement.clone());
    assert_eq!(store.agents(), replacement.as_slice());
    assert_eq!(store.stats().active, 0);
    assert_eq!(store.stats().alerts, 1);
}

#[test]
fn test_status_update_moves_counts() {
    let mut store = SwarmStore::new();
    store.set_agents(swarm(40, 0));
    let before = store.stats();

    assert!(store.update_agent_status("A005", AgentStatus::Alert));

    let agent = store.agent("A005").unwrap();
    assert_eq!(agent.status, AgentStatus::Alert);
    assert!(agent.last_ping > 0, "last ping refreshed");
    assert_eq!(store.stats().alerts, before.alerts + 1);
    assert_eq!(store.stats().active, before.active - 1);
}

#[test]
fn test_status_update_for_unknown_id_is_noop() {
    let mut store = SwarmStore::new();
    store.set_agents(swarm(5, 5));
    let before = store.agents().to_vec();
    let stats_before = store.stats();

    assert!(!store.update_agent_status("A999", AgentStatus::Error));

    assert_eq!(store.agents(), before.as_slice());
    assert_eq!(store.stats(), stats_before);
}

#[test]
fn test_status_update_on_empty_store() {
    let mut store = SwarmStore::new();
    assert!(!store.update_agent_status("A001", AgentStatus::Active));
    assert!(store.agents().is_empty());
}

#[test]
fn test_active_count_tracks_any_mutation_sequence() {
    let mut store = SwarmStore::new();
    store.set_agents(swarm(0, 0));
    let steps = [
        ("A001", AgentStatus::Active),
        ("A002", AgentStatus::Active),
        ("A001", AgentStatus::Processing),
        ("A050", AgentStatus::Alert),
        ("A051", AgentStatus::Active),
        ("A002", AgentStatus::Error),
        ("A404", AgentStatus::Active),
    ];
    for (id, status) in steps {
        store.update_agent_status(id, status);
        let expected = store
            .agents()
            .iter()
            .filter(|a| a.status == AgentStatus::Active)
            .count();
        assert_eq!(store.stats().active, expected);
    }
    assert_eq!(store.stats().active, 1);
    assert_eq!(store.stats().alerts, 1);
}

#[test]
fn test_disasters_append_in_insertion_order() {
    let mut store = SwarmStore::new();
    store.add_disaster(disaster("D1"));
    store.add_disaster(disaster("D2"));
    let ids: Vec<&str> = store.active_disasters().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["D1", "D2"]);
}

#[test]
fn test_reports_newest_first() {
    let mut store = SwarmStore::new();
    store.add_report(report("R1"));
    store.add_report(report("R2"));
    assert_eq!(store.reports()[0].id, "R2");
    assert_eq!(store.reports()[1].id, "R1");
}

#[test]
fn test_connection_flag_touches_nothing_else() {
    let mut store = SwarmStore::new();
    store.set_agents(swarm(3, 1));
    store.add_report(report("R1"));
    let stats = store.stats();

    store.set_connection_status(true);
    assert!(store.is_connected());
    store.set_connection_status(false);
    assert!(!store.is_connected());

    assert_eq!(store.agents().len(), SWARM_SIZE);
    assert_eq!(store.reports().len(), 1);
    assert_eq!(store.stats(), stats);
}

#[test]
fn test_selected_agent() {
    let mut store = SwarmStore::new();
    let agent = Agent::new("A007", "IoT", AgentStatus::Processing);
    store.set_selected_agent(Some(agent.clone()));
    assert_eq!(store.selected_agent(), Some(&agent));
    store.set_selected_agent(None);
    assert!(store.selected_agent().is_none());
}

#[test]
fn test_simulated_throughput_feeds_stats() {
    let mut store = SwarmStore::with_throughput(Box::new(SimulatedThroughput {
        per_agent_max: 10.0,
    }));
    store.set_agents(swarm(20, 0));
    let t = store.stats().throughput;
    assert!((0.0..200.0).contains(&t));

    let mut plain = SwarmStore::new();
    plain.set_agents(swarm(20, 0));
    assert_eq!(plain.stats().throughput, 0.0);
}
