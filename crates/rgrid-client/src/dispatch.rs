//! Applies decoded inbound messages to the store.

use rgrid_protocol::InboundMessage;
use rgrid_state::SwarmStore;

/// Apply one message. Never fails: messages that carry nothing applicable
/// are logged and dropped.
pub fn apply(store: &mut SwarmStore, msg: InboundMessage) {
    match msg {
        InboundMessage::Snapshot(agents) => {
            tracing::info!(agents = agents.len(), "Received swarm snapshot");
            store.set_agents(agents);
        }
        InboundMessage::Batch(agents) => {
            tracing::debug!(agents = agents.len(), "Received agent status batch");
            store.set_agents(agents);
        }
        InboundMessage::AgentStatus { id, status } => {
            store.update_agent_status(&id, status);
        }
        InboundMessage::Disaster(disaster) => {
            tracing::info!(
                disaster_id = %disaster.id,
                kind = disaster.kind.as_str(),
                severity = disaster.severity.as_str(),
                "Disaster detected"
            );
            store.add_disaster(disaster);
        }
        InboundMessage::Report(report) => {
            tracing::info!(report_id = %report.id, title = %report.title, "New report generated");
            store.add_report(report);
        }
        InboundMessage::System { message } => {
            tracing::info!(%message, "System notice");
        }
        InboundMessage::Ignored { tag } => {
            tracing::debug!(%tag, "Ignoring message");
        }
    }
}

/// Decode one text frame and apply it. Returns whether it decoded.
pub fn apply_frame(store: &mut SwarmStore, text: &str) -> bool {
    match InboundMessage::decode(text) {
        Ok(msg) => {
            apply(store, msg);
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "Dropping malformed swarm message");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgrid_protocol::{Agent, AgentStatus};

    #[test]
    fn test_system_notice_changes_nothing() {
        let mut store = SwarmStore::new();
        store.set_agents(vec![Agent::new("A001", "News", AgentStatus::Active)]);
        let before = store.agents().to_vec();

        assert!(apply_frame(&mut store, r#"{"type":"system","message":"hello"}"#));

        assert_eq!(store.agents(), before.as_slice());
        assert!(store.reports().is_empty());
        assert!(store.active_disasters().is_empty());
    }

    #[test]
    fn test_malformed_frame_is_dropped() {
        let mut store = SwarmStore::new();
        assert!(!apply_frame(&mut store, "not json at all"));
        assert!(!apply_frame(&mut store, r#"{"type":"swarm_status","data":{"agent_grid":5}}"#));
        assert!(store.agents().is_empty());
    }
}
