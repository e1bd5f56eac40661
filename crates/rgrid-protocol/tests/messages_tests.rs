use rgrid_protocol::roster::{agent_id, agent_index, role_for_index};
use rgrid_protocol::*;

#[test]
fn test_snapshot_grid_is_flattened() {
    let text = r#"{
        "type": "swarm_status",
        "data": {
            "agent_grid": [
                [{"id":"A001","role":"Social Media","status":"active","lastPing":10}],
                [{"id":"A002","role":"News","status":"standby"},{"id":"A003","type":"Satellite","status":"alert"}]
            ]
        },
        "timestamp": "2025-01-01T00:00:00"
    }"#;
    match InboundMessage::decode(text).unwrap() {
        InboundMessage::Snapshot(agents) => {
            let ids: Vec<&str> = agents.iter().map(|a| a.id.as_str()).collect();
            assert_eq!(ids, vec!["A001", "A002", "A003"]);
            assert_eq!(agents[0].last_ping, 10);
            assert_eq!(agents[1].status, AgentStatus::Idle, "standby maps to idle");
            assert_eq!(agents[2].role, "Satellite", "backend 'type' key is the role");
        }
        other => panic!("expected snapshot, got {other:?}"),
    }
}

#[test]
fn test_batch_accepts_flat_list() {
    let text = r#"{"type":"agent_status_batch","data":{"agents":[{"id":"A010","status":"processing"}]}}"#;
    let msg = InboundMessage::decode(text).unwrap();
    assert_eq!(
        msg,
        InboundMessage::Batch(vec![Agent::new("A010", "", AgentStatus::Processing)])
    );
}

#[test]
fn test_single_status_update() {
    let text = r#"{"type":"agent_status","data":{"id":"A005","status":"alert"}}"#;
    assert_eq!(
        InboundMessage::decode(text).unwrap(),
        InboundMessage::AgentStatus {
            id: "A005".into(),
            status: AgentStatus::Alert
        }
    );
}

#[test]
fn test_backend_grid_with_numeric_ids() {
    let text = r#"{
        "type": "agent_status_batch",
        "data": {"agents": [
            [{"id":1,"status":"active","type":"social"},{"id":2,"status":"standby","type":"social"}],
            [{"id":11,"status":"offline","type":"news"}]
        ]},
        "timestamp": "2025-01-01T00:00:00.123456"
    }"#;
    match InboundMessage::decode(text).unwrap() {
        InboundMessage::Batch(agents) => {
            let ids: Vec<&str> = agents.iter().map(|a| a.id.as_str()).collect();
            assert_eq!(ids, vec!["A001", "A002", "A011"]);
            assert_eq!(agents[0].status, AgentStatus::Active);
            assert_eq!(agents[2].role, "news");
        }
        other => panic!("expected batch, got {other:?}"),
    }
}

#[test]
fn test_single_status_update_with_numeric_id() {
    let text = r#"{"type":"agent_status","data":{"id":5,"status":"alert"}}"#;
    assert_eq!(
        InboundMessage::decode(text).unwrap(),
        InboundMessage::AgentStatus {
            id: "A005".into(),
            status: AgentStatus::Alert
        }
    );
}

#[test]
fn test_status_update_without_id_is_ignored() {
    let text = r#"{"type":"agent_status","data":{"status":"alert"}}"#;
    assert_eq!(
        InboundMessage::decode(text).unwrap(),
        InboundMessage::Ignored {
            tag: "agent_status".into()
        }
    );
}

#[test]
fn test_unknown_tag_is_ignored_not_error() {
    let msg = InboundMessage::decode(r#"{"type":"telemetry","data":{}}"#).unwrap();
    assert_eq!(msg.tag(), "telemetry");
    assert!(matches!(msg, InboundMessage::Ignored { .. }));
}

#[test]
fn test_missing_payload_is_ignored() {
    let msg = InboundMessage::decode(r#"{"type":"disaster_detected"}"#).unwrap();
    assert!(matches!(msg, InboundMessage::Ignored { .. }));
}

#[test]
fn test_disaster_payload() {
    let text = r#"{"type":"disaster_detected","data":{
        "id":"D1","type":"wildfire","location":{"lat":34.05,"lng":-118.24},
        "severity":"critical","timestamp":"2025-03-01T12:00:00Z","affectedArea":42.5}}"#;
    match InboundMessage::decode(text).unwrap() {
        InboundMessage::Disaster(d) => {
            assert_eq!(d.kind, DisasterKind::Other, "unknown kinds decode to other");
            assert_eq!(d.severity, Severity::Critical);
            assert_eq!(d.affected_area, Some(42.5));
        }
        other => panic!("expected disaster, got {other:?}"),
    }
}

#[test]
fn test_offsetless_timestamps_are_accepted() {
    let text = r#"{"type":"disaster_detected","data":{
        "id":"D2","type":"flood","location":{"lat":1.0,"lng":2.0},
        "severity":"high","timestamp":"2025-01-01T00:00:00.123456"}}"#;
    match InboundMessage::decode(text).unwrap() {
        InboundMessage::Disaster(d) => {
            assert_eq!(d.timestamp.to_rfc3339(), "2025-01-01T00:00:00.123456+00:00");
        }
        other => panic!("expected disaster, got {other:?}"),
    }

    let text = r#"{"type":"new_report","data":{
        "id":"R9","title":"Flood update","content":"Levels rising",
        "timestamp":"2025-01-01T06:30:00"}}"#;
    match InboundMessage::decode(text).unwrap() {
        InboundMessage::Report(r) => assert_eq!(r.timestamp.to_rfc3339(), "2025-01-01T06:30:00+00:00"),
        other => panic!("expected report, got {other:?}"),
    }
}

#[test]
fn test_system_notice_reads_top_level_message() {
    let msg = InboundMessage::decode(r#"{"type":"system","message":"maintenance at 02:00"}"#).unwrap();
    assert_eq!(
        msg,
        InboundMessage::System {
            message: "maintenance at 02:00".into()
        }
    );
}

#[test]
fn test_malformed_json_is_envelope_error() {
    let err = InboundMessage::decode("{not json").unwrap_err();
    assert!(matches!(err, ProtocolError::Envelope(_)));
    let err = InboundMessage::decode(r#"{"data":{}}"#).unwrap_err();
    assert!(matches!(err, ProtocolError::Envelope(_)), "missing tag is an envelope error");
}

#[test]
fn test_wrong_payload_shape_is_payload_error() {
    let err = InboundMessage::decode(r#"{"type":"new_report","data":{"id":"R1"}}"#).unwrap_err();
    match err {
        ProtocolError::Payload { tag, .. } => assert_eq!(tag, "new_report"),
        other => panic!("expected payload error, got {other:?}"),
    }
}

#[test]
fn test_activate_command_wire_form() {
    let cmd = Command::activate_swarm();
    let value: serde_json::Value = serde_json::from_str(&cmd.encode().unwrap()).unwrap();
    assert_eq!(value["action"], "activate_swarm");
    assert!(value["timestamp"].is_string());
}

#[test]
fn test_agent_serializes_camel_case() {
    let mut agent = Agent::new("A001", "News", AgentStatus::Active);
    agent.last_ping = 5;
    let value = serde_json::to_value(&agent).unwrap();
    assert_eq!(value["lastPing"], 5);
    assert_eq!(value["status"], "active");
}

#[test]
fn test_roster_ids() {
    assert_eq!(agent_id(1), "A001");
    assert_eq!(agent_id(100), "A100");
    assert_eq!(agent_index("A042"), Some(42));
    assert_eq!(agent_index("A000"), None);
    assert_eq!(agent_index("A101"), None);
    assert_eq!(agent_index("B001"), None);
    assert_eq!(agent_index("A1"), None);
    assert_eq!(role_for_index(1), "Social Media");
    assert_eq!(role_for_index(75), "Predictor");
    assert_eq!(role_for_index(100), "Alert");
}
