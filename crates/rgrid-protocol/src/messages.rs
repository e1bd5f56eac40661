use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::types::{deserialize_opt_agent_id, Agent, AgentStatus, Disaster, Report};

/// Tags carried in the `type` field of inbound envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Full agent snapshot, sent once on connect
    SwarmStatus,
    /// Periodic batched refresh of every agent
    AgentStatusBatch,
    /// A single agent changed status
    AgentStatus,
    DisasterDetected,
    NewReport,
    /// Free-form notice, logged only
    System,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SwarmStatus => "swarm_status",
            Self::AgentStatusBatch => "agent_status_batch",
            Self::AgentStatus => "agent_status",
            Self::DisasterDetected => "disaster_detected",
            Self::NewReport => "new_report",
            Self::System => "system",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "swarm_status" => Some(Self::SwarmStatus),
            "agent_status_batch" => Some(Self::AgentStatusBatch),
            "agent_status" => Some(Self::AgentStatus),
            "disaster_detected" => Some(Self::DisasterDetected),
            "new_report" => Some(Self::NewReport),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

/// A decoded inbound message.
///
/// Decoding fails closed: an unrecognized tag, or a recognized tag whose
/// payload field is absent, becomes `Ignored` rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    /// Replace the whole agent collection (already flattened).
    Snapshot(Vec<Agent>),
    /// Replace the whole agent collection (already flattened).
    Batch(Vec<Agent>),
    AgentStatus { id: String, status: AgentStatus },
    Disaster(Disaster),
    Report(Report),
    System { message: String },
    Ignored { tag: String },
}

impl InboundMessage {
    /// Decode one text frame.
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        let envelope: RawEnvelope = serde_json::from_str(text).map_err(ProtocolError::Envelope)?;
        let Some(kind) = MessageKind::from_tag(&envelope.tag) else {
            return Ok(Self::Ignored { tag: envelope.tag });
        };

        if kind == MessageKind::System {
            return Ok(Self::System {
                message: envelope.message.unwrap_or_default(),
            });
        }

        let Some(data) = envelope.data else {
            return Ok(Self::Ignored { tag: envelope.tag });
        };
        let payload_err = |source| ProtocolError::Payload {
            tag: envelope.tag.clone(),
            source,
        };

        let msg = match kind {
            MessageKind::SwarmStatus => {
                let payload: SnapshotPayload = serde_json::from_value(data).map_err(payload_err)?;
                match payload.agent_grid.or(payload.agents) {
                    Some(cells) => Self::Snapshot(flatten_grid(cells)),
                    None => Self::Ignored { tag: envelope.tag.clone() },
                }
            }
            MessageKind::AgentStatusBatch => {
                let payload: BatchPayload = serde_json::from_value(data).map_err(payload_err)?;
                match payload.agents {
                    Some(cells) => Self::Batch(flatten_grid(cells)),
                    None => Self::Ignored { tag: envelope.tag.clone() },
                }
            }
            MessageKind::AgentStatus => {
                let payload: StatusPayload = serde_json::from_value(data).map_err(payload_err)?;
                match (payload.id, payload.status) {
                    (Some(id), Some(status)) if !id.is_empty() => Self::AgentStatus { id, status },
                    _ => Self::Ignored { tag: envelope.tag.clone() },
                }
            }
            MessageKind::DisasterDetected => {
                Self::Disaster(serde_json::from_value(data).map_err(payload_err)?)
            }
            MessageKind::NewReport => Self::Report(serde_json::from_value(data).map_err(payload_err)?),
            MessageKind::System => Self::System {
                message: envelope.message.unwrap_or_default(),
            },
        };
        Ok(msg)
    }

    /// Wire tag this message was decoded from.
    pub fn tag(&self) -> &str {
        match self {
            Self::Snapshot(_) => MessageKind::SwarmStatus.as_str(),
            Self::Batch(_) => MessageKind::AgentStatusBatch.as_str(),
            Self::AgentStatus { .. } => MessageKind::AgentStatus.as_str(),
            Self::Disaster(_) => MessageKind::DisasterDetected.as_str(),
            Self::Report(_) => MessageKind::NewReport.as_str(),
            Self::System { .. } => MessageKind::System.as_str(),
            Self::Ignored { tag } => tag,
        }
    }
}

/// Commands sent from the dashboard to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    ActivateSwarm {
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl Command {
    pub fn activate_swarm() -> Self {
        Self::ActivateSwarm {
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type")]
    tag: String,
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SnapshotPayload {
    #[serde(default)]
    agent_grid: Option<Vec<GridCell>>,
    #[serde(default)]
    agents: Option<Vec<GridCell>>,
}

#[derive(Debug, Deserialize)]
struct BatchPayload {
    #[serde(default)]
    agents: Option<Vec<GridCell>>,
}

#[derive(Debug, Deserialize)]
struct StatusPayload {
    #[serde(default, deserialize_with = "deserialize_opt_agent_id")]
    id: Option<String>,
    #[serde(default)]
    status: Option<AgentStatus>,
}

/// One element of an agent list: either a whole grid row or a lone agent.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GridCell {
    Row(Vec<Agent>),
    Single(Agent),
}

/// Row-major flattening of a grid, flat list, or mix of both.
fn flatten_grid(cells: Vec<GridCell>) -> Vec<Agent> {
    let mut agents = Vec::with_capacity(cells.len());
    for cell in cells {
        match cell {
            GridCell::Row(row) => agents.extend(row),
            GridCell::Single(agent) => agents.push(agent),
        }
    }
    agents
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for kind in [
            MessageKind::SwarmStatus,
            MessageKind::AgentStatusBatch,
            MessageKind::AgentStatus,
            MessageKind::DisasterDetected,
            MessageKind::NewReport,
            MessageKind::System,
        ] {
            assert_eq!(MessageKind::from_tag(kind.as_str()), Some(kind));
        }
        assert_eq!(MessageKind::from_tag("heartbeat"), None);
    }

    #[test]
    fn test_mixed_grid_flattens_in_order() {
        let cells: Vec<GridCell> = serde_json::from_str(
            r#"[[{"id":"A001"},{"id":"A002"}],{"id":"A003"},[{"id":"A004"}]]"#,
        )
        .unwrap();
        let ids: Vec<String> = flatten_grid(cells).into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["A001", "A002", "A003", "A004"]);
    }
}
