use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::roster::agent_id;

/// Operational status of a monitoring agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// Waiting for work. The backend reports this as `standby`, and
    /// unreachable agents as `offline`.
    #[default]
    #[serde(alias = "standby", alias = "offline")]
    Idle,
    /// Deployed and monitoring
    Active,
    /// Raised an alert
    Alert,
    /// Working through a task
    Processing,
    /// Failed
    Error,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Active => "active",
            Self::Alert => "alert",
            Self::Processing => "processing",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A simulated monitoring unit in the swarm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Stable identifier, "A001" through "A100". The backend may send the
    /// bare 1-based index instead.
    #[serde(deserialize_with = "deserialize_agent_id")]
    pub id: String,
    #[serde(default, alias = "type")]
    pub role: String,
    #[serde(default)]
    pub status: AgentStatus,
    /// Last heartbeat, epoch milliseconds.
    #[serde(default)]
    pub last_ping: i64,
}

impl Agent {
    pub fn new(id: impl Into<String>, role: impl Into<String>, status: AgentStatus) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
            status,
            last_ping: 0,
        }
    }
}

/// Category of a disaster event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisasterKind {
    Fire,
    Flood,
    Earthquake,
    #[serde(other)]
    Other,
}

impl DisasterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fire => "fire",
            Self::Flood => "flood",
            Self::Earthquake => "earthquake",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for DisasterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fire" => Ok(Self::Fire),
            "flood" => Ok(Self::Flood),
            "earthquake" | "quake" => Ok(Self::Earthquake),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown disaster kind '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// A disaster marker, either streamed by the backend or dropped locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disaster {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DisasterKind,
    pub location: Location,
    pub severity: Severity,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Radius-equivalent of the affected area, in km.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_area: Option<f64>,
}

/// A situation report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Parse a wire timestamp. RFC 3339 first, then an offset-less ISO 8601
/// date-time taken as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => Ok(ts.with_timezone(&Utc)),
        Err(_) => Ok(raw.parse::<NaiveDateTime>()?.and_utc()),
    }
}

fn deserialize_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(d)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// Agent id as it appears on the wire.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireAgentId {
    Text(String),
    Index(usize),
}

impl From<WireAgentId> for String {
    fn from(id: WireAgentId) -> Self {
        match id {
            WireAgentId::Text(id) => id,
            WireAgentId::Index(index) => agent_id(index),
        }
    }
}

fn deserialize_agent_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    WireAgentId::deserialize(d).map(String::from)
}

pub(crate) fn deserialize_opt_agent_id<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<WireAgentId>::deserialize(d)?.map(String::from))
}
