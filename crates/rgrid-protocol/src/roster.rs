//! Agent identifiers and role assignment for the 100-agent swarm.
//!
//! Agents are numbered 1..=100 and identified as "A001".."A100". Roles are
//! assigned by contiguous id range.

use crate::constants::SWARM_SIZE;

/// Role label and inclusive index range.
pub const ROLE_RANGES: &[(&str, usize, usize)] = &[
    ("Social Media", 1, 10),
    ("News", 11, 20),
    ("Satellite", 21, 30),
    ("IoT", 31, 40),
    ("Classifier", 41, 50),
    ("Resource", 51, 60),
    ("Logistics", 61, 70),
    ("Predictor", 71, 75),
    ("Dashboard", 76, 85),
    ("Reporter", 86, 95),
    ("Alert", 96, 100),
];

/// Format the identifier of the agent with 1-based index `index`.
pub fn agent_id(index: usize) -> String {
    format!("A{index:03}")
}

/// Parse an identifier back into its 1-based index.
/// Returns None for anything outside "A001".."A100".
pub fn agent_index(id: &str) -> Option<usize> {
    let digits = id.strip_prefix('A')?;
    if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index: usize = digits.parse().ok()?;
    (1..=SWARM_SIZE).contains(&index).then_some(index)
}

/// Role label for the agent with 1-based index `index`.
pub fn role_for_index(index: usize) -> &'static str {
    ROLE_RANGES
        .iter()
        .find(|(_, lo, hi)| (*lo..=*hi).contains(&index))
        .map(|(role, _, _)| *role)
        .unwrap_or("Unassigned")
}
