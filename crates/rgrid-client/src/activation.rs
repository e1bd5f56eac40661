//! One-shot REST trigger that asks the backend to start the swarm.
//!
//! The response is logged and discarded. Agent state only ever arrives over
//! the stream.

use tokio::task::JoinHandle;

use rgrid_protocol::DEFAULT_API_URL;

use crate::ClientError;

#[derive(Debug, Clone)]
pub struct ActivationClient {
    http: reqwest::Client,
    api_url: String,
}

impl ActivationClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/swarm/initialize", self.api_url.trim_end_matches('/'))
    }

    /// POST the initialize request and return the decoded body.
    pub async fn trigger(&self) -> Result<serde_json::Value, ClientError> {
        let endpoint = self.endpoint();
        tracing::info!(%endpoint, "Requesting swarm activation");
        let response = self.http.post(&endpoint).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    /// Fire the trigger in the background. Failures are logged, never surfaced.
    pub fn spawn_trigger(&self) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            match this.trigger().await {
                Ok(body) => tracing::info!(response = %body, "Swarm activation acknowledged"),
                Err(e) => tracing::warn!(error = %e, "Swarm activation request failed"),
            }
        })
    }
}

impl Default for ActivationClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
