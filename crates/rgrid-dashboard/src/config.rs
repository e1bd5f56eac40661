//! Dashboard configuration.
//!
//! Precedence, lowest first: built-in defaults, the TOML file, environment
//! variables, command-line flags. Environment and flags are folded together
//! by clap before reaching `apply_overrides`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use rgrid_client::{ClientConfig, ReconnectPolicy};
use rgrid_protocol::{
    ACTIVATION_DELAY_MS, DEFAULT_API_URL, DEFAULT_WS_URL, RECONNECT_DELAY_MS, STATS_REFRESH_MS,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Swarm status stream.
    pub ws_url: String,
    /// REST base, without a trailing slash.
    pub api_url: String,
    pub reconnect_delay_ms: u64,
    /// Consecutive failed attempts before giving up. Absent means forever.
    pub max_reconnect_attempts: Option<u32>,
    pub stats_refresh_ms: u64,
    pub activation_delay_ms: u64,
    /// Mock swarm population and random throughput.
    pub simulation_mode: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            ws_url: DEFAULT_WS_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            reconnect_delay_ms: RECONNECT_DELAY_MS,
            max_reconnect_attempts: None,
            stats_refresh_ms: STATS_REFRESH_MS,
            activation_delay_ms: ACTIVATION_DELAY_MS,
            simulation_mode: false,
        }
    }
}

/// Values taken from flags or their environment variables.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub ws_url: Option<String>,
    pub api_url: Option<String>,
    pub simulation_mode: Option<bool>,
}

impl DashboardConfig {
    /// `<config_dir>/resiliencegrid/dashboard.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("resiliencegrid").join("dashboard.toml"))
    }

    /// Load from an explicit path, which must exist, or from the default
    /// location, where a missing file means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: DashboardConfig = toml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded dashboard config");
        Ok(config)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(url) = overrides.ws_url {
            self.ws_url = url;
        }
        if let Some(url) = overrides.api_url {
            self.api_url = url;
        }
        if let Some(simulation) = overrides.simulation_mode {
            self.simulation_mode = simulation;
        }
    }

    pub fn reconnect_policy(&self) -> ReconnectPolicy {
        ReconnectPolicy {
            delay: Duration::from_millis(self.reconnect_delay_ms),
            max_attempts: self.max_reconnect_attempts,
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            url: self.ws_url.clone(),
            reconnect: self.reconnect_policy(),
        }
    }

    pub fn stats_refresh(&self) -> Duration {
        Duration::from_millis(self.stats_refresh_ms)
    }

    pub fn activation_delay(&self) -> Duration {
        Duration::from_millis(self.activation_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_local_backend() {
        let config = DashboardConfig::default();
        assert_eq!(config.ws_url, "ws://localhost:8000/api/v1/ws/swarm");
        assert_eq!(config.api_url, "http://localhost:8000/api/v1");
        assert_eq!(config.reconnect_delay_ms, 3000);
        assert_eq!(config.max_reconnect_attempts, None);
        assert_eq!(config.stats_refresh_ms, 2000);
        assert_eq!(config.activation_delay_ms, 500);
        assert!(!config.simulation_mode);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.toml");
        std::fs::write(
            &path,
            "ws_url = \"ws://grid.example:9000/ws\"\nsimulation_mode = true\nmax_reconnect_attempts = 5\n",
        )
        .unwrap();

        let config = DashboardConfig::load(Some(&path)).unwrap();
        assert_eq!(config.ws_url, "ws://grid.example:9000/ws");
        assert!(config.simulation_mode);
        assert_eq!(config.max_reconnect_attempts, Some(5));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.reconnect_delay_ms, 3000);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(DashboardConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.toml");
        std::fs::write(&path, "reconnect_delay_ms = \"soon\"").unwrap();
        let err = DashboardConfig::load(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("parsing config file"));
    }

    #[test]
    fn test_overrides_win() {
        let mut config = DashboardConfig::default();
        config.apply_overrides(ConfigOverrides {
            ws_url: Some("ws://other/ws".into()),
            api_url: None,
            simulation_mode: Some(true),
        });
        assert_eq!(config.ws_url, "ws://other/ws");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.simulation_mode);
    }

    #[test]
    fn test_reconnect_policy_from_config() {
        let config = DashboardConfig {
            reconnect_delay_ms: 1500,
            max_reconnect_attempts: Some(4),
            ..Default::default()
        };
        let policy = config.reconnect_policy();
        assert_eq!(policy.delay, Duration::from_millis(1500));
        assert_eq!(policy.max_attempts, Some(4));
        assert_eq!(config.client_config().url, config.ws_url);
    }
}
