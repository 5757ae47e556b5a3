//! Hub configuration types.
//!
//! `HubConfig` represents the top-level `config.toml` that points the
//! orchestrator at its collaborator services and sets call deadlines.
//! Loaded from `~/.vigil/config.toml` (or `VIGIL_CONFIG`). All fields have
//! sensible defaults so an empty file works out of the box.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Vigil hub.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    /// Base URL of the telemetry store (observer).
    #[serde(default = "default_observer_url")]
    pub observer_url: String,

    /// Base URL of the team-coordination hub (also carries the
    /// browser-automation webhook).
    #[serde(default = "default_team_hub_url")]
    pub team_hub_url: String,

    /// Base URL of the SCC feedback application.
    #[serde(default = "default_scc_url")]
    pub scc_url: String,

    /// Deadline attached to every dispatcher call, in seconds.
    #[serde(default = "default_step_timeout_secs")]
    pub step_timeout_secs: u64,

    /// Deadline for health probes, in seconds.
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    /// Address the REST API binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

fn default_observer_url() -> String {
    "http://127.0.0.1:3002".to_string()
}

fn default_team_hub_url() -> String {
    "http://127.0.0.1:3005".to_string()
}

fn default_scc_url() -> String {
    "http://127.0.0.1:3001".to_string()
}

fn default_step_timeout_secs() -> u64 {
    30
}

fn default_probe_timeout_secs() -> u64 {
    5
}

fn default_listen_addr() -> String {
    "127.0.0.1:4600".to_string()
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            observer_url: default_observer_url(),
            team_hub_url: default_team_hub_url(),
            scc_url: default_scc_url(),
            step_timeout_secs: default_step_timeout_secs(),
            probe_timeout_secs: default_probe_timeout_secs(),
            listen_addr: default_listen_addr(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: HubConfig = toml::from_str("").unwrap();
        assert_eq!(config.observer_url, "http://127.0.0.1:3002");
        assert_eq!(config.step_timeout_secs, 30);
        assert_eq!(config.probe_timeout_secs, 5);
        assert_eq!(config.listen_addr, "127.0.0.1:4600");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml_str = r#"
observer_url = "http://telemetry.internal:8080"
step_timeout_secs = 10
"#;
        let config: HubConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.observer_url, "http://telemetry.internal:8080");
        assert_eq!(config.step_timeout_secs, 10);
        // Untouched fields keep defaults
        assert_eq!(config.team_hub_url, "http://127.0.0.1:3005");
        assert_eq!(config.scc_url, "http://127.0.0.1:3001");
    }

    #[test]
    fn toml_roundtrip() {
        let config = HubConfig::default();
        let s = toml::to_string(&config).unwrap();
        let parsed: HubConfig = toml::from_str(&s).unwrap();
        assert_eq!(parsed.listen_addr, config.listen_addr);
        assert_eq!(parsed.step_timeout_secs, config.step_timeout_secs);
    }
}
