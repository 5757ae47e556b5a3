//! Service health prober.
//!
//! Probes the HTTP collaborators concurrently with a short deadline so a
//! hung service cannot stall the health surface. The team hub is not
//! probed over HTTP; its state comes from the connected flag the team
//! client maintains.

use std::sync::Arc;
use std::time::Duration;

use vigil_core::service::TeamService;
use vigil_types::workflow::{ServiceStatus, ServicesHealth};

pub struct HealthProber {
    client: reqwest::Client,
    observer_url: String,
    /// The browser bridge is reached through the hub webhook, so its
    /// liveness probe targets the hub's HTTP surface.
    bridge_url: String,
    scc_url: String,
    team: Arc<dyn TeamService>,
    deadline: Duration,
}

impl HealthProber {
    pub fn new(
        observer_url: impl Into<String>,
        bridge_url: impl Into<String>,
        scc_url: impl Into<String>,
        team: Arc<dyn TeamService>,
        deadline: Duration,
    ) -> Self {
        Self {
            client: crate::http::build_client(),
            observer_url: observer_url.into(),
            bridge_url: bridge_url.into(),
            scc_url: scc_url.into(),
            team,
            deadline,
        }
    }

    /// Probe every collaborator and return the status map.
    ///
    /// Never fails: an unreachable service is a status, not an error.
    pub async fn probe(&self) -> ServicesHealth {
        let (observer, browser, scc) = tokio::join!(
            self.probe_url(&self.observer_url),
            self.probe_url(&self.bridge_url),
            self.probe_url(&self.scc_url),
        );
        let team = if self.team.is_connected() {
            ServiceStatus::Connected
        } else {
            ServiceStatus::Disconnected
        };

        let mut health = ServicesHealth::new();
        health.insert("observer".to_string(), observer);
        health.insert("browser".to_string(), browser);
        health.insert("claudeTeam".to_string(), team);
        health.insert("scc".to_string(), scc);
        health
    }

    async fn probe_url(&self, base_url: &str) -> ServiceStatus {
        let request = self.client.get(format!("{base_url}/health")).send();
        match tokio::time::timeout(self.deadline, request).await {
            Ok(Ok(response)) if response.status().is_success() => ServiceStatus::Connected,
            Ok(Ok(response)) => {
                tracing::debug!(url = base_url, status = %response.status(), "health probe non-2xx");
                ServiceStatus::Error
            }
            Ok(Err(e)) => {
                tracing::debug!(url = base_url, error = %e, "health probe failed");
                ServiceStatus::Offline
            }
            Err(_) => {
                tracing::debug!(url = base_url, "health probe timed out");
                ServiceStatus::Offline
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use vigil_core::service::{BoxFuture, DispatchResult};

    struct FlagTeam(bool);

    impl TeamService for FlagTeam {
        fn broadcast(&self, _m: &str, _c: &str) -> BoxFuture<'_, DispatchResult> {
            Box::pin(async { Ok(Value::Null) })
        }
        fn ask_team(&self, _q: &str, _t: Option<&str>) -> BoxFuture<'_, DispatchResult> {
            Box::pin(async { Ok(Value::Null) })
        }
        fn get_status(&self) -> BoxFuture<'_, DispatchResult> {
            Box::pin(async { Ok(Value::Null) })
        }
        fn is_connected(&self) -> bool {
            self.0
        }
    }

    #[tokio::test]
    async fn unreachable_services_report_offline() {
        // Nothing listens on these ports; probes must come back quickly
        // with offline rather than hanging or erroring out.
        let prober = HealthProber::new(
            "http://127.0.0.1:1",
            "http://127.0.0.1:1",
            "http://127.0.0.1:1",
            Arc::new(FlagTeam(false)),
            Duration::from_millis(500),
        );

        let health = prober.probe().await;
        assert_eq!(health.len(), 4);
        assert_eq!(health["observer"], ServiceStatus::Offline);
        assert_eq!(health["browser"], ServiceStatus::Offline);
        assert_eq!(health["scc"], ServiceStatus::Offline);
        assert_eq!(health["claudeTeam"], ServiceStatus::Disconnected);
    }

    #[tokio::test]
    async fn hub_flag_reports_connected() {
        let prober = HealthProber::new(
            "http://127.0.0.1:1",
            "http://127.0.0.1:1",
            "http://127.0.0.1:1",
            Arc::new(FlagTeam(true)),
            Duration::from_millis(100),
        );

        let health = prober.probe().await;
        assert_eq!(health["claudeTeam"], ServiceStatus::Connected);
    }
}
