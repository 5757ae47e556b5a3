//! Application state wiring the engine to its HTTP collaborators.
//!
//! AppState pins the core's service ports to the concrete infra clients
//! and is shared by both CLI commands and REST API handlers.

use std::sync::Arc;
use std::time::Duration;

use vigil_core::service::Notifier;
use vigil_core::workflow::engine::WorkflowEngine;
use vigil_core::workflow::step_runner::StepRunner;
use vigil_infra::health::HealthProber;
use vigil_infra::http::{BridgeBrowser, HttpObserver, HttpScc, HttpTeam};
use vigil_infra::notify::TeamNotifier;
use vigil_types::config::HubConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<WorkflowEngine>,
    pub prober: Arc<HealthProber>,
    pub config: HubConfig,
}

impl AppState {
    /// Wire the concrete clients into the engine.
    pub fn init(config: HubConfig) -> Self {
        let observer = Arc::new(HttpObserver::new(&config.observer_url));
        let browser = Arc::new(BridgeBrowser::new(&config.team_hub_url));
        let team = Arc::new(HttpTeam::new(&config.team_hub_url));
        let scc = Arc::new(HttpScc::new(&config.scc_url));

        let runner = StepRunner::new(
            observer,
            browser,
            team.clone(),
            scc,
            Duration::from_secs(config.step_timeout_secs),
        );
        let notifier: Arc<dyn Notifier> = Arc::new(TeamNotifier::new(team.clone()));
        let engine = Arc::new(WorkflowEngine::new(runner, notifier));

        let prober = Arc::new(HealthProber::new(
            &config.observer_url,
            &config.team_hub_url,
            &config.scc_url,
            team,
            Duration::from_secs(config.probe_timeout_secs),
        ));

        Self {
            engine,
            prober,
            config,
        }
    }
}
