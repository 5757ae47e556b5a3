//! Step dispatch: one step in, one result (or step-level failure) out.
//!
//! `StepRunner` interpolates a step's params against the run context and
//! routes by step kind: the four service kinds go to the injected
//! collaborator handles (each call wrapped in a deadline), `delay` and
//! `condition` are handled locally. No retries, no partial-failure
//! suppression -- every failure propagates to the engine.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Map, Value};

use vigil_types::error::{DispatchError, WorkflowError};
use vigil_types::workflow::{Condition, Step, StepKind};

use crate::service::{
    BrowserService, DispatchResult, ObserverAction, ObserverService, SccAction, SccService,
    TeamAction, TeamService,
};

use super::condition;
use super::interpolate::interpolate;

/// Default pause for `delay` steps when `params.ms` is absent.
pub const DEFAULT_DELAY_MS: u64 = 1000;

// ---------------------------------------------------------------------------
// StepError
// ---------------------------------------------------------------------------

/// Failure of a single step.
///
/// Configuration errors indicate a malformed workflow definition and halt
/// the run regardless of the step's `optional` flag; dispatch failures are
/// ordinary runtime failures subject to it.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error(transparent)]
    Config(#[from] WorkflowError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl StepError {
    /// True for malformed-definition errors that ignore `optional`.
    pub fn is_config(&self) -> bool {
        matches!(self, StepError::Config(_))
    }
}

// ---------------------------------------------------------------------------
// StepRunner
// ---------------------------------------------------------------------------

/// Executes individual steps by dispatching to the collaborator ports.
///
/// Holds no state across calls; the handles are injected once at
/// construction.
pub struct StepRunner {
    observer: Arc<dyn ObserverService>,
    browser: Arc<dyn BrowserService>,
    team: Arc<dyn TeamService>,
    scc: Arc<dyn SccService>,
    /// Deadline attached to every dispatcher call. `delay` sleeps are
    /// exempt so a long settle-pause cannot trip the network deadline.
    call_deadline: Duration,
}

impl StepRunner {
    pub fn new(
        observer: Arc<dyn ObserverService>,
        browser: Arc<dyn BrowserService>,
        team: Arc<dyn TeamService>,
        scc: Arc<dyn SccService>,
        call_deadline: Duration,
    ) -> Self {
        Self {
            observer,
            browser,
            team,
            scc,
            call_deadline,
        }
    }

    /// Run one step against the current context and return its result.
    pub async fn run(&self, step: &Step, context: &Map<String, Value>) -> Result<Value, StepError> {
        let params = interpolate(&step.params, context);

        match step.kind {
            StepKind::Observer => {
                let action: ObserverAction = self.action_of(step)?.parse()?;
                let fut = match action {
                    ObserverAction::Analyze => self.observer.analyze(params),
                    ObserverAction::GetEvents => self.observer.get_events(params),
                    ObserverAction::GetReferences => self.observer.get_references(params),
                    ObserverAction::StoreEvent => self.observer.store_event(params),
                };
                Ok(self.with_deadline(fut).await?)
            }
            StepKind::Browser => {
                // Open action set: forwarded verbatim through the bridge
                let action = self.action_of(step)?;
                let fut = self.browser.command(action, params);
                Ok(self.with_deadline(fut).await?)
            }
            StepKind::ClaudeTeam => {
                let action: TeamAction = self.action_of(step)?.parse()?;
                let fut = match action {
                    TeamAction::Broadcast => {
                        let message = str_param(&params, "message");
                        let category = params
                            .get("category")
                            .and_then(Value::as_str)
                            .unwrap_or("update")
                            .to_string();
                        self.team.broadcast(&message, &category)
                    }
                    TeamAction::AskTeam => {
                        let question = str_param(&params, "question");
                        let target = params
                            .get("target")
                            .and_then(Value::as_str)
                            .map(|s| s.to_string());
                        self.team.ask_team(&question, target.as_deref())
                    }
                    TeamAction::GetStatus => self.team.get_status(),
                };
                Ok(self.with_deadline(fut).await?)
            }
            StepKind::Scc => {
                let action: SccAction = self.action_of(step)?.parse()?;
                let fut = match action {
                    SccAction::SendFeedback => self.scc.send_feedback(params),
                    SccAction::GetHealth => self.scc.get_health(),
                };
                Ok(self.with_deadline(fut).await?)
            }
            StepKind::Delay => {
                let ms = delay_ms(&params);
                tokio::time::sleep(Duration::from_millis(ms)).await;
                Ok(json!({ "delayed": ms }))
            }
            StepKind::Condition => {
                let cond: Condition = serde_json::from_value(params).map_err(|e| {
                    WorkflowError::InvalidCondition(format!(
                        "step '{}': {e}",
                        step.name
                    ))
                })?;
                let pass = condition::evaluate(&cond, context)?;
                Ok(json!({ "pass": pass }))
            }
        }
    }

    /// The step's action string; absence is a configuration error.
    fn action_of<'a>(&self, step: &'a Step) -> Result<&'a str, WorkflowError> {
        step.action
            .as_deref()
            .filter(|a| !a.is_empty())
            .ok_or_else(|| WorkflowError::UnknownAction {
                service: step.kind.to_string(),
                action: String::new(),
            })
    }

    /// Wrap a dispatcher call in the per-call deadline.
    async fn with_deadline(
        &self,
        fut: impl Future<Output = DispatchResult>,
    ) -> Result<Value, DispatchError> {
        match tokio::time::timeout(self.call_deadline, fut).await {
            Ok(result) => result,
            Err(_) => Err(DispatchError::Timeout {
                secs: self.call_deadline.as_secs(),
            }),
        }
    }
}

/// The pause for a `delay` step. Interpolation yields strings, so a
/// templated `ms` arrives as `"2000"`; numeric strings count.
fn delay_ms(params: &Value) -> u64 {
    match params.get("ms") {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(DEFAULT_DELAY_MS),
        Some(Value::String(s)) => s.parse().unwrap_or(DEFAULT_DELAY_MS),
        _ => DEFAULT_DELAY_MS,
    }
}

fn str_param(params: &Value, key: &str) -> String {
    params
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
