//! Collaborator ports: the traits the orchestration core calls out through.
//!
//! Each external collaborator family (observer, browser bridge, team hub,
//! SCC) gets an object-safe trait with boxed-future methods so the engine
//! can hold `Arc<dyn ...>` handles injected at construction -- no ambient
//! singletons, deterministic testing with fakes.
//!
//! Action names arriving on the wire are parsed into per-family enums here;
//! an unknown action is a fatal configuration error, not a runtime failure.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;

use serde_json::Value;

use vigil_types::error::{DispatchError, WorkflowError};

/// Boxed future alias used by the object-safe collaborator traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Result of one dispatcher call: the parsed response body.
pub type DispatchResult = Result<Value, DispatchError>;

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// Telemetry store ("observer"): event queries, AI analysis, references.
pub trait ObserverService: Send + Sync {
    /// Ask the store's AI provider to analyze recent events.
    fn analyze(&self, params: Value) -> BoxFuture<'_, DispatchResult>;

    /// Query stored telemetry events.
    fn get_events(&self, params: Value) -> BoxFuture<'_, DispatchResult>;

    /// Fetch reference recommendations.
    fn get_references(&self, params: Value) -> BoxFuture<'_, DispatchResult>;

    /// Store a single telemetry event.
    fn store_event(&self, event: Value) -> BoxFuture<'_, DispatchResult>;
}

/// Browser-automation bridge. The action set is open (navigate, click,
/// athenaCapture, ...); commands are forwarded verbatim.
pub trait BrowserService: Send + Sync {
    fn command(&self, action: &str, params: Value) -> BoxFuture<'_, DispatchResult>;
}

/// Team-coordination hub: broadcasts, questions, status.
pub trait TeamService: Send + Sync {
    /// Fire-and-forget broadcast; resolves once the send succeeds.
    fn broadcast(&self, message: &str, category: &str) -> BoxFuture<'_, DispatchResult>;

    /// Pose a question to the team; any answer arrives out of band.
    fn ask_team(&self, question: &str, target: Option<&str>) -> BoxFuture<'_, DispatchResult>;

    /// Current hub status object.
    fn get_status(&self) -> BoxFuture<'_, DispatchResult>;

    /// Connection-state flag (persistent connection, not a fresh probe).
    fn is_connected(&self) -> bool;
}

/// SCC feedback application.
pub trait SccService: Send + Sync {
    fn send_feedback(&self, params: Value) -> BoxFuture<'_, DispatchResult>;

    fn get_health(&self) -> BoxFuture<'_, DispatchResult>;
}

// ---------------------------------------------------------------------------
// Action enums
// ---------------------------------------------------------------------------

/// Operations on the observer dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverAction {
    Analyze,
    GetEvents,
    GetReferences,
    StoreEvent,
}

impl FromStr for ObserverAction {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "analyze" => Ok(Self::Analyze),
            "getEvents" => Ok(Self::GetEvents),
            "getReferences" => Ok(Self::GetReferences),
            "storeEvent" => Ok(Self::StoreEvent),
            other => Err(WorkflowError::UnknownAction {
                service: "observer".to_string(),
                action: other.to_string(),
            }),
        }
    }
}

/// Operations on the team-hub dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamAction {
    Broadcast,
    AskTeam,
    GetStatus,
}

impl FromStr for TeamAction {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "broadcast" => Ok(Self::Broadcast),
            "askTeam" => Ok(Self::AskTeam),
            "getStatus" => Ok(Self::GetStatus),
            other => Err(WorkflowError::UnknownAction {
                service: "claudeTeam".to_string(),
                action: other.to_string(),
            }),
        }
    }
}

/// Operations on the SCC dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SccAction {
    SendFeedback,
    GetHealth,
}

impl FromStr for SccAction {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sendFeedback" => Ok(Self::SendFeedback),
            "getHealth" => Ok(Self::GetHealth),
            other => Err(WorkflowError::UnknownAction {
                service: "scc".to_string(),
                action: other.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Notification sink
// ---------------------------------------------------------------------------

/// Broadcast category for a workflow notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeCategory {
    Update,
    Blocker,
}

impl fmt::Display for NoticeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Update => f.write_str("update"),
            Self::Blocker => f.write_str("blocker"),
        }
    }
}

/// Observational side-channel event emitted by the engine. Never affects
/// control flow.
#[derive(Debug, Clone)]
pub enum WorkflowNotice {
    WorkflowStarted { workflow: String },
    StepStarted { workflow: String, step: String },
    StepCompleted { workflow: String, step: String },
    StepFailed { workflow: String, step: String, error: String },
    WorkflowCompleted { workflow: String, completed_steps: usize },
    WorkflowHalted { workflow: String, step: String },
}

impl WorkflowNotice {
    /// Failures and halts are blockers; everything else is an update.
    pub fn category(&self) -> NoticeCategory {
        match self {
            Self::StepFailed { .. } | Self::WorkflowHalted { .. } => NoticeCategory::Blocker,
            _ => NoticeCategory::Update,
        }
    }

    /// Human-readable broadcast line.
    pub fn message(&self) -> String {
        match self {
            Self::WorkflowStarted { workflow } => {
                format!("Workflow '{workflow}' started")
            }
            Self::StepStarted { workflow, step } => {
                format!("[{workflow}] starting step: {step}")
            }
            Self::StepCompleted { workflow, step } => {
                format!("[{workflow}] step completed: {step}")
            }
            Self::StepFailed { workflow, step, error } => {
                format!("[{workflow}] step failed: {step} -- {error}")
            }
            Self::WorkflowCompleted { workflow, completed_steps } => {
                format!("Workflow '{workflow}' completed ({completed_steps} steps)")
            }
            Self::WorkflowHalted { workflow, step } => {
                format!("Workflow '{workflow}' stopped at step: {step}")
            }
        }
    }
}

/// One-way notification sink. Implementations must swallow their own send
/// failures; a failed notify never fails the workflow it annotates.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: WorkflowNotice) -> BoxFuture<'_, ()>;
}

/// Notifier that only logs. Used by tests and by callers without a hub.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, notice: WorkflowNotice) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            tracing::debug!(category = %notice.category(), "{}", notice.message());
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observer_actions_parse() {
        assert_eq!("analyze".parse::<ObserverAction>().unwrap(), ObserverAction::Analyze);
        assert_eq!("getEvents".parse::<ObserverAction>().unwrap(), ObserverAction::GetEvents);
        assert_eq!(
            "getReferences".parse::<ObserverAction>().unwrap(),
            ObserverAction::GetReferences
        );
        assert_eq!("storeEvent".parse::<ObserverAction>().unwrap(), ObserverAction::StoreEvent);
    }

    #[test]
    fn unknown_observer_action_names_the_action() {
        let err = "bogus".parse::<ObserverAction>().unwrap_err();
        assert_eq!(err.to_string(), "unknown observer action: 'bogus'");
    }

    #[test]
    fn team_and_scc_actions_parse() {
        assert_eq!("broadcast".parse::<TeamAction>().unwrap(), TeamAction::Broadcast);
        assert_eq!("askTeam".parse::<TeamAction>().unwrap(), TeamAction::AskTeam);
        assert_eq!("getStatus".parse::<TeamAction>().unwrap(), TeamAction::GetStatus);
        assert_eq!("sendFeedback".parse::<SccAction>().unwrap(), SccAction::SendFeedback);
        assert_eq!("getHealth".parse::<SccAction>().unwrap(), SccAction::GetHealth);
        assert!("status".parse::<TeamAction>().is_err());
    }

    #[test]
    fn notice_categories() {
        let n = WorkflowNotice::StepFailed {
            workflow: "wf".to_string(),
            step: "s".to_string(),
            error: "boom".to_string(),
        };
        assert_eq!(n.category(), NoticeCategory::Blocker);
        assert!(n.message().contains("boom"));

        let n = WorkflowNotice::WorkflowCompleted {
            workflow: "wf".to_string(),
            completed_steps: 4,
        };
        assert_eq!(n.category(), NoticeCategory::Update);
        assert!(n.message().contains("4 steps"));
    }
}
