//! Workflow domain types for Vigil.
//!
//! Defines the wire representation for workflows: an ordered list of steps
//! plus an initial variable context. Callers submit either a predefined
//! workflow id or an inline `Workflow`; the engine returns a
//! `WorkflowReport` with one `StepRecord` per attempted step.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::WorkflowError;

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// The collaborator family (or built-in) a step dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepKind {
    /// Telemetry store: event queries, AI analysis, reference lookups.
    Observer,
    /// Browser-automation bridge (navigate, click, page capture).
    Browser,
    /// Team-coordination hub (broadcast, ask, status).
    ClaudeTeam,
    /// Feedback application.
    Scc,
    /// Wall-clock pause to let UI side effects settle.
    Delay,
    /// Inert context check; computes `pass` without branching.
    Condition,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepKind::Observer => "observer",
            StepKind::Browser => "browser",
            StepKind::ClaudeTeam => "claudeTeam",
            StepKind::Scc => "scc",
            StepKind::Delay => "delay",
            StepKind::Condition => "condition",
        };
        f.write_str(s)
    }
}

/// A single unit of work in a workflow.
///
/// Read-only during execution. `params` is an arbitrarily nested JSON
/// object whose string leaves may contain `{{placeholder}}` tokens resolved
/// against the run's context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// Dispatcher family tag.
    #[serde(rename = "type")]
    pub kind: StepKind,
    /// Human-readable label, used in reporting and broadcast messages.
    pub name: String,
    /// Operation within the dispatcher (e.g. `analyze`, `navigate`).
    /// Unused for `delay` and `condition` steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Step parameters; string values may contain `{{var}}` tokens.
    #[serde(default = "empty_params")]
    pub params: Value,
    /// If true, a failure in this step does not halt the workflow.
    #[serde(default)]
    pub optional: bool,
}

fn empty_params() -> Value {
    Value::Object(Map::new())
}

impl Step {
    /// Build a step with empty params.
    pub fn new(kind: StepKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            action: None,
            params: empty_params(),
            optional: false,
        }
    }

    /// Set the action name.
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Set the params object.
    pub fn params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }

    /// Mark the step optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

/// A named, ordered list of steps plus an initial variable context.
///
/// Built by the caller per invocation; not persisted. Step order is
/// execution order -- no reordering, no parallelism.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    /// Label for logging and broadcast messages.
    pub name: String,
    /// Ordered step sequence.
    pub steps: Vec<Step>,
    /// Seed of the mutable execution context.
    #[serde(default)]
    pub context: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Outcome of one executed step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    /// The step's `name`.
    pub step: String,
    /// Whether the step succeeded.
    pub success: bool,
    /// Step result value (present on success).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error message (present on failure).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepRecord {
    /// Record a successful step.
    pub fn ok(step: impl Into<String>, result: Value) -> Self {
        Self {
            step: step.into(),
            success: true,
            result: Some(result),
            error: None,
        }
    }

    /// Record a failed step.
    pub fn failed(step: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            success: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

/// Final report for one workflow run.
///
/// `success` is false iff execution halted early on a non-optional failure.
/// `completed_steps` counts steps attempted (successful or failed); it
/// always equals `results.len()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowReport {
    pub success: bool,
    pub completed_steps: usize,
    pub results: Vec<StepRecord>,
    /// Final merged context (present on full completion, useful for chaining).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
    /// Halt message naming the stopping step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// Conditions
// ---------------------------------------------------------------------------

/// Operator set for `condition` steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    Contains,
    Exists,
}

impl FromStr for ConditionOperator {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equals" => Ok(Self::Equals),
            "notEquals" => Ok(Self::NotEquals),
            "greaterThan" => Ok(Self::GreaterThan),
            "lessThan" => Ok(Self::LessThan),
            "contains" => Ok(Self::Contains),
            "exists" => Ok(Self::Exists),
            other => Err(WorkflowError::UnknownOperator(other.to_string())),
        }
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Equals => "equals",
            Self::NotEquals => "notEquals",
            Self::GreaterThan => "greaterThan",
            Self::LessThan => "lessThan",
            Self::Contains => "contains",
            Self::Exists => "exists",
        };
        f.write_str(s)
    }
}

/// Parameters of a `condition` step, parsed after interpolation.
///
/// `operator` stays a string at the wire boundary; an unknown value is a
/// fatal configuration error at dispatch, not a deserialize failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    /// Context key to inspect (looked up directly, never interpolated).
    pub field: String,
    /// Operator name (`equals`, `notEquals`, ...).
    pub operator: String,
    /// Comparison value; unused for `exists`.
    #[serde(default)]
    pub value: Value,
}

// ---------------------------------------------------------------------------
// Service health
// ---------------------------------------------------------------------------

/// Liveness classification for one collaborator service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// Reachable, success response.
    Connected,
    /// Reachable, error response.
    Error,
    /// Unreachable (connection refused / timeout).
    Offline,
    /// Persistent-connection collaborator whose flag is down.
    Disconnected,
}

/// Per-service status map (BTreeMap for stable display order).
pub type ServicesHealth = BTreeMap<String, ServiceStatus>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
