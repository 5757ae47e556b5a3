//! Error taxonomy shared across the Vigil workspace.
//!
//! Two families: `WorkflowError` covers configuration and engine-misuse
//! errors (malformed workflow definitions -- these halt a run regardless of
//! a step's `optional` flag), and `DispatchError` covers remote-call
//! failures (subject to `optional`).

use thiserror::Error;

/// Configuration and engine-misuse errors.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("unknown workflow: '{0}'")]
    UnknownWorkflow(String),

    #[error("unknown {service} action: '{action}'")]
    UnknownAction { service: String, action: String },

    #[error("unknown condition operator: '{0}'")]
    UnknownOperator(String),

    #[error("invalid condition: {0}")]
    InvalidCondition(String),

    #[error("workflow has no steps")]
    EmptySteps,

    #[error("workflow '{workflow}' requires context key '{key}'")]
    MissingContextKey { workflow: String, key: String },
}

/// Remote-call failures surfaced by the service dispatchers.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Network-level failure (connection refused, DNS, TLS).
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status from the collaborator.
    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body could not be parsed.
    #[error("invalid response payload: {0}")]
    Payload(String),

    /// Per-call deadline exceeded.
    #[error("call timed out after {secs}s")]
    Timeout { secs: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_error_messages_name_the_offender() {
        let err = WorkflowError::UnknownAction {
            service: "observer".to_string(),
            action: "bogus".to_string(),
        };
        assert_eq!(err.to_string(), "unknown observer action: 'bogus'");

        let err = WorkflowError::UnknownOperator("like".to_string());
        assert!(err.to_string().contains("like"));

        let err = WorkflowError::MissingContextKey {
            workflow: "athena-capture-analyze".to_string(),
            key: "patientId".to_string(),
        };
        assert!(err.to_string().contains("patientId"));
    }

    #[test]
    fn dispatch_error_messages() {
        let err = DispatchError::Status {
            status: 503,
            body: "maintenance".to_string(),
        };
        assert!(err.to_string().contains("503"));

        let err = DispatchError::Timeout { secs: 30 };
        assert!(err.to_string().contains("30"));
    }
}
