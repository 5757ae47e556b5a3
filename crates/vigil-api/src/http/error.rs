//! Application error type mapping to HTTP status codes and envelope format.
//!
//! Workflow definition problems are caller mistakes and map to 400.
//! A halted run is NOT an error: the engine returns a structured report
//! for it and the handler responds 200.

use std::collections::HashMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use vigil_types::error::WorkflowError;

use super::response::{ApiErrorDetail, ApiMeta, ApiResponse};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Workflow definition or invocation errors.
    Workflow(WorkflowError),
    /// Request shape errors outside the workflow types.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<WorkflowError> for AppError {
    fn from(e: WorkflowError) -> Self {
        AppError::Workflow(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Workflow(e) => {
                let code = match e {
                    WorkflowError::UnknownWorkflow(_) => "UNKNOWN_WORKFLOW",
                    WorkflowError::MissingContextKey { .. } => "MISSING_CONTEXT_KEY",
                    WorkflowError::EmptySteps => "EMPTY_STEPS",
                    _ => "VALIDATION_ERROR",
                };
                (StatusCode::BAD_REQUEST, code, e.to_string())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let envelope = ApiResponse::<()> {
            data: None,
            meta: ApiMeta {
                request_id: Uuid::now_v7().to_string(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                response_time_ms: 0,
            },
            errors: vec![ApiErrorDetail {
                code: code.to_string(),
                message,
            }],
            links: HashMap::new(),
        };
        let body = serde_json::to_string(&envelope).unwrap_or_default();

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }
}
