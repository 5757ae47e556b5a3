//! Workflow listing and execution handlers.

use std::time::Instant;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use vigil_core::workflow::catalog::WorkflowCatalog;
use vigil_types::workflow::{Workflow, WorkflowReport};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Body for POST /api/v1/workflows/execute.
///
/// Exactly one of `workflow_id` (a predefined workflow) or `workflow`
/// (an inline definition) must be present.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    pub workflow_id: Option<String>,
    pub workflow: Option<Workflow>,
    #[serde(default)]
    pub context: Map<String, Value>,
}

/// Build the workflow sub-router, mounted at `/api/v1`.
pub fn workflow_routes() -> Router<AppState> {
    Router::new()
        .route("/workflows", get(list_workflows))
        .route("/workflows/execute", post(execute_workflow))
}

/// GET /api/v1/workflows - List the predefined workflow ids.
pub async fn list_workflows(
    State(_state): State<AppState>,
) -> Json<ApiResponse<Vec<&'static str>>> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let ids = WorkflowCatalog::ids().to_vec();

    let elapsed = start.elapsed().as_millis() as u64;
    Json(ApiResponse::success(ids, request_id, elapsed).with_link("self", "/api/v1/workflows"))
}

/// POST /api/v1/workflows/execute - Run a workflow to completion.
///
/// The response is 200 even when the run halts partway; the report's
/// `success` field carries the outcome. 400 is reserved for requests the
/// engine never starts (unknown id, missing definition, empty steps).
pub async fn execute_workflow(
    State(state): State<AppState>,
    Json(body): Json<ExecuteRequest>,
) -> Result<Json<ApiResponse<WorkflowReport>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let workflow = resolve_workflow(body)?;
    let report = state.engine.execute(&workflow).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(
        ApiResponse::success(report, request_id, elapsed)
            .with_link("self", "/api/v1/workflows/execute"),
    ))
}

fn resolve_workflow(body: ExecuteRequest) -> Result<Workflow, AppError> {
    match (body.workflow_id, body.workflow) {
        (Some(_), Some(_)) => Err(AppError::Validation(
            "provide either workflowId or workflow, not both".to_string(),
        )),
        (Some(id), None) => Ok(WorkflowCatalog::get(&id, body.context)?),
        (None, Some(mut workflow)) => {
            // Caller context seeds (and overrides) the inline definition's
            for (k, v) in body.context {
                workflow.context.insert(k, v);
            }
            Ok(workflow)
        }
        (None, None) => Err(AppError::Validation(
            "workflowId or workflow is required".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> ExecuteRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn resolves_predefined_by_id() {
        let wf = resolve_workflow(request(json!({ "workflowId": "anomaly-monitor" }))).unwrap();
        assert_eq!(wf.name, "anomaly-monitor");
        assert_eq!(wf.steps.len(), 4);
    }

    #[test]
    fn unknown_id_is_workflow_error() {
        let err = resolve_workflow(request(json!({ "workflowId": "nope" }))).unwrap_err();
        assert!(matches!(err, AppError::Workflow(_)));
    }

    #[test]
    fn inline_workflow_gets_caller_context() {
        let wf = resolve_workflow(request(json!({
            "workflow": {
                "name": "custom",
                "steps": [{ "type": "delay", "name": "Pause", "params": { "ms": 1 } }],
                "context": { "a": 1 }
            },
            "context": { "a": 2, "b": 3 }
        })))
        .unwrap();
        assert_eq!(wf.context["a"], json!(2));
        assert_eq!(wf.context["b"], json!(3));
    }

    #[test]
    fn neither_nor_both_rejected() {
        assert!(matches!(
            resolve_workflow(request(json!({}))),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            resolve_workflow(request(json!({
                "workflowId": "anomaly-monitor",
                "workflow": { "name": "x", "steps": [] }
            }))),
            Err(AppError::Validation(_))
        ));
    }
}
