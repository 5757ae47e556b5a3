//! Collaborator health handlers.

use std::time::Instant;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use vigil_types::workflow::ServicesHealth;

use crate::http::response::ApiResponse;
use crate::state::AppState;

pub fn service_routes() -> Router<AppState> {
    Router::new().route("/services", get(get_services))
}

/// GET /api/v1/services - Probe every collaborator and report status.
pub async fn get_services(State(state): State<AppState>) -> Json<ApiResponse<ServicesHealth>> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let health = state.prober.probe().await;

    let elapsed = start.elapsed().as_millis() as u64;
    Json(ApiResponse::success(health, request_id, elapsed).with_link("self", "/api/v1/services"))
}
