//! Health check endpoint handlers.
//!
//! Provides health and liveness endpoints for monitoring and load balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roster_persistence::core::{Backend, EmployeeStorage};
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// Runs the backend health check; for Elasticsearch this is the cluster
/// health API.
///
/// # HTTP Request
///
/// `GET [base]/health`
///
/// # Response
///
/// - `200 OK` - Backend is reachable and healthy
/// - `503 Service Unavailable` - Backend is unreachable or red
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: EmployeeStorage,
{
    debug!("Processing health check request");

    let backend_name = state.backend_name();
    state
        .storage()
        .health_check()
        .await
        .map_err(|e| RestError::ServiceUnavailable {
            message: e.to_string(),
        })?;

    let health_response = serde_json::json!({
        "status": "healthy",
        "backend": backend_name,
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    Ok((StatusCode::OK, Json(health_response)).into_response())
}

/// Handler for a liveness probe; does not touch the backend.
///
/// # HTTP Request
///
/// `GET [base]/_liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}
