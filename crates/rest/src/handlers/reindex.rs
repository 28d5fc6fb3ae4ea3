//! Reindex handler.

use axum::{extract::State, http::StatusCode};
use roster_persistence::core::EmployeeStorage;

use crate::error::RestResult;
use crate::state::AppState;

/// Scans the whole collection through a scroll cursor.
///
/// # HTTP Request
///
/// `GET [base]/employee/reindex`
///
/// # Response
///
/// `200 OK` with an empty body once the scan completes and the cursor is
/// released.
pub async fn reindex_handler<S>(State(state): State<AppState<S>>) -> RestResult<StatusCode>
where
    S: EmployeeStorage,
{
    state.service().reindex().await?;
    Ok(StatusCode::OK)
}
