//! Save handler.

use axum::{Json, extract::State};
use roster_persistence::core::EmployeeStorage;
use roster_persistence::types::Employee;
use tracing::debug;

use crate::error::RestResult;
use crate::state::AppState;

/// Inserts or overwrites an employee record.
///
/// A body without `id` creates a new record with a generated id; a body with
/// an existing `id` replaces that record.
///
/// # HTTP Request
///
/// `POST [base]/employee/`
///
/// # Response
///
/// The saved record, including its id.
pub async fn save_handler<S>(
    State(state): State<AppState<S>>,
    Json(employee): Json<Employee>,
) -> RestResult<Json<Employee>>
where
    S: EmployeeStorage,
{
    debug!(id = ?employee.id, "Processing save request");
    let saved = state.service().save_employee(employee).await?;
    Ok(Json(saved))
}
