//! Lookup handlers.
//!
//! - `GET /employee/name/search?lastName=..[&firstName=..]`: exact name match
//! - `POST /employee/interest/search`: full-text match on interests
//! - `GET /employee/address/search/{address}`: full-text match on address

use axum::{
    Json,
    extract::{Path, Query, State},
};
use roster_persistence::core::EmployeeStorage;
use roster_persistence::types::{Employee, SearchHit, SearchHits};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::RestResult;
use crate::state::AppState;

/// Query parameters of the name lookup.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameSearchParams {
    /// Exact last name (required).
    pub last_name: String,
    /// Exact first name; narrows the lookup when present.
    pub first_name: Option<String>,
}

/// Exact name lookup.
///
/// # HTTP Request
///
/// `GET [base]/employee/name/search?lastName=[last]&firstName=[first]`
///
/// A missing `lastName` is rejected with 400.
pub async fn name_search_handler<S>(
    State(state): State<AppState<S>>,
    Query(params): Query<NameSearchParams>,
) -> RestResult<Json<Vec<Employee>>>
where
    S: EmployeeStorage,
{
    debug!(
        last_name = %params.last_name,
        first_name = ?params.first_name,
        "Processing name search"
    );
    let employees = state
        .service()
        .employees_by_name(&params.last_name, params.first_name.as_deref())
        .await?;
    Ok(Json(employees))
}

/// Full-text lookup on interests; the body is a JSON array of keywords.
///
/// # HTTP Request
///
/// `POST [base]/employee/interest/search`
pub async fn interest_search_handler<S>(
    State(state): State<AppState<S>>,
    Json(interests): Json<Vec<String>>,
) -> RestResult<Json<SearchHits<Employee>>>
where
    S: EmployeeStorage,
{
    let hits = state.service().by_interests(interests.as_slice()).await?;
    Ok(Json(hits))
}

/// Full-text lookup on the address, returning raw hits.
///
/// # HTTP Request
///
/// `GET [base]/employee/address/search/{address}`
pub async fn address_search_handler<S>(
    State(state): State<AppState<S>>,
    Path(address): Path<String>,
) -> RestResult<Json<Vec<SearchHit<Value>>>>
where
    S: EmployeeStorage,
{
    let hits = state.service().by_address(&address).await?;
    Ok(Json(hits))
}
