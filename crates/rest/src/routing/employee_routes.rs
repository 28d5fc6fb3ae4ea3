//! Employee route configuration.

use axum::{
    Router,
    routing::{get, post},
};
use roster_persistence::core::EmployeeStorage;

use crate::handlers;
use crate::state::AppState;

/// Creates all routes of the employee API.
///
/// # Routes
///
/// ## Operational
/// - `GET /health` - Backend health check
/// - `GET /_liveness` - Liveness probe
///
/// ## Employee
/// - `POST /employee/` - Save a record (also `/employee`)
/// - `GET /employee/name/search` - Exact name lookup
/// - `POST /employee/interest/search` - Interest lookup
/// - `GET /employee/address/search/{address}` - Address lookup
/// - `GET /employee/age/avg` - Average age
/// - `GET /employee/age/retirement-within-year` - Retirement count
/// - `GET /employee/gender/salaries/histogram` - Salary histogram per gender
/// - `GET /employee/gender/salaries/avg` - Average salary per gender
/// - `GET /employee/reindex` - Full collection scan
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: EmployeeStorage + 'static,
{
    Router::new()
        // Operational routes
        .route("/health", get(handlers::health_handler::<S>))
        .route("/_liveness", get(handlers::liveness_handler))
        // Employee routes
        .route("/employee/", post(handlers::save_handler::<S>))
        .route("/employee", post(handlers::save_handler::<S>))
        .route(
            "/employee/name/search",
            get(handlers::name_search_handler::<S>),
        )
        .route(
            "/employee/interest/search",
            post(handlers::interest_search_handler::<S>),
        )
        .route(
            "/employee/address/search/{address}",
            get(handlers::address_search_handler::<S>),
        )
        .route("/employee/age/avg", get(handlers::average_age_handler::<S>))
        .route(
            "/employee/age/retirement-within-year",
            get(handlers::retirement_handler::<S>),
        )
        .route(
            "/employee/gender/salaries/histogram",
            get(handlers::salary_histogram_handler::<S>),
        )
        .route(
            "/employee/gender/salaries/avg",
            get(handlers::average_salary_handler::<S>),
        )
        .route("/employee/reindex", get(handlers::reindex_handler::<S>))
        // State
        .with_state(state)
}
