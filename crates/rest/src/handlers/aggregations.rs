//! Aggregation handlers.

use axum::{Json, extract::State};
use roster_persistence::core::EmployeeStorage;
use roster_persistence::types::{GenderAverageSalary, GenderSalaryHistogram};
use tracing::debug;

use crate::error::RestResult;
use crate::state::AppState;

/// Average age across all records; `null` on an empty collection.
///
/// # HTTP Request
///
/// `GET [base]/employee/age/avg`
pub async fn average_age_handler<S>(
    State(state): State<AppState<S>>,
) -> RestResult<Json<Option<f64>>>
where
    S: EmployeeStorage,
{
    debug!("Processing average age request");
    Ok(Json(state.service().average_age().await?))
}

/// Salary histogram (width 10000) per gender.
///
/// # HTTP Request
///
/// `GET [base]/employee/gender/salaries/histogram`
pub async fn salary_histogram_handler<S>(
    State(state): State<AppState<S>>,
) -> RestResult<Json<Vec<GenderSalaryHistogram>>>
where
    S: EmployeeStorage,
{
    debug!("Processing salary histogram request");
    Ok(Json(state.service().salary_histogram_by_gender().await?))
}

/// Average salary per gender.
///
/// # HTTP Request
///
/// `GET [base]/employee/gender/salaries/avg`
pub async fn average_salary_handler<S>(
    State(state): State<AppState<S>>,
) -> RestResult<Json<Vec<GenderAverageSalary>>>
where
    S: EmployeeStorage,
{
    debug!("Processing average salary request");
    Ok(Json(state.service().average_salary_by_gender().await?))
}

/// Count of employees one year short of retirement age.
///
/// # HTTP Request
///
/// `GET [base]/employee/age/retirement-within-year`
pub async fn retirement_handler<S>(State(state): State<AppState<S>>) -> RestResult<Json<u64>>
where
    S: EmployeeStorage,
{
    debug!("Processing retirement count request");
    Ok(Json(state.service().retiring_within_year().await?))
}
