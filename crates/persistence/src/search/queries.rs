//! Request builders for the employee read operations.
//!
//! Each builder returns a [`SearchRequest`]; backends never see operation
//! names, only the query and aggregation trees built here.

use crate::query::{Aggregation, Query, SearchRequest};
use crate::types::EmployeeField;

/// Page size for the interest lookup.
pub const INTEREST_PAGE_SIZE: usize = 10;

/// Bucket width of the salary histogram.
pub const SALARY_HISTOGRAM_INTERVAL: f64 = 10_000.0;

/// Terms aggregation over gender.
pub const GENDER_AGG: &str = "empl_gender";

/// Salary histogram nested under [`GENDER_AGG`].
pub const SALARY_BUCKETS_AGG: &str = "salary_buckets";

/// Average salary nested under [`GENDER_AGG`].
pub const AVG_SALARY_AGG: &str = "avg_salary";

/// Average age over the whole collection.
pub const AVG_AGE_AGG: &str = "avg_age";

/// Page size of the reindex scroll.
pub const REINDEX_PAGE_SIZE: usize = 1000;

/// Field projected by the reindex scan.
pub const REINDEX_SOURCE_FIELD: &str = "message";

/// Retirement age for female employees.
pub const FEMALE_RETIREMENT_AGE: i64 = 60;

/// Retirement age for male employees.
pub const MALE_RETIREMENT_AGE: i64 = 65;

fn exact(field: EmployeeField) -> &'static str {
    // Only called with fields that have an exact path.
    field.exact_path().unwrap_or_else(|| field.path())
}

/// Exact last-name lookup.
pub fn by_last_name(last_name: &str) -> SearchRequest {
    SearchRequest::for_query(Query::term(exact(EmployeeField::LastName), last_name))
}

/// Exact last-name and first-name lookup.
pub fn by_last_name_and_first_name(last_name: &str, first_name: &str) -> SearchRequest {
    SearchRequest::for_query(
        Query::bool()
            .must(Query::term(exact(EmployeeField::LastName), last_name))
            .must(Query::term(exact(EmployeeField::FirstName), first_name)),
    )
}

/// Full-text match of the comma-joined interests, first page only.
pub fn by_interests<S: AsRef<str>>(interests: &[S]) -> SearchRequest {
    let joined = interests
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(",");

    SearchRequest::for_query(Query::text_match(EmployeeField::Interests.path(), joined))
        .with_size(INTEREST_PAGE_SIZE)
        .with_from(0)
        .with_track_total_hits()
}

/// Full-text match on the address, projecting names and address.
pub fn by_address(address: &str) -> SearchRequest {
    SearchRequest::for_query(Query::text_match(EmployeeField::Address.path(), address))
        .with_source_includes([
            EmployeeField::FirstName.path(),
            EmployeeField::LastName.path(),
            EmployeeField::Address.path(),
        ])
}

/// Average age, no hits.
pub fn average_age() -> SearchRequest {
    SearchRequest::new()
        .with_size(0)
        .with_aggregation(AVG_AGE_AGG, Aggregation::avg(EmployeeField::Age.path()))
}

/// Salary histogram per gender, no hits.
pub fn salary_histogram_by_gender() -> SearchRequest {
    let histogram = Aggregation::histogram(EmployeeField::Salary.path(), SALARY_HISTOGRAM_INTERVAL);
    SearchRequest::new().with_size(0).with_aggregation(
        GENDER_AGG,
        Aggregation::terms(exact(EmployeeField::Gender)).sub_aggregation(SALARY_BUCKETS_AGG, histogram),
    )
}

/// Average salary per gender, no hits.
pub fn average_salary_by_gender() -> SearchRequest {
    SearchRequest::new().with_size(0).with_aggregation(
        GENDER_AGG,
        Aggregation::terms(exact(EmployeeField::Gender))
            .sub_aggregation(AVG_SALARY_AGG, Aggregation::avg(EmployeeField::Salary.path())),
    )
}

/// Employees one year short of retirement: 59-year-old women or 64-year-old men.
pub fn retiring_within_year() -> SearchRequest {
    let branch = |age: i64, gender: &str| {
        Query::bool()
            .must(Query::term(EmployeeField::Age.path(), age))
            .must(Query::term(exact(EmployeeField::Gender), gender))
    };

    SearchRequest::for_query(
        Query::bool()
            .should(branch(FEMALE_RETIREMENT_AGE - 1, "Female"))
            .should(branch(MALE_RETIREMENT_AGE - 1, "Male")),
    )
    .with_size(0)
    .with_track_total_hits()
}

/// Full collection scan used by reindex.
pub fn reindex_scan() -> SearchRequest {
    SearchRequest::for_query(Query::match_all())
        .with_source_includes([REINDEX_SOURCE_FIELD])
        .with_size(REINDEX_PAGE_SIZE)
}
