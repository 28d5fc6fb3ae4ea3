//! Core types for the persistence layer.
//!
//! - [`Employee`], [`EmployeeField`] - The record and its indexed fields
//! - [`SearchHit`], [`SearchHits`], [`SearchResponse`], [`ScrollPage`] - Query results
//! - [`AggregationResult`], [`Bucket`] - Typed aggregation results
//!
//! # Examples
//!
//! ```
//! use roster_persistence::types::{Employee, EmployeeField};
//!
//! let employee = Employee::new("John", "Doe").with_gender("Male");
//! let document = employee.to_document().unwrap();
//!
//! assert_eq!(document[EmployeeField::Gender.path()], "Male");
//! assert_eq!(EmployeeField::Gender.exact_path(), Some("gender.keyword"));
//! ```

mod aggregation;
mod employee;
mod hits;

pub use aggregation::{
    AggregationResult, Bucket, BucketKey, GenderAverageSalary, GenderSalaryHistogram,
    HistogramBucket,
};
pub use employee::{Employee, EmployeeField};
pub use hits::{
    ScrollPage, SearchHit, SearchHits, SearchResponse, TotalHits, TotalHitsRelation,
};
