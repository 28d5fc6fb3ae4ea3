//! Roster Persistence Layer
//!
//! This crate stores employee records in a search engine and runs the
//! lookups, aggregations and scans exposed by the Roster HTTP service.
//!
//! # Architecture
//!
//! - [`types`] - Employee record, hits and typed aggregation results
//! - [`query`] - Backend-neutral query and aggregation trees
//! - [`core`] - Backend, repository, search and scroll traits
//! - [`search`] - Request builders, scroll cursor and [`EmployeeService`](search::EmployeeService)
//! - [`backends`] - Elasticsearch and in-memory implementations
//! - [`error`] - Error types for all operations
//!
//! # Backend Features
//!
//! - `elasticsearch` (default) - Elasticsearch backend
//!
//! The in-memory backend is always available.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use roster_persistence::backends::memory::MemoryBackend;
//! use roster_persistence::search::EmployeeService;
//! use roster_persistence::types::Employee;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let service = EmployeeService::new(Arc::new(MemoryBackend::new()));
//!
//! service
//!     .save_employee(Employee::new("Ada", "Lovelace").with_gender("Female").with_age(59))
//!     .await
//!     .unwrap();
//!
//! let found = service.employees_by_name("Lovelace", None).await.unwrap();
//! assert_eq!(found.len(), 1);
//! assert_eq!(service.retiring_within_year().await.unwrap(), 1);
//! # });
//! ```
//!
//! # Queries
//!
//! Every read operation is a [`SearchRequest`](query::SearchRequest):
//!
//! ```
//! use roster_persistence::query::{Aggregation, Query, SearchRequest};
//!
//! let request = SearchRequest::new().with_size(0).with_aggregation(
//!     "empl_gender",
//!     Aggregation::terms("gender.keyword")
//!         .sub_aggregation("avg_salary", Aggregation::avg("salary")),
//! );
//! assert_eq!(request.aggregations.len(), 1);
//!
//! let lookup = SearchRequest::for_query(
//!     Query::bool()
//!         .must(Query::term("lastName.keyword", "Doe"))
//!         .must(Query::term("firstName.keyword", "John")),
//! );
//! assert!(lookup.query.is_some());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod backends;
pub mod core;
pub mod error;
pub mod query;
pub mod search;
pub mod types;

// Re-export commonly used types at the crate root
pub use error::{BackendError, SearchError, StorageError, StorageResult};
pub use search::EmployeeService;
pub use types::{Employee, EmployeeField};
