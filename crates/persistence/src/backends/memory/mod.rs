//! In-process backend.
//!
//! Holds the collection in memory and evaluates the query and aggregation
//! model directly, with the same observable semantics as the search engine
//! for the operations this crate issues:
//!
//! - `match` analyzes both sides (lowercase, split on non-alphanumerics) and
//!   matches when any token is shared; the score is the number of shared
//!   query tokens
//! - `term` on a `.keyword` path compares the whole stored value; on a numeric
//!   path it compares numbers
//! - `terms` buckets are ordered by document count, then key
//! - `histogram` buckets are `floor(value / interval) * interval`, with empty
//!   buckets filled between the lowest and highest key
//! - scroll cursors snapshot the matching hits when opened
//!
//! # Example
//!
//! ```
//! use roster_persistence::backends::memory::MemoryBackend;
//! use roster_persistence::core::EmployeeRepository;
//! use roster_persistence::types::Employee;
//!
//! # tokio_test_block_on(async {
//! let backend = MemoryBackend::new();
//! let saved = backend.save(Employee::new("John", "Doe")).await.unwrap();
//! assert!(saved.id.is_some());
//! assert_eq!(backend.len(), 1);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

mod aggregations;
mod backend;
mod evaluator;
mod search_impl;
mod storage;

pub use backend::MemoryBackend;
