//! Elasticsearch backend implementation.
//!
//! Employees live in a single index (default `employee`) created on
//! [`Backend::initialize`](crate::core::Backend::initialize) with an explicit
//! mapping. Requests from the query model are compiled to Query DSL by
//! [`search::query_builder`] and responses are parsed by [`search::response`].
//!
//! # Example
//!
//! ```ignore
//! use roster_persistence::backends::elasticsearch::{ElasticsearchBackend, ElasticsearchConfig};
//!
//! let config = ElasticsearchConfig {
//!     nodes: vec!["http://localhost:9200".to_string()],
//!     ..Default::default()
//! };
//! let backend = ElasticsearchBackend::new(config)?;
//! backend.initialize().await?;
//! ```

mod backend;
pub mod schema;
pub mod search;
mod search_impl;
mod storage;

pub use backend::{ElasticsearchAuth, ElasticsearchBackend, ElasticsearchConfig};
