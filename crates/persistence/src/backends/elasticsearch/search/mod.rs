//! Elasticsearch search implementation modules.

pub mod query_builder;
pub mod response;
