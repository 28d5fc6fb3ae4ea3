//! Backend-neutral query model.
//!
//! A [`SearchRequest`] combines a [`Query`] tree, named [`Aggregation`]s and
//! paging. The Elasticsearch backend compiles requests to Query DSL JSON; the
//! memory backend evaluates them in process.

mod aggregation;
mod dsl;
mod request;

pub use aggregation::{Aggregation, Aggregations, DEFAULT_TERMS_SIZE};
pub use dsl::{BoolQuery, Query, TermValue};
pub use request::{DEFAULT_PAGE_SIZE, SearchRequest, SourceFilter};
