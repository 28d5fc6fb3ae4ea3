//! Search requests.

use super::aggregation::{Aggregation, Aggregations};
use super::dsl::Query;

/// Engine default page size, used when a request does not set one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Which parts of the stored document to return with each hit.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SourceFilter {
    /// The whole document.
    #[default]
    All,
    /// Only the listed fields.
    Includes(Vec<String>),
}

/// A search request: an optional query, aggregations and paging.
///
/// # Examples
///
/// ```
/// use roster_persistence::query::{Aggregation, Query, SearchRequest};
///
/// let request = SearchRequest::new()
///     .with_size(0)
///     .with_aggregation("avg_age", Aggregation::avg("age"));
///
/// assert_eq!(request.size, Some(0));
/// assert!(request.query.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    /// Query; `None` matches every document.
    pub query: Option<Query>,
    /// Named top-level aggregations.
    pub aggregations: Aggregations,
    /// Page size; `None` uses [`DEFAULT_PAGE_SIZE`].
    pub size: Option<usize>,
    /// Offset of the first hit.
    pub from: Option<usize>,
    /// Source projection.
    pub source: SourceFilter,
    /// Whether to count hits exactly beyond the engine's default bound.
    pub track_total_hits: bool,
}

impl SearchRequest {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a request for the given query.
    pub fn for_query(query: impl Into<Query>) -> Self {
        Self::new().with_query(query)
    }

    /// Sets the query.
    pub fn with_query(mut self, query: impl Into<Query>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Adds a named aggregation.
    pub fn with_aggregation(mut self, name: impl Into<String>, aggregation: Aggregation) -> Self {
        self.aggregations.insert(name.into(), aggregation);
        self
    }

    /// Sets the page size.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the offset.
    pub fn with_from(mut self, from: usize) -> Self {
        self.from = Some(from);
        self
    }

    /// Restricts the returned source to the given fields.
    pub fn with_source_includes<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source = SourceFilter::Includes(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Requests an exact total hit count.
    pub fn with_track_total_hits(mut self) -> Self {
        self.track_total_hits = true;
        self
    }

    /// The effective page size.
    pub fn page_size(&self) -> usize {
        self.size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// The effective offset.
    pub fn offset(&self) -> usize {
        self.from.unwrap_or(0)
    }
}

impl From<Query> for SearchRequest {
    fn from(query: Query) -> Self {
        SearchRequest::for_query(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = SearchRequest::new();
        assert_eq!(request.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(request.offset(), 0);
        assert_eq!(request.source, SourceFilter::All);
        assert!(!request.track_total_hits);
    }

    #[test]
    fn test_source_includes() {
        let request = SearchRequest::for_query(Query::MatchAll)
            .with_source_includes(["firstName", "address"]);
        assert_eq!(
            request.source,
            SourceFilter::Includes(vec!["firstName".to_string(), "address".to_string()])
        );
    }
}
