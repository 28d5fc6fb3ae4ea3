//! Search hits and engine responses.
//!
//! [`SearchResponse`] is the backend-neutral result of executing a
//! [`SearchRequest`](crate::query::SearchRequest): raw hits, total hit
//! accounting, typed aggregation results and an optional scroll cursor id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::aggregation::AggregationResult;
use super::employee::Employee;
use crate::error::StorageResult;

/// How the total hit count relates to the true number of matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TotalHitsRelation {
    /// The count is exact.
    #[default]
    #[serde(rename = "eq")]
    Equal,
    /// The count is a lower bound.
    #[serde(rename = "gte")]
    GreaterThanOrEqual,
}

impl TotalHitsRelation {
    /// Parses the relation as reported by the engine (`"eq"` or `"gte"`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "eq" => Some(TotalHitsRelation::Equal),
            "gte" => Some(TotalHitsRelation::GreaterThanOrEqual),
            _ => None,
        }
    }
}

/// Total number of documents matching a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalHits {
    /// Number of matching documents.
    pub value: u64,
    /// Whether `value` is exact.
    pub relation: TotalHitsRelation,
}

impl TotalHits {
    /// Creates an exact total.
    pub fn exact(value: u64) -> Self {
        Self {
            value,
            relation: TotalHitsRelation::Equal,
        }
    }
}

/// A single search hit.
///
/// `T` is the document body: raw JSON for projected hits, or a mapped
/// [`Employee`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit<T> {
    /// The index the document lives in.
    pub index: String,
    /// The document id.
    pub id: String,
    /// Relevance score (absent when the engine did not score).
    pub score: Option<f64>,
    /// The returned document body.
    pub source: T,
}

impl<T> SearchHit<T> {
    /// Maps the document body, keeping hit metadata.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SearchHit<U> {
        SearchHit {
            index: self.index,
            id: self.id,
            score: self.score,
            source: f(self.source),
        }
    }
}

impl SearchHit<Value> {
    /// Maps the raw document body to an [`Employee`].
    pub fn into_employee(self) -> StorageResult<SearchHit<Employee>> {
        let employee = Employee::from_document(&self.id, &self.source)?;
        Ok(self.map(|_| employee))
    }
}

/// A page of hits together with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHits<T> {
    /// Number of documents matching the query.
    pub total_hits: u64,
    /// Whether `total_hits` is exact.
    pub total_hits_relation: TotalHitsRelation,
    /// Highest score across the matching documents.
    pub max_score: Option<f64>,
    /// The hits on this page.
    pub search_hits: Vec<SearchHit<T>>,
}

impl<T> SearchHits<T> {
    /// Returns true if the page holds no hits.
    pub fn is_empty(&self) -> bool {
        self.search_hits.is_empty()
    }

    /// Returns the number of hits on this page.
    pub fn len(&self) -> usize {
        self.search_hits.len()
    }
}

/// The result of executing a search request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResponse {
    /// Total hit accounting.
    pub total: TotalHits,
    /// Highest score across the matching documents.
    pub max_score: Option<f64>,
    /// The returned page of hits.
    pub hits: Vec<SearchHit<Value>>,
    /// Aggregation results keyed by aggregation name.
    pub aggregations: BTreeMap<String, AggregationResult>,
    /// Scroll cursor id, when the request opened a scroll.
    pub scroll_id: Option<String>,
}

impl SearchResponse {
    /// Returns a named aggregation result.
    pub fn aggregation(&self, name: &str) -> Option<&AggregationResult> {
        self.aggregations.get(name)
    }

    /// Maps every hit to an [`Employee`].
    pub fn into_employees(self) -> StorageResult<Vec<Employee>> {
        self.hits
            .iter()
            .map(|hit| Employee::from_document(&hit.id, &hit.source))
            .collect()
    }

    /// Converts the response into an [`Employee`] hit page with metadata.
    pub fn into_search_hits(self) -> StorageResult<SearchHits<Employee>> {
        let search_hits = self
            .hits
            .into_iter()
            .map(SearchHit::into_employee)
            .collect::<StorageResult<Vec<_>>>()?;

        Ok(SearchHits {
            total_hits: self.total.value,
            total_hits_relation: self.total.relation,
            max_score: self.max_score,
            search_hits,
        })
    }
}

/// One page of a scroll cursor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollPage {
    /// The cursor id to use for the next page (may rotate between pages).
    pub scroll_id: String,
    /// The hits on this page; empty once the cursor is exhausted.
    pub hits: Vec<SearchHit<Value>>,
}

impl ScrollPage {
    /// Returns true if the page carries no hits.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_hit(id: &str, source: Value) -> SearchHit<Value> {
        SearchHit {
            index: "employee".to_string(),
            id: id.to_string(),
            score: Some(1.5),
            source,
        }
    }

    #[test]
    fn test_relation_parse() {
        assert_eq!(TotalHitsRelation::parse("eq"), Some(TotalHitsRelation::Equal));
        assert_eq!(
            TotalHitsRelation::parse("gte"),
            Some(TotalHitsRelation::GreaterThanOrEqual)
        );
        assert_eq!(TotalHitsRelation::parse("lt"), None);
    }

    #[test]
    fn test_into_search_hits_keeps_metadata() {
        let response = SearchResponse {
            total: TotalHits::exact(7),
            max_score: Some(2.0),
            hits: vec![raw_hit("a", json!({ "lastName": "Doe" }))],
            ..Default::default()
        };

        let hits = response.into_search_hits().unwrap();
        assert_eq!(hits.total_hits, 7);
        assert_eq!(hits.max_score, Some(2.0));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.search_hits[0].id, "a");
        assert_eq!(hits.search_hits[0].score, Some(1.5));
        assert_eq!(hits.search_hits[0].source.id.as_deref(), Some("a"));
        assert_eq!(
            hits.search_hits[0].source.last_name.as_deref(),
            Some("Doe")
        );
    }

    #[test]
    fn test_search_hits_serialization() {
        let hits = SearchHits::<Value> {
            total_hits: 1,
            total_hits_relation: TotalHitsRelation::Equal,
            max_score: Some(1.5),
            search_hits: vec![raw_hit("a", json!({}))],
        };
        let value = serde_json::to_value(&hits).unwrap();
        assert_eq!(value["totalHits"], 1);
        assert_eq!(value["totalHitsRelation"], "eq");
        assert_eq!(value["searchHits"][0]["id"], "a");
        assert_eq!(value["searchHits"][0]["index"], "employee");
    }
}
