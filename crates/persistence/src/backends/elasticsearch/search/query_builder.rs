//! Elasticsearch Query DSL builder.
//!
//! Translates a [`SearchRequest`] into Elasticsearch Query DSL JSON.

use serde_json::{Map, Value, json};

use crate::query::{Aggregation, Aggregations, BoolQuery, Query, SearchRequest, SourceFilter, TermValue};

/// A complete Elasticsearch query body ready to be sent.
#[derive(Debug, Clone)]
pub struct EsQuery {
    /// The complete query body.
    pub body: Value,
    /// The index to search.
    pub index: String,
}

/// Builds Elasticsearch queries from search requests.
pub struct EsQueryBuilder {
    index: String,
}

impl EsQueryBuilder {
    /// Creates a new query builder for the given index.
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
        }
    }

    /// Builds the body of a `_search` request.
    pub fn build(&self, request: &SearchRequest) -> EsQuery {
        let mut body = Map::new();

        if let Some(ref query) = request.query {
            body.insert("query".to_string(), build_query(query));
        }

        if !request.aggregations.is_empty() {
            body.insert("aggs".to_string(), build_aggregations(&request.aggregations));
        }

        if let Some(size) = request.size {
            body.insert("size".to_string(), json!(size));
        }

        if let Some(from) = request.from {
            body.insert("from".to_string(), json!(from));
        }

        if let SourceFilter::Includes(ref fields) = request.source {
            body.insert("_source".to_string(), json!(fields));
        }

        if request.track_total_hits {
            body.insert("track_total_hits".to_string(), json!(true));
        }

        EsQuery {
            body: Value::Object(body),
            index: self.index.clone(),
        }
    }

    /// Builds the body of a `_search?scroll=` request.
    ///
    /// Scroll contexts page by `size` only; `from` is rejected by the engine.
    pub fn build_scroll(&self, request: &SearchRequest) -> EsQuery {
        let mut query = self.build(request);
        if let Some(body) = query.body.as_object_mut() {
            body.remove("from");
        }
        query
    }
}

/// Translates a query tree node.
pub fn build_query(query: &Query) -> Value {
    match query {
        Query::MatchAll => json!({ "match_all": {} }),
        Query::Match { field, text } => json!({
            "match": { field.as_str(): { "query": text } }
        }),
        Query::Term { field, value } => json!({
            "term": { field.as_str(): { "value": term_value(value) } }
        }),
        Query::Bool(bool_query) => build_bool(bool_query),
    }
}

fn term_value(value: &TermValue) -> Value {
    match value {
        TermValue::Text(s) => json!(s),
        TermValue::Integer(n) => json!(n),
    }
}

fn build_bool(query: &BoolQuery) -> Value {
    let mut clauses = Map::new();

    if !query.must.is_empty() {
        let must: Vec<Value> = query.must.iter().map(build_query).collect();
        clauses.insert("must".to_string(), Value::Array(must));
    }

    if !query.should.is_empty() {
        let should: Vec<Value> = query.should.iter().map(build_query).collect();
        clauses.insert("should".to_string(), Value::Array(should));
    }

    json!({ "bool": clauses })
}

/// Translates a level of the aggregation tree.
pub fn build_aggregations(aggregations: &Aggregations) -> Value {
    let map: Map<String, Value> = aggregations
        .iter()
        .map(|(name, aggregation)| (name.clone(), build_aggregation(aggregation)))
        .collect();
    Value::Object(map)
}

fn build_aggregation(aggregation: &Aggregation) -> Value {
    let (mut node, children) = match aggregation {
        Aggregation::Terms {
            field,
            size,
            aggregations,
        } => (
            json!({ "terms": { "field": field, "size": size } }),
            Some(aggregations),
        ),
        Aggregation::Avg { field } => (json!({ "avg": { "field": field } }), None),
        Aggregation::Histogram {
            field,
            interval,
            aggregations,
        } => (
            json!({ "histogram": { "field": field, "interval": interval } }),
            Some(aggregations),
        ),
    };

    if let Some(children) = children.filter(|c| !c.is_empty()) {
        node["aggs"] = build_aggregations(children);
    }
    node
}
