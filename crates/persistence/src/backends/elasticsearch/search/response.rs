//! Parsing of Elasticsearch search and scroll responses.
//!
//! Aggregation results are parsed against the request's aggregation tree, so
//! each node is read as the kind of result that was asked for.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{StorageError, StorageResult};
use crate::query::{Aggregation, Aggregations};
use crate::types::{
    AggregationResult, Bucket, BucketKey, ScrollPage, SearchHit, SearchResponse, TotalHits,
    TotalHitsRelation,
};

/// Parses a `_search` response body.
pub fn parse_search_response(
    body: &Value,
    aggregations: &Aggregations,
) -> StorageResult<SearchResponse> {
    let hits = body
        .get("hits")
        .ok_or_else(|| StorageError::malformed("response has no 'hits' section"))?;

    let aggregations = if aggregations.is_empty() {
        BTreeMap::new()
    } else {
        let section = body
            .get("aggregations")
            .ok_or_else(|| StorageError::malformed("response has no 'aggregations' section"))?;
        parse_aggregations(section, aggregations)?
    };

    Ok(SearchResponse {
        total: parse_total(hits),
        max_score: hits.get("max_score").and_then(Value::as_f64),
        hits: parse_hits(hits)?,
        aggregations,
        scroll_id: body
            .get("_scroll_id")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

/// Parses a scroll response body (the first page or a continuation).
pub fn parse_scroll_page(body: &Value) -> StorageResult<ScrollPage> {
    let scroll_id = body
        .get("_scroll_id")
        .and_then(Value::as_str)
        .ok_or_else(|| StorageError::malformed("scroll response has no '_scroll_id'"))?
        .to_string();

    let hits = body
        .get("hits")
        .ok_or_else(|| StorageError::malformed("scroll response has no 'hits' section"))?;

    Ok(ScrollPage {
        scroll_id,
        hits: parse_hits(hits)?,
    })
}

fn parse_total(hits: &Value) -> TotalHits {
    match hits.get("total") {
        // Pre-7.0 engines report a bare number.
        Some(Value::Number(n)) => TotalHits::exact(n.as_u64().unwrap_or(0)),
        Some(total) => TotalHits {
            value: total.get("value").and_then(Value::as_u64).unwrap_or(0),
            relation: total
                .get("relation")
                .and_then(Value::as_str)
                .and_then(TotalHitsRelation::parse)
                .unwrap_or_default(),
        },
        None => TotalHits::default(),
    }
}

fn parse_hits(hits: &Value) -> StorageResult<Vec<SearchHit<Value>>> {
    let Some(array) = hits.get("hits") else {
        return Ok(Vec::new());
    };
    let array = array
        .as_array()
        .ok_or_else(|| StorageError::malformed("'hits.hits' is not an array"))?;

    array.iter().map(parse_hit).collect()
}

fn parse_hit(hit: &Value) -> StorageResult<SearchHit<Value>> {
    let id = hit
        .get("_id")
        .and_then(Value::as_str)
        .ok_or_else(|| StorageError::malformed("hit has no '_id'"))?;

    Ok(SearchHit {
        index: hit
            .get("_index")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        id: id.to_string(),
        score: hit.get("_score").and_then(Value::as_f64),
        source: hit
            .get("_source")
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default())),
    })
}

fn parse_aggregations(
    section: &Value,
    requested: &Aggregations,
) -> StorageResult<BTreeMap<String, AggregationResult>> {
    requested
        .iter()
        .map(|(name, aggregation)| {
            let node = section.get(name).ok_or_else(|| {
                StorageError::malformed(format!("aggregation '{}' missing from response", name))
            })?;
            Ok((name.clone(), parse_aggregation(name, node, aggregation)?))
        })
        .collect()
}

fn parse_aggregation(
    name: &str,
    node: &Value,
    aggregation: &Aggregation,
) -> StorageResult<AggregationResult> {
    match aggregation {
        Aggregation::Avg { .. } => {
            let value = node.get("value").ok_or_else(|| {
                StorageError::malformed(format!("metric '{}' has no value", name))
            })?;
            // The engine reports null when no document had a value.
            Ok(AggregationResult::Metric {
                value: value.as_f64(),
            })
        }
        Aggregation::Terms { aggregations, .. } | Aggregation::Histogram { aggregations, .. } => {
            let buckets = node
                .get("buckets")
                .and_then(Value::as_array)
                .ok_or_else(|| {
                    StorageError::malformed(format!("aggregation '{}' has no buckets", name))
                })?;

            let buckets = buckets
                .iter()
                .map(|bucket| parse_bucket(name, bucket, aggregations))
                .collect::<StorageResult<Vec<_>>>()?;
            Ok(AggregationResult::Buckets { buckets })
        }
    }
}

fn parse_bucket(name: &str, bucket: &Value, children: &Aggregations) -> StorageResult<Bucket> {
    let key = match bucket.get("key") {
        Some(Value::String(s)) => BucketKey::Text(s.clone()),
        Some(Value::Number(n)) => BucketKey::Number(n.as_f64().unwrap_or_default()),
        _ => {
            return Err(StorageError::malformed(format!(
                "bucket in '{}' has no usable key",
                name
            )));
        }
    };

    let doc_count = bucket
        .get("doc_count")
        .and_then(Value::as_u64)
        .ok_or_else(|| StorageError::malformed(format!("bucket in '{}' has no doc_count", name)))?;

    Ok(Bucket {
        key,
        doc_count,
        aggregations: parse_aggregations(bucket, children)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::queries;
    use serde_json::json;

    #[test]
    fn test_parse_hits_and_total() {
        let body = json!({
            "hits": {
                "total": { "value": 12, "relation": "eq" },
                "max_score": 1.7,
                "hits": [
                    { "_index": "employee", "_id": "a", "_score": 1.7,
                      "_source": { "firstName": "Ann", "address": "1 Elm Street" } }
                ]
            }
        });

        let response = parse_search_response(&body, &Aggregations::new()).unwrap();
        assert_eq!(response.total, TotalHits::exact(12));
        assert_eq!(response.max_score, Some(1.7));
        assert_eq!(response.hits.len(), 1);
        assert_eq!(response.hits[0].id, "a");
        assert_eq!(response.hits[0].source["firstName"], "Ann");
        assert!(response.scroll_id.is_none());
    }

    #[test]
    fn test_parse_gte_relation() {
        let body = json!({
            "hits": { "total": { "value": 10000, "relation": "gte" }, "hits": [] }
        });
        let response = parse_search_response(&body, &Aggregations::new()).unwrap();
        assert_eq!(response.total.relation, TotalHitsRelation::GreaterThanOrEqual);
        assert_eq!(response.max_score, None);
    }

    #[test]
    fn test_parse_null_average() {
        let body = json!({
            "hits": { "total": { "value": 0, "relation": "eq" }, "hits": [] },
            "aggregations": { "avg_age": { "value": null } }
        });
        let request = queries::average_age();
        let response = parse_search_response(&body, &request.aggregations).unwrap();
        assert_eq!(
            response.aggregation("avg_age"),
            Some(&AggregationResult::Metric { value: None })
        );
    }

    #[test]
    fn test_parse_nested_histogram() {
        let body = json!({
            "hits": { "total": { "value": 3, "relation": "eq" }, "hits": [] },
            "aggregations": {
                "empl_gender": {
                    "doc_count_error_upper_bound": 0,
                    "sum_other_doc_count": 0,
                    "buckets": [
                        {
                            "key": "Male",
                            "doc_count": 2,
                            "salary_buckets": {
                                "buckets": [
                                    { "key": 30000.0, "doc_count": 1 },
                                    { "key": 40000.0, "doc_count": 0 },
                                    { "key": 50000.0, "doc_count": 1 }
                                ]
                            }
                        }
                    ]
                }
            }
        });
        let request = queries::salary_histogram_by_gender();
        let response = parse_search_response(&body, &request.aggregations).unwrap();

        let genders = response.aggregation("empl_gender").unwrap().buckets();
        assert_eq!(genders.len(), 1);
        assert_eq!(genders[0].key.as_str(), Some("Male"));
        let salaries = genders[0].aggregation("salary_buckets").unwrap().buckets();
        assert_eq!(salaries.len(), 3);
        assert_eq!(salaries[1].key.as_f64(), Some(40000.0));
        assert_eq!(salaries[1].doc_count, 0);
    }

    #[test]
    fn test_missing_aggregation_is_malformed() {
        let body = json!({ "hits": { "hits": [] }, "aggregations": {} });
        let request = queries::average_age();
        let err = parse_search_response(&body, &request.aggregations).unwrap_err();
        assert!(err.to_string().contains("avg_age"));
    }

    #[test]
    fn test_parse_scroll_page() {
        let body = json!({
            "_scroll_id": "DXF1ZXJ5",
            "hits": { "hits": [ { "_index": "employee", "_id": "x", "_score": 1.0, "_source": {} } ] }
        });
        let page = parse_scroll_page(&body).unwrap();
        assert_eq!(page.scroll_id, "DXF1ZXJ5");
        assert_eq!(page.hits.len(), 1);

        assert!(parse_scroll_page(&json!({ "hits": { "hits": [] } })).is_err());
    }
}
