//! Aggregation evaluation over matched documents.

use std::collections::BTreeMap;

use serde_json::Value;

use super::evaluator::resolve;
use crate::error::{SearchError, StorageResult};
use crate::query::{Aggregation, Aggregations};
use crate::types::{AggregationResult, Bucket, BucketKey};

/// Computes every named aggregation over `documents`.
pub(super) fn aggregate(
    aggregations: &Aggregations,
    documents: &[&Value],
) -> StorageResult<BTreeMap<String, AggregationResult>> {
    aggregations
        .iter()
        .map(|(name, aggregation)| Ok((name.clone(), evaluate(aggregation, documents)?)))
        .collect()
}

fn evaluate(aggregation: &Aggregation, documents: &[&Value]) -> StorageResult<AggregationResult> {
    match aggregation {
        Aggregation::Avg { field } => Ok(AggregationResult::Metric {
            value: average(field, documents),
        }),
        Aggregation::Terms {
            field,
            size,
            aggregations,
        } => terms(field, *size, aggregations, documents),
        Aggregation::Histogram {
            field,
            interval,
            aggregations,
        } => histogram(field, *interval, aggregations, documents),
    }
}

fn numbers<'a>(field: &'a str, documents: &'a [&'a Value]) -> impl Iterator<Item = (f64, &'a Value)> + 'a {
    documents.iter().filter_map(move |doc| {
        resolve(doc, field)
            .value
            .and_then(Value::as_f64)
            .map(|n| (n, *doc))
    })
}

fn average(field: &str, documents: &[&Value]) -> Option<f64> {
    let (sum, count) = numbers(field, documents).fold((0.0, 0u64), |(sum, count), (n, _)| {
        (sum + n, count + 1)
    });
    (count > 0).then(|| sum / count as f64)
}

fn terms(
    field: &str,
    size: usize,
    children: &Aggregations,
    documents: &[&Value],
) -> StorageResult<AggregationResult> {
    // Group by the stored value's string form, remembering whether it was numeric.
    let mut groups: BTreeMap<String, (BucketKey, Vec<&Value>)> = BTreeMap::new();

    for doc in documents {
        let field_ref = resolve(doc, field);
        let Some(value) = field_ref.value else {
            continue;
        };
        let key = match value {
            Value::String(s) if field_ref.exact => BucketKey::Text(s.clone()),
            Value::Number(n) => match n.as_f64() {
                Some(f) => BucketKey::Number(f),
                None => continue,
            },
            Value::String(_) => {
                return Err(SearchError::UnsupportedQuery {
                    message: format!("terms aggregation needs an exact-match field, got '{}'", field),
                }
                .into());
            }
            _ => continue,
        };
        groups
            .entry(key.to_string())
            .or_insert_with(|| (key, Vec::new()))
            .1
            .push(*doc);
    }

    let mut ordered: Vec<(BucketKey, Vec<&Value>)> = groups.into_values().collect();
    // BTreeMap iteration already sorted keys ascending; stable sort keeps that for ties.
    ordered.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    ordered.truncate(size);

    let buckets = ordered
        .into_iter()
        .map(|(key, members)| bucket(key, &members, children))
        .collect::<StorageResult<Vec<_>>>()?;
    Ok(AggregationResult::Buckets { buckets })
}

fn histogram(
    field: &str,
    interval: f64,
    children: &Aggregations,
    documents: &[&Value],
) -> StorageResult<AggregationResult> {
    if !(interval > 0.0) {
        return Err(SearchError::UnsupportedQuery {
            message: format!("histogram interval must be positive, got {}", interval),
        }
        .into());
    }

    // Bucket index -> members.
    let mut slots: BTreeMap<i64, Vec<&Value>> = BTreeMap::new();
    for (n, doc) in numbers(field, documents) {
        slots.entry((n / interval).floor() as i64).or_default().push(doc);
    }

    let (Some(&first), Some(&last)) = (slots.keys().next(), slots.keys().next_back()) else {
        return Ok(AggregationResult::Buckets {
            buckets: Vec::new(),
        });
    };

    let buckets = (first..=last)
        .map(|slot| {
            let members = slots.get(&slot).map(Vec::as_slice).unwrap_or(&[]);
            bucket(BucketKey::Number(slot as f64 * interval), members, children)
        })
        .collect::<StorageResult<Vec<_>>>()?;
    Ok(AggregationResult::Buckets { buckets })
}

fn bucket(key: BucketKey, members: &[&Value], children: &Aggregations) -> StorageResult<Bucket> {
    Ok(Bucket {
        key,
        doc_count: members.len() as u64,
        aggregations: aggregate(children, members)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn docs() -> Vec<Value> {
        vec![
            json!({ "gender": "Female", "salary": 55000, "age": 30 }),
            json!({ "gender": "Female", "salary": 58000, "age": 40 }),
            json!({ "gender": "Male", "salary": 31000, "age": 50 }),
            json!({ "gender": "Male", "salary": 52000 }),
            json!({ "gender": "Male" }),
        ]
    }

    fn run(name: &str, aggregation: Aggregation, docs: &[Value]) -> AggregationResult {
        let refs: Vec<&Value> = docs.iter().collect();
        let mut aggs = Aggregations::new();
        aggs.insert(name.to_string(), aggregation);
        aggregate(&aggs, &refs).unwrap().remove(name).unwrap()
    }

    #[test]
    fn test_avg() {
        let result = run("avg_age", Aggregation::avg("age"), &docs());
        assert_eq!(result.value(), Some(40.0));

        let empty = run("avg_age", Aggregation::avg("age"), &[]);
        assert_eq!(empty, AggregationResult::Metric { value: None });
    }

    #[test]
    fn test_terms_order_and_sub_aggregation() {
        let agg = Aggregation::terms("gender.keyword")
            .sub_aggregation("avg_salary", Aggregation::avg("salary"));
        let result = run("empl_gender", agg, &docs());
        let buckets = result.buckets();

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key, BucketKey::Text("Male".to_string()));
        assert_eq!(buckets[0].doc_count, 3);
        assert_eq!(buckets[0].aggregation("avg_salary").unwrap().value(), Some(41500.0));
        assert_eq!(buckets[1].key, BucketKey::Text("Female".to_string()));
        assert_eq!(buckets[1].aggregation("avg_salary").unwrap().value(), Some(56500.0));
    }

    #[test]
    fn test_terms_ties_ordered_by_key() {
        let docs = vec![json!({ "gender": "Male" }), json!({ "gender": "Female" })];
        let result = run("g", Aggregation::terms("gender.keyword"), &docs);
        let keys: Vec<String> = result.buckets().iter().map(|b| b.key.to_string()).collect();
        assert_eq!(keys, vec!["Female", "Male"]);
    }

    #[test]
    fn test_terms_rejects_analyzed_field() {
        let refs: Vec<Value> = docs();
        let refs: Vec<&Value> = refs.iter().collect();
        let mut aggs = Aggregations::new();
        aggs.insert("g".to_string(), Aggregation::terms("gender"));
        assert!(aggregate(&aggs, &refs).is_err());
    }

    #[test]
    fn test_histogram_fills_gaps() {
        let result = run("salary_buckets", Aggregation::histogram("salary", 10000.0), &docs());
        let buckets: Vec<(f64, u64)> = result
            .buckets()
            .iter()
            .map(|b| (b.key.as_f64().unwrap(), b.doc_count))
            .collect();
        assert_eq!(
            buckets,
            vec![(30000.0, 1), (40000.0, 0), (50000.0, 3)]
        );
    }
}
