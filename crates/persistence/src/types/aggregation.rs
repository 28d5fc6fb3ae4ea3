//! Typed aggregation results.
//!
//! Aggregation responses are kept as a nested structure: a metric result
//! carries a single value, a bucket result carries buckets, and each bucket
//! carries its own named sub-aggregation results. The serialized form mirrors
//! the engine's wire shape (`{"value": ..}` / `{"buckets": [..]}`).

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// The result of one aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AggregationResult {
    /// A single-value metric (e.g. `avg`). `None` when no document had a value.
    Metric {
        /// The computed value.
        value: Option<f64>,
    },
    /// A bucketing aggregation (e.g. `terms`, `histogram`).
    Buckets {
        /// The buckets, in engine order.
        buckets: Vec<Bucket>,
    },
}

impl AggregationResult {
    /// Returns the metric value, or `None` for empty metrics and bucket results.
    pub fn value(&self) -> Option<f64> {
        match self {
            AggregationResult::Metric { value } => *value,
            AggregationResult::Buckets { .. } => None,
        }
    }

    /// Returns the buckets; empty for metric results.
    pub fn buckets(&self) -> &[Bucket] {
        match self {
            AggregationResult::Buckets { buckets } => buckets,
            AggregationResult::Metric { .. } => &[],
        }
    }

    /// Returns true if this is a metric result.
    pub fn is_metric(&self) -> bool {
        matches!(self, AggregationResult::Metric { .. })
    }
}

/// A bucket in a bucketing aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    /// The bucket key.
    pub key: BucketKey,
    /// Number of documents in the bucket.
    pub doc_count: u64,
    /// Sub-aggregation results keyed by name.
    #[serde(flatten)]
    pub aggregations: BTreeMap<String, AggregationResult>,
}

impl Bucket {
    /// Creates a bucket without sub-aggregations.
    pub fn new(key: BucketKey, doc_count: u64) -> Self {
        Self {
            key,
            doc_count,
            aggregations: BTreeMap::new(),
        }
    }

    /// Returns a named sub-aggregation result.
    pub fn aggregation(&self, name: &str) -> Option<&AggregationResult> {
        self.aggregations.get(name)
    }
}

/// A bucket key: a term for `terms`, a lower bound for `histogram`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BucketKey {
    /// A term value.
    Text(String),
    /// A numeric key.
    Number(f64),
}

impl BucketKey {
    /// Returns the key as a string if it is a term.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            BucketKey::Text(s) => Some(s),
            BucketKey::Number(_) => None,
        }
    }

    /// Returns the key as a number if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            BucketKey::Number(n) => Some(*n),
            BucketKey::Text(_) => None,
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Text(s) => write!(f, "{}", s),
            BucketKey::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Salary distribution for one gender.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenderSalaryHistogram {
    /// The gender term.
    pub gender: String,
    /// Number of employees with this gender.
    pub doc_count: u64,
    /// Fixed-width salary buckets in ascending key order.
    pub buckets: Vec<HistogramBucket>,
}

/// A fixed-width histogram bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBucket {
    /// Inclusive lower bound of the bucket.
    pub key: f64,
    /// Number of documents in the bucket.
    pub doc_count: u64,
}

/// Average salary for one gender.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenderAverageSalary {
    /// The gender term.
    pub gender: String,
    /// Number of employees with this gender.
    pub doc_count: u64,
    /// Mean salary; `None` when no employee in the bucket has a salary.
    pub average_salary: Option<f64>,
}
