//! Aggregation tree.

use std::collections::BTreeMap;

/// Named aggregations at one level of the tree.
pub type Aggregations = BTreeMap<String, Aggregation>;

/// Default number of buckets returned by a terms aggregation.
pub const DEFAULT_TERMS_SIZE: usize = 10;

/// An aggregation node.
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregation {
    /// One bucket per distinct exact value of `field`.
    Terms {
        /// Exact-match field path.
        field: String,
        /// Maximum number of buckets.
        size: usize,
        /// Sub-aggregations computed per bucket.
        aggregations: Aggregations,
    },
    /// Mean of a numeric field.
    Avg {
        /// Numeric field path.
        field: String,
    },
    /// Fixed-width buckets over a numeric field.
    Histogram {
        /// Numeric field path.
        field: String,
        /// Bucket width.
        interval: f64,
        /// Sub-aggregations computed per bucket.
        aggregations: Aggregations,
    },
}

impl Aggregation {
    /// Creates a terms aggregation with the default bucket count.
    pub fn terms(field: impl Into<String>) -> Self {
        Aggregation::Terms {
            field: field.into(),
            size: DEFAULT_TERMS_SIZE,
            aggregations: Aggregations::new(),
        }
    }

    /// Creates an avg aggregation.
    pub fn avg(field: impl Into<String>) -> Self {
        Aggregation::Avg {
            field: field.into(),
        }
    }

    /// Creates a histogram aggregation.
    pub fn histogram(field: impl Into<String>, interval: f64) -> Self {
        Aggregation::Histogram {
            field: field.into(),
            interval,
            aggregations: Aggregations::new(),
        }
    }

    /// Attaches a named sub-aggregation to a bucketing aggregation.
    ///
    /// Metric aggregations take no children. Attaching one to them is a
    /// construction bug and panics in debug builds; release builds drop it.
    pub fn sub_aggregation(mut self, name: impl Into<String>, child: Aggregation) -> Self {
        debug_assert!(
            self.is_bucketing(),
            "sub-aggregation attached to metric aggregation on `{}`",
            self.field()
        );
        if let Aggregation::Terms { aggregations, .. }
        | Aggregation::Histogram { aggregations, .. } = &mut self
        {
            aggregations.insert(name.into(), child);
        }
        self
    }

    /// Returns true for aggregations that produce buckets and accept children.
    pub fn is_bucketing(&self) -> bool {
        !matches!(self, Aggregation::Avg { .. })
    }

    /// Returns the sub-aggregations of a bucketing aggregation.
    pub fn children(&self) -> Option<&Aggregations> {
        match self {
            Aggregation::Terms { aggregations, .. }
            | Aggregation::Histogram { aggregations, .. } => Some(aggregations),
            Aggregation::Avg { .. } => None,
        }
    }

    /// Returns the field the aggregation reads.
    pub fn field(&self) -> &str {
        match self {
            Aggregation::Terms { field, .. }
            | Aggregation::Avg { field }
            | Aggregation::Histogram { field, .. } => field,
        }
    }
}
