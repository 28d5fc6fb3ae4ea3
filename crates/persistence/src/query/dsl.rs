//! Query tree.
//!
//! Queries are plain data. Backends either compile them to their native
//! syntax (Elasticsearch Query DSL) or interpret them directly (memory).

use std::fmt;

/// A value compared by a term query.
#[derive(Debug, Clone, PartialEq)]
pub enum TermValue {
    /// Exact string value.
    Text(String),
    /// Integer value.
    Integer(i64),
}

impl fmt::Display for TermValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermValue::Text(s) => write!(f, "{}", s),
            TermValue::Integer(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for TermValue {
    fn from(value: &str) -> Self {
        TermValue::Text(value.to_string())
    }
}

impl From<String> for TermValue {
    fn from(value: String) -> Self {
        TermValue::Text(value)
    }
}

impl From<i64> for TermValue {
    fn from(value: i64) -> Self {
        TermValue::Integer(value)
    }
}

impl From<i32> for TermValue {
    fn from(value: i32) -> Self {
        TermValue::Integer(i64::from(value))
    }
}

/// A node in the query tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Matches every document.
    MatchAll,
    /// Full-text match: the text is analyzed and any token may match.
    Match {
        /// Field path.
        field: String,
        /// Text to analyze.
        text: String,
    },
    /// Exact-value match on a keyword, numeric or date path.
    Term {
        /// Field path.
        field: String,
        /// Value compared without analysis.
        value: TermValue,
    },
    /// Boolean combination.
    Bool(BoolQuery),
}

impl Query {
    /// Creates a match-all query.
    pub fn match_all() -> Self {
        Query::MatchAll
    }

    /// Creates a full-text match query.
    pub fn text_match(field: impl Into<String>, text: impl Into<String>) -> Self {
        Query::Match {
            field: field.into(),
            text: text.into(),
        }
    }

    /// Creates a term query.
    pub fn term(field: impl Into<String>, value: impl Into<TermValue>) -> Self {
        Query::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates an empty bool query.
    pub fn bool() -> BoolQuery {
        BoolQuery::default()
    }
}

impl From<BoolQuery> for Query {
    fn from(query: BoolQuery) -> Self {
        Query::Bool(query)
    }
}

/// A bool query.
///
/// All `must` clauses have to match. When there are no `must` clauses, at
/// least one `should` clause has to match; otherwise `should` clauses only
/// contribute to scoring. A bool query with no clauses matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolQuery {
    /// Clauses that must all match.
    pub must: Vec<Query>,
    /// Clauses of which at least one must match when `must` is empty.
    pub should: Vec<Query>,
}

impl BoolQuery {
    /// Adds a `must` clause.
    pub fn must(mut self, query: impl Into<Query>) -> Self {
        self.must.push(query.into());
        self
    }

    /// Adds a `should` clause.
    pub fn should(mut self, query: impl Into<Query>) -> Self {
        self.should.push(query.into());
        self
    }

    /// Returns true if the query has no clauses.
    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.should.is_empty()
    }
}
