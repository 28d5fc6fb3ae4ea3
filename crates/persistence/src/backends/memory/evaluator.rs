//! Query evaluation against stored documents.

use serde_json::Value;

use crate::query::{BoolQuery, Query, TermValue};
use crate::types::EmployeeField;

const KEYWORD_SUFFIX: &str = ".keyword";

/// Splits text into lowercase alphanumeric tokens.
pub(super) fn analyze(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// A resolved field path.
pub(super) struct FieldRef<'a> {
    /// The stored value, if present and not null.
    pub(super) value: Option<&'a Value>,
    /// Whether the path addresses the whole-value (keyword) form.
    pub(super) exact: bool,
}

/// Resolves a path such as `gender` or `gender.keyword` against a document.
pub(super) fn resolve<'a>(document: &'a Value, path: &str) -> FieldRef<'a> {
    let (base, keyword) = match path.strip_suffix(KEYWORD_SUFFIX) {
        Some(base) => (base, true),
        None => (path, false),
    };

    // Date fields are indexed as a single exact value.
    let exact = keyword
        || EmployeeField::ALL
            .iter()
            .any(|f| f.path() == base && f.exact_path() == Some(f.path()));

    FieldRef {
        value: document.get(base).filter(|v| !v.is_null()),
        exact,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Evaluates a query against a document. Returns the score when it matches.
pub(super) fn score(query: &Query, document: &Value) -> Option<f64> {
    match query {
        Query::MatchAll => Some(1.0),
        Query::Match { field, text } => match_score(document, field, text),
        Query::Term { field, value } => term_matches(document, field, value).then_some(1.0),
        Query::Bool(bool_query) => bool_score(bool_query, document),
    }
}

fn match_score(document: &Value, field: &str, text: &str) -> Option<f64> {
    let field_ref = resolve(document, field);
    let stored = field_ref.value.and_then(as_text)?;

    if field_ref.exact {
        return (stored == text).then_some(1.0);
    }
    if let Value::Number(n) = field_ref.value? {
        let wanted: f64 = text.trim().parse().ok()?;
        return (n.as_f64() == Some(wanted)).then_some(1.0);
    }

    let stored_tokens = analyze(&stored);
    let mut query_tokens = analyze(text);
    query_tokens.sort();
    query_tokens.dedup();

    let shared = query_tokens
        .iter()
        .filter(|t| stored_tokens.contains(t))
        .count();
    (shared > 0).then_some(shared as f64)
}

fn term_matches(document: &Value, field: &str, value: &TermValue) -> bool {
    let field_ref = resolve(document, field);
    let Some(stored) = field_ref.value else {
        return false;
    };

    match stored {
        Value::Number(n) => {
            let wanted = match value {
                TermValue::Integer(i) => Some(*i as f64),
                TermValue::Text(s) => s.trim().parse::<f64>().ok(),
            };
            wanted.is_some() && n.as_f64() == wanted
        }
        Value::String(s) if field_ref.exact => *s == value.to_string(),
        // Analyzed text: the term must equal one of the indexed tokens.
        Value::String(s) => analyze(s).contains(&value.to_string()),
        Value::Bool(b) => b.to_string() == value.to_string(),
        _ => false,
    }
}

fn bool_score(query: &BoolQuery, document: &Value) -> Option<f64> {
    if query.is_empty() {
        return Some(1.0);
    }

    let mut total = 0.0;
    for clause in &query.must {
        total += score(clause, document)?;
    }

    let should: Vec<f64> = query
        .should
        .iter()
        .filter_map(|clause| score(clause, document))
        .collect();
    if query.must.is_empty() && should.is_empty() {
        return None;
    }

    Some(total + should.iter().sum::<f64>())
}
