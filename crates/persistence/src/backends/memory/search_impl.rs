//! SearchProvider and ScrollProvider for the memory backend.

use std::cmp::Ordering;
use std::time::Instant;

use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::aggregations::aggregate;
use super::backend::{MEMORY_INDEX, MemoryBackend, ScrollContext};
use super::evaluator::score;
use crate::core::{KeepAlive, ScrollProvider, SearchProvider};
use crate::error::{SearchError, StorageResult};
use crate::query::{SearchRequest, SourceFilter};
use crate::types::{ScrollPage, SearchHit, SearchResponse, TotalHits};

/// Every matching document, best score first.
struct Matched {
    hits: Vec<SearchHit<Value>>,
    /// Full bodies, parallel to `hits`, for aggregation.
    bodies: Vec<Value>,
}

impl MemoryBackend {
    fn evaluate(&self, request: &SearchRequest) -> Matched {
        let mut scored: Vec<(f64, String, Value)> = self
            .snapshot()
            .into_iter()
            .filter_map(|(id, body)| {
                let s = match &request.query {
                    Some(query) => score(query, &body)?,
                    None => 1.0,
                };
                Some((s, id, body))
            })
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(&b.1))
        });

        let mut hits = Vec::with_capacity(scored.len());
        let mut bodies = Vec::with_capacity(scored.len());
        for (s, id, body) in scored {
            hits.push(SearchHit {
                index: MEMORY_INDEX.to_string(),
                id,
                score: Some(s),
                source: project(&body, &request.source),
            });
            bodies.push(body);
        }

        Matched { hits, bodies }
    }
}

fn project(body: &Value, filter: &SourceFilter) -> Value {
    match filter {
        SourceFilter::All => body.clone(),
        SourceFilter::Includes(fields) => {
            let projected: Map<String, Value> = fields
                .iter()
                .filter_map(|f| body.get(f).map(|v| (f.clone(), v.clone())))
                .collect();
            Value::Object(projected)
        }
    }
}

#[async_trait]
impl SearchProvider for MemoryBackend {
    async fn search(&self, request: &SearchRequest) -> StorageResult<SearchResponse> {
        let Matched { hits, bodies } = self.evaluate(request);

        let refs: Vec<&Value> = bodies.iter().collect();
        let aggregations = aggregate(&request.aggregations, &refs)?;

        let total = TotalHits::exact(hits.len() as u64);
        let max_score = hits.first().and_then(|h| h.score);
        let hits = hits
            .into_iter()
            .skip(request.offset())
            .take(request.page_size())
            .collect();

        Ok(SearchResponse {
            total,
            max_score,
            hits,
            aggregations,
            scroll_id: None,
        })
    }
}

#[async_trait]
impl ScrollProvider for MemoryBackend {
    async fn open_scroll(
        &self,
        request: &SearchRequest,
        keep_alive: KeepAlive,
    ) -> StorageResult<ScrollPage> {
        let Matched { hits, .. } = self.evaluate(request);
        let scroll_id = Uuid::new_v4().to_string();
        let now = Instant::now();

        let mut context = ScrollContext {
            hits,
            position: 0,
            page_size: request.page_size().max(1),
            expires_at: now + keep_alive.duration(),
        };
        let page = next_page(&mut context);

        let mut scrolls = self.scrolls.write();
        // Abandoned cursors are dropped once their keep-alive has lapsed.
        scrolls.retain(|_, existing| existing.expires_at > now);
        scrolls.insert(scroll_id.clone(), context);
        drop(scrolls);

        Ok(ScrollPage {
            scroll_id,
            hits: page,
        })
    }

    async fn continue_scroll(
        &self,
        scroll_id: &str,
        keep_alive: KeepAlive,
    ) -> StorageResult<ScrollPage> {
        let mut scrolls = self.scrolls.write();

        let now = Instant::now();
        let expired = scrolls
            .get(scroll_id)
            .is_some_and(|context| context.expires_at <= now);
        if expired {
            scrolls.remove(scroll_id);
        }

        let context = scrolls
            .get_mut(scroll_id)
            .ok_or_else(|| SearchError::ScrollNotFound {
                scroll_id: scroll_id.to_string(),
            })?;
        context.expires_at = now + keep_alive.duration();

        Ok(ScrollPage {
            scroll_id: scroll_id.to_string(),
            hits: next_page(context),
        })
    }

    async fn clear_scroll(&self, scroll_id: &str) -> StorageResult<()> {
        match self.scrolls.write().remove(scroll_id) {
            Some(_) => Ok(()),
            None => Err(SearchError::ScrollNotFound {
                scroll_id: scroll_id.to_string(),
            }
            .into()),
        }
    }
}

fn next_page(context: &mut ScrollContext) -> Vec<SearchHit<Value>> {
    let end = (context.position + context.page_size).min(context.hits.len());
    let page = context.hits[context.position..end].to_vec();
    context.position = end;
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EmployeeRepository;
    use crate::query::{Aggregation, Query};
    use crate::types::Employee;
    use std::time::Duration;

    async fn seeded() -> MemoryBackend {
        let backend = MemoryBackend::new();
        for (first, address, age) in [
            ("Ann", "1 Elm Street", 30),
            ("Bob", "2 Oak Avenue", 40),
            ("Cid", "3 Elm Avenue", 50),
        ] {
            backend
                .save(
                    Employee::new(first, "Doe")
                        .with_address(address)
                        .with_age(age),
                )
                .await
                .unwrap();
        }
        backend
    }

    #[tokio::test]
    async fn test_search_ranks_by_score() {
        let backend = seeded().await;
        let response = backend
            .search(&SearchRequest::for_query(Query::text_match(
                "address", "elm avenue",
            )))
            .await
            .unwrap();

        assert_eq!(response.total.value, 3);
        assert_eq!(response.max_score, Some(2.0));
        assert_eq!(response.hits[0].source["firstName"], "Cid");
    }

    #[tokio::test]
    async fn test_search_pages_and_projects() {
        let backend = seeded().await;
        let request = SearchRequest::for_query(Query::MatchAll)
            .with_size(1)
            .with_from(1)
            .with_source_includes(["firstName"]);
        let response = backend.search(&request).await.unwrap();

        assert_eq!(response.total.value, 3);
        assert_eq!(response.hits.len(), 1);
        let source = response.hits[0].source.as_object().unwrap();
        assert_eq!(source.len(), 1);
        assert!(source.contains_key("firstName"));
    }

    #[tokio::test]
    async fn test_size_zero_still_aggregates() {
        let backend = seeded().await;
        let request = SearchRequest::new()
            .with_size(0)
            .with_aggregation("avg_age", Aggregation::avg("age"));
        let response = backend.search(&request).await.unwrap();

        assert!(response.hits.is_empty());
        assert_eq!(response.total.value, 3);
        assert_eq!(response.aggregation("avg_age").unwrap().value(), Some(40.0));
    }

    #[tokio::test]
    async fn test_scroll_lifecycle() {
        let backend = seeded().await;
        let request = SearchRequest::for_query(Query::MatchAll).with_size(2);

        let first = backend
            .open_scroll(&request, KeepAlive::DEFAULT)
            .await
            .unwrap();
        assert_eq!(first.hits.len(), 2);

        let second = backend
            .continue_scroll(&first.scroll_id, KeepAlive::DEFAULT)
            .await
            .unwrap();
        assert_eq!(second.hits.len(), 1);

        let last = backend
            .continue_scroll(&second.scroll_id, KeepAlive::DEFAULT)
            .await
            .unwrap();
        assert!(last.is_empty());

        backend.clear_scroll(&last.scroll_id).await.unwrap();
        assert_eq!(backend.active_scrolls(), 0);
        assert!(
            backend
                .continue_scroll(&last.scroll_id, KeepAlive::DEFAULT)
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_open_scroll_sweeps_expired_contexts() {
        let backend = seeded().await;
        let request = SearchRequest::for_query(Query::MatchAll).with_size(1);

        let abandoned = backend
            .open_scroll(&request, KeepAlive::new(Duration::from_millis(1)))
            .await
            .unwrap();
        let live = backend
            .open_scroll(&request, KeepAlive::DEFAULT)
            .await
            .unwrap();
        assert_eq!(backend.active_scrolls(), 2);

        tokio::time::sleep(Duration::from_millis(20)).await;
        let fresh = backend
            .open_scroll(&request, KeepAlive::DEFAULT)
            .await
            .unwrap();

        assert_eq!(backend.active_scrolls(), 2);
        assert!(
            backend
                .continue_scroll(&abandoned.scroll_id, KeepAlive::DEFAULT)
                .await
                .is_err()
        );
        backend.clear_scroll(&live.scroll_id).await.unwrap();
        backend.clear_scroll(&fresh.scroll_id).await.unwrap();
        assert_eq!(backend.active_scrolls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_scroll_is_not_found() {
        let backend = MemoryBackend::new();
        let err = backend.clear_scroll("missing").await.unwrap_err();
        assert_eq!(err.to_string(), "scroll cursor not found: missing");
    }
}
