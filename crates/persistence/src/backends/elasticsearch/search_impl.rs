//! SearchProvider and ScrollProvider implementations for the Elasticsearch
//! backend.

use async_trait::async_trait;
use elasticsearch::{ClearScrollParts, ScrollParts, SearchParts};
use serde_json::json;

use crate::core::{KeepAlive, ScrollProvider, SearchProvider};
use crate::error::{SearchError, StorageError, StorageResult};
use crate::query::SearchRequest;
use crate::types::{ScrollPage, SearchResponse};

use super::backend::{ElasticsearchBackend, check_status, json_body, transport_error};
use super::search::query_builder::EsQueryBuilder;
use super::search::response::{parse_scroll_page, parse_search_response};

#[async_trait]
impl SearchProvider for ElasticsearchBackend {
    async fn search(&self, request: &SearchRequest) -> StorageResult<SearchResponse> {
        let es_query = EsQueryBuilder::new(self.index()).build(request);
        tracing::debug!(index = %es_query.index, body = %es_query.body, "Executing search");

        let response = self
            .client()
            .search(SearchParts::Index(&[&es_query.index]))
            .body(es_query.body)
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_status(response, "search").await?;
        let body = json_body(response).await?;

        parse_search_response(&body, &request.aggregations)
    }
}

#[async_trait]
impl ScrollProvider for ElasticsearchBackend {
    async fn open_scroll(
        &self,
        request: &SearchRequest,
        keep_alive: KeepAlive,
    ) -> StorageResult<ScrollPage> {
        let es_query = EsQueryBuilder::new(self.index()).build_scroll(request);
        let keep_alive = keep_alive.to_engine_string();
        tracing::debug!(index = %es_query.index, keep_alive = %keep_alive, "Opening scroll");

        let response = self
            .client()
            .search(SearchParts::Index(&[&es_query.index]))
            .scroll(&keep_alive)
            .body(es_query.body)
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_status(response, "open scroll").await?;
        parse_scroll_page(&json_body(response).await?)
    }

    async fn continue_scroll(
        &self,
        scroll_id: &str,
        keep_alive: KeepAlive,
    ) -> StorageResult<ScrollPage> {
        let response = self
            .client()
            .scroll(ScrollParts::None)
            .body(json!({
                "scroll": keep_alive.to_engine_string(),
                "scroll_id": scroll_id,
            }))
            .send()
            .await
            .map_err(transport_error)?;

        if response.status_code().as_u16() == 404 {
            return Err(StorageError::Search(SearchError::ScrollNotFound {
                scroll_id: scroll_id.to_string(),
            }));
        }

        let response = check_status(response, "continue scroll").await?;
        parse_scroll_page(&json_body(response).await?)
    }

    async fn clear_scroll(&self, scroll_id: &str) -> StorageResult<()> {
        let response = self
            .client()
            .clear_scroll(ClearScrollParts::None)
            .body(json!({ "scroll_id": [scroll_id] }))
            .send()
            .await
            .map_err(transport_error)?;

        if response.status_code().as_u16() == 404 {
            return Err(StorageError::Search(SearchError::ScrollNotFound {
                scroll_id: scroll_id.to_string(),
            }));
        }

        check_status(response, "clear scroll").await?;
        Ok(())
    }
}
