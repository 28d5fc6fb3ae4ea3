//! EmployeeRepository implementation for Elasticsearch.
//!
//! Records are stored with their id as the document `_id`; the body never
//! carries it. Saves without an id use engine-assigned ids.

use async_trait::async_trait;
use elasticsearch::params::Refresh;
use elasticsearch::{GetParts, IndexParts};
use serde_json::Value;

use crate::core::{EmployeeRepository, SearchProvider};
use crate::error::{StorageError, StorageResult};
use crate::search::queries;
use crate::types::Employee;

use super::backend::{BACKEND_NAME, ElasticsearchBackend, check_status, json_body, transport_error};

#[async_trait]
impl EmployeeRepository for ElasticsearchBackend {
    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }

    async fn save(&self, employee: Employee) -> StorageResult<Employee> {
        let index = self.index();
        let document = employee.to_document()?;
        let refresh = if self.config().refresh_on_write {
            Refresh::True
        } else {
            Refresh::False
        };

        let parts = match employee.id.as_deref() {
            Some(id) => IndexParts::IndexId(index, id),
            None => IndexParts::Index(index),
        };

        let response = self
            .client()
            .index(parts)
            .refresh(refresh)
            .body(document)
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_status(response, "index document").await?;
        let body: Value = json_body(response).await?;

        let id = body
            .get("_id")
            .and_then(Value::as_str)
            .ok_or_else(|| StorageError::malformed("index response has no '_id'"))?;

        tracing::debug!(id, "Saved employee");
        Ok(employee.with_id(id))
    }

    async fn find_by_id(&self, id: &str) -> StorageResult<Option<Employee>> {
        let response = self
            .client()
            .get(GetParts::IndexId(self.index(), id))
            .send()
            .await
            .map_err(transport_error)?;

        // 404 covers both a missing document and a missing index.
        if response.status_code().as_u16() == 404 {
            return Ok(None);
        }

        let response = check_status(response, "get document").await?;
        let body = json_body(response).await?;

        if !body.get("found").and_then(Value::as_bool).unwrap_or(false) {
            return Ok(None);
        }

        let source = body.get("_source").cloned().unwrap_or(Value::Null);
        Employee::from_document(id, &source).map(Some)
    }

    async fn find_by_last_name(&self, last_name: &str) -> StorageResult<Vec<Employee>> {
        self.search(&queries::by_last_name(last_name))
            .await?
            .into_employees()
    }

    async fn find_by_last_name_and_first_name(
        &self,
        last_name: &str,
        first_name: &str,
    ) -> StorageResult<Vec<Employee>> {
        self.search(&queries::by_last_name_and_first_name(last_name, first_name))
            .await?
            .into_employees()
    }
}
