//! EmployeeRepository for the memory backend.

use async_trait::async_trait;
use uuid::Uuid;

use super::backend::MemoryBackend;
use crate::core::{EmployeeRepository, SearchProvider};
use crate::error::StorageResult;
use crate::search::queries;
use crate::types::Employee;

#[async_trait]
impl EmployeeRepository for MemoryBackend {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn save(&self, employee: Employee) -> StorageResult<Employee> {
        let id = employee
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let document = employee.to_document()?;

        self.documents.write().insert(id.clone(), document);
        Ok(employee.with_id(id))
    }

    async fn find_by_id(&self, id: &str) -> StorageResult<Option<Employee>> {
        let document = self.documents.read().get(id).cloned();
        document
            .map(|body| Employee::from_document(id, &body))
            .transpose()
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
