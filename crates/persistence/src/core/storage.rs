//! Employee record storage trait.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::Employee;

/// Save and lookup operations over the employee collection.
///
/// Lookups by name compare the exact (keyword) form of the name fields and
/// return at most one engine page (10 records).
///
/// # Example
///
/// ```ignore
/// use roster_persistence::core::EmployeeRepository;
/// use roster_persistence::types::Employee;
///
/// async fn example<R: EmployeeRepository>(repo: &R) -> StorageResult<()> {
///     let saved = repo.save(Employee::new("John", "Doe")).await?;
///     let found = repo.find_by_last_name("Doe").await?;
///     assert!(found.iter().any(|e| e.id == saved.id));
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Returns a human-readable name for the backend.
    fn backend_name(&self) -> &'static str;

    /// Inserts the record, or replaces the stored record with the same id.
    ///
    /// Returns the persisted record carrying its (possibly new) id.
    async fn save(&self, employee: Employee) -> StorageResult<Employee>;

    /// Reads a record by id.
    async fn find_by_id(&self, id: &str) -> StorageResult<Option<Employee>>;

    /// Records whose last name equals `last_name` exactly.
    async fn find_by_last_name(&self, last_name: &str) -> StorageResult<Vec<Employee>>;

    /// Records whose last and first names both equal the given values exactly.
    async fn find_by_last_name_and_first_name(
        &self,
        last_name: &str,
        first_name: &str,
    ) -> StorageResult<Vec<Employee>>;
}
