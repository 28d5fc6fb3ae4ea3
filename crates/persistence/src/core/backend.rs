//! Backend abstraction for search engine drivers.
//!
//! This module defines the [`Backend`] trait, the lifecycle and capability
//! surface shared by every backend. Storage and search operations live in the
//! [`EmployeeRepository`](super::EmployeeRepository),
//! [`SearchProvider`](super::SearchProvider) and
//! [`ScrollProvider`](super::ScrollProvider) traits.

use std::fmt::Debug;

use async_trait::async_trait;

use super::{EmployeeRepository, ScrollProvider, SearchProvider};
use crate::error::BackendError;

/// Identifies the type of backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// In-process collection evaluated by this crate.
    Memory,
    /// Elasticsearch (search engine).
    Elasticsearch,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Memory => write!(f, "memory"),
            BackendKind::Elasticsearch => write!(f, "elasticsearch"),
        }
    }
}

/// Capabilities that a backend may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendCapability {
    /// Save and lookup by id.
    Crud,
    /// Analyzed full-text match queries.
    FullTextSearch,
    /// Terms, avg and histogram aggregations.
    Aggregations,
    /// Scroll cursors.
    Scroll,
}

impl std::fmt::Display for BackendCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BackendCapability::Crud => "crud",
            BackendCapability::FullTextSearch => "full-text-search",
            BackendCapability::Aggregations => "aggregations",
            BackendCapability::Scroll => "scroll",
        };
        write!(f, "{}", name)
    }
}

/// A backend holding the employee collection.
///
/// # Example
///
/// ```ignore
/// use roster_persistence::core::{Backend, BackendCapability};
///
/// if backend.supports(BackendCapability::Scroll) {
///     // reindex is available
/// }
/// ```
#[async_trait]
pub trait Backend: Send + Sync + Debug {
    /// Returns the kind of backend.
    fn kind(&self) -> BackendKind;

    /// Returns a human-readable name for this backend.
    fn name(&self) -> &'static str;

    /// Checks if this backend supports the given capability.
    fn supports(&self, capability: BackendCapability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Returns all capabilities supported by this backend.
    fn capabilities(&self) -> Vec<BackendCapability>;

    /// Checks if the backend is healthy and accepting requests.
    async fn health_check(&self) -> Result<(), BackendError>;

    /// Creates the collection (index and mapping) if needed.
    async fn initialize(&self) -> Result<(), BackendError>;
}

/// A backend able to serve every employee operation.
///
/// Implemented automatically for anything that implements the four core
/// traits; used as the single bound by the HTTP layer.
pub trait EmployeeStorage:
    Backend + EmployeeRepository + SearchProvider + ScrollProvider
{
}

impl<T> EmployeeStorage for T where
    T: Backend + EmployeeRepository + SearchProvider + ScrollProvider + ?Sized
{
}
