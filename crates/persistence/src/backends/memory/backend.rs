//! Memory backend implementation.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::time::Instant;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use crate::core::{Backend, BackendCapability, BackendKind};
use crate::error::BackendError;
use crate::types::SearchHit;

/// Index name reported on hits.
pub(super) const MEMORY_INDEX: &str = "employee";

/// A live scroll cursor: the hits matched when it was opened.
pub(super) struct ScrollContext {
    pub(super) hits: Vec<SearchHit<Value>>,
    pub(super) position: usize,
    pub(super) page_size: usize,
    pub(super) expires_at: Instant,
}

/// Employee collection held in process memory.
///
/// Documents are stored as their JSON bodies keyed by id, in id order.
pub struct MemoryBackend {
    pub(super) documents: RwLock<BTreeMap<String, Value>>,
    pub(super) scrolls: RwLock<HashMap<String, ScrollContext>>,
}

impl Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("documents", &self.documents.read().len())
            .field("active_scrolls", &self.scrolls.read().len())
            .finish()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(BTreeMap::new()),
            scrolls: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    /// Returns true if no documents are stored.
    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }

    /// Number of scroll cursors opened and not yet cleared.
    pub fn active_scrolls(&self) -> usize {
        self.scrolls.read().len()
    }

    /// Snapshot of every stored document as `(id, body)`.
    pub(super) fn snapshot(&self) -> Vec<(String, Value)> {
        self.documents
            .read()
            .iter()
            .map(|(id, body)| (id.clone(), body.clone()))
            .collect()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Memory
    }

    fn name(&self) -> &'static str {
        "memory"
    }

    fn capabilities(&self) -> Vec<BackendCapability> {
        vec![
            BackendCapability::Crud,
            BackendCapability::FullTextSearch,
            BackendCapability::Aggregations,
            BackendCapability::Scroll,
        ]
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        Ok(())
    }

    async fn initialize(&self) -> Result<(), BackendError> {
        Ok(())
    }
}
