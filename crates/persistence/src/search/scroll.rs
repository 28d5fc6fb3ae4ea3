//! Scroll cursor lifecycle.
//!
//! ```text
//! Unopened ──open──► Open(id) ──next_page (non-empty)──► Open(id')
//!    │                  │
//!    │                  └──next_page (empty)──► Exhausted(id')
//!    │                                              │
//!    └──────────────── close ◄──────────────────────┘──► Closed
//! ```
//!
//! `open` returning an empty first page goes straight to `Exhausted`. `close`
//! clears the latest cursor id at most once; a failed `open` leaves the
//! cursor `Unopened` with nothing to clear.

use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::core::{KeepAlive, ScrollProvider};
use crate::error::{SearchError, StorageError, StorageResult};
use crate::query::SearchRequest;
use crate::types::{ScrollPage, SearchHit};

/// State of a [`ScrollCursor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollState {
    /// No cursor has been opened.
    Unopened,
    /// The engine holds the cursor and more pages may follow.
    Open(String),
    /// The last page was empty; the cursor still has to be cleared.
    Exhausted(String),
    /// The cursor has been released.
    Closed,
}

impl fmt::Display for ScrollState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollState::Unopened => write!(f, "unopened"),
            ScrollState::Open(_) => write!(f, "open"),
            ScrollState::Exhausted(_) => write!(f, "exhausted"),
            ScrollState::Closed => write!(f, "closed"),
        }
    }
}

/// A scroll cursor bound to a provider.
///
/// # Example
///
/// ```ignore
/// let mut cursor = ScrollCursor::new(&backend, KeepAlive::DEFAULT);
/// let mut page = cursor.open(&request).await?;
/// while !page.is_empty() {
///     handle(page);
///     page = cursor.next_page().await?;
/// }
/// cursor.close().await?;
/// ```
pub struct ScrollCursor<'a, P: ScrollProvider + ?Sized> {
    provider: &'a P,
    keep_alive: KeepAlive,
    state: ScrollState,
}

impl<'a, P: ScrollProvider + ?Sized> ScrollCursor<'a, P> {
    /// Creates an unopened cursor.
    pub fn new(provider: &'a P, keep_alive: KeepAlive) -> Self {
        Self {
            provider,
            keep_alive,
            state: ScrollState::Unopened,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    /// Returns the latest cursor id while one is held.
    pub fn scroll_id(&self) -> Option<&str> {
        match &self.state {
            ScrollState::Open(id) | ScrollState::Exhausted(id) => Some(id),
            ScrollState::Unopened | ScrollState::Closed => None,
        }
    }

    /// Opens the cursor and returns the first page of hits.
    pub async fn open(&mut self, request: &SearchRequest) -> StorageResult<Vec<SearchHit<Value>>> {
        if self.state != ScrollState::Unopened {
            return Err(self.invalid("open"));
        }

        let page = self.provider.open_scroll(request, self.keep_alive).await?;
        debug!(hits = page.hits.len(), "Opened scroll cursor");
        Ok(self.advance(page))
    }

    /// Fetches the next page of hits. Returns an empty page once exhausted.
    pub async fn next_page(&mut self) -> StorageResult<Vec<SearchHit<Value>>> {
        let scroll_id = match &self.state {
            ScrollState::Open(id) => id.clone(),
            ScrollState::Exhausted(_) => return Ok(Vec::new()),
            ScrollState::Unopened | ScrollState::Closed => return Err(self.invalid("continue")),
        };

        // On failure the state stays Open(scroll_id) so close() can release it.
        let page = self
            .provider
            .continue_scroll(&scroll_id, self.keep_alive)
            .await?;
        Ok(self.advance(page))
    }

    /// Releases the cursor. Idempotent; clears the engine cursor at most once.
    pub async fn close(&mut self) -> StorageResult<()> {
        match std::mem::replace(&mut self.state, ScrollState::Closed) {
            ScrollState::Open(id) | ScrollState::Exhausted(id) => {
                debug!("Clearing scroll cursor");
                self.provider.clear_scroll(&id).await
            }
            ScrollState::Unopened | ScrollState::Closed => Ok(()),
        }
    }

    fn advance(&mut self, page: ScrollPage) -> Vec<SearchHit<Value>> {
        self.state = if page.is_empty() {
            ScrollState::Exhausted(page.scroll_id)
        } else {
            ScrollState::Open(page.scroll_id)
        };
        page.hits
    }

    fn invalid(&self, operation: &str) -> StorageError {
        SearchError::InvalidScrollState {
            operation: operation.to_string(),
            state: self.state.to_string(),
        }
        .into()
    }
}

impl<P: ScrollProvider + ?Sized> fmt::Debug for ScrollCursor<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollCursor")
            .field("keep_alive", &self.keep_alive)
            .field("state", &self.state)
            .finish()
    }
}
