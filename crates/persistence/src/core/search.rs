//! Search and scroll provider traits.
//!
//! - [`SearchProvider`] - Executes a [`SearchRequest`] once
//! - [`ScrollProvider`] - Server-held cursors over a request's full result set

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::query::SearchRequest;
use crate::types::{ScrollPage, SearchResponse};

/// Executes search requests.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Runs the request and returns hits, totals and aggregation results.
    ///
    /// # Errors
    ///
    /// * `StorageError::Backend` - If the engine rejects or fails the request
    /// * `StorageError::Search` - If the response cannot be interpreted
    async fn search(&self, request: &SearchRequest) -> StorageResult<SearchResponse>;
}

/// Opens, advances and releases scroll cursors.
///
/// A cursor is held by the engine until it expires or is cleared. Callers
/// must clear every cursor they open; see
/// [`ScrollCursor`](crate::search::ScrollCursor) for a wrapper that does so.
#[async_trait]
pub trait ScrollProvider: Send + Sync {
    /// Opens a cursor and returns the first page.
    async fn open_scroll(
        &self,
        request: &SearchRequest,
        keep_alive: KeepAlive,
    ) -> StorageResult<ScrollPage>;

    /// Fetches the next page. The returned id supersedes `scroll_id`.
    async fn continue_scroll(
        &self,
        scroll_id: &str,
        keep_alive: KeepAlive,
    ) -> StorageResult<ScrollPage>;

    /// Releases the cursor.
    async fn clear_scroll(&self, scroll_id: &str) -> StorageResult<()>;
}

/// How long the engine keeps a scroll cursor alive between requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepAlive(Duration);

impl KeepAlive {
    /// One minute.
    pub const DEFAULT: KeepAlive = KeepAlive(Duration::from_secs(60));

    /// Creates a keep-alive of the given duration.
    pub fn new(duration: Duration) -> Self {
        Self(duration)
    }

    /// The keep-alive duration.
    pub fn duration(&self) -> Duration {
        self.0
    }

    /// The keep-alive in engine time-unit syntax (`"60000ms"`).
    pub fn to_engine_string(&self) -> String {
        format!("{}ms", self.0.as_millis())
    }
}

impl Default for KeepAlive {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for KeepAlive {
    type Err = String;

    /// Parses a human-readable duration such as `1m` or `30s`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let duration = humantime::parse_duration(s.trim())
            .map_err(|e| format!("invalid keep-alive '{}': {}", s, e))?;
        if duration.is_zero() {
            return Err(format!("invalid keep-alive '{}': must be positive", s));
        }
        Ok(Self(duration))
    }
}

impl fmt::Display for KeepAlive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", humantime::format_duration(self.0))
    }
}
