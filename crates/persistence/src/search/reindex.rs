//! Reindex scan.
//!
//! Walks the whole collection with a scroll cursor and accumulates every hit.
//! The cursor is released on every exit path.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::scroll::ScrollCursor;
use crate::core::{KeepAlive, ScrollProvider};
use crate::error::StorageResult;
use crate::query::SearchRequest;
use crate::types::SearchHit;

/// Summary of a completed reindex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReindexReport {
    /// Number of hits visited.
    pub documents_scanned: u64,
    /// Number of pages fetched, including the terminal empty page.
    pub pages_fetched: u64,
}

/// All hits collected by a full scan.
#[derive(Debug, Clone, Default)]
pub struct CollectionScan {
    /// Every hit, in cursor order.
    pub hits: Vec<SearchHit<Value>>,
    /// Number of pages fetched, including the terminal empty page.
    pub pages_fetched: u64,
}

impl CollectionScan {
    /// Summarizes the scan.
    pub fn report(&self) -> ReindexReport {
        ReindexReport {
            documents_scanned: self.hits.len() as u64,
            pages_fetched: self.pages_fetched,
        }
    }
}

/// Scans every document matched by `request` through a scroll cursor.
///
/// The cursor is cleared exactly once whether the scan completes or fails.
/// If both the scan and the clear fail, the clear failure is logged and the
/// scan error is returned.
pub async fn scan_collection<P: ScrollProvider + ?Sized>(
    provider: &P,
    request: &SearchRequest,
    keep_alive: KeepAlive,
) -> StorageResult<CollectionScan> {
    let mut cursor = ScrollCursor::new(provider, keep_alive);

    let scanned = drain(&mut cursor, request).await;
    let closed = cursor.close().await;

    match (scanned, closed) {
        (Ok(scan), Ok(())) => Ok(scan),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(clear_err)) => {
            warn!(error = %clear_err, "Failed to clear scroll cursor after scan failure");
            Err(e)
        }
    }
}

async fn drain<P: ScrollProvider + ?Sized>(
    cursor: &mut ScrollCursor<'_, P>,
    request: &SearchRequest,
) -> StorageResult<CollectionScan> {
    let mut scan = CollectionScan::default();

    let mut page = cursor.open(request).await?;
    scan.pages_fetched += 1;

    while !page.is_empty() {
        debug!(hits = page.len(), "Collected scroll page");
        scan.hits.extend(page);
        page = cursor.next_page().await?;
        scan.pages_fetched += 1;
    }

    Ok(scan)
}
