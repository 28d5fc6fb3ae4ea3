//! Error types for the persistence layer.
//!
//! Errors are split into backend failures (connectivity, engine-reported
//! failures, serialization) and search failures (malformed responses, scroll
//! cursor misuse). Neither category is retried here; callers see the engine's
//! failure as reported.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Search operation errors
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Errors originating from the search engine backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}: {message}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The engine rejected or failed to execute a request.
    #[error("query execution failed (status {status}): {message}")]
    QueryError { status: u16, message: String },

    /// Serialization/deserialization error.
    #[error("serialization error: {message}")]
    SerializationError { message: String },
}

/// Errors related to search and scroll operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The scroll cursor is unknown to the backend (expired or already cleared).
    #[error("scroll cursor not found: {scroll_id}")]
    ScrollNotFound { scroll_id: String },

    /// A scroll cursor operation was attempted in the wrong state.
    #[error("invalid scroll cursor state: cannot {operation} while {state}")]
    InvalidScrollState { operation: String, state: String },

    /// The query or aggregation cannot be evaluated by this backend.
    #[error("unsupported query: {message}")]
    UnsupportedQuery { message: String },

    /// The engine response did not have the expected shape.
    #[error("malformed search response: {message}")]
    MalformedResponse { message: String },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Backend(BackendError::SerializationError {
            message: err.to_string(),
        })
    }
}

impl StorageError {
    /// Returns true if the error indicates the backend could not be reached.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StorageError::Backend(BackendError::Unavailable { .. })
                | StorageError::Backend(BackendError::ConnectionFailed { .. })
        )
    }

    /// Shorthand for a malformed-response error.
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        StorageError::Search(SearchError::MalformedResponse {
            message: message.into(),
        })
    }
}
