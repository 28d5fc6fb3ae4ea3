//! Error types for the Roster HTTP API.
//!
//! Storage errors from the persistence layer are mapped to HTTP status codes
//! and rendered as a JSON error body:
//!
//! ```json
//! { "error": { "status": 503, "code": "unavailable", "message": "..." } }
//! ```
//!
//! | Storage Error | HTTP Status | Code |
//! |--------------|-------------|------|
//! | Unavailable / ConnectionFailed | 503 | unavailable |
//! | UnsupportedQuery | 400 | invalid |
//! | everything else | 500 | exception |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roster_persistence::error::{SearchError, StorageError};
use thiserror::Error;
use tracing::error;

/// The primary error type for REST API operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// Bad request (HTTP 400).
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// The search engine cannot be reached (HTTP 503).
    #[error("Service unavailable: {message}")]
    ServiceUnavailable {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    #[error("Internal error: {message}")]
    InternalError {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the short machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            RestError::BadRequest { .. } => "invalid",
            RestError::ServiceUnavailable { .. } => "unavailable",
            RestError::InternalError { .. } => "exception",
        }
    }

    fn message(&self) -> &str {
        match self {
            RestError::BadRequest { message }
            | RestError::ServiceUnavailable { message }
            | RestError::InternalError { message } => message,
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        }

        let body = error_body(status, self.code(), self.message());
        (status, Json(body)).into_response()
    }
}

/// Builds the JSON error body.
fn error_body(status: StatusCode, code: &str, message: &str) -> serde_json::Value {
    serde_json::json!({
        "error": {
            "status": status.as_u16(),
            "code": code,
            "message": message
        }
    })
}

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        if err.is_unavailable() {
            return RestError::ServiceUnavailable {
                message: err.to_string(),
            };
        }

        match err {
            StorageError::Search(SearchError::UnsupportedQuery { message }) => {
                RestError::BadRequest { message }
            }
            _ => RestError::InternalError {
                message: err.to_string(),
            },
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;
    use roster_persistence::error::BackendError;

    #[test]
    fn test_unavailable_maps_to_503() {
        let err: RestError = StorageError::Backend(BackendError::Unavailable {
            backend_name: "elasticsearch".to_string(),
            message: "cluster red".to_string(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.code(), "unavailable");
    }

    #[test]
    fn test_connection_failure_maps_to_503() {
        let err: RestError = StorageError::Backend(BackendError::ConnectionFailed {
            backend_name: "elasticsearch".to_string(),
            message: "refused".to_string(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_query_error_maps_to_500() {
        let err: RestError = StorageError::Backend(BackendError::QueryError {
            status: 400,
            message: "parsing_exception".to_string(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("parsing_exception"));
    }

    #[test]
    fn test_scroll_not_found_maps_to_500() {
        let err: RestError = StorageError::Search(SearchError::ScrollNotFound {
            scroll_id: "abc".to_string(),
        })
        .into();
        assert_eq!(err.code(), "exception");
    }

    #[test]
    fn test_error_body_shape() {
        let body = error_body(StatusCode::SERVICE_UNAVAILABLE, "unavailable", "down");
        assert_eq!(body["error"]["status"], 503);
        assert_eq!(body["error"]["code"], "unavailable");
        assert_eq!(body["error"]["message"], "down");
    }
}
