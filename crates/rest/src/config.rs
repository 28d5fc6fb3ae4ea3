//! Server configuration for the Roster HTTP API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ROSTER_SERVER_PORT` | 8080 | Server port |
//! | `ROSTER_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `ROSTER_LOG_LEVEL` | info | Log level |
//! | `ROSTER_MAX_BODY_SIZE` | 1048576 | Max request body (bytes) |
//! | `ROSTER_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `ROSTER_ENABLE_CORS` | true | Enable CORS |
//! | `ROSTER_CORS_ORIGINS` | * | Allowed origins |
//! | `ROSTER_CORS_METHODS` | GET,POST,OPTIONS | Allowed methods |
//! | `ROSTER_CORS_HEADERS` | Content-Type,Authorization,Accept | Allowed headers |
//! | `ROSTER_STORAGE_BACKEND` | elasticsearch | `elasticsearch` or `memory` |
//! | `ROSTER_ELASTICSEARCH_NODES` | http://localhost:9200 | Comma-separated node URLs |
//! | `ROSTER_ELASTICSEARCH_INDEX` | employee | Index holding the records |
//! | `ROSTER_ELASTICSEARCH_USERNAME` | - | Basic auth user |
//! | `ROSTER_ELASTICSEARCH_PASSWORD` | - | Basic auth password |
//! | `ROSTER_SCROLL_KEEP_ALIVE` | 1m | Reindex scroll keep-alive |
//!
//! # Example
//!
//! ```rust
//! use roster_rest::{ServerConfig, StorageBackendMode};
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     storage_backend: StorageBackendMode::Memory,
//!     ..Default::default()
//! };
//! assert_eq!(config.socket_addr(), "0.0.0.0:3000");
//! ```

use std::fmt;

use clap::{Parser, ValueEnum};
use roster_persistence::core::KeepAlive;

/// Which backend holds the employee collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StorageBackendMode {
    /// Elasticsearch cluster.
    #[default]
    Elasticsearch,
    /// In-process collection; contents are lost on exit.
    Memory,
}

impl fmt::Display for StorageBackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackendMode::Elasticsearch => write!(f, "elasticsearch"),
            StorageBackendMode::Memory => write!(f, "memory"),
        }
    }
}

/// Server configuration for the Roster HTTP API.
///
/// This struct can be constructed from environment variables using [`ServerConfig::from_env`],
/// from command line arguments using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "roster")]
#[command(about = "Employee search service")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "ROSTER_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "ROSTER_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "ROSTER_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "ROSTER_MAX_BODY_SIZE", default_value = "1048576")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "ROSTER_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "ROSTER_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "ROSTER_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "ROSTER_CORS_METHODS", default_value = "GET,POST,OPTIONS")]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "ROSTER_CORS_HEADERS",
        default_value = "Content-Type,Authorization,Accept"
    )]
    pub cors_headers: String,

    /// Storage backend.
    #[arg(
        long,
        env = "ROSTER_STORAGE_BACKEND",
        value_enum,
        default_value = "elasticsearch"
    )]
    pub storage_backend: StorageBackendMode,

    /// Elasticsearch node URLs (comma-separated).
    #[arg(
        long,
        env = "ROSTER_ELASTICSEARCH_NODES",
        default_value = "http://localhost:9200"
    )]
    pub elasticsearch_nodes: String,

    /// Elasticsearch index holding the employee records.
    #[arg(long, env = "ROSTER_ELASTICSEARCH_INDEX", default_value = "employee")]
    pub elasticsearch_index: String,

    /// Elasticsearch basic auth username.
    #[arg(long, env = "ROSTER_ELASTICSEARCH_USERNAME")]
    pub elasticsearch_username: Option<String>,

    /// Elasticsearch basic auth password.
    #[arg(long, env = "ROSTER_ELASTICSEARCH_PASSWORD")]
    pub elasticsearch_password: Option<String>,

    /// How long the reindex scroll cursor stays alive between pages.
    #[arg(long, env = "ROSTER_SCROLL_KEEP_ALIVE", default_value = "1m")]
    pub scroll_keep_alive: KeepAlive,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 1024 * 1024, // 1MB
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,OPTIONS".to_string(),
            cors_headers: "Content-Type,Authorization,Accept".to_string(),
            storage_backend: StorageBackendMode::Elasticsearch,
            elasticsearch_nodes: "http://localhost:9200".to_string(),
            elasticsearch_index: "employee".to_string(),
            elasticsearch_username: None,
            elasticsearch_password: None,
            scroll_keep_alive: KeepAlive::DEFAULT,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// This is a convenience method that parses environment variables without
    /// requiring command line arguments.
    pub fn from_env() -> Self {
        // Try to parse from environment, falling back to defaults
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the configured Elasticsearch nodes, trimmed, without empties.
    pub fn elasticsearch_node_list(&self) -> Vec<String> {
        self.elasticsearch_nodes
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.storage_backend == StorageBackendMode::Elasticsearch {
            if self.elasticsearch_node_list().is_empty() {
                errors.push("At least one Elasticsearch node is required".to_string());
            }

            if self.elasticsearch_index.trim().is_empty() {
                errors.push("Elasticsearch index cannot be empty".to_string());
            }

            if self.elasticsearch_username.is_some() != self.elasticsearch_password.is_some() {
                errors.push(
                    "Elasticsearch username and password must be set together".to_string(),
                );
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0, the memory backend, and disables CORS.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            log_level: "debug".to_string(),
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            storage_backend: StorageBackendMode::Memory,
            ..Default::default()
        }
    }
}
