//! Backend implementations.
//!
//! # Available Backends
//!
//! | Backend | Feature | Description |
//! |---------|---------|-------------|
//! | Memory | always | In-process collection, for development and tests |
//! | Elasticsearch | `elasticsearch` (default) | Search engine holding the `employee` index |
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "elasticsearch")]
//! use roster_persistence::backends::elasticsearch::{ElasticsearchBackend, ElasticsearchConfig};
//!
//! # #[cfg(feature = "elasticsearch")]
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = ElasticsearchBackend::new(ElasticsearchConfig::default())?;
//! # Ok(())
//! # }
//! ```

pub mod memory;

#[cfg(feature = "elasticsearch")]
pub mod elasticsearch;
