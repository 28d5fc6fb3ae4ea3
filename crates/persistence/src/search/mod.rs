//! Employee query service.
//!
//! - [`queries`] - Request builders for each read operation
//! - [`ScrollCursor`] - Scroll cursor state machine with guaranteed release
//! - [`scan_collection`] - Full collection scan used by reindex
//! - [`EmployeeService`] - The operations exposed over HTTP
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use roster_persistence::backends::memory::MemoryBackend;
//! use roster_persistence::search::EmployeeService;
//!
//! let service = EmployeeService::new(Arc::new(MemoryBackend::new()));
//! let saved = service.save_employee(employee).await?;
//! let same_family = service.employees_by_name("Doe", None).await?;
//! let report = service.reindex().await?;
//! ```

pub mod queries;
mod reindex;
mod scroll;
mod service;

pub use reindex::{CollectionScan, ReindexReport, scan_collection};
pub use scroll::{ScrollCursor, ScrollState};
pub use service::EmployeeService;
