//! Core storage traits and abstractions.
//!
//! - [`Backend`] - Backend lifecycle and capability discovery
//! - [`EmployeeRepository`] - Save and exact-name lookups
//! - [`SearchProvider`] - Query and aggregation execution
//! - [`ScrollProvider`] - Scroll cursors for full collection scans
//!
//! A complete backend implements all four, which makes it an
//! [`EmployeeStorage`]:
//!
//! ```text
//! Backend
//!     ├── EmployeeRepository
//!     ├── SearchProvider
//!     └── ScrollProvider
//! ```

mod backend;
mod search;
mod storage;

pub use backend::{Backend, BackendCapability, BackendKind, EmployeeStorage};
pub use search::{KeepAlive, ScrollProvider, SearchProvider};
pub use storage::EmployeeRepository;
