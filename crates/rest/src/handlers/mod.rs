//! HTTP request handlers.
//!
//! - [`employee`] - Save a record
//! - [`search`] - Name, interest and address lookups
//! - [`aggregations`] - Average age, salary statistics by gender, retirement count
//! - [`reindex`] - Full collection scan
//! - [`health`] - Health check endpoints

pub mod aggregations;
pub mod employee;
pub mod health;
pub mod reindex;
pub mod search;

// Re-export handlers for convenience
pub use aggregations::{
    average_age_handler, average_salary_handler, retirement_handler, salary_histogram_handler,
};
pub use employee::save_handler;
pub use health::{health_handler, liveness_handler};
pub use reindex::reindex_handler;
pub use search::{address_search_handler, interest_search_handler, name_search_handler};
