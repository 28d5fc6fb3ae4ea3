//! Route configuration for the Roster HTTP API.
//!
//! This module contains the routing configuration that maps HTTP paths
//! to handlers.

pub mod employee_routes;

pub use employee_routes::create_routes;
