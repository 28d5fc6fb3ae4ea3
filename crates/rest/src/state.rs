//! Application state for the Roster HTTP API.
//!
//! Every handler receives the [`EmployeeService`] wrapping the configured
//! backend, plus the server configuration.

use std::sync::Arc;

use roster_persistence::EmployeeService;
use roster_persistence::core::{Backend, EmployeeStorage};

use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The storage backend type (must implement [`EmployeeStorage`])
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use roster_persistence::backends::memory::MemoryBackend;
/// use roster_rest::{AppState, ServerConfig};
///
/// let state = AppState::new(Arc::new(MemoryBackend::new()), ServerConfig::for_testing());
/// assert_eq!(state.backend_name(), "memory");
/// ```
pub struct AppState<S> {
    /// Employee operations over the backend.
    service: EmployeeService<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: EmployeeStorage> AppState<S> {
    /// Creates a new AppState with the given storage and configuration.
    ///
    /// The reindex keep-alive is taken from the configuration.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        let service = EmployeeService::new(storage).with_keep_alive(config.scroll_keep_alive);
        Self {
            service,
            config: Arc::new(config),
        }
    }

    /// Returns the employee service.
    pub fn service(&self) -> &EmployeeService<S> {
        &self.service
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        self.service.storage()
    }

    /// Returns the backend name.
    pub fn backend_name(&self) -> &'static str {
        self.storage().name()
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_persistence::backends::memory::MemoryBackend;
    use roster_persistence::core::KeepAlive;
    use std::time::Duration;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new(Arc::new(MemoryBackend::new()), ServerConfig::default());

        assert_eq!(state.backend_name(), "memory");
        assert_eq!(state.config().port, 8080);
        assert_eq!(state.service().keep_alive(), KeepAlive::DEFAULT);
    }

    #[test]
    fn test_keep_alive_from_config() {
        let config = ServerConfig {
            scroll_keep_alive: KeepAlive::new(Duration::from_secs(5)),
            ..Default::default()
        };
        let state = AppState::new(Arc::new(MemoryBackend::new()), config);

        assert_eq!(
            state.service().keep_alive().duration(),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn test_app_state_clone_shares_storage() {
        let state = AppState::new(Arc::new(MemoryBackend::new()), ServerConfig::default());
        let cloned = state.clone();

        assert!(Arc::ptr_eq(state.service().storage(), cloned.service().storage()));
    }
}
