//! Application state for the hours engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, EngineConfig};

/// Shared application state.
///
/// Holds the server's default run configuration. Requests never mutate it;
/// per-request overrides are applied to a copy.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the default run configuration.
    pub fn config(&self) -> &EngineConfig {
        self.config.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_default_loader_gives_default_config() {
        let state = AppState::new(ConfigLoader::default());
        assert_eq!(state.config(), &EngineConfig::default());
    }
}
