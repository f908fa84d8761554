//! Application state for the PAYE engine API.

use std::sync::Arc;

use crate::config::ConfigLoader;

/// Shared application state.
///
/// The loaded configuration is immutable after startup, so handlers share it
/// through an `Arc` without locking.
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

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }
}
