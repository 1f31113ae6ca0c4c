//! Application state shared across HTTP handlers

use crate::auth::{AccessPolicy, AuthSystem};
use crate::config::Config;
use crate::storage::StorageLayer;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for efficient sharing across workers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Authentication system (identity provider)
    pub auth: Arc<AuthSystem>,
    /// Access policy consumed by every view gate
    pub policy: Arc<AccessPolicy>,
    /// Storage layer
    pub storage: Arc<StorageLayer>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, auth: AuthSystem, storage: StorageLayer) -> Self {
        let policy = auth.policy();
        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            policy,
            storage: Arc::new(storage),
        }
    }

    /// Get service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
