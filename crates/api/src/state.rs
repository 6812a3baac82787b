use std::sync::Arc;

use newsroom_core::guard::Guard;
use newsroom_core::policy::ContentPolicy;
use newsroom_db::Store;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything heavy sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend (PostgreSQL or in-memory).
    pub store: Arc<dyn Store>,
    /// Server configuration (JWT settings are read by the identity extractor).
    pub config: Arc<ServerConfig>,
    /// Ownership guard configured with the login URL.
    pub guard: Guard,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: ServerConfig) -> Self {
        let guard = Guard::new(config.login_url.clone());
        Self {
            store,
            config: Arc::new(config),
            guard,
        }
    }

    pub fn policy(&self) -> &ContentPolicy {
        &self.config.policy
    }
}
