//! Application state shared across handlers.

use std::sync::Arc;

use crate::{backend::BackendClient, config::GatewayConfig};

/// Application state shared across all handlers.
///
/// The backend client is constructed once at startup and injected here;
/// handlers never reach for process-wide globals.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: GatewayConfig,
    backend: BackendClient,
}

impl AppState {
    /// Create the application state.
    #[must_use]
    pub fn new(config: GatewayConfig, backend: BackendClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, backend }),
        }
    }

    /// Returns the gateway configuration.
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.inner.config
    }

    /// Returns the backend client.
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }
}
