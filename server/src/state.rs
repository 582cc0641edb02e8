//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers and middleware via the `State`
//! extractor. It is read-only after startup: the resolved configuration and
//! a pooled backend client. Cloning is cheap.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::backend::{BackendClient, BackendError};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub backend: BackendClient,
}

impl AppState {
    /// Build state from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend HTTP client cannot be constructed.
    pub fn new(config: AppConfig) -> Result<Self, BackendError> {
        let backend = BackendClient::new(&config.backend_url, config.backend_timeouts)?;
        Ok(Self { config: Arc::new(config), backend })
    }
}

/// State pointing at `backend_url` with default gate settings.
#[cfg(test)]
pub(crate) fn test_state(backend_url: &str) -> AppState {
    let config = AppConfig {
        port: crate::config::DEFAULT_PORT,
        backend_url: backend_url.to_owned(),
        backend_timeouts: crate::config::BackendTimeouts { request_secs: 5, connect_secs: 1 },
        gate: crate::gate::GateConfig::default(),
        cookie_secure: false,
        cookie_max_age_secs: crate::config::DEFAULT_COOKIE_MAX_AGE_SECS,
    };
    AppState::new(config).expect("test state")
}
