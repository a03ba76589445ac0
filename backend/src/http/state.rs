//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::PipelineSettings;

/// Shared, read-only state passed to all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration the server was started with
    pub config: Arc<AppConfig>,
    /// Per-request pipeline settings derived from `config`
    pub settings: Arc<PipelineSettings>,
}

impl AppState {
    /// Create a new application state from the loaded configuration.
    pub fn new(config: AppConfig) -> Self {
        let settings = PipelineSettings::from(&config);
        Self {
            config: Arc::new(config),
            settings: Arc::new(settings),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
