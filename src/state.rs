//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::pdf::PdfBackend;
use crate::report::ReportBackend;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    backend: Arc<dyn ReportBackend>,
}

impl AppState {
    /// Create state that renders PDFs with the configured fonts
    pub fn new(config: Config) -> Self {
        let backend = Arc::new(PdfBackend::new(&config.report));
        Self::with_backend(config, backend)
    }

    /// Create state with a specific report backend
    pub fn with_backend(config: Config, backend: Arc<dyn ReportBackend>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, backend }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the report backend
    pub fn backend(&self) -> Arc<dyn ReportBackend> {
        Arc::clone(&self.inner.backend)
    }
}
