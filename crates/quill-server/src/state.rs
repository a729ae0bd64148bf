//! Server state management.

use std::sync::Arc;

use quill_core::{OutlineService, QuillConfig, QuillResult};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<OutlineService>,
}

impl AppState {
    /// Create state around an existing service.
    pub fn new(service: OutlineService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Create state with an in-memory repository.
    pub fn in_memory(config: QuillConfig) -> QuillResult<Self> {
        Ok(Self::new(OutlineService::in_memory(config)?))
    }

    /// Active configuration.
    pub fn config(&self) -> &QuillConfig {
        self.service.config()
    }
}
