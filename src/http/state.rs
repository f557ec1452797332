use crate::service::SpeechService;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Pipelines plus the engine handles and artifact store they own
    pub service: Arc<SpeechService>,
}

impl AppState {
    pub fn new(service: SpeechService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
