use crate::observability::AppMetrics;
use crate::services::chat::ChatService;
use std::sync::Arc;
use std::time::Duration;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Chat service running the resolve, dispatch and compose pipeline
    pub chat_service: Arc<dyn ChatService>,
    /// Counters exposed on /metrics
    pub metrics: Arc<AppMetrics>,
    /// Upper bound for one chat search
    pub request_timeout: Duration,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("chat_service", &"Arc<dyn ChatService>")
            .field("metrics", &"Arc<AppMetrics>")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(
        chat_service: Box<dyn ChatService>,
        metrics: Arc<AppMetrics>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            chat_service: Arc::from(chat_service),
            metrics,
            request_timeout,
        }
    }
}
