//! Application state for the API server

use std::sync::Arc;
use std::time::Duration;

use agrorural_application::{AgroServices, EventPublisher};
use agrorural_domain::repositories::AgroStore;

/// Application state shared across all API handlers
#[derive(Clone)]
pub struct AppState {
    /// Use-case services
    pub services: Arc<AgroServices>,
    /// Requests slower than this are logged at warn level
    pub slow_request: Duration,
}

impl AppState {
    /// Wire every service to one store and one event publisher
    pub fn new<S>(store: Arc<S>, events: Arc<dyn EventPublisher>) -> Self
    where
        S: AgroStore + 'static,
    {
        Self {
            services: Arc::new(AgroServices::new(store, events)),
            slow_request: Duration::from_millis(500),
        }
    }

    pub fn with_slow_request(mut self, threshold: Duration) -> Self {
        self.slow_request = threshold;
        self
    }
}
