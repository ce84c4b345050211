//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::fetcher::TelemetryFetcher;
use crate::storage::ObjectStores;
use crate::subscriptions::SubscriptionStore;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Pipeline that validates, compiles and runs telemetry queries
    pub fetcher: Arc<TelemetryFetcher>,
    /// Stored documents, one store per bucket region
    pub objects: ObjectStores,
    /// Printer subscription table
    pub subscriptions: Arc<dyn SubscriptionStore>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        fetcher: TelemetryFetcher,
        objects: ObjectStores,
        subscriptions: Arc<dyn SubscriptionStore>,
    ) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            objects,
            subscriptions,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
