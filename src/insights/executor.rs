//! Query Executor
//!
//! Runs one query against the backend:
//!
//! ```text
//! start_query → get_query_results ⟲ (while Scheduled | Running) → QueryResult
//! ```
//!
//! Polling has no client-side limit. It ends when the backend reports any
//! terminal status, and that final payload is returned whatever the status is.
//! Transport errors abort immediately.

use super::backend::{BackendError, InsightsBackend};
use super::types::{QueryResult, QuerySpec};
use std::sync::Arc;
use std::time::Duration;

/// Submits queries and waits for them to finish
#[derive(Clone)]
pub struct QueryExecutor {
    backend: Arc<dyn InsightsBackend>,
    /// Delay between polls; zero re-polls as soon as the previous reply arrives
    poll_interval: Duration,
}

impl QueryExecutor {
    /// Create an executor that re-polls immediately
    pub fn new(backend: Arc<dyn InsightsBackend>) -> Self {
        Self {
            backend,
            poll_interval: Duration::ZERO,
        }
    }

    /// Builder method: wait between polls
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Execute a query and return the terminal result payload
    pub async fn execute(&self, spec: &QuerySpec) -> Result<QueryResult, BackendError> {
        let query_id = self.backend.start_query(spec).await?;

        tracing::debug!(
            backend = self.backend.name(),
            query_id = %query_id,
            log_group = %spec.log_group_name,
            start = spec.start_epoch,
            end = spec.end_epoch,
            "Query submitted"
        );

        let mut polls: u64 = 1;
        let mut result = self.backend.get_query_results(&query_id).await?;

        while !result.status.is_terminal() {
            tracing::trace!(query_id = %query_id, status = %result.status, "Waiting for query to finish");

            if !self.poll_interval.is_zero() {
                tokio::time::sleep(self.poll_interval).await;
            }

            result = self.backend.get_query_results(&query_id).await?;
            polls += 1;
        }

        tracing::debug!(
            query_id = %query_id,
            status = %result.status,
            rows = result.row_count(),
            polls,
            "Query finished"
        );

        Ok(result)
    }
}
