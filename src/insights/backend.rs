//! Log-analytics backend seam
//!
//! The executor only needs two calls: start a query and read its results.

use super::types::{QueryResult, QuerySpec};
use async_trait::async_trait;
use thiserror::Error;

/// Identifier the backend assigns to a submitted query
pub type QueryId = String;

/// A log-analytics service able to run Insights queries
#[async_trait]
pub trait InsightsBackend: Send + Sync {
    /// Human-readable name for logs
    fn name(&self) -> &str;

    /// Submit a query and return its identifier
    async fn start_query(&self, spec: &QuerySpec) -> Result<QueryId, BackendError>;

    /// Read the current state and rows of a submitted query
    async fn get_query_results(&self, query_id: &str) -> Result<QueryResult, BackendError>;
}

/// Errors reported while talking to the backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("failed to start query: {0}")]
    Submit(String),

    #[error("failed to get query results: {0}")]
    Poll(String),

    #[error("backend returned no query id")]
    MissingQueryId,
}
