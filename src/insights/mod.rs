//! Logs Insights Execution
//!
//! Submits compiled queries to a log-analytics backend and waits for them:
//!
//! - **Types**: `QuerySpec` in, `QueryResult` out
//! - **Backend**: the [`InsightsBackend`] seam and its CloudWatch implementation
//! - **Executor**: the submit/poll loop

mod backend;
mod cloudwatch;
mod executor;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{BackendError, InsightsBackend, QueryId};
pub use cloudwatch::CloudWatchBackend;
pub use executor::QueryExecutor;
pub use types::{QueryResult, QuerySpec, QueryStatistics, QueryStatus, ResultField};
