//! Telemetry Fetcher
//!
//! The per-request pipeline for one data kind:
//!
//! ```text
//! RequestParameters → TimeRange + PrinterFilter → query text → QuerySpec → QueryResult
//! ```
//!
//! A validation failure stops the pipeline before anything is sent to the backend.

use crate::insights::{BackendError, QueryExecutor, QueryResult, QuerySpec};
use crate::params::{
    extract_printer_filter, resolve_time_range, ParamError, RequestParameters,
};
use crate::query::{DataKind, QueryCompiler};
use std::collections::HashMap;
use thiserror::Error;

/// Errors from a full fetch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Request parameters were rejected
    #[error(transparent)]
    Params(#[from] ParamError),

    /// The backend failed to run the query
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Fetches telemetry events of any data kind
#[derive(Clone)]
pub struct TelemetryFetcher {
    executor: QueryExecutor,
    compiler: QueryCompiler,
    max_time_diff_minutes: u32,
    log_groups: HashMap<DataKind, String>,
}

impl TelemetryFetcher {
    pub fn new(executor: QueryExecutor, max_time_diff_minutes: u32) -> Self {
        Self {
            executor,
            compiler: QueryCompiler::new(),
            max_time_diff_minutes,
            log_groups: HashMap::new(),
        }
    }

    /// Builder method: query `log_group` instead of the kind's default
    pub fn with_log_group(mut self, kind: DataKind, log_group: impl Into<String>) -> Self {
        self.log_groups.insert(kind, log_group.into());
        self
    }

    pub fn max_time_diff_minutes(&self) -> u32 {
        self.max_time_diff_minutes
    }

    /// Log group queried for `kind`
    pub fn log_group(&self, kind: DataKind) -> &str {
        self.log_groups
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_log_group())
    }

    /// Validate the parameters and build the query to submit
    pub fn prepare(
        &self,
        kind: DataKind,
        params: &RequestParameters,
    ) -> Result<QuerySpec, ParamError> {
        let range = resolve_time_range(params, self.max_time_diff_minutes)?;
        let filter = extract_printer_filter(params)?;
        let query_text = self.compiler.compile(kind, &filter);

        tracing::debug!(
            kind = %kind,
            window = %range,
            product_number = %filter.product_number,
            serial_number = %filter.serial_number,
            "Prepared telemetry query"
        );

        Ok(QuerySpec::new(&range, self.log_group(kind), query_text))
    }

    /// Validate, compile and run the query for `kind`
    pub async fn fetch(
        &self,
        kind: DataKind,
        params: &RequestParameters,
    ) -> Result<QueryResult, FetchError> {
        let spec = self.prepare(kind, params)?;
        let result = self.executor.execute(&spec).await?;
        Ok(result)
    }
}
