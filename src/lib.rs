//! # Printer Timeline
//!
//! Answers "give me printer telemetry events of kind K for time window W,
//! optionally for one printer" by compiling the request into a CloudWatch Logs
//! Insights query, waiting for it to finish and returning the raw result set.
//!
//! ## Modules
//!
//! - [`params`]: request parameter validation (time range, printer filter)
//! - [`query`]: data kinds and query template compilation
//! - [`insights`]: backend seam, CloudWatch implementation, submit/poll executor
//! - [`fetcher`]: the per-request pipeline tying the three together
//! - [`storage`]: stored document retrieval from the regional buckets
//! - [`subscriptions`]: printer subscription lookups
//! - [`aws`]: shared AWS SDK configuration loading
//! - [`api`]: REST API server with Axum
//! - [`config`]: configuration file and environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use printer_timeline::insights::{CloudWatchBackend, QueryExecutor};
//! use printer_timeline::params::RequestParameters;
//! use printer_timeline::query::DataKind;
//! use printer_timeline::TelemetryFetcher;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = Arc::new(CloudWatchBackend::from_env(None).await);
//!     let fetcher = TelemetryFetcher::new(QueryExecutor::new(backend), 60);
//!
//!     let params = RequestParameters::new()
//!         .with("time_type", "relative")
//!         .with("offset_units", "minutes")
//!         .with("offset_value", "5")
//!         .with("pn", "L2E27A");
//!
//!     let result = fetcher.fetch(DataKind::Heartbeat, &params).await?;
//!     println!("{} heartbeats ({})", result.row_count(), result.status);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod aws;
pub mod config;
pub mod fetcher;
pub mod insights;
pub mod params;
pub mod query;
pub mod storage;
pub mod subscriptions;

// Re-export top-level types for convenience
pub use params::{
    BucketRegion, ObjectLocation, ParamError, PrinterFilter, RequestParameters, TimeRange,
};

pub use query::{compile_query, DataKind, QueryCompiler};

pub use insights::{
    BackendError, CloudWatchBackend, InsightsBackend, QueryExecutor, QueryResult, QuerySpec,
    QueryStatus,
};

pub use fetcher::{FetchError, TelemetryFetcher};

pub use storage::{ObjectStore, ObjectStores, S3ObjectStore, StorageError};

pub use subscriptions::{
    DynamoSubscriptionStore, PrinterSubscription, SubscriptionError, SubscriptionStore,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig};
