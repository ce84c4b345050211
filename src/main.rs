//! Printer Timeline API Server
//!
//! Run with: cargo run --bin printer-timeline
//!
//! # Configuration
//!
//! Read from `config.toml` in the usual locations (see [`Config::load_default`]),
//! then overridden by environment variables:
//! - `PRINTER_TIMELINE_HOST` / `PRINTER_TIMELINE_PORT`: bind address (default: 0.0.0.0:8080)
//! - `MAX_TIME_DIFF_IN_MINUTES`: widest accepted window (default: 60, max: 20160)
//! - `PRINTER_TIMELINE_POLL_INTERVAL_MS`: delay between result polls (default: 0)
//! - `MAIN_AWS_REGION`: region of the log groups, `US_EAST_1` buckets and subscription table
//! - `AWS_BLACKSEA_BUCKET_REGION`: region serving `US_WEST_1` buckets (default: us-west-1)
//! - `TABLE_CC_PRINTER_SUBSCRIPTION`: subscription table (default: CCPrinterSubscription)
//! - `PRINTER_TIMELINE_LOG_LEVEL` / `PRINTER_TIMELINE_LOG_FORMAT`: logging
//! - `RUST_LOG`: takes precedence over the configured level

use printer_timeline::api::{serve, AppState};
use printer_timeline::aws::load_sdk_config;
use printer_timeline::config::{Config, LoggingConfig};
use printer_timeline::insights::{CloudWatchBackend, QueryExecutor};
use printer_timeline::storage::{ObjectStores, S3ObjectStore};
use printer_timeline::subscriptions::DynamoSubscriptionStore;
use printer_timeline::TelemetryFetcher;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    init_tracing(&config.logging);

    tracing::info!("Starting Printer Timeline API server v{}", env!("CARGO_PKG_VERSION"));

    let max_time_diff = config.query.effective_max_time_diff();
    tracing::info!("Max time difference: {} minutes", max_time_diff);

    let main_aws = load_sdk_config(config.backend.region.clone()).await;
    let west_aws = load_sdk_config(Some(config.backend.us_west_1_bucket_region.clone())).await;

    let backend = Arc::new(CloudWatchBackend::from_sdk_config(&main_aws));
    let executor = QueryExecutor::new(backend).with_poll_interval(config.query.poll_interval());

    let mut fetcher = TelemetryFetcher::new(executor, max_time_diff);
    for (kind, log_group) in config.query.log_group_overrides()? {
        tracing::info!("Log group for {}: {}", kind, log_group);
        fetcher = fetcher.with_log_group(kind, log_group);
    }

    let objects = ObjectStores::new(
        Arc::new(S3ObjectStore::from_sdk_config(&main_aws)),
        Arc::new(S3ObjectStore::from_sdk_config(&west_aws)),
    );
    let subscriptions = Arc::new(DynamoSubscriptionStore::from_sdk_config(
        &main_aws,
        config.backend.subscription_table.clone(),
    ));

    let addr = config.server.addr();
    tracing::info!("Starting server on {}", addr);
    serve(AppState::new(fetcher, objects, subscriptions), &addr).await?;

    tracing::info!("Printer Timeline API server stopped");
    Ok(())
}

/// Install the global subscriber; `RUST_LOG` wins over the configured level
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("printer_timeline={},tower_http=debug", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
