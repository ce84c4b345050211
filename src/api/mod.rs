//! Printer Timeline REST API
//!
//! HTTP API layer, built with Axum.
//!
//! # Endpoints
//!
//! ## Telemetry
//! - `GET /cc/V01/api/open-xml` - Uploaded Open XML documents
//! - `GET /cc/V01/api/cloud-json` - Cloud generated JSON documents
//! - `GET /cc/V01/api/heartbeat` - Uploaded heartbeats
//! - `GET /cc/V01/api/rta` - RTA reports
//!
//! Query parameters: `time_type` (`relative` | `absolute`), `offset_units`
//! (`seconds` | `minutes`), `offset_value`, `start_time`, `end_time` (epoch seconds),
//! `pn`, `sn`.
//!
//! ## Stored documents
//! - `GET /cc/V01/api/object` - Document a telemetry row points to, as a JSON string
//!
//! Query parameters: `bucket_region` (`US_EAST_1` | `US_WEST_1`), `bucket_name`,
//! `object_key`.
//!
//! ## Subscriptions
//! - `GET /cc/V01/api/subscriptions` - Services printer `pn`/`sn` is registered with
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use printer_timeline::api::{serve, AppState};
//! use printer_timeline::insights::{CloudWatchBackend, QueryExecutor};
//! use printer_timeline::storage::{ObjectStores, S3ObjectStore};
//! use printer_timeline::subscriptions::DynamoSubscriptionStore;
//! use printer_timeline::TelemetryFetcher;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let east = printer_timeline::aws::load_sdk_config(None).await;
//!     let west = printer_timeline::aws::load_sdk_config(Some("us-west-1".into())).await;
//!
//!     let backend = Arc::new(CloudWatchBackend::from_sdk_config(&east));
//!     let fetcher = TelemetryFetcher::new(QueryExecutor::new(backend), 60);
//!     let objects = ObjectStores::new(
//!         Arc::new(S3ObjectStore::from_sdk_config(&east)),
//!         Arc::new(S3ObjectStore::from_sdk_config(&west)),
//!     );
//!     let subscriptions = Arc::new(DynamoSubscriptionStore::from_sdk_config(
//!         &east,
//!         "CCPrinterSubscription",
//!     ));
//!
//!     serve(AppState::new(fetcher, objects, subscriptions), "0.0.0.0:8080").await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Path prefix shared by all data endpoints
pub const API_PREFIX: &str = "/cc/V01/api";

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/object", get(routes::storage::get_object))
        .route("/subscriptions", get(routes::subscriptions::list_subscriptions))
        .route("/:kind", get(routes::telemetry::fetch_telemetry));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest(API_PREFIX, api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, addr: &str) -> Result<(), ApiError> {
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Printer Timeline API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Printer Timeline API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
