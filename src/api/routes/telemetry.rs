//! Telemetry Routes
//!
//! One endpoint per data kind, all sharing the same query parameters.
//!
//! - GET /cc/V01/api/open-xml
//! - GET /cc/V01/api/cloud-json
//! - GET /cc/V01/api/heartbeat
//! - GET /cc/V01/api/rta

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::insights::QueryResult;
use crate::params::RequestParameters;
use crate::query::DataKind;

/// GET /cc/V01/api/:kind
///
/// Validate the query string, run the query for `kind` and return the
/// backend's result payload.
pub async fn fetch_telemetry(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(raw): Query<HashMap<String, String>>,
) -> ApiResult<Json<QueryResult>> {
    let Some(kind) = DataKind::from_slug(&slug) else {
        tracing::debug!(slug = %slug, "No data kind for path");
        return Err(ApiError::InvalidEndpoint);
    };
    let params = RequestParameters::from_query(&raw);

    let result = state.fetcher.fetch(kind, &params).await?;

    tracing::info!(
        kind = %kind,
        status = %result.status,
        rows = result.row_count(),
        "Telemetry query served"
    );

    Ok(Json(result))
}
