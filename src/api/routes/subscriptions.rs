//! Subscription Route
//!
//! - GET /cc/V01/api/subscriptions - Services a printer is registered with

use axum::{
    extract::{Query, State},
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::params::{extract_printer_filter, RequestParameters};
use crate::subscriptions::{printer_id, PrinterSubscription};

/// GET /cc/V01/api/subscriptions
///
/// Looks up printer id `pn!sn`. No subscriptions is a 404.
pub async fn list_subscriptions(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<HashMap<String, String>>,
) -> ApiResult<Json<Vec<PrinterSubscription>>> {
    let params = RequestParameters::from_query(&raw);
    let filter = extract_printer_filter(&params)?;
    let printer_id = printer_id(&filter);

    let subscriptions = state.subscriptions.printer_subscriptions(&printer_id).await?;

    tracing::info!(
        store = state.subscriptions.name(),
        printer_id = %printer_id,
        count = subscriptions.len(),
        "Subscriptions served"
    );

    Ok(Json(subscriptions))
}
