//! Stored Object Route
//!
//! - GET /cc/V01/api/object - Contents of the document a telemetry row points to

use axum::{
    extract::{Query, State},
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::params::{extract_object_location, RequestParameters};

/// GET /cc/V01/api/object
///
/// Query parameters: `bucket_region` (`US_EAST_1` | `US_WEST_1`), `bucket_name`,
/// `object_key`. Responds with the document text as a JSON string.
pub async fn get_object(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<HashMap<String, String>>,
) -> ApiResult<Json<String>> {
    let params = RequestParameters::from_query(&raw);
    let location = extract_object_location(&params)?;

    let content = state.objects.fetch(&location).await?;

    Ok(Json(content))
}
