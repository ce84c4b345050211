//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::fetcher::FetchError;
use crate::params::ParamError;
use crate::storage::StorageError;
use crate::subscriptions::SubscriptionError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Parameter validation or backend failure while fetching
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Object or subscription request parameters were rejected
    #[error(transparent)]
    Params(#[from] ParamError),

    /// Stored document could not be read
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Subscription lookup failed or found nothing
    #[error(transparent)]
    Subscription(#[from] SubscriptionError),

    /// Path does not name a data kind
    #[error("invalid endpoint reached")]
    InvalidEndpoint,

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    /// HTTP status and machine-readable code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Fetch(FetchError::Params(e)) => (StatusCode::BAD_REQUEST, e.code()),
            ApiError::Fetch(FetchError::Backend(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "BACKEND_ERROR")
            }
            ApiError::Params(e) => (StatusCode::BAD_REQUEST, e.code()),
            ApiError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            ApiError::Subscription(SubscriptionError::NotFound) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND")
            }
            ApiError::Subscription(_) => (StatusCode::INTERNAL_SERVER_ERROR, "SUBSCRIPTION_ERROR"),
            ApiError::InvalidEndpoint => (StatusCode::BAD_REQUEST, "NOT_VALID_ENDPOINT"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let request_id = uuid::Uuid::new_v4().to_string();

        // Log the error
        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "API error occurred"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
