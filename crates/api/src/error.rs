//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog_query::QueryError;
use catalog_store::StoreError;
use catalog_view::ViewError;
use common::PriceError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Store operation error.
    Store(StoreError),
    /// View pipeline error.
    View(ViewError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Store(err) => store_error_to_response(err),
            ApiError::View(err) => view_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn store_error_to_response(err: StoreError) -> (StatusCode, String) {
    match &err {
        StoreError::ProductNotFound(_) | StoreError::CategoryNotFound(_) => {
            (StatusCode::NOT_FOUND, err.to_string())
        }
        StoreError::InvalidRecord(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        StoreError::Unavailable(_) => {
            tracing::error!(error = %err, "store unavailable");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

fn view_error_to_response(err: ViewError) -> (StatusCode, String) {
    match err {
        ViewError::ReorderBeforeReady => (StatusCode::CONFLICT, err.to_string()),
        ViewError::Store(store_err) => store_error_to_response(store_err),
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl From<ViewError> for ApiError {
    fn from(err: ViewError) -> Self {
        ApiError::View(err)
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<PriceError> for ApiError {
    fn from(err: PriceError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
