//! HTTP error mapping
//!
//! Maps core todo errors to status codes. Client errors carry an empty body;
//! internal failures are logged and answered with a generic JSON body so no
//! storage detail reaches the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use todo_core::TodoError;

/// Body returned with every 500 response
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// API errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request body could not be decoded into the expected shape
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Store(#[from] TodoError),
}

impl ApiError {
    /// Status code this error is answered with
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            match &self {
                ApiError::Store(err @ TodoError::Database { operation, key, .. }) => {
                    tracing::error!(
                        operation = *operation,
                        key = key.as_deref().unwrap_or(""),
                        error = %err,
                        "Store operation failed"
                    )
                }
                ApiError::Store(err @ TodoError::Timeout { operation, .. }) => tracing::error!(
                    operation = *operation,
                    error = %err,
                    "Operation timed out"
                ),
                err => tracing::error!(error = %err, "Internal error"),
            }
            return (status, Json(json!({ "error": INTERNAL_ERROR_MESSAGE }))).into_response();
        }

        tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        status.into_response()
    }
}
