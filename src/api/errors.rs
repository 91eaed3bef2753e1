//! # API Errors
//!
//! Error taxonomy of the routing contract and its HTTP status mapping.
//! Every error is rendered as `{"error": message}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

/// Result type for contract operations
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Malformed request body
    #[error("{0}")]
    Validation(String),

    /// Known path, unsupported method
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// Unknown path
    #[error("Not Found")]
    NotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Any failure of the document store, not-found included
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn invalid_contacts() -> Self {
        ApiError::Validation("Invalid contacts data".to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }

    /// Log at the handler boundary, with the store cause when there is one
    pub fn log(&self) {
        match self {
            ApiError::Store(err) => {
                tracing::error!(op = %err.op(), cause = %err.cause(), "{}", err)
            }
            other => tracing::warn!(status = other.status_code().as_u16(), "{}", other),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        (self.status_code(), Json(self.body())).into_response()
    }
}
