//! HTTP error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pathfinder_core::{QueryError, ValidationError};
use pathfinder_storage::StorageError;
use serde::Serialize;
use thiserror::Error;

/// Errors returned by the API handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(StorageError),
}

/// JSON body of an error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub error_type: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Query(_) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Query(QueryError::NodeNotFound(_)) => "NodeNotFound",
            Self::Query(QueryError::NoPathFound { .. }) => "NoPathFound",
            Self::NotFound(_) => "NotFound",
            Self::BadRequest(_) => "BadRequest",
            Self::Storage(_) => "StorageError",
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NodeNotFound(id) => Self::Query(QueryError::NodeNotFound(id)),
            err if err.is_not_found() => Self::NotFound(err.to_string()),
            err if err.is_bad_input() => Self::BadRequest(err.to_string()),
            err => Self::Storage(err),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        let body = ErrorBody {
            error: self.to_string(),
            error_type: self.error_type(),
        };
        (status, Json(body)).into_response()
    }
}
