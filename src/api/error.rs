use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ErrorBody;
use crate::constants::messages::INTERNAL_SERVER_ERROR;
use crate::services::CatalogError;

/// Every failure the API reports collapses into one generic 500. The inner
/// detail is logged, never returned.
#[derive(Debug)]
pub enum ApiError {
    StorageUnavailable(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::StorageUnavailable(msg) => write!(f, "Storage unavailable: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::StorageUnavailable(msg) => {
                tracing::error!("Storage unavailable: {}", msg);
            }
        }

        let body = ErrorBody::new(INTERNAL_SERVER_ERROR);
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::StorageUnavailable(msg) => ApiError::StorageUnavailable(msg),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::StorageUnavailable(err.to_string())
    }
}

impl ApiError {
    /// Malformed input is reported the same way as a storage fault.
    pub fn malformed(msg: impl Into<String>) -> Self {
        ApiError::StorageUnavailable(format!("malformed request: {}", msg.into()))
    }
}
