use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use contactbook_core::DomainError;
use contactbook_infra::StoreError;

use crate::app::envelope::Envelope;

/// Every way a contact request can fail.
///
/// Each variant renders as exactly one error envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body was not a well-formed contact payload.
    #[error("{0}")]
    Parse(String),

    /// A required field was missing or empty.
    #[error("{0}")]
    Validation(String),

    /// The path identifier could not be decoded (strict id policy).
    #[error("{0}")]
    InvalidId(String),

    /// The store gateway failed; also covers lookups that found nothing.
    #[error("{0}")]
    Storage(String),

    #[error("store operation timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Parse(_) | ApiError::Validation(_) | ApiError::InvalidId(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Storage(_) | ApiError::Timeout(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Parse(rejection.body_text())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(_) => ApiError::Validation(err.to_string()),
            DomainError::InvalidId(_) => ApiError::InvalidId(err.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Storage(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::info!(status = status.as_u16(), error = %self, "request rejected");
        }
        Envelope::error(status, self.to_string()).into_response()
    }
}
