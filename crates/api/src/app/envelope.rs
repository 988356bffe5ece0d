//! The fixed response wrapper written for every contact route.
//!
//! ```json
//! { "status": 201, "message": "success", "data": { "data": { "inserted_id": "..." } } }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload<T> {
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: u16,
    pub message: Outcome,
    pub data: Payload<T>,
}

impl<T> Envelope<T> {
    pub fn success(status: StatusCode, data: T) -> Self {
        Self {
            status: status.as_u16(),
            message: Outcome::Success,
            data: Payload { data },
        }
    }

    pub fn ok(data: T) -> Self {
        Self::success(StatusCode::OK, data)
    }
}

impl Envelope<String> {
    pub fn error(status: StatusCode, text: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: Outcome::Error,
            data: Payload { data: text.into() },
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
