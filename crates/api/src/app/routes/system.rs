use axum::http::StatusCode;

/// Liveness probe; answers outside the envelope.
pub async fn health() -> StatusCode {
    StatusCode::OK
}
