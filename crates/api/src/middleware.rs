use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::context::RequestContext;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Attach a `RequestContext`, run the request inside a span, and log the outcome.
///
/// The request id is echoed back in the `x-request-id` response header.
pub async fn request_context(mut req: Request<Body>, next: Next) -> Response {
    let ctx = extract_request_id(req.headers())
        .map(RequestContext::with_request_id)
        .unwrap_or_default();

    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    req.extensions_mut().insert(ctx);

    let span = tracing::info_span!(
        "request",
        request_id = %ctx.request_id(),
        method = %method,
        path = %path,
    );

    let started = Instant::now();
    let mut res = next.run(req).instrument(span.clone()).await;

    tracing::info!(
        parent: &span,
        status = res.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&ctx.request_id().to_string()) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    res
}

fn extract_request_id(headers: &HeaderMap) -> Option<Uuid> {
    let header = headers.get(REQUEST_ID_HEADER)?;
    let header = header.to_str().ok()?;
    header.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn honours_a_well_formed_request_id() {
        let id = Uuid::now_v7();
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(&id.to_string()).unwrap());
        assert_eq!(extract_request_id(&headers), Some(id));
    }

    #[test]
    fn ignores_a_garbage_request_id() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("abc"));
        assert_eq!(extract_request_id(&headers), None);
        assert_eq!(extract_request_id(&HeaderMap::new()), None);
    }
}
