//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: shared collaborators (store handle, deadline, id policy)
//! - `routes/`: HTTP routes + handlers
//! - `envelope.rs`: the `{status, message, data}` response wrapper
//! - `dto.rs`: response payloads and fixed messages
//! - `errors.rs`: failure taxonomy mapped onto error envelopes

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod envelope;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::{build_services, AppServices};

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: AppServices) -> Router {
    let services = Arc::new(services);

    let contacts = routes::router().layer(Extension(services));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(contacts)
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::request_context)))
}
