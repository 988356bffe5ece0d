use axum::{routing::get, Router};

pub mod contacts;
pub mod system;

/// Route table for the contact endpoints.
///
/// | Method | Path | Handler |
/// |---|---|---|
/// | GET | `/` | list |
/// | POST | `/contacts` | create |
/// | GET | `/contacts/:contact_id` | get |
/// | PUT | `/contacts/:contact_id` | update |
/// | DELETE | `/contacts/:contact_id` | delete |
pub fn router() -> Router {
    Router::new()
        .route("/", get(contacts::list_contacts))
        .nest("/contacts", contacts::router())
}
