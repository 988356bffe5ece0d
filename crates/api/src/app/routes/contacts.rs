use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use contactbook_core::{Contact, ContactDraft};
use contactbook_infra::StoreError;

use crate::app::dto::{self, InsertResult};
use crate::app::envelope::Envelope;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_contact))
        .route(
            "/:contact_id",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
}

/// Parse and validate a create/update body.
fn accept_draft(body: Result<Json<ContactDraft>, JsonRejection>) -> Result<ContactDraft, ApiError> {
    let Json(draft) = body?;
    draft.validate()?;
    Ok(draft)
}

pub async fn create_contact(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<ContactDraft>, JsonRejection>,
) -> Result<Envelope<InsertResult>, ApiError> {
    let draft = accept_draft(body)?;

    let inserted_id = services.call(services.store().insert(draft)).await?;
    tracing::info!(contact_id = %inserted_id, "contact created");

    Ok(Envelope::success(StatusCode::CREATED, InsertResult { inserted_id }))
}

/// A missing record surfaces as a storage failure (`500`), not `404`.
pub async fn get_contact(
    Extension(services): Extension<Arc<AppServices>>,
    Path(contact_id): Path<String>,
) -> Result<Envelope<Contact>, ApiError> {
    let id = services.parse_id(&contact_id)?;
    let contact = services.call(services.store().find_by_id(id)).await?;
    Ok(Envelope::ok(contact))
}

/// Whole-field replacement. An unknown id answers `200` with the zero-value record.
pub async fn update_contact(
    Extension(services): Extension<Arc<AppServices>>,
    Path(contact_id): Path<String>,
    body: Result<Json<ContactDraft>, JsonRejection>,
) -> Result<Envelope<Contact>, ApiError> {
    let draft = accept_draft(body)?;
    let id = services.parse_id(&contact_id)?;

    let matched = services.call(services.store().update_by_id(id, draft)).await?;

    let contact = if matched == 1 {
        services.call(services.store().find_by_id(id)).await?
    } else {
        tracing::debug!(contact_id = %id, "update matched no record");
        Contact::zero()
    };

    Ok(Envelope::ok(contact))
}

pub async fn delete_contact(
    Extension(services): Extension<Arc<AppServices>>,
    Path(contact_id): Path<String>,
) -> Result<Envelope<&'static str>, ApiError> {
    let id = services.parse_id(&contact_id)?;

    let deleted = services.call(services.store().delete_by_id(id)).await?;
    if deleted < 1 {
        return Err(ApiError::NotFound(dto::NOT_FOUND.to_string()));
    }

    tracing::info!(contact_id = %id, "contact deleted");
    Ok(Envelope::ok(dto::DELETED))
}

/// Scan every record. Documents that fail to decode are logged and left out;
/// the scan always runs to the end.
pub async fn list_contacts(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Envelope<Vec<Contact>>, ApiError> {
    let cursor = services.call(services.store().find_all()).await?;

    let mut contacts = Vec::with_capacity(cursor.remaining());
    let mut skipped: Vec<StoreError> = Vec::new();
    for item in cursor {
        match item {
            Ok(contact) => contacts.push(contact),
            Err(e) => skipped.push(e),
        }
    }

    if !skipped.is_empty() {
        for e in &skipped {
            tracing::warn!(error = %e, "skipping undecodable contact document");
        }
        tracing::warn!(
            skipped = skipped.len(),
            returned = contacts.len(),
            "contact scan finished with decode failures"
        );
    }

    Ok(Envelope::ok(contacts))
}
