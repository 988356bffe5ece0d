use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use contactbook_core::{Contact, ContactDraft, ContactId};

use super::cursor::ContactCursor;

/// Store gateway error.
///
/// These are **infrastructure errors** as opposed to domain errors (validation,
/// identifiers).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No document matches the requested identifier.
    #[error("no document matches the requested id")]
    NotFound,

    /// Connectivity or driver-level failure.
    #[error("storage failure: {0}")]
    Storage(String),

    /// A stored document could not be decoded into a `Contact`.
    #[error("failed to decode document: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

/// CRUD primitives over a single collection of contact documents.
///
/// Identifier matching always uses the store's primary key.
///
/// ## Counts
///
/// `update_by_id` and `delete_by_id` report how many documents they touched
/// (0 or 1) and never signal not-found themselves; callers decide what a zero
/// count means.
///
/// ## Concurrency
///
/// Implementations are shared across request tasks (`Send + Sync`). Each call
/// is a single-document operation; there are no transactions spanning calls and
/// concurrent writes to the same id are last-write-wins.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Assign a fresh identifier, persist the record, and return the identifier.
    async fn insert(&self, draft: ContactDraft) -> Result<ContactId, StoreError>;

    /// Fetch one record. `StoreError::NotFound` when absent.
    async fn find_by_id(&self, id: ContactId) -> Result<Contact, StoreError>;

    /// Open a lazy scan over every record, in store-native order.
    ///
    /// Only the initial query can fail; decode failures are reported per item
    /// by the returned cursor.
    async fn find_all(&self) -> Result<ContactCursor, StoreError>;

    /// Replace `name` and `email` on the matching record. Returns the matched count.
    async fn update_by_id(&self, id: ContactId, draft: ContactDraft) -> Result<u64, StoreError>;

    /// Remove the matching record. Returns the deleted count.
    async fn delete_by_id(&self, id: ContactId) -> Result<u64, StoreError>;
}

#[async_trait]
impl<S> ContactStore for Arc<S>
where
    S: ContactStore + ?Sized,
{
    async fn insert(&self, draft: ContactDraft) -> Result<ContactId, StoreError> {
        (**self).insert(draft).await
    }

    async fn find_by_id(&self, id: ContactId) -> Result<Contact, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn find_all(&self) -> Result<ContactCursor, StoreError> {
        (**self).find_all().await
    }

    async fn update_by_id(&self, id: ContactId, draft: ContactDraft) -> Result<u64, StoreError> {
        (**self).update_by_id(id, draft).await
    }

    async fn delete_by_id(&self, id: ContactId) -> Result<u64, StoreError> {
        (**self).delete_by_id(id).await
    }
}
