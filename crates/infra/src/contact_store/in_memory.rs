use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use contactbook_core::{Contact, ContactDraft, ContactId};

use super::cursor::ContactCursor;
use super::r#trait::{ContactStore, StoreError};

/// In-memory document collection.
///
/// Intended for tests/dev. Documents are kept as raw JSON keyed by id, so the
/// decode path matches the persistent backend.
#[derive(Debug, Default)]
pub struct InMemoryContactStore {
    documents: RwLock<BTreeMap<ContactId, JsonValue>>,
}

impl InMemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an arbitrary document under `id`, bypassing encoding.
    ///
    /// Lets tests seed documents that will not decode.
    pub fn insert_raw_document(&self, id: ContactId, document: JsonValue) -> Result<(), StoreError> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| StoreError::storage("lock poisoned"))?;
        documents.insert(id, document);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.documents.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn insert(&self, draft: ContactDraft) -> Result<ContactId, StoreError> {
        let id = ContactId::new();
        let document = serde_json::to_value(Contact::from_draft(id, draft))
            .map_err(|e| StoreError::storage(format!("failed to encode document: {e}")))?;

        let mut documents = self
            .documents
            .write()
            .map_err(|_| StoreError::storage("lock poisoned"))?;
        documents.insert(id, document);

        tracing::debug!(contact_id = %id, "contact document inserted");
        Ok(id)
    }

    async fn find_by_id(&self, id: ContactId) -> Result<Contact, StoreError> {
        let document = {
            let documents = self
                .documents
                .read()
                .map_err(|_| StoreError::storage("lock poisoned"))?;
            documents.get(&id).cloned().ok_or(StoreError::NotFound)?
        };

        serde_json::from_value(document).map_err(|e| StoreError::decode(e.to_string()))
    }

    async fn find_all(&self) -> Result<ContactCursor, StoreError> {
        let documents = self
            .documents
            .read()
            .map_err(|_| StoreError::storage("lock poisoned"))?;
        Ok(ContactCursor::new(documents.values().cloned().collect()))
    }

    async fn update_by_id(&self, id: ContactId, draft: ContactDraft) -> Result<u64, StoreError> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| StoreError::storage("lock poisoned"))?;

        let Some(document) = documents.get_mut(&id) else {
            return Ok(0);
        };

        // Field-level set: other keys in the document are left alone.
        match document.as_object_mut() {
            Some(fields) => {
                fields.insert("name".to_string(), JsonValue::String(draft.name));
                fields.insert("email".to_string(), JsonValue::String(draft.email));
            }
            None => {
                return Err(StoreError::storage(format!(
                    "document {id} is not an object; cannot set fields"
                )));
            }
        }

        tracing::debug!(contact_id = %id, "contact document updated");
        Ok(1)
    }

    async fn delete_by_id(&self, id: ContactId) -> Result<u64, StoreError> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| StoreError::storage("lock poisoned"))?;

        Ok(documents.remove(&id).map_or(0, |_| 1))
    }
}
