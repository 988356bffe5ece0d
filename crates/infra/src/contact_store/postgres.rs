//! Postgres-backed contact document store.
//!
//! Documents live in a single JSONB column keyed by a UUID primary key:
//!
//! ```sql
//! CREATE TABLE contacts (
//!     id       UUID PRIMARY KEY,
//!     document JSONB NOT NULL
//! );
//! ```
//!
//! ## Error Mapping
//!
//! Every SQLx error becomes `StoreError::Storage`, tagged with the operation
//! that failed. A missing row on `find_by_id` is `StoreError::NotFound`.
//!
//! ## Thread Safety
//!
//! `PostgresContactStore` is `Send + Sync`; the SQLx pool handles connection
//! sharing across request tasks.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::{PgPool, Row};
use tracing::instrument;

use contactbook_core::{Contact, ContactDraft, ContactId};

use super::cursor::ContactCursor;
use super::r#trait::{ContactStore, StoreError};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS contacts (
    id       UUID PRIMARY KEY,
    document JSONB NOT NULL
)
"#;

/// Contact store over a Postgres JSONB collection.
#[derive(Debug, Clone)]
pub struct PostgresContactStore {
    pool: Arc<PgPool>,
}

impl PostgresContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Connect to `database_url` and build a store over the new pool.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `contacts` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait]
impl ContactStore for PostgresContactStore {
    #[instrument(skip(self, draft), err)]
    async fn insert(&self, draft: ContactDraft) -> Result<ContactId, StoreError> {
        let id = ContactId::new();
        let document = serde_json::to_value(Contact::from_draft(id, draft))
            .map_err(|e| StoreError::storage(format!("failed to encode document: {e}")))?;

        sqlx::query("INSERT INTO contacts (id, document) VALUES ($1, $2)")
            .bind(id.as_uuid())
            .bind(document)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert", e))?;

        Ok(id)
    }

    #[instrument(skip(self, id), fields(contact_id = %id), err)]
    async fn find_by_id(&self, id: ContactId) -> Result<Contact, StoreError> {
        let row = sqlx::query("SELECT document FROM contacts WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_by_id", e))?
            .ok_or(StoreError::NotFound)?;

        let document: JsonValue = row
            .try_get("document")
            .map_err(|e| StoreError::decode(format!("failed to read document column: {e}")))?;

        serde_json::from_value(document).map_err(|e| StoreError::decode(e.to_string()))
    }

    #[instrument(skip(self), err)]
    async fn find_all(&self) -> Result<ContactCursor, StoreError> {
        let rows = sqlx::query("SELECT document FROM contacts")
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_all", e))?;

        // Column read failures become undecodable documents, reported per item.
        let documents = rows
            .into_iter()
            .map(|row| row.try_get::<JsonValue, _>("document").unwrap_or(JsonValue::Null))
            .collect();

        Ok(ContactCursor::new(documents))
    }

    #[instrument(skip(self, id, draft), fields(contact_id = %id), err)]
    async fn update_by_id(&self, id: ContactId, draft: ContactDraft) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE contacts
            SET document = document || jsonb_build_object('name', $2::text, 'email', $3::text)
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(draft.name)
        .bind(draft.email)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_by_id", e))?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self, id), fields(contact_id = %id), err)]
    async fn delete_by_id(&self, id: ContactId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_by_id", e))?;

        Ok(result.rows_affected())
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => StoreError::storage(format!(
            "database error in {}: {}",
            operation,
            db_err.message()
        )),
        sqlx::Error::PoolClosed => {
            StoreError::storage(format!("connection pool closed in {}", operation))
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::storage(format!("timed out acquiring a connection in {}", operation))
        }
        _ => StoreError::storage(format!("sqlx error in {}: {}", operation, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_errors_map_to_storage() {
        let err = map_sqlx_error("insert", sqlx::Error::PoolClosed);
        assert_eq!(
            err,
            StoreError::Storage("connection pool closed in insert".to_string())
        );
    }

    #[test]
    fn other_errors_keep_the_operation_name() {
        let err = map_sqlx_error("find_all", sqlx::Error::RowNotFound);
        match err {
            StoreError::Storage(msg) => assert!(msg.starts_with("sqlx error in find_all")),
            other => panic!("expected storage error, got {other:?}"),
        }
    }
}
