//! Collaborators shared by every request: the store handle and its policies.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use contactbook_core::ContactId;
use contactbook_infra::{ContactStore, InMemoryContactStore, PostgresContactStore, StoreError};

use crate::app::errors::ApiError;
use crate::config::{AppConfig, IdPolicy, StoreBackend, DEFAULT_STORE_TIMEOUT_SECS};

/// Process-wide state, built once at startup and handed to handlers.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn ContactStore>,
    store_timeout: Duration,
    id_policy: IdPolicy,
}

impl AppServices {
    pub fn new(store: Arc<dyn ContactStore>, store_timeout: Duration, id_policy: IdPolicy) -> Self {
        Self {
            store,
            store_timeout,
            id_policy,
        }
    }

    /// In-memory store with default policies (dev/test).
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryContactStore::new()),
            Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS),
            IdPolicy::default(),
        )
    }

    pub fn store(&self) -> &dyn ContactStore {
        self.store.as_ref()
    }

    /// Run one store call under the per-call deadline.
    ///
    /// An elapsed deadline drops the in-flight call.
    pub async fn call<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.store_timeout, op).await {
            Ok(result) => result.map_err(ApiError::from),
            Err(_) => Err(ApiError::Timeout(self.store_timeout)),
        }
    }

    /// Decode a path identifier according to the configured id policy.
    pub fn parse_id(&self, raw: &str) -> Result<ContactId, ApiError> {
        match (raw.parse::<ContactId>(), self.id_policy) {
            (Ok(id), _) => Ok(id),
            (Err(e), IdPolicy::Strict) => Err(e.into()),
            (Err(e), IdPolicy::Lenient) => {
                tracing::debug!(raw, error = %e, "malformed id; using nil id");
                Ok(ContactId::nil())
            }
        }
    }
}

/// Build services from configuration, connecting to the configured store.
pub async fn build_services(config: &AppConfig) -> Result<AppServices, StoreError> {
    let store: Arc<dyn ContactStore> = match &config.store {
        StoreBackend::Memory => {
            tracing::info!("using in-memory contact store");
            Arc::new(InMemoryContactStore::new())
        }
        StoreBackend::Postgres { database_url } => {
            let store = PostgresContactStore::connect(database_url).await?;
            store.ensure_schema().await?;
            tracing::info!("using postgres contact store");
            Arc::new(store)
        }
    };

    Ok(AppServices::new(store, config.store_timeout, config.id_policy))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn services(policy: IdPolicy) -> AppServices {
        AppServices::new(
            Arc::new(InMemoryContactStore::new()),
            Duration::from_millis(50),
            policy,
        )
    }

    #[test]
    fn strict_policy_rejects_malformed_ids() {
        let err = services(IdPolicy::Strict).parse_id("zzz").unwrap_err();
        assert!(matches!(err, ApiError::InvalidId(_)));
    }

    #[test]
    fn lenient_policy_falls_back_to_nil() {
        let id = services(IdPolicy::Lenient).parse_id("zzz").unwrap();
        assert!(id.is_nil());
    }

    #[tokio::test]
    async fn slow_calls_time_out() {
        let svc = services(IdPolicy::Strict);
        let err = svc
            .call(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, StoreError>(())
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Timeout(_)));
    }

    #[tokio::test]
    async fn store_errors_pass_through_as_storage() {
        let svc = services(IdPolicy::Strict);
        let err = svc
            .call(async { Err::<(), _>(StoreError::storage("boom")) })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Storage(msg) if msg == "storage failure: boom"));
    }
}
