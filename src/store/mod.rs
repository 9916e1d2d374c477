//! Durable key/value records.
//!
//! Readers go through [`load`], which fails soft: a missing, unreadable or
//! schema-incompatible record is logged and treated as absent. Writers go
//! through [`save`], which overwrites the whole record for a key.
//!
//! Provider-backed operations are serialized across every process sharing a
//! store by a single [`OperationLease`]. A lease that outlives its holder
//! expires instead of blocking forever.

pub mod memory;
pub mod sqlite;

use crate::config::{Config, StorageBackend};
use crate::error::StoreError;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Record holding the generated-task library.
pub const TASK_LIBRARY_KEY: &str = "task_library";
/// Record holding the working session.
pub const SESSION_KEY: &str = "current_session";
/// Record holding completed assessments.
pub const ASSESSMENT_HISTORY_KEY: &str = "assessment_history";

/// Claim on the store-wide slot for one provider-backed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationLease {
    pub owner: String,
    pub operation: String,
    pub expires_at: DateTime<Utc>,
}

impl OperationLease {
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Raw persistence contract. Each `save_raw` replaces the value for `key`
/// in a single write.
pub trait PersistentStore: Send + Sync {
    fn name(&self) -> &str;

    fn load_raw<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>>> + Send + 'a>>;

    fn save_raw<'a>(
        &'a self,
        key: &'a str,
        value: String,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

    /// Take the operation slot for `lease.owner` unless another owner holds a
    /// live lease. Returns that holder's operation when the slot is taken.
    fn try_claim<'a>(
        &'a self,
        lease: &'a OperationLease,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>>> + Send + 'a>>;

    /// Give up the slot if `owner` still holds it.
    fn release<'a>(
        &'a self,
        owner: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

/// Build the store selected in config. An unopenable database degrades to
/// an in-memory store so the session can still run.
pub async fn create_store(config: &Config) -> Arc<dyn PersistentStore> {
    match config.storage.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::Sqlite => {
            let path = config.database_path();
            match SqliteStore::open(&path).await {
                Ok(store) => Arc::new(store),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "store unavailable; state will not persist");
                    Arc::new(MemoryStore::new())
                }
            }
        }
    }
}

/// Load and decode the record for `key`, treating any failure as absent.
pub async fn load<T: DeserializeOwned>(store: &dyn PersistentStore, key: &str) -> Option<T> {
    let raw = match store.load_raw(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            tracing::warn!(store = store.name(), key, error = %err, "failed to read record; starting empty");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(store = store.name(), key, error = %err, "ignoring unreadable record");
            None
        }
    }
}

/// Encode and write `value` under `key`. Failures are logged, not returned.
pub async fn save<T: Serialize + ?Sized>(store: &dyn PersistentStore, key: &str, value: &T) {
    let encoded = match serde_json::to_string(value) {
        Ok(encoded) => encoded,
        Err(err) => {
            let err = StoreError::Encode {
                key: key.to_string(),
                message: err.to_string(),
            };
            tracing::warn!(store = store.name(), error = %err, "record not saved");
            return;
        }
    };

    if let Err(err) = store.save_raw(key, encoded).await {
        tracing::warn!(store = store.name(), key, error = %err, "failed to write record");
    } else {
        tracing::debug!(store = store.name(), key, "record saved");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FailingStore {
        wrote: AtomicBool,
    }

    impl PersistentStore for FailingStore {
        fn name(&self) -> &str {
            "failing"
        }

        fn load_raw<'a>(
            &'a self,
            _key: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Option<String>>> + Send + 'a>> {
            Box::pin(async move { anyhow::bail!("disk unavailable") })
        }

        fn save_raw<'a>(
            &'a self,
            _key: &'a str,
            _value: String,
        ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
            self.wrote.store(true, Ordering::SeqCst);
            Box::pin(async move { anyhow::bail!("disk full") })
        }

        fn try_claim<'a>(
            &'a self,
            _lease: &'a OperationLease,
        ) -> Pin<Box<dyn Future<Output = Result<Option<String>>> + Send + 'a>> {
            Box::pin(async move { anyhow::bail!("disk unavailable") })
        }

        fn release<'a>(
            &'a self,
            _owner: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
            Box::pin(async move { Ok(()) })
        }
    }

    #[tokio::test]
    async fn read_error_is_treated_as_absent() {
        let store = FailingStore {
            wrote: AtomicBool::new(false),
        };
        let loaded: Option<Vec<String>> = load(&store, TASK_LIBRARY_KEY).await;
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn write_error_does_not_propagate() {
        let store = FailingStore {
            wrote: AtomicBool::new(false),
        };
        save(&store, SESSION_KEY, &vec!["x"]).await;
        assert!(store.wrote.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn malformed_record_is_treated_as_absent() {
        let store = MemoryStore::new();
        store
            .save_raw(ASSESSMENT_HISTORY_KEY, "{not json".into())
            .await
            .unwrap();
        let loaded: Option<Vec<i64>> = load(&store, ASSESSMENT_HISTORY_KEY).await;
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn incompatible_shape_is_treated_as_absent() {
        let store = MemoryStore::new();
        save(&store, TASK_LIBRARY_KEY, &serde_json::json!({"legacy": true})).await;
        let loaded: Option<Vec<String>> = load(&store, TASK_LIBRARY_KEY).await;
        assert!(loaded.is_none());
    }
}
