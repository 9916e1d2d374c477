use super::{OperationLease, PersistentStore};
use anyhow::Result;
use chrono::Utc;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

/// Process-local store; contents vanish on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, String>>,
    lease: Mutex<Option<OperationLease>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistentStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn load_raw<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>>> + Send + 'a>> {
        Box::pin(async move {
            let records = self
                .records
                .lock()
                .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
            Ok(records.get(key).cloned())
        })
    }

    fn save_raw<'a>(
        &'a self,
        key: &'a str,
        value: String,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let mut records = self
                .records
                .lock()
                .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
            records.insert(key.to_string(), value);
            Ok(())
        })
    }

    fn try_claim<'a>(
        &'a self,
        lease: &'a OperationLease,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>>> + Send + 'a>> {
        Box::pin(async move {
            let mut slot = self
                .lease
                .lock()
                .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
            if let Some(held) = slot.as_ref()
                && held.owner != lease.owner
                && held.is_live(Utc::now())
            {
                return Ok(Some(held.operation.clone()));
            }
            *slot = Some(lease.clone());
            Ok(None)
        })
    }

    fn release<'a>(
        &'a self,
        owner: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let mut slot = self
                .lease
                .lock()
                .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
            if slot.as_ref().is_some_and(|held| held.owner == owner) {
                *slot = None;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_overwrites_previous_value() {
        let store = MemoryStore::new();
        store.save_raw("k", "1".into()).await.unwrap();
        store.save_raw("k", "2".into()).await.unwrap();
        assert_eq!(store.load_raw("k").await.unwrap().as_deref(), Some("2"));
        assert!(store.load_raw("missing").await.unwrap().is_none());
    }

    fn lease(owner: &str, ttl_secs: i64) -> OperationLease {
        OperationLease {
            owner: owner.into(),
            operation: "assessment".into(),
            expires_at: Utc::now() + chrono::Duration::seconds(ttl_secs),
        }
    }

    #[tokio::test]
    async fn live_lease_blocks_other_owners_until_released() {
        let store = MemoryStore::new();
        assert_eq!(store.try_claim(&lease("a", 60)).await.unwrap(), None);
        assert_eq!(
            store.try_claim(&lease("b", 60)).await.unwrap().as_deref(),
            Some("assessment")
        );

        store.release("b").await.unwrap();
        assert!(store.try_claim(&lease("b", 60)).await.unwrap().is_some());

        store.release("a").await.unwrap();
        assert_eq!(store.try_claim(&lease("b", 60)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn expired_lease_can_be_taken_over() {
        let store = MemoryStore::new();
        store.try_claim(&lease("crashed", -1)).await.unwrap();
        assert_eq!(store.try_claim(&lease("b", 60)).await.unwrap(), None);
    }
}
