//! In-process counter storage.
//!
//! Used for local development (`CHECKSTATS_STORE=memory`) and tests. Values
//! are lost on restart. Expired keys are dropped lazily when read.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CounterStore;

struct Entry {
    value: String,
    ttl_secs: Option<u64>,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }
}

/// HashMap-backed implementation of CounterStore.
#[derive(Default)]
pub struct MemoryCounterStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// TTL passed with the last write of `key`.
    /// Outer `None` if the key is absent, inner `None` if it never expires.
    #[cfg(test)]
    pub async fn ttl_of(&self, key: &str) -> Option<Option<u64>> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|e| e.is_live(Instant::now()))
            .map(|e| e.ttl_secs)
    }

    /// Delete `key`, as if its TTL had elapsed.
    #[cfg(test)]
    pub async fn remove(&self, key: &str) {
        self.entries.write().await.remove(key);
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if entry.is_live(now) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|e| !e.is_live(now)) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn put(&self, key: &str, value: &str, ttl_secs: Option<u64>) -> Result<()> {
        let expires_at = ttl_secs.map(|ttl| Instant::now() + Duration::from_secs(ttl));
        self.entries.write().await.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                ttl_secs,
                expires_at,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn absent_key_reads_as_none() {
        let store = MemoryCounterStore::new();
        assert_eq!(store.get("total_count").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_then_get_returns_value() {
        let store = MemoryCounterStore::new();
        store.put("total_count", "7", None).await.unwrap();

        assert_eq!(store.get("total_count").await.unwrap().as_deref(), Some("7"));
        assert_eq!(store.ttl_of("total_count").await, Some(None));
    }

    #[tokio::test]
    async fn put_overwrites_and_refreshes_ttl() {
        let store = MemoryCounterStore::new();
        store.put("daily_count_2024-01-01", "1", Some(10)).await.unwrap();
        store.put("daily_count_2024-01-01", "2", Some(20)).await.unwrap();

        assert_eq!(
            store.get("daily_count_2024-01-01").await.unwrap().as_deref(),
            Some("2")
        );
        assert_eq!(store.ttl_of("daily_count_2024-01-01").await, Some(Some(20)));
    }

    #[tokio::test]
    async fn zero_ttl_expires_immediately() {
        let store = MemoryCounterStore::new();
        store.put("daily_ips_2024-01-01", "abc", Some(0)).await.unwrap();

        assert_eq!(store.get("daily_ips_2024-01-01").await.unwrap(), None);
        assert_eq!(store.ttl_of("daily_ips_2024-01-01").await, None);
    }

    #[tokio::test]
    async fn health_check_is_always_ok() {
        assert!(MemoryCounterStore::new().health_check().await.unwrap());
    }
}
