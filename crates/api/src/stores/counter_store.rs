//! Counter storage for Redis.

use anyhow::Result;
use async_trait::async_trait;
use redis::AsyncCommands;

/// Key-value store holding the raw counter values.
///
/// Each individual `get`/`put` is atomic; nothing spanning several keys is.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Health check - verify store connectivity.
    async fn health_check(&self) -> Result<bool>;

    /// Read the value stored under `key`, `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, expiring after `ttl_secs` when given.
    async fn put(&self, key: &str, value: &str, ttl_secs: Option<u64>) -> Result<()>;
}

/// Redis implementation of CounterStore.
#[derive(Clone)]
pub struct RedisCounterStore {
    client: redis::Client,
}

impl RedisCounterStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn health_check(&self) -> Result<bool> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let result: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(result == "PONG")
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: &str, ttl_secs: Option<u64>) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        match ttl_secs {
            Some(ttl) => {
                let _: () = conn.set_ex(key, value, ttl).await?;
            }
            None => {
                let _: () = conn.set(key, value).await?;
            }
        }

        Ok(())
    }
}
