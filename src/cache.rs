//! Key-value cache client (Valkey / Redis protocol).

use crate::config::CacheConfig;
use anyhow::{Context, Result};
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use std::time::Duration;
use tracing::info;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Cache handle. Clones share one multiplexed, auto-reconnecting connection.
#[derive(Clone)]
pub struct Cache {
    conn: ConnectionManager,
}

impl Cache {
    pub async fn connect(config: &CacheConfig) -> Result<Self> {
        let client = Client::open(config.url()).context("Invalid cache connection settings")?;

        let conn = tokio::time::timeout(CONNECT_TIMEOUT, ConnectionManager::new(client))
            .await
            .context("Timed out connecting to cache")?
            .context("Failed to connect to cache")?;

        let cache = Self { conn };
        cache.ping().await?;

        info!("✓ Cache connected at {}:{}", config.host, config.port);
        Ok(cache)
    }

    /// Store `value` under `key`. `None` or a zero TTL stores without expiry.
    pub async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();
        let result = match ttl_seconds(ttl) {
            Some(seconds) => conn.set_ex::<_, _, ()>(key, value, seconds).await,
            None => conn.set::<_, _, ()>(key, value).await,
        };
        result.with_context(|| format!("Cache SET {} failed", key))
    }

    /// Fetch `key`, `None` if it is absent or expired.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(key)
            .await
            .with_context(|| format!("Cache GET {} failed", key))
    }

    /// Delete `keys`, returning how many existed.
    pub async fn del(&self, keys: &[&str]) -> Result<u64> {
        let mut conn = self.conn.clone();
        conn.del(keys).await.context("Cache DEL failed")
    }

    /// Count how many of `keys` exist.
    pub async fn exists(&self, keys: &[&str]) -> Result<u64> {
        let mut conn = self.conn.clone();
        conn.exists(keys).await.context("Cache EXISTS failed")
    }

    /// Set a time-to-live on `key`. Returns false if the key does not exist.
    pub async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        let mut conn = self.conn.clone();
        let seconds = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        conn.expire(key, seconds)
            .await
            .with_context(|| format!("Cache EXPIRE {} failed", key))
    }

    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .context("Cache PING failed")?;
        Ok(())
    }
}

/// Whole seconds for SETEX; sub-second TTLs round up so they still expire.
fn ttl_seconds(ttl: Option<Duration>) -> Option<u64> {
    let ttl = ttl.filter(|d| !d.is_zero())?;
    let seconds = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);
    Some(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_none_means_no_expiry() {
        assert_eq!(ttl_seconds(None), None);
        assert_eq!(ttl_seconds(Some(Duration::ZERO)), None);
    }

    #[test]
    fn test_ttl_whole_seconds() {
        assert_eq!(ttl_seconds(Some(Duration::from_secs(3600))), Some(3600));
    }

    #[test]
    fn test_ttl_rounds_up_fraction() {
        assert_eq!(ttl_seconds(Some(Duration::from_millis(1500))), Some(2));
        assert_eq!(ttl_seconds(Some(Duration::from_millis(1))), Some(1));
    }

    #[tokio::test]
    async fn test_connect_unreachable_server_fails() {
        let config = CacheConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            password: String::new(),
            db: 0,
        };
        assert!(Cache::connect(&config).await.is_err());
    }
}
