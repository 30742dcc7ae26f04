//! Cache backend implementation: in-process (DashMap) or Redis.

use dashmap::DashMap;
use deadpool_redis::{Pool, Runtime};
use redis::AsyncCommands;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A cached entry with TTL support.
///
/// The data is wrapped in `Arc` to allow cheap cloning on cache hits.
#[derive(Clone, Debug)]
pub struct CachedEntry {
    pub data: Arc<Vec<u8>>,
    pub cached_at: Instant,
    pub ttl: Duration,
}

impl CachedEntry {
    /// Create a new cached entry.
    pub fn new(data: Vec<u8>, ttl: Duration) -> Self {
        Self {
            data: Arc::new(data),
            cached_at: Instant::now(),
            ttl,
        }
    }

    /// Check if this entry has expired.
    pub fn is_expired(&self) -> bool {
        self.cached_at.elapsed() > self.ttl
    }
}

/// Cache backend shared by the notes service.
///
/// - **Memory**: single-instance mode backed by a DashMap. Used when no
///   Redis URL is configured, and in tests.
/// - **Redis**: shared cache for multi-instance deployments.
///
/// Every operation is best-effort: a backend failure is logged and
/// reported as a miss, never surfaced to the caller.
#[derive(Clone)]
pub enum CacheBackend {
    /// Single-instance: local DashMap only.
    Memory(Arc<DashMap<String, CachedEntry>>),

    /// Shared cache over a Redis connection pool.
    Redis(Pool),
}

impl CacheBackend {
    /// Create a new in-process cache backend.
    pub fn memory() -> Self {
        CacheBackend::Memory(Arc::new(DashMap::new()))
    }

    /// Create a Redis-backed cache from a connection URL.
    pub fn redis(url: &str) -> Result<Self, deadpool_redis::CreatePoolError> {
        let pool = deadpool_redis::Config::from_url(url).create_pool(Some(Runtime::Tokio1))?;
        Ok(CacheBackend::Redis(pool))
    }

    /// Get a value from the cache. Expired and unreadable entries count
    /// as misses.
    pub async fn get(&self, key: &str) -> Option<Arc<Vec<u8>>> {
        match self {
            CacheBackend::Memory(map) => {
                if let Some(entry) = map.get(key) {
                    if !entry.is_expired() {
                        tracing::debug!(key = %key, "cache hit");
                        return Some(Arc::clone(&entry.data));
                    }
                    drop(entry);
                    map.remove(key);
                }
                tracing::debug!(key = %key, "cache miss");
                None
            }
            CacheBackend::Redis(pool) => match pool.get().await {
                Ok(mut conn) => match conn.get::<_, Option<Vec<u8>>>(key).await {
                    Ok(Some(data)) => {
                        tracing::debug!(key = %key, "cache hit");
                        Some(Arc::new(data))
                    }
                    Ok(None) => {
                        tracing::debug!(key = %key, "cache miss");
                        None
                    }
                    Err(e) => {
                        tracing::warn!(key = %key, error = %e, "Redis GET error");
                        None
                    }
                },
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to get Redis connection");
                    None
                }
            },
        }
    }

    /// Set a value in the cache with TTL.
    pub async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) {
        match self {
            CacheBackend::Memory(map) => {
                map.insert(key.to_string(), CachedEntry::new(value, ttl));
            }
            CacheBackend::Redis(pool) => {
                let ttl_secs = ttl.as_secs().max(1);
                match pool.get().await {
                    Ok(mut conn) => {
                        if let Err(e) = conn.set_ex::<_, _, ()>(key, value, ttl_secs).await {
                            tracing::warn!(key = %key, error = %e, "Redis SET error");
                        } else {
                            tracing::debug!(key = %key, ttl_secs = %ttl_secs, "cache set");
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to get Redis connection");
                    }
                }
            }
        }
    }

    /// Invalidate a cache entry.
    ///
    /// Deletion is awaited, not fire-and-forget: a write handler must not
    /// report success while a stale entry could still be served.
    pub async fn invalidate(&self, key: &str) {
        match self {
            CacheBackend::Memory(map) => {
                map.remove(key);
                tracing::debug!(key = %key, "cache invalidated");
            }
            CacheBackend::Redis(pool) => match pool.get().await {
                Ok(mut conn) => {
                    if let Err(e) = conn.del::<_, ()>(key).await {
                        tracing::warn!(key = %key, error = %e, "Redis DEL error");
                    } else {
                        tracing::debug!(key = %key, "cache invalidated");
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to get Redis connection");
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_set_get() {
        let backend = CacheBackend::memory();
        backend
            .set("k", b"value".to_vec(), Duration::from_secs(60))
            .await;
        let got = backend.get("k").await.unwrap();
        assert_eq!(&*got, b"value");
    }

    #[tokio::test]
    async fn test_memory_expired_entry_is_a_miss() {
        let backend = CacheBackend::memory();
        backend
            .set("k", b"value".to_vec(), Duration::from_millis(5))
            .await;
        std::thread::sleep(Duration::from_millis(20));
        assert!(backend.get("k").await.is_none());
    }

    #[tokio::test]
    async fn test_memory_invalidate_removes_entry() {
        let backend = CacheBackend::memory();
        backend
            .set("k", b"value".to_vec(), Duration::from_secs(60))
            .await;
        backend.invalidate("k").await;
        assert!(backend.get("k").await.is_none());
    }
}
