use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::ResponseCache;
use crate::domain::CacheKey;

pub const DEFAULT_CACHE_CAPACITY: usize = 256;

struct CacheEntry {
    value: String,
    inserted_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() >= self.ttl
    }
}

/// Process-local response cache with per-entry TTL and a size bound.
///
/// When full, expired entries are purged first; if none are, the oldest
/// entry is evicted.
pub struct InMemoryResponseCache {
    entries: Arc<Mutex<HashMap<CacheKey, CacheEntry>>>,
    capacity: usize,
}

impl InMemoryResponseCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }
}

impl Default for InMemoryResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResponseCache for InMemoryResponseCache {
    async fn get(&self, key: &CacheKey) -> Option<String> {
        let mut entries = self.entries.lock().await;
        let expired = match entries.get(key) {
            Some(entry) if !entry.is_expired() => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            debug!("Cache entry for {} expired", key);
            entries.remove(key);
        }
        None
    }

    async fn insert(&self, key: CacheKey, value: String, ttl: Duration) {
        let mut entries = self.entries.lock().await;

        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            entries.retain(|_, e| !e.is_expired());
        }
        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, e)| e.inserted_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                debug!("Evicting cache entry for {}", oldest);
                entries.remove(&oldest);
            }
        }

        entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
                ttl,
            },
        );
    }

    async fn len(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.values().filter(|e| !e.is_expired()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, QueryKey};

    const DAY: Duration = Duration::from_secs(86_400);

    fn key(q: &str) -> CacheKey {
        CacheKey::new(QueryKey::new(q), "fingerprint", 3)
    }

    #[tokio::test]
    async fn get_returns_inserted_value() {
        let cache = InMemoryResponseCache::new();
        cache.insert(key("travel"), "cached".to_string(), DAY).await;

        assert_eq!(cache.get(&key("travel")).await.as_deref(), Some("cached"));
        assert_eq!(cache.get(&key("gas")).await, None);
    }

    #[tokio::test]
    async fn expired_entries_are_not_returned() {
        let cache = InMemoryResponseCache::new();
        cache.insert(key("travel"), "stale".to_string(), Duration::ZERO).await;

        assert_eq!(cache.get(&key("travel")).await, None);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn get_or_compute_runs_compute_once() {
        let cache = InMemoryResponseCache::new();
        let k = key("travel");

        let first = cache
            .get_or_compute(
                &k,
                DAY,
                Box::pin(async { Ok::<_, DomainError>("fresh".to_string()) }),
            )
            .await
            .unwrap();
        let second = cache
            .get_or_compute(
                &k,
                DAY,
                Box::pin(async { Ok::<_, DomainError>("recomputed".to_string()) }),
            )
            .await
            .unwrap();

        assert_eq!(first, "fresh");
        assert_eq!(second, "fresh");
    }

    #[tokio::test]
    async fn get_or_compute_recomputes_after_ttl() {
        let cache = InMemoryResponseCache::new();
        let k = key("travel");

        cache
            .get_or_compute(
                &k,
                Duration::ZERO,
                Box::pin(async { Ok::<_, DomainError>("old".to_string()) }),
            )
            .await
            .unwrap();
        let value = cache
            .get_or_compute(
                &k,
                DAY,
                Box::pin(async { Ok::<_, DomainError>("new".to_string()) }),
            )
            .await
            .unwrap();

        assert_eq!(value, "new");
    }

    #[tokio::test]
    async fn get_or_compute_does_not_store_errors() {
        let cache = InMemoryResponseCache::new();
        let k = key("travel");

        let result = cache
            .get_or_compute(
                &k,
                DAY,
                Box::pin(async { Err::<String, _>(DomainError::fetch_failed("down")) }),
            )
            .await;

        assert!(result.is_err());
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn capacity_evicts_oldest_entry() {
        let cache = InMemoryResponseCache::with_capacity(2);
        cache.insert(key("a"), "1".to_string(), DAY).await;
        tokio::time::sleep(Duration::from_millis(2)).await;
        cache.insert(key("b"), "2".to_string(), DAY).await;
        tokio::time::sleep(Duration::from_millis(2)).await;
        cache.insert(key("c"), "3".to_string(), DAY).await;

        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.get(&key("a")).await, None);
        assert!(cache.get(&key("b")).await.is_some());
        assert!(cache.get(&key("c")).await.is_some());
    }

    #[tokio::test]
    async fn overwriting_same_key_keeps_one_entry() {
        let cache = InMemoryResponseCache::with_capacity(1);
        cache.insert(key("a"), "1".to_string(), DAY).await;
        cache.insert(key("a"), "1".to_string(), DAY).await;

        assert_eq!(cache.len().await, 1);
    }
}
