use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use tracing::debug;

use crate::domain::{CacheKey, DomainError};

/// Memoizes raw model responses.
///
/// A cache only ever saves latency and cost: a miss must produce the same
/// result a hit would have, just more slowly.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Return the stored value if present and younger than its TTL.
    async fn get(&self, key: &CacheKey) -> Option<String>;

    async fn insert(&self, key: CacheKey, value: String, ttl: Duration);

    /// Number of live entries.
    async fn len(&self) -> usize;

    /// Return the cached value for `key`, or run `compute` and store its
    /// output. Errors from `compute` are returned as-is and nothing is stored.
    async fn get_or_compute<'a>(
        &'a self,
        key: &'a CacheKey,
        ttl: Duration,
        compute: BoxFuture<'a, Result<String, DomainError>>,
    ) -> Result<String, DomainError> {
        if let Some(hit) = self.get(key).await {
            debug!("Response cache hit for {}", key);
            return Ok(hit);
        }

        debug!("Response cache miss for {}", key);
        let value = compute.await?;
        self.insert(key.clone(), value.clone(), ttl).await;
        Ok(value)
    }
}
