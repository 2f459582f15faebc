use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::application::{ChatClient, ResponseCache};
use crate::domain::{CacheKey, CandidateSet, CompletionRequest, DomainError, PipelineConfig, QueryKey};

/// Calls the model for one prompt, memoizing raw responses when a cache is attached.
///
/// The cache is keyed on the normalized query, the candidate set fingerprint
/// and the requested count. One attempt per miss, no retries; only
/// successful, size-bounded responses are stored.
pub struct RecommendationFetcher {
    chat_client: Arc<dyn ChatClient>,
    cache: Option<Arc<dyn ResponseCache>>,
    cache_ttl: Duration,
    max_response_bytes: usize,
}

impl RecommendationFetcher {
    pub fn new(chat_client: Arc<dyn ChatClient>, config: &PipelineConfig) -> Self {
        Self {
            chat_client,
            cache: None,
            cache_ttl: config.cache_ttl,
            max_response_bytes: config.max_response_bytes,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn has_cache(&self) -> bool {
        self.cache.is_some()
    }

    pub async fn fetch(
        &self,
        query_key: &QueryKey,
        candidates: &CandidateSet,
        count: usize,
        request: &CompletionRequest,
    ) -> Result<String, DomainError> {
        match self.cache {
            Some(ref cache) => {
                let key = CacheKey::new(query_key.clone(), candidates.fingerprint(), count);
                cache
                    .get_or_compute(&key, self.cache_ttl, Box::pin(self.call_model(request)))
                    .await
            }
            None => self.call_model(request).await,
        }
    }

    async fn call_model(&self, request: &CompletionRequest) -> Result<String, DomainError> {
        info!(
            "Requesting recommendations from {} (prompt {} chars)",
            self.chat_client.model_name(),
            request.system.len() + request.user.len()
        );
        let start = Instant::now();

        let text = self.chat_client.complete(request).await.map_err(|e| match e {
            DomainError::FetchFailed(_) => e,
            other => DomainError::fetch_failed(other.to_string()),
        })?;

        if text.len() > self.max_response_bytes {
            return Err(DomainError::fetch_failed(format!(
                "response of {} bytes exceeds the {} byte limit",
                text.len(),
                self.max_response_bytes
            )));
        }

        debug!(
            "Model answered with {} bytes in {:.2}s",
            text.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(text)
    }
}
