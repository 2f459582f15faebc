use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::application::{
    build_prompt, normalize_query, parse_recommendations, CandidateFilter, ChatClient,
    RecommendationFetcher, ResponseCache,
};
use crate::domain::{
    Catalog, DomainError, PipelineConfig, PipelineStage, Recommendation, RecommendationOutcome,
    MAX_RECOMMENDATIONS, MIN_RECOMMENDATIONS,
};

/// Turns a free-text question into card recommendations.
///
/// Runs filter, prompt, fetch and normalize once per call. The catalog,
/// filter, model client and optional cache are injected at construction
/// and shared for the life of the process.
pub struct RecommendCardsUseCase {
    catalog: Catalog,
    filter: Arc<dyn CandidateFilter>,
    fetcher: RecommendationFetcher,
    config: PipelineConfig,
}

impl RecommendCardsUseCase {
    pub fn new(
        catalog: Catalog,
        filter: Arc<dyn CandidateFilter>,
        chat_client: Arc<dyn ChatClient>,
        config: PipelineConfig,
    ) -> Self {
        let cap = config.candidate_cap;
        let config = config.with_candidate_cap(cap);
        let fetcher = RecommendationFetcher::new(chat_client, &config);
        Self {
            catalog,
            filter,
            fetcher,
            config,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.fetcher = self.fetcher.with_cache(cache);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Recommend up to `count` cards (1..=10) for `query`.
    pub async fn execute(
        &self,
        query: &str,
        count: usize,
    ) -> Result<Vec<Recommendation>, DomainError> {
        let mut stage = PipelineStage::Idle;
        self.run(query, count, &mut stage).await
    }

    /// Like [`Self::execute`], but never fails: any per-request error becomes
    /// an empty result carrying a user-facing message.
    pub async fn respond(&self, query: &str, count: usize) -> RecommendationOutcome {
        let mut stage = PipelineStage::Idle;
        match self.run(query, count, &mut stage).await {
            Ok(recommendations) => RecommendationOutcome::success(recommendations),
            Err(e) => {
                warn!("Recommendation failed during {}: {}", stage, e);
                RecommendationOutcome::failure(e.user_message(), stage)
            }
        }
    }

    async fn run(
        &self,
        query: &str,
        count: usize,
        stage: &mut PipelineStage,
    ) -> Result<Vec<Recommendation>, DomainError> {
        if !(MIN_RECOMMENDATIONS..=MAX_RECOMMENDATIONS).contains(&count) {
            return Err(DomainError::invalid_input(format!(
                "Number of recommendations must be between {} and {}, got {}.",
                MIN_RECOMMENDATIONS, MAX_RECOMMENDATIONS, count
            )));
        }

        let start = Instant::now();
        info!("Recommending {} cards for: {}", count, query);

        advance(stage, PipelineStage::Filtering);
        if self.catalog.is_empty() {
            return Err(DomainError::EmptyCatalog);
        }
        let candidates = self.filter.select(
            &query.to_lowercase(),
            &self.catalog,
            self.config.candidate_cap,
        );
        if candidates.is_empty() {
            return Err(DomainError::EmptyCatalog);
        }
        debug!(
            "{} filter kept {} of {} cards: {:?}",
            self.filter.name(),
            candidates.len(),
            self.catalog.len(),
            candidates.names()
        );

        let query_key = normalize_query(query);
        let request = build_prompt(query, &candidates, count, &self.config);

        advance(stage, PipelineStage::Fetching);
        let raw = self
            .fetcher
            .fetch(&query_key, &candidates, count, &request)
            .await?;

        advance(stage, PipelineStage::Normalizing);
        let recommendations = parse_recommendations(&raw, count)?;

        for rec in &recommendations {
            if !self.catalog.contains_card(&rec.card_name) {
                warn!(
                    "Model recommended '{}', which is not in the catalog",
                    rec.card_name
                );
            }
        }

        advance(stage, PipelineStage::Done);
        info!(
            "Produced {} recommendations in {:.2}s",
            recommendations.len(),
            start.elapsed().as_secs_f64()
        );

        Ok(recommendations)
    }
}

fn advance(stage: &mut PipelineStage, next: PipelineStage) {
    debug!("Pipeline {} -> {}", stage, next);
    *stage = next;
}
