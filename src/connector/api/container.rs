use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use tracing::{debug, info};

use crate::application::{CandidateFilter, CatalogSource, ChatClient, RecommendCardsUseCase};
use crate::cli::{FilterStrategy, Provider};
use crate::connector::adapter::{
    AnthropicClient, CsvCatalogSource, InMemoryResponseCache, KeywordCandidateFilter,
    LeadingCandidateFilter, MockChatClient, OpenAiClient,
};
use crate::domain::{Catalog, PipelineConfig};

pub struct ContainerConfig {
    pub catalog_path: String,
    pub provider: Provider,
    pub model: Option<String>,
    pub filter: FilterStrategy,
    pub no_cache: bool,
    pub cache_ttl_secs: u64,
    pub candidate_cap: usize,
    pub timeout_secs: u64,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            catalog_path: "credit_cards.csv".to_string(),
            provider: Provider::Openai,
            model: None,
            filter: FilterStrategy::Keyword,
            no_cache: false,
            cache_ttl_secs: 24 * 60 * 60,
            candidate_cap: 15,
            timeout_secs: 30,
        }
    }
}

impl ContainerConfig {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::default()
            .with_candidate_cap(self.candidate_cap)
            .with_cache_ttl(Duration::from_secs(self.cache_ttl_secs))
    }
}

/// Everything built once at startup and shared for the life of the process.
pub struct Container {
    catalog: Catalog,
    recommend_use_case: Option<Arc<RecommendCardsUseCase>>,
    catalog_origin: String,
}

impl Container {
    /// Load the catalog and construct the configured model client.
    /// Fails on any configuration problem so nothing is served half-set-up.
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let source = CsvCatalogSource::new(&config.catalog_path);
        let catalog = source.load()?;

        let timeout = Duration::from_secs(config.timeout_secs);
        let chat_client: Arc<dyn ChatClient> = match config.provider {
            Provider::Openai => {
                let client = OpenAiClient::from_env(config.model.as_deref(), timeout)?;
                debug!("Using OpenAI chat client at {}", client.url());
                Arc::new(client)
            }
            Provider::Anthropic => {
                let client = AnthropicClient::from_env(config.model.as_deref(), timeout)?;
                debug!("Using Anthropic chat client at {}", client.url());
                Arc::new(client)
            }
            Provider::Mock => {
                info!("Using mock chat client");
                Arc::new(MockChatClient::new())
            }
        };

        Ok(Self::from_parts(catalog, chat_client, &config, source.describe()))
    }

    /// Load only the catalog. No model client is built, so no credentials are
    /// needed; commands that recommend cards fail on this container.
    pub fn catalog_only(config: &ContainerConfig) -> Result<Self> {
        let source = CsvCatalogSource::new(&config.catalog_path);
        let catalog = source.load()?;
        debug!("Catalog-only container, no model client");

        Ok(Self {
            catalog,
            recommend_use_case: None,
            catalog_origin: source.describe(),
        })
    }

    /// Assemble from an already-loaded catalog and client.
    pub fn from_parts(
        catalog: Catalog,
        chat_client: Arc<dyn ChatClient>,
        config: &ContainerConfig,
        catalog_origin: impl Into<String>,
    ) -> Self {
        let filter: Arc<dyn CandidateFilter> = match config.filter {
            FilterStrategy::Keyword => Arc::new(KeywordCandidateFilter::new()),
            FilterStrategy::Leading => Arc::new(LeadingCandidateFilter::new()),
        };

        let mut use_case = RecommendCardsUseCase::new(
            catalog.clone(),
            filter,
            chat_client,
            config.pipeline_config(),
        );
        if !config.no_cache {
            use_case = use_case.with_cache(Arc::new(InMemoryResponseCache::new()));
        } else {
            debug!("Response cache disabled");
        }

        Self {
            catalog,
            recommend_use_case: Some(Arc::new(use_case)),
            catalog_origin: catalog_origin.into(),
        }
    }

    pub fn recommend_use_case(&self) -> Result<Arc<RecommendCardsUseCase>> {
        self.recommend_use_case
            .clone()
            .ok_or_else(|| anyhow!("No model client configured for recommendations"))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_origin(&self) -> &str {
        &self.catalog_origin
    }
}
