pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use cli::{Commands, FilterStrategy, Provider};

pub use application::{
    build_prompt, normalize_query, parse_recommendations, CandidateFilter, CatalogSource,
    ChatClient, RecommendCardsUseCase, RecommendationFetcher, ResponseCache,
};

pub use connector::{
    AnthropicClient, Container, ContainerConfig, CsvCatalogSource, InMemoryResponseCache,
    KeywordCandidateFilter, LeadingCandidateFilter, MockChatClient, OpenAiClient, Router,
};

pub use domain::{
    CacheKey, CandidateSet, CardRecord, Catalog, CompletionRequest, DomainError, PipelineConfig,
    PipelineStage, QueryKey, Recommendation, RecommendationOutcome,
};
