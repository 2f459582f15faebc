use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Recommendation;

pub const MIN_RECOMMENDATIONS: usize = 1;
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Tunables for one recommendation pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Upper bound on the number of cards sent to the model.
    pub candidate_cap: usize,
    /// Perk summaries longer than this many characters are shortened in the prompt.
    pub perk_char_limit: usize,
    pub cache_ttl: Duration,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Responses larger than this are treated as a failed fetch.
    pub max_response_bytes: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            candidate_cap: 15,
            perk_char_limit: 150,
            cache_ttl: Duration::from_secs(24 * 60 * 60),
            temperature: 0.0,
            max_output_tokens: 800,
            max_response_bytes: 64 * 1024,
        }
    }
}

impl PipelineConfig {
    pub fn with_candidate_cap(mut self, cap: usize) -> Self {
        self.candidate_cap = cap.clamp(1, 50);
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}

/// Where a single pipeline run is, or where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Idle,
    Filtering,
    Fetching,
    Normalizing,
    Done,
    Failed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Filtering => "filtering",
            PipelineStage::Fetching => "fetching",
            PipelineStage::Normalizing => "normalizing",
            PipelineStage::Done => "done",
            PipelineStage::Failed => "failed",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the chat surface gets back for every query: recommendations on
/// success, or an empty list with a message on any per-request failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationOutcome {
    recommendations: Vec<Recommendation>,
    error: Option<String>,
    /// `Done` or `Failed`.
    stage: PipelineStage,
    /// Stage that was running when the failure happened.
    failed_at: Option<PipelineStage>,
}

impl RecommendationOutcome {
    pub fn success(recommendations: Vec<Recommendation>) -> Self {
        Self {
            recommendations,
            error: None,
            stage: PipelineStage::Done,
            failed_at: None,
        }
    }

    pub fn failure(message: impl Into<String>, failed_at: PipelineStage) -> Self {
        Self {
            recommendations: Vec::new(),
            error: Some(message.into()),
            stage: PipelineStage::Failed,
            failed_at: Some(failed_at),
        }
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    pub fn failed_at(&self) -> Option<PipelineStage> {
        self.failed_at
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_cap_is_clamped() {
        assert_eq!(PipelineConfig::default().with_candidate_cap(0).candidate_cap, 1);
        assert_eq!(PipelineConfig::default().with_candidate_cap(500).candidate_cap, 50);
        assert_eq!(PipelineConfig::default().with_candidate_cap(20).candidate_cap, 20);
    }

    #[test]
    fn test_failure_outcome_has_no_recommendations() {
        let outcome = RecommendationOutcome::failure("boom", PipelineStage::Fetching);
        assert!(!outcome.is_success());
        assert!(outcome.recommendations().is_empty());
        assert_eq!(outcome.stage(), PipelineStage::Failed);
        assert_eq!(outcome.failed_at(), Some(PipelineStage::Fetching));
        assert_eq!(outcome.error(), Some("boom"));
    }
}
