use crate::application::CandidateFilter;
use crate::domain::{CandidateSet, Catalog};

/// Ignores the query and hands the model the first `cap` catalog cards.
///
/// Useful for small catalogs where the whole list fits in the prompt, and as
/// a baseline when tuning the keyword categories.
pub struct LeadingCandidateFilter;

impl Default for LeadingCandidateFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl LeadingCandidateFilter {
    pub fn new() -> Self {
        Self
    }
}

impl CandidateFilter for LeadingCandidateFilter {
    fn select(&self, _query: &str, catalog: &Catalog, cap: usize) -> CandidateSet {
        CandidateSet::new(catalog.iter().take(cap).cloned().collect())
    }

    fn name(&self) -> &str {
        "leading"
    }
}
