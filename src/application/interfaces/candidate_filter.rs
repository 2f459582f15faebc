use crate::domain::{CandidateSet, Catalog};

/// Narrows the catalog to the cards worth showing the model for a query.
///
/// Implementations must be cheap and infallible: they run on every request
/// before any external call. For a non-empty catalog the result must be
/// non-empty, hold at most `cap` cards, and keep catalog order.
pub trait CandidateFilter: Send + Sync {
    fn select(&self, query: &str, catalog: &Catalog, cap: usize) -> CandidateSet;

    /// Short identifier used in logs.
    fn name(&self) -> &str;
}
