use crate::domain::{Catalog, DomainError};

/// Loads the card catalog once at startup.
///
/// Any failure is a [`DomainError::Configuration`]: the advisor cannot serve
/// without data, so callers abort instead of retrying.
pub trait CatalogSource: Send + Sync {
    fn load(&self) -> Result<Catalog, DomainError>;

    /// Human-readable origin (e.g. the file path), for logging.
    fn describe(&self) -> String;
}
