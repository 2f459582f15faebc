use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical, order- and stopword-insensitive form of a user query.
///
/// The empty key is valid: it is what a query made only of stopwords
/// normalizes to, and it still addresses a cache slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Address of one memoized model response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    query_key: QueryKey,
    candidate_fingerprint: String,
    count: usize,
}

impl CacheKey {
    pub fn new(query_key: QueryKey, candidate_fingerprint: impl Into<String>, count: usize) -> Self {
        Self {
            query_key,
            candidate_fingerprint: candidate_fingerprint.into(),
            count,
        }
    }

    pub fn query_key(&self) -> &QueryKey {
        &self.query_key
    }

    pub fn candidate_fingerprint(&self) -> &str {
        &self.candidate_fingerprint
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short: String = self.candidate_fingerprint.chars().take(12).collect();
        write!(f, "{}|{}|{}", self.query_key, short, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shortens_fingerprint_and_shows_count() {
        let key = CacheKey::new(QueryKey::new("card travel"), "0123456789abcdef", 3);
        assert_eq!(key.to_string(), "card travel|0123456789ab|3");
    }

    #[test]
    fn count_is_part_of_identity() {
        let three = CacheKey::new(QueryKey::new("travel"), "fp", 3);
        let five = CacheKey::new(QueryKey::new("travel"), "fp", 5);
        assert_ne!(three, five);
        assert_eq!(three, CacheKey::new(QueryKey::new("travel"), "fp", 3));
    }
}
