use crate::domain::QueryKey;

/// Words that carry no intent for card matching: articles, auxiliaries,
/// pronouns, prepositions and superlatives people put in front of everything.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the",
    "is", "are", "was", "were", "be", "been", "being", "am",
    "do", "does", "did", "have", "has", "had",
    "can", "could", "will", "would", "should", "may", "might", "must", "shall",
    "i", "im", "me", "my", "we", "our", "you", "your", "it", "its",
    "what", "whats", "which", "who", "that", "this", "these", "those",
    "for", "of", "on", "in", "at", "to", "with", "by", "from", "about",
    "and", "or", "so", "some", "any",
    "best", "top", "good", "great", "better", "greatest",
    "please", "recommend", "suggest",
];

/// Canonicalize a raw query into a cache key.
///
/// Lowercases, drops every character that is neither a word character nor
/// whitespace, removes stop words, then sorts the remaining tokens. Two
/// queries with the same tokens after stop-word removal share a key
/// regardless of order or casing. A query made only of stop words yields
/// the empty key.
pub fn normalize_query(query: &str) -> QueryKey {
    let cleaned: String = query
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    let mut tokens: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|w| !STOP_WORDS.contains(w))
        .collect();
    tokens.sort_unstable();

    QueryKey::new(tokens.join(" "))
}
