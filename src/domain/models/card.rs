use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A single card from the catalog, as loaded from the source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    card_name: String,
    perks_summary: String,
}

impl CardRecord {
    pub fn new(card_name: impl Into<String>, perks_summary: impl Into<String>) -> Self {
        Self {
            card_name: card_name.into(),
            perks_summary: perks_summary.into(),
        }
    }

    pub fn card_name(&self) -> &str {
        &self.card_name
    }

    pub fn perks_summary(&self) -> &str {
        &self.perks_summary
    }

    /// Case-insensitive substring match against both name and perks.
    /// `term` is expected to be lowercase already.
    pub fn mentions(&self, term: &str) -> bool {
        self.card_name.to_lowercase().contains(term)
            || self.perks_summary.to_lowercase().contains(term)
    }
}

/// The full, read-only set of cards in source order.
///
/// Cloning is cheap: records live behind an `Arc` so the catalog can be
/// handed to every component that needs it without copying.
#[derive(Debug, Clone)]
pub struct Catalog {
    cards: Arc<[CardRecord]>,
}

impl Catalog {
    pub fn new(cards: Vec<CardRecord>) -> Self {
        Self {
            cards: cards.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardRecord> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    pub fn contains_card(&self, name: &str) -> bool {
        let needle = name.trim();
        self.cards
            .iter()
            .any(|c| c.card_name().eq_ignore_ascii_case(needle))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FromIterator<CardRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = CardRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
