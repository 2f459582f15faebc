use sha2::{Digest, Sha256};

use super::CardRecord;

/// The bounded, ordered slice of the catalog sent to the model for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    cards: Vec<CardRecord>,
}

impl CandidateSet {
    pub fn new(cards: Vec<CardRecord>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.cards.iter().map(|c| c.card_name()).collect()
    }

    /// SHA-256 over every name and perk summary, in order.
    ///
    /// Fields are separated by a unit separator and records by a record
    /// separator so that `("ab", "c")` and `("a", "bc")` hash differently.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for card in &self.cards {
            hasher.update(card.card_name().as_bytes());
            hasher.update([0x1f]);
            hasher.update(card.perks_summary().as_bytes());
            hasher.update([0x1e]);
        }
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable_and_content_sensitive() {
        let a = CandidateSet::new(vec![CardRecord::new("ab", "c")]);
        let b = CandidateSet::new(vec![CardRecord::new("a", "bc")]);

        assert_eq!(a.fingerprint(), a.clone().fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_fingerprint_depends_on_order() {
        let x = CardRecord::new("X", "1");
        let y = CardRecord::new("Y", "2");
        let xy = CandidateSet::new(vec![x.clone(), y.clone()]);
        let yx = CandidateSet::new(vec![y, x]);
        assert_ne!(xy.fingerprint(), yx.fingerprint());
    }
}
