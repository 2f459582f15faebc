use serde::{Deserialize, Serialize};

pub const UNKNOWN_CARD: &str = "Unknown";
pub const DEFAULT_WHY: &str = "Good match";
pub const DEFAULT_PERKS: &str = "See card details";

/// One ranked card suggestion with the model's explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub card_name: String,
    pub why_recommended: String,
    pub key_perks: String,
}

impl Recommendation {
    pub fn new(
        card_name: impl Into<String>,
        why_recommended: impl Into<String>,
        key_perks: impl Into<String>,
    ) -> Self {
        Self {
            card_name: card_name.into(),
            why_recommended: why_recommended.into(),
            key_perks: key_perks.into(),
        }
    }

    /// A record carrying only a card name, with placeholder explanation and perks.
    pub fn named(card_name: impl Into<String>) -> Self {
        Self::new(card_name, DEFAULT_WHY, DEFAULT_PERKS)
    }
}
