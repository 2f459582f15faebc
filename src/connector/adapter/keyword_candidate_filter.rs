use tracing::debug;

use crate::application::CandidateFilter;
use crate::domain::{CandidateSet, Catalog};

/// A spending category and the substrings that signal it.
///
/// When any trigger appears in a query, every trigger of the category
/// becomes a match term, so "flights" in a question also surfaces cards
/// that only mention "miles" or "lounge".
#[derive(Debug, Clone, Copy)]
pub struct KeywordCategory {
    pub name: &'static str,
    pub triggers: &'static [&'static str],
}

pub const DEFAULT_CATEGORIES: &[KeywordCategory] = &[
    KeywordCategory {
        name: "travel",
        triggers: &["travel", "flight", "airline", "hotel", "miles", "vacation", "trip", "airport"],
    },
    KeywordCategory {
        name: "dining",
        triggers: &["dining", "restaurant", "dinner", "takeout", "eating out"],
    },
    KeywordCategory {
        name: "grocery",
        triggers: &["grocer", "supermarket"],
    },
    KeywordCategory {
        name: "gas",
        triggers: &["gas", "fuel", "petrol", "commute"],
    },
    KeywordCategory {
        name: "cashback",
        triggers: &["cash back", "cashback", "cash-back", "% back"],
    },
    KeywordCategory {
        name: "business",
        triggers: &["business", "company", "employee", "office"],
    },
    KeywordCategory {
        name: "luxury",
        triggers: &["luxury", "premium", "concierge", "lounge", "elite"],
    },
    KeywordCategory {
        name: "no-fee",
        triggers: &["no fee", "no annual fee", "no-fee", "$0 annual", "fee-free"],
    },
    KeywordCategory {
        name: "rewards",
        triggers: &["reward", "points", "redeem"],
    },
    KeywordCategory {
        name: "bonus",
        triggers: &["bonus", "sign-up", "signup", "sign up", "welcome offer"],
    },
];

/// Cheap keyword-category matcher that runs before any model call.
///
/// Selects catalog cards whose name or perks mention any match term, in
/// catalog order and up to the cap. When the query hits no category, or the
/// terms match no card, it falls back to the first `cap` cards so a
/// non-empty catalog always yields candidates.
pub struct KeywordCandidateFilter {
    categories: Vec<KeywordCategory>,
}

impl Default for KeywordCandidateFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordCandidateFilter {
    pub fn new() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.to_vec(),
        }
    }

    pub fn with_categories(categories: Vec<KeywordCategory>) -> Self {
        Self { categories }
    }

    /// Union of the triggers of every category the query mentions.
    /// `query` must already be lowercase.
    pub fn match_terms(&self, query: &str) -> Vec<&'static str> {
        let mut terms: Vec<&'static str> = Vec::new();
        for category in &self.categories {
            if category.triggers.iter().any(|t| query.contains(t)) {
                debug!("Query matches category '{}'", category.name);
                for &trigger in category.triggers {
                    if !terms.contains(&trigger) {
                        terms.push(trigger);
                    }
                }
            }
        }
        terms
    }
}

impl CandidateFilter for KeywordCandidateFilter {
    fn select(&self, query: &str, catalog: &Catalog, cap: usize) -> CandidateSet {
        let terms = self.match_terms(&query.to_lowercase());

        if !terms.is_empty() {
            let matched: Vec<_> = catalog
                .iter()
                .filter(|card| terms.iter().any(|t| card.mentions(t)))
                .take(cap)
                .cloned()
                .collect();

            if !matched.is_empty() {
                return CandidateSet::new(matched);
            }
            debug!("Match terms {:?} hit no cards, using leading cards", terms);
        }

        CandidateSet::new(catalog.iter().take(cap).cloned().collect())
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CardRecord;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CardRecord::new("TravelPlus", "2x miles on travel and dining"),
            CardRecord::new("GroceryMax", "5% back on groceries"),
            CardRecord::new("FuelSaver", "3% on gas stations"),
            CardRecord::new("SkyLounge", "Airport lounge access, 3x on flights"),
            CardRecord::new("Plain", "1% on everything"),
        ])
    }

    fn names(set: &CandidateSet) -> Vec<&str> {
        set.names()
    }

    #[test]
    fn travel_query_selects_travel_cards_in_catalog_order() {
        let filter = KeywordCandidateFilter::new();
        let set = filter.select("best card for travel", &catalog(), 10);
        assert_eq!(names(&set), vec!["TravelPlus", "SkyLounge"]);
    }

    #[test]
    fn category_triggers_expand_to_sibling_terms() {
        let filter = KeywordCandidateFilter::new();
        // "flight" triggers the travel category, which also matches "miles".
        let set = filter.select("cheap flights", &catalog(), 10);
        assert_eq!(names(&set), vec!["TravelPlus", "SkyLounge"]);
    }

    #[test]
    fn multiple_categories_union() {
        let filter = KeywordCandidateFilter::new();
        let set = filter.select("groceries and gas", &catalog(), 10);
        assert_eq!(names(&set), vec!["GroceryMax", "FuelSaver"]);
    }

    #[test]
    fn query_without_keywords_falls_back_to_leading_cards() {
        let filter = KeywordCandidateFilter::new();
        let set = filter.select("what should i get", &catalog(), 3);
        assert_eq!(names(&set), vec!["TravelPlus", "GroceryMax", "FuelSaver"]);
    }

    #[test]
    fn keywords_matching_no_card_fall_back_to_leading_cards() {
        let filter = KeywordCandidateFilter::new();
        let set = filter.select("business expenses", &catalog(), 2);
        assert_eq!(names(&set), vec!["TravelPlus", "GroceryMax"]);
    }

    #[test]
    fn result_is_capped() {
        let filter = KeywordCandidateFilter::new();
        let set = filter.select("travel", &catalog(), 1);
        assert_eq!(names(&set), vec!["TravelPlus"]);
    }

    #[test]
    fn selection_is_non_empty_capped_and_ordered_for_any_query() {
        let filter = KeywordCandidateFilter::new();
        let catalog = catalog();
        let all: Vec<&str> = catalog.iter().map(|c| c.card_name()).collect();

        for query in ["", "travel", "GAS!", "lounge bonus", "zzz", "cash back on groceries"] {
            for cap in 1..=6 {
                let set = filter.select(query, &catalog, cap);
                assert!(!set.is_empty(), "empty set for {query:?}");
                assert!(set.len() <= cap);

                // Subsequence of the catalog: positions strictly increase.
                let positions: Vec<usize> = set
                    .names()
                    .iter()
                    .map(|n| all.iter().position(|a| a == n).unwrap())
                    .collect();
                assert!(positions.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn empty_catalog_yields_empty_set() {
        let filter = KeywordCandidateFilter::new();
        assert!(filter.select("travel", &Catalog::default(), 10).is_empty());
    }

    #[test]
    fn match_terms_are_deduplicated() {
        let filter = KeywordCandidateFilter::new();
        let terms = filter.match_terms("luxury travel with lounge");
        let lounge = terms.iter().filter(|t| **t == "lounge").count();
        assert_eq!(lounge, 1);
    }
}
