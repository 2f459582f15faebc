use anyhow::Result;

use crate::domain::{Recommendation, RecommendationOutcome};

use super::super::Container;

pub const NO_RESULTS_MESSAGE: &str =
    "I couldn't generate recommendations. Please try rephrasing your question.";

pub struct RecommendController<'a> {
    container: &'a Container,
}

impl<'a> RecommendController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn recommend(&self, query: String, num: usize) -> Result<String> {
        let use_case = self.container.recommend_use_case()?;
        let outcome = use_case.respond(&query, num).await;
        Ok(format_outcome(&outcome))
    }
}

/// Render an outcome the way the chat transcript shows it.
pub fn format_outcome(outcome: &RecommendationOutcome) -> String {
    if let Some(error) = outcome.error() {
        return error.to_string();
    }
    if outcome.recommendations().is_empty() {
        return NO_RESULTS_MESSAGE.to_string();
    }
    format_recommendations(outcome.recommendations())
}

pub fn format_recommendations(recommendations: &[Recommendation]) -> String {
    let mut output = format!(
        "Based on your question, here are my top {} recommendations:\n\n",
        recommendations.len()
    );

    for (i, rec) in recommendations.iter().enumerate() {
        output.push_str(&format!("### {}. {}\n\n", i + 1, rec.card_name));
        output.push_str(&format!("**Why this card?** {}\n\n", rec.why_recommended));
        output.push_str(&format!("**Key Perks:** {}\n\n", rec.key_perks));
        output.push_str("---\n\n");
    }

    output.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PipelineStage;

    #[test]
    fn formats_numbered_sections() {
        let text = format_recommendations(&[
            Recommendation::new("TravelPlus", "matches travel spend", "2x miles"),
            Recommendation::new("GroceryMax", "groceries", "5% back"),
        ]);

        assert!(text.starts_with("Based on your question, here are my top 2 recommendations:"));
        assert!(text.contains("### 1. TravelPlus"));
        assert!(text.contains("**Why this card?** matches travel spend"));
        assert!(text.contains("### 2. GroceryMax"));
        assert!(text.contains("**Key Perks:** 5% back"));
    }

    #[test]
    fn failure_shows_message_only() {
        let outcome = RecommendationOutcome::failure("try again", PipelineStage::Fetching);
        assert_eq!(format_outcome(&outcome), "try again");
    }

    #[test]
    fn empty_success_asks_to_rephrase() {
        let outcome = RecommendationOutcome::success(vec![]);
        assert_eq!(format_outcome(&outcome), NO_RESULTS_MESSAGE);
    }
}
