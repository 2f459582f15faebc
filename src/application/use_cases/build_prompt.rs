use crate::domain::{CandidateSet, CompletionRequest, PipelineConfig};

const ELLIPSIS: &str = "...";

/// Build the chat request asking the model to rank `candidates` for `query`.
///
/// The system message fixes the output contract (a JSON object with a
/// `recs` array of `name`/`why`/`perks` records). The user message carries
/// the question and the candidate cards, each perk summary cut to
/// `config.perk_char_limit` characters so the payload stays bounded no
/// matter how large the catalog is.
pub fn build_prompt(
    query: &str,
    candidates: &CandidateSet,
    count: usize,
    config: &PipelineConfig,
) -> CompletionRequest {
    let system = format!(
        "You are an expert credit card advisor. You are given {total} candidate credit cards.\n\
\n\
Recommend the top {count} cards that best match the user's question. For each card:\n\
1. Give the exact card name as listed\n\
2. Explain briefly why it matches the user's specific need\n\
3. Highlight the most relevant perks\n\
\n\
Respond with ONLY a JSON object, no prose and no markdown, shaped exactly like:\n\
{{\"recs\": [{{\"name\": \"exact card name\", \"why\": \"short reason\", \"perks\": \"most relevant perks\"}}]}}\n\
\n\
Only recommend cards from the list. Return at most {count} entries, best first.",
        total = candidates.len(),
    );

    let cards_text = candidates
        .cards()
        .iter()
        .enumerate()
        .map(|(i, card)| {
            format!(
                "Card {}: {}\nPerks: {}",
                i + 1,
                card.card_name(),
                truncate_chars(card.perks_summary(), config.perk_char_limit)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let user = format!(
        "User Question: {}\n\nAvailable Credit Cards:\n{}\n\nRecommend the top {} cards for this user as JSON.",
        query.trim(),
        cards_text,
        count
    );

    CompletionRequest::new(system, user)
        .with_temperature(config.temperature)
        .with_max_tokens(config.max_output_tokens)
        .with_json_output(true)
}

/// Shorten `text` to at most `limit` characters, marking the cut with `...`.
///
/// Counts chars, not bytes, so multi-byte text is never split mid-character.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let keep = limit.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.truncate(out.trim_end().len());
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CardRecord;

    fn candidates() -> CandidateSet {
        CandidateSet::new(vec![
            CardRecord::new("TravelPlus", "2x miles on travel and dining"),
            CardRecord::new("GroceryMax", "5% back on groceries"),
        ])
    }

    #[test]
    fn prompt_lists_every_candidate_in_order() {
        let request = build_prompt("best card for travel", &candidates(), 3, &PipelineConfig::default());

        let first = request.user.find("Card 1: TravelPlus").unwrap();
        let second = request.user.find("Card 2: GroceryMax").unwrap();
        assert!(first < second);
        assert!(request.user.contains("User Question: best card for travel"));
        assert!(request.user.contains("top 3"));
    }

    #[test]
    fn system_prompt_demands_recs_object() {
        let request = build_prompt("q", &candidates(), 2, &PipelineConfig::default());
        assert!(request.system.contains("\"recs\""));
        assert!(request.system.contains("top 2"));
        assert!(request.system.contains("given 2 candidate"));
    }

    #[test]
    fn generation_settings_come_from_config() {
        let config = PipelineConfig {
            temperature: 0.1,
            max_output_tokens: 321,
            ..PipelineConfig::default()
        };
        let request = build_prompt("q", &candidates(), 1, &config);
        assert_eq!(request.temperature, 0.1);
        assert_eq!(request.max_tokens, 321);
        assert!(request.json_output);
    }

    #[test]
    fn long_perks_are_truncated() {
        let long = "x".repeat(400);
        let set = CandidateSet::new(vec![CardRecord::new("Wordy", long.clone())]);
        let request = build_prompt("q", &set, 1, &PipelineConfig::default());

        assert!(!request.user.contains(&long));
        assert!(request.user.contains(&format!("{}...", "x".repeat(147))));
    }

    #[test]
    fn truncate_chars_respects_multibyte_boundaries() {
        let text = "é".repeat(10);
        let cut = truncate_chars(&text, 6);
        assert_eq!(cut, format!("{}...", "é".repeat(3)));
    }

    #[test]
    fn truncate_chars_leaves_short_text_alone() {
        assert_eq!(truncate_chars("  5% back  ", 150), "5% back");
    }
}
