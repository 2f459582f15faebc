use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{
    DomainError, Recommendation, DEFAULT_PERKS, DEFAULT_WHY, UNKNOWN_CARD,
};

const NAME_KEYS: &[&str] = &["name", "card_name", "card"];
const WHY_KEYS: &[&str] = &["why", "why_recommended", "reason"];
const PERKS_KEYS: &[&str] = &["perks", "key_perks"];

/// One way of locating the list of recommendation records inside a parsed
/// response. Strategies are tried in [`EXTRACTION_STRATEGIES`] order and the
/// first one that yields something wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// The whole response is already an array.
    BareArray,
    /// The response is an object with this key present and non-null.
    KnownKey(&'static str),
    /// The first array-valued field of an object, in document order.
    FirstArrayField,
    /// Any other non-falsy value, treated as a single record.
    SingleValue,
}

pub const EXTRACTION_STRATEGIES: &[ExtractionStrategy] = &[
    ExtractionStrategy::BareArray,
    ExtractionStrategy::KnownKey("recs"),
    ExtractionStrategy::KnownKey("recommendations"),
    ExtractionStrategy::KnownKey("cards"),
    ExtractionStrategy::FirstArrayField,
    ExtractionStrategy::SingleValue,
];

impl ExtractionStrategy {
    fn extract(&self, value: &Value) -> Option<Vec<Value>> {
        match self {
            ExtractionStrategy::BareArray => value.as_array().cloned(),
            ExtractionStrategy::KnownKey(key) => {
                let inner = value.as_object()?.get(*key)?;
                if inner.is_null() {
                    return None;
                }
                Some(as_list(inner))
            }
            ExtractionStrategy::FirstArrayField => value
                .as_object()?
                .values()
                .find_map(|v| v.as_array())
                .cloned(),
            ExtractionStrategy::SingleValue => (!is_falsy(value)).then(|| vec![value.clone()]),
        }
    }
}

/// Turn raw model text into at most `count` recommendations, in response order.
///
/// Fails only when no JSON can be recovered from `text`. Missing or odd
/// fields inside individual records fall back to placeholder values.
pub fn parse_recommendations(
    text: &str,
    count: usize,
) -> Result<Vec<Recommendation>, DomainError> {
    let value = parse_json(text)?;

    let (strategy, records) = EXTRACTION_STRATEGIES
        .iter()
        .find_map(|s| s.extract(&value).map(|records| (*s, records)))
        .unwrap_or((ExtractionStrategy::SingleValue, Vec::new()));
    debug!(
        "Extracted {} records using {:?}",
        records.len(),
        strategy
    );

    Ok(records
        .iter()
        .filter_map(record_from_value)
        .take(count)
        .collect())
}

/// Parse `text` as JSON, tolerating markdown fences and surrounding prose.
fn parse_json(text: &str) -> Result<Value, DomainError> {
    let body = strip_code_fences(text.trim());

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return Ok(value);
    }

    if let Some(value) = embedded_json(body) {
        return Ok(value);
    }

    let preview: String = body.chars().take(120).collect();
    Err(DomainError::malformed(format!(
        "response is not valid JSON: {preview}"
    )))
}

fn strip_code_fences(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (e.g. "json") on the opening fence line.
    let rest = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// Find a JSON value embedded in prose by parsing from each `{` or `[` in turn.
///
/// The first value that looks like it carries records wins. Otherwise the
/// first value that parsed at all is returned, so `"see [1]"` style
/// bracketed asides never shadow the real payload further on.
fn embedded_json(text: &str) -> Option<Value> {
    let mut fallback = None;
    for (start, _) in text.match_indices(['{', '[']) {
        let mut stream = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
        let Some(Ok(value)) = stream.next() else {
            continue;
        };
        if carries_records(&value) {
            return Some(value);
        }
        fallback.get_or_insert(value);
    }
    fallback
}

fn carries_records(value: &Value) -> bool {
    match value {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => items.iter().any(|v| v.is_object() || v.is_string()),
        _ => false,
    }
}

fn as_list(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        v if is_falsy(v) => Vec::new(),
        v => vec![v.clone()],
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn record_from_value(value: &Value) -> Option<Recommendation> {
    match value {
        Value::Object(map) => {
            let field = |keys: &[&str], default: &str| {
                keys.iter()
                    .find_map(|k| map.get(*k).and_then(value_to_text))
                    .unwrap_or_else(|| default.to_string())
            };
            Some(Recommendation::new(
                field(NAME_KEYS, UNKNOWN_CARD),
                field(WHY_KEYS, DEFAULT_WHY),
                field(PERKS_KEYS, DEFAULT_PERKS),
            ))
        }
        Value::String(name) if !name.trim().is_empty() => {
            Some(Recommendation::named(name.trim()))
        }
        other => {
            warn!("Skipping recommendation record that is not an object: {other}");
            None
        }
    }
}

/// Render a field value as display text; `None` for blank or structured values.
fn value_to_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(value_to_text)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null | Value::Object(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_keys_round_trip() {
        let recs =
            parse_recommendations(r#"{"recs":[{"name":"X","why":"Y","perks":"Z"}]}"#, 5).unwrap();
        assert_eq!(recs, vec![Recommendation::new("X", "Y", "Z")]);
    }

    #[test]
    fn wrapper_key_does_not_matter() {
        let cards = parse_recommendations(
            r#"{"cards":[{"card_name":"X","why_recommended":"Y","key_perks":"Z"}]}"#,
            5,
        )
        .unwrap();
        let recommendations = parse_recommendations(
            r#"{"recommendations":[{"card_name":"X","why_recommended":"Y","key_perks":"Z"}]}"#,
            5,
        )
        .unwrap();

        assert_eq!(cards, recommendations);
        assert_eq!(cards[0], Recommendation::new("X", "Y", "Z"));
    }

    #[test]
    fn bare_array_is_used_directly() {
        let recs = parse_recommendations(r#"[{"name":"A"},{"name":"B"}]"#, 5).unwrap();
        let names: Vec<&str> = recs.iter().map(|r| r.card_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn recs_key_takes_priority_over_other_known_keys() {
        let recs = parse_recommendations(
            r#"{"cards":[{"name":"FromCards"}],"recs":[{"name":"FromRecs"}]}"#,
            5,
        )
        .unwrap();
        assert_eq!(recs[0].card_name, "FromRecs");
    }

    #[test]
    fn unknown_wrapper_uses_first_list_field() {
        let recs = parse_recommendations(
            r#"{"note":"hi","top_picks":[{"name":"A"}],"others":[{"name":"B"}]}"#,
            5,
        )
        .unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].card_name, "A");
    }

    #[test]
    fn single_object_is_wrapped() {
        let recs = parse_recommendations(r#"{"name":"Solo","why":"only one"}"#, 5).unwrap();
        assert_eq!(recs, vec![Recommendation::new("Solo", "only one", DEFAULT_PERKS)]);
    }

    #[test]
    fn falsy_values_yield_empty_list() {
        for text in ["null", "{}", "[]", r#"{"recs":[]}"#, "false", "\"\""] {
            let recs = parse_recommendations(text, 5).unwrap();
            assert!(recs.is_empty(), "expected no records for {text}");
        }
    }

    #[test]
    fn missing_fields_use_defaults() {
        let recs = parse_recommendations(r#"{"recs":[{}, {"why":"  "}]}"#, 5).unwrap();
        assert_eq!(recs.len(), 2);
        for rec in recs {
            assert_eq!(rec.card_name, UNKNOWN_CARD);
            assert_eq!(rec.why_recommended, DEFAULT_WHY);
            assert_eq!(rec.key_perks, DEFAULT_PERKS);
        }
    }

    #[test]
    fn list_valued_perks_are_joined() {
        let recs = parse_recommendations(
            r#"{"recs":[{"name":"A","perks":["lounge access","no FX fee"]}]}"#,
            5,
        )
        .unwrap();
        assert_eq!(recs[0].key_perks, "lounge access, no FX fee");
    }

    #[test]
    fn string_records_become_named_recommendations() {
        let recs = parse_recommendations(r#"{"recs":["TravelPlus", 42, null]}"#, 5).unwrap();
        assert_eq!(recs, vec![Recommendation::named("TravelPlus")]);
    }

    #[test]
    fn truncates_to_requested_count_in_order() {
        let items: Vec<String> = (0..8)
            .map(|i| format!(r#"{{"name":"Card{i}","why":"w","perks":"p"}}"#))
            .collect();
        let text = format!(r#"{{"recs":[{}]}}"#, items.join(","));

        let recs = parse_recommendations(&text, 3).unwrap();
        let names: Vec<&str> = recs.iter().map(|r| r.card_name.as_str()).collect();
        assert_eq!(names, vec!["Card0", "Card1", "Card2"]);
    }

    #[test]
    fn non_json_is_malformed() {
        let err = parse_recommendations("Sure! Here are some great cards for you.", 3).unwrap_err();
        assert!(err.is_malformed_response());

        let err = parse_recommendations("", 3).unwrap_err();
        assert!(err.is_malformed_response());
    }

    #[test]
    fn code_fences_are_stripped() {
        let text = "```json\n{\"recs\":[{\"name\":\"A\"}]}\n```";
        let recs = parse_recommendations(text, 3).unwrap();
        assert_eq!(recs[0].card_name, "A");
    }

    #[test]
    fn surrounding_prose_is_tolerated() {
        let text = "Here you go: {\"recs\":[{\"name\":\"A\"}]} Hope that helps!";
        let recs = parse_recommendations(text, 3).unwrap();
        assert_eq!(recs[0].card_name, "A");
    }

    #[test]
    fn bracketed_prose_before_payload_is_skipped() {
        let text = "Top picks [ranked]: {\"recs\":[{\"name\":\"A\"}]}";
        let recs = parse_recommendations(text, 3).unwrap();
        assert_eq!(recs, vec![Recommendation::named("A")]);
    }

    #[test]
    fn citation_brackets_do_not_shadow_payload() {
        let text = "As noted in [1], these fit best: {\"recs\":[{\"name\":\"B\"}]} [2]";
        let recs = parse_recommendations(text, 3).unwrap();
        assert_eq!(recs[0].card_name, "B");
    }

    #[test]
    fn payload_array_after_prose_is_found() {
        let text = "Answer (see notes {}): [{\"name\":\"C\"}]";
        let recs = parse_recommendations(text, 3).unwrap();
        assert_eq!(recs[0].card_name, "C");
    }
}
