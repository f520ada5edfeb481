//! Response interpretation
//!
//! Plain-text mode trims itinerary text. Structured-list mode strips a
//! surrounding code fence, decodes a JSON array of suggestions and falls
//! back to the default list when decoding fails.

use crate::fallback::fallback_suggestions;
use serde::Serialize;
use voyage_core::{InterpretationError, SuggestionRecord};

const FENCE: &str = "```";

/// Suggestions ready to return, with a flag for the default list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionList {
    pub trips: Vec<SuggestionRecord>,
    pub used_fallback: bool,
}

/// Plain-text mode.
pub fn interpret_itinerary(raw: &str) -> String {
    raw.trim().to_string()
}

/// Keep the body of the first fenced block: the text after the opening fence
/// (and its optional language tag) up to the next fence. Prose around the
/// block is dropped. A lone trailing fence is removed. Text without fences is
/// returned trimmed.
pub fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim();
    let Some(open) = text.find(FENCE) else {
        return text;
    };

    let rest = &text[open + FENCE.len()..];
    if open > 0 && rest.trim().is_empty() {
        return text[..open].trim();
    }

    let tag_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.')))
        .unwrap_or(rest.len());
    let body = &rest[tag_len..];

    match body.find(FENCE) {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}

/// Decode generator output into suggestions.
pub fn parse_suggestions(raw: &str) -> Result<Vec<SuggestionRecord>, InterpretationError> {
    let body = strip_code_fence(raw);
    if body.is_empty() {
        return Err(InterpretationError::EmptyOutput);
    }

    let trips: Vec<SuggestionRecord> =
        serde_json::from_str(body).map_err(|e| InterpretationError::Malformed {
            reason: e.to_string(),
        })?;

    if trips.is_empty() {
        return Err(InterpretationError::NoSuggestions);
    }
    Ok(trips)
}

/// Structured-list mode. Never fails: decoding errors yield the default list.
pub fn interpret_suggestions(raw: &str) -> SuggestionList {
    match parse_suggestions(raw) {
        Ok(trips) => SuggestionList {
            trips,
            used_fallback: false,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Suggestion output rejected, serving defaults");
            SuggestionList::fallback()
        }
    }
}

impl SuggestionList {
    /// The default list, flagged as such.
    pub fn fallback() -> Self {
        Self {
            trips: fallback_suggestions(),
            used_fallback: true,
        }
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_record() -> impl Strategy<Value = SuggestionRecord> {
        (
            "[A-Za-z ,]{1,24}",
            "[A-Za-z ]{0,24}",
            prop::collection::vec("[A-Za-z ]{1,12}", 0..4),
        )
            .prop_map(|(destination, tagline, highlights)| SuggestionRecord {
                destination,
                tagline,
                highlights,
                best_time: "Spring".to_string(),
                budget: "₹20,000".to_string(),
                ideal_for: "Everyone".to_string(),
                must_try: "Local food".to_string(),
                travel_tip: "Go early".to_string(),
                image: "🌍".to_string(),
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Fencing (with or without a language tag) never changes the decoded list.
        #[test]
        fn prop_fence_is_transparent(
            records in prop::collection::vec(arb_record(), 1..6),
            tag in prop_oneof![Just(""), Just("json"), Just("JSON"), Just("javascript")],
        ) {
            let json = serde_json::to_string(&records)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            let fenced = format!("```{}\n{}\n```", tag, json);

            let plain = parse_suggestions(&json);
            let from_fence = parse_suggestions(&fenced);
            prop_assert_eq!(&plain, &from_fence);
            prop_assert_eq!(plain, Ok(records));
        }

        /// Structured mode never returns an empty list.
        #[test]
        fn prop_interpret_never_empty(raw in ".*") {
            let list = interpret_suggestions(&raw);
            prop_assert!(!list.trips.is_empty());
        }
    }
}
