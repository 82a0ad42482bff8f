use serde_json::Value;
use crate::models::{ParseFailure, ResultSet, SimilarityOutcome};

/// Interpret raw model text as a ranked JSON array
///
/// Markdown code fences around the array are tolerated. Elements are kept
/// verbatim and truncated positionally; nothing is re-scored or validated.
pub fn parse_similarity_response(raw: &str) -> SimilarityOutcome {
    let trimmed = raw.trim();
    let body = if trimmed.starts_with("```") {
        extract_json_array(trimmed).unwrap_or(trimmed)
    } else {
        trimmed
    };

    let parsed: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => return unparseable(e.to_string(), raw),
    };

    match parsed {
        Value::Array(items) if items.is_empty() => SimilarityOutcome::NoMatches,
        Value::Array(items) => SimilarityOutcome::Matches(ResultSet::from_ranked(items)),
        _ => unparseable("expected a JSON array".to_string(), raw),
    }
}

fn unparseable(reason: String, raw: &str) -> SimilarityOutcome {
    SimilarityOutcome::Unparseable(ParseFailure {
        reason,
        raw: raw.to_string(),
    })
}

fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}
