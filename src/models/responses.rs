use serde::Serialize;
use crate::models::domain::ResultSet;

/// Why a model response could not be turned into a result set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseFailure {
    pub reason: String,
    pub raw: String,
}

/// Result of interpreting one model response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum SimilarityOutcome {
    /// The response was a non-empty JSON array
    Matches(ResultSet),
    /// The response was an empty JSON array
    NoMatches,
    /// The response text was not a JSON array
    Unparseable(ParseFailure),
}

impl SimilarityOutcome {
    /// Collapse into a result set; anything but `Matches` yields an empty one
    pub fn into_results(self) -> ResultSet {
        match self {
            SimilarityOutcome::Matches(results) => results,
            SimilarityOutcome::NoMatches | SimilarityOutcome::Unparseable(_) => ResultSet::empty(),
        }
    }

    pub fn is_unparseable(&self) -> bool {
        matches!(self, SimilarityOutcome::Unparseable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unparseable_collapses_to_empty() {
        let outcome = SimilarityOutcome::Unparseable(ParseFailure {
            reason: "expected value".to_string(),
            raw: "not json".to_string(),
        });
        assert!(outcome.is_unparseable());
        assert!(outcome.into_results().is_empty());
    }

    #[test]
    fn test_matches_collapse_keeps_results() {
        let results = ResultSet::from_ranked(vec![json!({ "id": 1 })]);
        let outcome = SimilarityOutcome::Matches(results.clone());
        assert_eq!(outcome.into_results(), results);
    }
}
