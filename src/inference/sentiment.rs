//! Emotion classifier response handling.
//!
//! The hosted classifier answers with a list of `{label, score}` objects,
//! sometimes wrapped in an extra list, or with an `{"error": ...}` object
//! while the model is loading. Each body is classified once into a
//! [`SentimentOutcome`] right after the call.

use crate::error::upstream_message;
use crate::models::SentimentScore;
use serde_json::{json, Value};

/// Build the request payload for the emotion classifier.
pub fn payload(text: &str) -> Value {
    json!({ "inputs": text })
}

/// Parsed shape of a sentiment body.
#[derive(Debug, Clone, PartialEq)]
pub enum SentimentOutcome {
    /// Non-empty list of scored labels, in upstream order.
    Scores(Vec<SentimentScore>),
    /// Body was an object carrying an `error` key.
    UpstreamError(String),
    /// Not a non-empty list once nesting is removed.
    Unexpected,
    /// A list whose entries are not `{label, score}` objects.
    Malformed,
}

/// Classify a parsed sentiment body.
pub fn parse(body: &Value) -> SentimentOutcome {
    let items = match body {
        Value::Object(map) => {
            return match map.get("error") {
                Some(err) => SentimentOutcome::UpstreamError(upstream_message(err)),
                None => SentimentOutcome::Unexpected,
            };
        }
        // Some backends return [[{label, score}, ...]]
        Value::Array(items) => match items.first() {
            Some(Value::Array(inner)) => inner,
            _ => items,
        },
        _ => return SentimentOutcome::Unexpected,
    };

    if items.is_empty() {
        return SentimentOutcome::Unexpected;
    }

    let mut scores = Vec::with_capacity(items.len());
    for item in items {
        let Value::Object(map) = item else {
            return SentimentOutcome::Malformed;
        };
        let score = map.get("score").and_then(Value::as_f64);
        let label = map.get("label").and_then(Value::as_str);
        match (label, score) {
            (Some(label), Some(score)) => scores.push(SentimentScore {
                label: label.to_string(),
                score,
            }),
            _ => return SentimentOutcome::Malformed,
        }
    }

    SentimentOutcome::Scores(scores)
}

/// Highest-scoring entry. Ties go to the earliest entry.
pub fn dominant(scores: &[SentimentScore]) -> Option<&SentimentScore> {
    scores.iter().fold(None, |best, candidate| match best {
        Some(current) if current.score >= candidate.score => Some(current),
        _ => Some(candidate),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(outcome: SentimentOutcome) -> Vec<SentimentScore> {
        match outcome {
            SentimentOutcome::Scores(s) => s,
            other => panic!("expected scores, got {:?}", other),
        }
    }

    #[test]
    fn test_flat_list() {
        let body = json!([
            {"label": "joy", "score": 0.9},
            {"label": "anger", "score": 0.1}
        ]);
        let s = scores(parse(&body));
        assert_eq!(s.len(), 2);
        assert_eq!(dominant(&s).unwrap().label, "joy");
    }

    #[test]
    fn test_nested_list_is_unwrapped() {
        let body = json!([[{"label": "SADNESS", "score": 0.7}]]);
        let s = scores(parse(&body));
        assert_eq!(s.len(), 1);
        assert_eq!(dominant(&s).unwrap().label, "SADNESS");
    }

    #[test]
    fn test_only_one_level_unwrapped() {
        let body = json!([[[{"label": "joy", "score": 0.7}]]]);
        assert_eq!(parse(&body), SentimentOutcome::Malformed);
    }

    #[test]
    fn test_upstream_error() {
        let body = json!({"error": "model loading"});
        assert_eq!(
            parse(&body),
            SentimentOutcome::UpstreamError("model loading".to_string())
        );
    }

    #[test]
    fn test_unexpected_shapes() {
        assert_eq!(parse(&json!([])), SentimentOutcome::Unexpected);
        assert_eq!(parse(&json!([[]])), SentimentOutcome::Unexpected);
        assert_eq!(parse(&json!({"labels": []})), SentimentOutcome::Unexpected);
        assert_eq!(parse(&json!("joy")), SentimentOutcome::Unexpected);
        assert_eq!(parse(&json!(null)), SentimentOutcome::Unexpected);
    }

    #[test]
    fn test_malformed_entries() {
        assert_eq!(parse(&json!(["joy"])), SentimentOutcome::Malformed);
        assert_eq!(parse(&json!([{"label": "joy"}])), SentimentOutcome::Malformed);
        assert_eq!(
            parse(&json!([{"label": "joy", "score": "high"}])),
            SentimentOutcome::Malformed
        );
        assert_eq!(
            parse(&json!([{"label": "joy", "score": 0.4}, {"label": "fear"}])),
            SentimentOutcome::Malformed
        );
    }

    #[test]
    fn test_tie_keeps_first() {
        let body = json!([
            {"label": "neutral", "score": 0.2},
            {"label": "fear", "score": 0.4},
            {"label": "surprise", "score": 0.4}
        ]);
        let s = scores(parse(&body));
        assert_eq!(dominant(&s).unwrap().label, "fear");
    }

    #[test]
    fn test_integer_scores_accepted() {
        let body = json!([{"label": "joy", "score": 1}, {"label": "anger", "score": 0}]);
        let s = scores(parse(&body));
        assert_eq!(dominant(&s).unwrap().label, "joy");
    }

    #[test]
    fn test_dominant_empty() {
        assert!(dominant(&[]).is_none());
    }

    #[test]
    fn test_payload() {
        assert_eq!(payload(""), json!({"inputs": ""}));
    }
}
