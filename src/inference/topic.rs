//! Zero-shot topic classifier response handling.

use crate::error::upstream_message;
use serde_json::{json, Value};
use std::cmp::Ordering;

/// Build the zero-shot request payload.
pub fn payload(text: &str, candidate_labels: &[String]) -> Value {
    json!({
        "inputs": text,
        "parameters": { "candidate_labels": candidate_labels }
    })
}

/// Parsed shape of a topic body.
#[derive(Debug, Clone, PartialEq)]
pub enum TopicOutcome {
    /// Labels ordered by descending score, truncated to the requested limit.
    /// Empty when the body has no `labels`/`scores` pair.
    Ranked(Vec<String>),
    /// Body was an object carrying an `error` key.
    UpstreamError(String),
}

/// Classify a parsed topic body, keeping at most `limit` labels.
pub fn parse(body: &Value, limit: usize) -> TopicOutcome {
    let Value::Object(map) = body else {
        return TopicOutcome::Ranked(Vec::new());
    };

    if let Some(err) = map.get("error") {
        return TopicOutcome::UpstreamError(upstream_message(err));
    }

    match (map.get("labels"), map.get("scores")) {
        (Some(Value::Array(labels)), Some(Value::Array(scores))) => {
            TopicOutcome::Ranked(rank(labels, scores, limit))
        }
        _ => TopicOutcome::Ranked(Vec::new()),
    }
}

/// Pair labels with scores by position and keep the best `limit`.
///
/// The sort is stable, so equal scores keep their upstream order.
fn rank(labels: &[Value], scores: &[Value], limit: usize) -> Vec<String> {
    let mut pairs: Vec<(&str, f64)> = labels
        .iter()
        .zip(scores)
        .filter_map(|(label, score)| Some((label.as_str()?, score.as_f64()?)))
        .collect();

    // JSON numbers are never NaN
    pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    pairs
        .into_iter()
        .take(limit)
        .map(|(label, _)| label.to_string())
        .collect()
}
