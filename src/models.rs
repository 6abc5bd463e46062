//! Data models for the analysis relay.
//!
//! This module contains the request and response shapes exposed on the
//! HTTP surface, plus the normalized values derived from upstream bodies.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Topics offered to the zero-shot classifier when none are configured.
pub const DEFAULT_CANDIDATE_LABELS: [&str; 19] = [
    "politics",
    "technology",
    "sports",
    "finance",
    "entertainment",
    "education",
    "science",
    "relationships",
    "crime",
    "mental health",
    "insult",
    "racism",
    "humor",
    "motivation",
    "violence",
    "social issues",
    "religion",
    "personal life",
    "news",
];

/// Maximum number of topic labels returned to the caller.
pub const MAX_TOPICS: usize = 3;

/// Incoming `POST /analyze` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Text to classify. A missing or null field is read as the empty string.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One `{label, score}` entry returned by the emotion classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub label: String,
    pub score: f64,
}

/// Dominant emotion block of the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emotion {
    /// Lowercased label of the highest-scoring emotion.
    pub sentiment: String,
}

/// Topic block of the response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TopicSummary {
    /// Up to three labels ordered by descending score.
    pub labels: Vec<String>,
}

/// Successful result of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub emotion: Emotion,
    pub topic: TopicSummary,
    /// Sentiment body exactly as parsed from the upstream reply.
    pub raw_sentiment: Value,
    /// Topic body exactly as parsed from the upstream reply.
    pub raw_topic: Value,
}

/// Body returned when any stage fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Upstream payload, attached for shape violations only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            raw_response: None,
        }
    }

    pub fn with_raw(error: impl Into<String>, raw: Value) -> Self {
        Self {
            error: error.into(),
            raw_response: Some(raw),
        }
    }
}
