//! Error types for the analysis pipeline.

use crate::models::ErrorResponse;
use serde_json::Value;
use thiserror::Error;

/// Failure of a single outbound inference call.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("cannot connect to {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

/// Which inference call a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Sentiment,
    Topic,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Sentiment => write!(f, "sentiment"),
            Stage::Topic => write!(f, "topic"),
        }
    }
}

/// Terminal failure of an analysis request.
///
/// Every variant renders to the caller as an `{"error": ...}` body; the two
/// sentiment shape violations also carry the upstream payload.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Invalid response from sentiment model")]
    InvalidSentimentResponse,

    #[error("Sentiment API error: {0}")]
    SentimentApiError(String),

    #[error("Unexpected sentiment format")]
    UnexpectedSentimentFormat(Value),

    #[error("Malformed sentiment response")]
    MalformedSentimentResponse(Value),

    #[error("Invalid response from topic model")]
    InvalidTopicResponse,

    #[error("Topic API error: {0}")]
    TopicApiError(String),

    #[error("Failed to reach {stage} model: {source}")]
    Transport {
        stage: Stage,
        #[source]
        source: TransportError,
    },
}

impl AnalyzeError {
    /// Stage at which the request stopped.
    pub fn stage(&self) -> Stage {
        match self {
            AnalyzeError::InvalidSentimentResponse
            | AnalyzeError::SentimentApiError(_)
            | AnalyzeError::UnexpectedSentimentFormat(_)
            | AnalyzeError::MalformedSentimentResponse(_) => Stage::Sentiment,
            AnalyzeError::InvalidTopicResponse | AnalyzeError::TopicApiError(_) => Stage::Topic,
            AnalyzeError::Transport { stage, .. } => *stage,
        }
    }

    /// Convert into the body sent back to the caller.
    pub fn to_response(&self) -> ErrorResponse {
        match self {
            AnalyzeError::UnexpectedSentimentFormat(raw)
            | AnalyzeError::MalformedSentimentResponse(raw) => {
                ErrorResponse::with_raw(self.to_string(), raw.clone())
            }
            _ => ErrorResponse::new(self.to_string()),
        }
    }
}

/// Render an upstream `error` value the way it should appear in a message.
pub fn upstream_message(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
