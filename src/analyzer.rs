//! Analysis orchestration.
//!
//! Runs the emotion classifier, then the topic classifier, and merges the
//! normalized results. The first failing stage ends the request.

use crate::error::{AnalyzeError, Stage};
use crate::inference::{sentiment, topic, InferenceTransport, SentimentOutcome, TopicOutcome};
use crate::models::{
    AnalysisResponse, Emotion, TopicSummary, DEFAULT_CANDIDATE_LABELS, MAX_TOPICS,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Default emotion classifier endpoint.
pub const DEFAULT_SENTIMENT_URL: &str =
    "https://router.huggingface.co/hf-inference/models/j-hartmann/emotion-english-distilroberta-base";

/// Default zero-shot topic classifier endpoint.
pub const DEFAULT_TOPIC_URL: &str =
    "https://router.huggingface.co/hf-inference/models/facebook/bart-large-mnli";

/// Configuration for the analyzer.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub sentiment_url: String,
    pub topic_url: String,
    pub candidate_labels: Vec<String>,
    /// Number of topic labels kept in the response
    pub max_topics: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            sentiment_url: DEFAULT_SENTIMENT_URL.to_string(),
            topic_url: DEFAULT_TOPIC_URL.to_string(),
            candidate_labels: DEFAULT_CANDIDATE_LABELS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_topics: MAX_TOPICS,
        }
    }
}

/// Relays text to both classifiers and combines their answers.
#[derive(Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    transport: Arc<dyn InferenceTransport>,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig, transport: Arc<dyn InferenceTransport>) -> Self {
        info!(
            sentiment = %config.sentiment_url,
            topic = %config.topic_url,
            labels = config.candidate_labels.len(),
            "Initializing analyzer"
        );
        Self { config, transport }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Classify `text` for emotion and topics.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResponse, AnalyzeError> {
        debug!(chars = text.chars().count(), "Analyzing text");

        let (emotion, raw_sentiment) = self.classify_emotion(text).await?;
        let (labels, raw_topic) = self.classify_topics(text).await?;

        info!(emotion = %emotion, topics = ?labels, "Analysis complete");

        Ok(AnalysisResponse {
            emotion: Emotion { sentiment: emotion },
            topic: TopicSummary { labels },
            raw_sentiment,
            raw_topic,
        })
    }

    async fn classify_emotion(&self, text: &str) -> Result<(String, Value), AnalyzeError> {
        let body = self
            .transport
            .post_json(&self.config.sentiment_url, &sentiment::payload(text))
            .await
            .map_err(|source| AnalyzeError::Transport {
                stage: Stage::Sentiment,
                source,
            })?;

        let raw: Value =
            serde_json::from_str(&body).map_err(|_| AnalyzeError::InvalidSentimentResponse)?;

        let scores = match sentiment::parse(&raw) {
            SentimentOutcome::Scores(scores) => scores,
            SentimentOutcome::UpstreamError(msg) => {
                return Err(AnalyzeError::SentimentApiError(msg))
            }
            SentimentOutcome::Unexpected => {
                return Err(AnalyzeError::UnexpectedSentimentFormat(raw))
            }
            SentimentOutcome::Malformed => {
                return Err(AnalyzeError::MalformedSentimentResponse(raw))
            }
        };

        let emotion = sentiment::dominant(&scores)
            .map(|top| top.label.to_lowercase())
            .ok_or_else(|| AnalyzeError::UnexpectedSentimentFormat(raw.clone()))?;

        Ok((emotion, raw))
    }

    async fn classify_topics(&self, text: &str) -> Result<(Vec<String>, Value), AnalyzeError> {
        let body = self
            .transport
            .post_json(
                &self.config.topic_url,
                &topic::payload(text, &self.config.candidate_labels),
            )
            .await
            .map_err(|source| AnalyzeError::Transport {
                stage: Stage::Topic,
                source,
            })?;

        let raw: Value =
            serde_json::from_str(&body).map_err(|_| AnalyzeError::InvalidTopicResponse)?;

        match topic::parse(&raw, self.config.max_topics) {
            TopicOutcome::Ranked(labels) => Ok((labels, raw)),
            TopicOutcome::UpstreamError(msg) => Err(AnalyzeError::TopicApiError(msg)),
        }
    }
}
