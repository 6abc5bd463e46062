//! Hosted inference endpoints.
//!
//! This module provides the outbound transport and the per-model response
//! normalization for the emotion and zero-shot topic classifiers.

pub mod sentiment;
pub mod topic;
pub mod transport;

pub use sentiment::SentimentOutcome;
pub use topic::TopicOutcome;
pub use transport::{HttpTransport, InferenceTransport};
