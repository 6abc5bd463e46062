//! Moodlens - emotion and topic relay for hosted inference models
//!
//! Accepts free text over HTTP, forwards it to an emotion classifier and a
//! zero-shot topic classifier, normalizes both replies and returns a
//! combined result.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod inference;
pub mod models;
pub mod server;

pub use analyzer::{Analyzer, AnalyzerConfig};
pub use error::{AnalyzeError, Stage, TransportError};
