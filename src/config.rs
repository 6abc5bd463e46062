//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.moodlens.toml` files.

use crate::analyzer::{AnalyzerConfig, DEFAULT_SENTIMENT_URL, DEFAULT_TOPIC_URL};
use crate::models::{DEFAULT_CANDIDATE_LABELS, MAX_TOPICS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".moodlens.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Inference endpoint settings.
    #[serde(default)]
    pub models: ModelsConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Answer failed analyses with a 5xx status instead of 200.
    #[serde(default)]
    pub error_status: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            error_status: false,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Hosted model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Emotion classifier endpoint.
    #[serde(default = "default_sentiment_url")]
    pub sentiment_url: String,

    /// Zero-shot topic classifier endpoint.
    #[serde(default = "default_topic_url")]
    pub topic_url: String,

    /// Timeout applied to each outbound call.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Number of topic labels returned, 1 to 3.
    #[serde(default = "default_max_topics")]
    pub max_topics: usize,

    /// Labels offered to the topic classifier.
    #[serde(default = "default_candidate_labels")]
    pub candidate_labels: Vec<String>,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            sentiment_url: default_sentiment_url(),
            topic_url: default_topic_url(),
            timeout_seconds: default_timeout(),
            max_topics: default_max_topics(),
            candidate_labels: default_candidate_labels(),
        }
    }
}

fn default_sentiment_url() -> String {
    DEFAULT_SENTIMENT_URL.to_string()
}

fn default_topic_url() -> String {
    DEFAULT_TOPIC_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_topics() -> usize {
    MAX_TOPICS
}

fn default_candidate_labels() -> Vec<String> {
    DEFAULT_CANDIDATE_LABELS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl ModelsConfig {
    /// Settings consumed by the analyzer.
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            sentiment_url: self.sentiment_url.clone(),
            topic_url: self.topic_url.clone(),
            candidate_labels: self.candidate_labels.clone(),
            max_topics: self.max_topics,
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.moodlens.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        for url in [&self.models.sentiment_url, &self.models.topic_url] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("Model URL must start with 'http://' or 'https://': {}", url);
            }
        }
        if self.models.timeout_seconds == 0 {
            anyhow::bail!("timeout_seconds must be at least 1");
        }
        if self.models.candidate_labels.is_empty() {
            anyhow::bail!("candidate_labels must not be empty");
        }
        if !(1..=MAX_TOPICS).contains(&self.models.max_topics) {
            anyhow::bail!("max_topics must be between 1 and {}", MAX_TOPICS);
        }
        Ok(())
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref host) = args.host {
            self.server.host = host.clone();
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
        if args.error_status {
            self.server.error_status = true;
        }

        if let Some(ref url) = args.sentiment_url {
            self.models.sentiment_url = url.clone();
        }
        if let Some(ref url) = args.topic_url {
            self.models.topic_url = url.clone();
        }
        if let Some(timeout) = args.timeout {
            self.models.timeout_seconds = timeout;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}
