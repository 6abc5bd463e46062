//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Moodlens - emotion and topic relay for hosted inference models
///
/// Serves `POST /analyze`, forwarding text to an emotion classifier and a
/// zero-shot topic classifier and returning the combined result.
///
/// Examples:
///   moodlens
///   moodlens --port 8080 --host 0.0.0.0
///   HF_TOKEN=hf_xxx moodlens --timeout 10 --error-status
///   moodlens --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Address to bind the HTTP server to
    ///
    /// Default: from config or 127.0.0.1
    #[arg(long, value_name = "ADDR")]
    pub host: Option<String>,

    /// Port to listen on
    ///
    /// Default: from config or 8000
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Bearer token for the inference endpoints
    #[arg(long, env = "HF_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    pub hf_token: Option<String>,

    /// Emotion classifier endpoint URL
    #[arg(long, env = "MOODLENS_SENTIMENT_URL", value_name = "URL")]
    pub sentiment_url: Option<String>,

    /// Zero-shot topic classifier endpoint URL
    #[arg(long, env = "MOODLENS_TOPIC_URL", value_name = "URL")]
    pub topic_url: Option<String>,

    /// Timeout for each outbound inference call, in seconds
    ///
    /// Default: from config or 30s.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Answer failed analyses with 502/504 instead of 200
    #[arg(long)]
    pub error_status: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .moodlens.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .moodlens.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        for url in [&self.sentiment_url, &self.topic_url].into_iter().flatten() {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!(
                    "Model URL must start with 'http://' or 'https://': {}",
                    url
                ));
            }
        }

        if self.port == Some(0) {
            return Err("Port must be between 1 and 65535".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
