//! Moodlens server binary.
//!
//! Exit codes:
//!   0 - Clean shutdown or --init-config written
//!   1 - Startup error (invalid arguments, config, bind failure)

use anyhow::{Context, Result};
use moodlens::cli::Args;
use moodlens::config::{Config, CONFIG_FILE_NAME};
use moodlens::inference::HttpTransport;
use moodlens::server::{self, AppState};
use moodlens::Analyzer;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("Moodlens v{}", env!("CARGO_PKG_VERSION"));
    debug!(
        host = ?args.host,
        port = ?args.port,
        config = ?args.config,
        "Arguments parsed"
    );

    if let Err(e) = run(args).await {
        error!("Server failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .moodlens.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE_NAME);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize endpoints, labels, timeout and port.");
    Ok(())
}

/// Initialize logging. `RUST_LOG` overrides the verbosity flags.
fn init_logging(args: &Args) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(args.log_level()).into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load configuration, build the analyzer and serve.
async fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.validate().context("Invalid configuration")?;

    let transport = HttpTransport::new(args.hf_token.clone(), config.models.timeout_seconds)
        .context("Failed to create HTTP client")?;
    if !transport.has_token() {
        warn!("HF_TOKEN is not set; inference endpoints will likely reject requests");
    }

    let analyzer = Analyzer::new(config.models.analyzer_config(), Arc::new(transport));
    let state = AppState::new(analyzer, config.server.error_status);

    server::run_server(state, &config.server.host, config.server.port).await
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Explicit path must exist and parse
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
