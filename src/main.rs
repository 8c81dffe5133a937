use anyhow::Result;
use lite_chat::{config, model, server};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

/// `RUST_LOG` directives win over the configured level. Directives are
/// checked with the filter's own parser; the configured value must be a
/// bare level.
fn log_filter(rust_log: Option<&str>, config_level: &str) -> Result<EnvFilter> {
    match rust_log {
        Some(directives) => EnvFilter::try_new(directives).map_err(|e| {
            anyhow::anyhow!("Invalid RUST_LOG directives '{}': {}", directives, e)
        }),
        None => {
            validate_log_level(config_level)?;
            Ok(EnvFilter::new(config_level))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = match log_filter(rust_log.as_deref(), &config.server.logs.level) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    info!(
        "Starting lite-chat server with log filter: {}",
        rust_log.as_deref().unwrap_or(&config.server.logs.level)
    );
    info!("Configuration loaded successfully");

    // The server is never built without a model.
    let model = match model::load(&config.model).await {
        Ok(model) => model,
        Err(e) => {
            error!("Failed to load model: {}", e);
            std::process::exit(1);
        }
    };
    info!("Model backend '{}' ready", model.name());

    server::run(config.server, model).await?;

    Ok(())
}
