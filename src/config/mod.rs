mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads configuration from `CONFIG_PATH` (default `config.yaml`) and applies
/// environment overrides. A missing default file yields built-in defaults.
pub async fn load() -> Result<Config> {
    let explicit_path = env::var("CONFIG_PATH").ok();
    let mut config = match explicit_path {
        Some(path) => load_file(&path).await?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_file(DEFAULT_CONFIG_PATH).await?,
        None => {
            debug!("No configuration file found, using defaults");
            Config::default()
        }
    };

    apply_env_overrides(&mut config, |key| env::var(key).ok())?;

    Ok(config)
}

pub async fn load_file(path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", path);

    let config_str = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

/// Overrides individual settings from the environment. `lookup` abstracts the
/// environment so callers can supply their own source.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("HOST") {
        config.server.host = host;
    }
    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .parse()
            .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
    }
    if let Some(provider) = lookup("MODEL_PROVIDER") {
        config.model.provider = provider.parse()?;
    }
    if let Some(model) = lookup("MODEL_NAME") {
        config.model.model = model;
    }
    if let Some(base_url) = lookup("MODEL_BASE_URL") {
        config.model.base_url = base_url;
    }
    Ok(())
}
