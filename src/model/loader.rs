use super::{EchoModel, GuardedModel, ModelHandle, OpenAiModel};
use crate::{
    Error, Result,
    config::{ModelConfig, ModelProvider},
};
use std::{env, sync::Arc, time::Duration};
use tokio::sync::Semaphore;
use tracing::{debug, info};

/// Loads the configured backend. Called once, before the server is built;
/// any error here must abort startup.
pub async fn load(config: &ModelConfig) -> Result<ModelHandle> {
    info!("Loading model backend: {}", config.provider.as_str());

    validate_limits(config)?;

    let backend: ModelHandle = match config.provider {
        ModelProvider::Openai => Arc::new(load_openai(config).await?),
        ModelProvider::Echo => Arc::new(EchoModel::new(config.echo_prefix.clone())),
    };

    if config.max_concurrent_requests.is_none() && config.timeout_secs.is_none() {
        return Ok(backend);
    }

    debug!(
        "Guarding model: max_concurrent_requests={:?}, timeout_secs={:?}",
        config.max_concurrent_requests, config.timeout_secs
    );
    Ok(Arc::new(GuardedModel::new(
        backend,
        config.max_concurrent_requests,
        config.timeout_secs.map(Duration::from_secs),
    )))
}

fn validate_limits(config: &ModelConfig) -> Result<()> {
    match config.max_concurrent_requests {
        Some(0) => {
            return Err(Error::config(
                "max_concurrent_requests must be at least 1",
            ));
        }
        Some(n) if n > Semaphore::MAX_PERMITS => {
            return Err(Error::config(format!(
                "max_concurrent_requests must be at most {}, got {}",
                Semaphore::MAX_PERMITS,
                n
            )));
        }
        _ => {}
    }

    if config.timeout_secs == Some(0) {
        return Err(Error::config("timeout_secs must be at least 1"));
    }

    Ok(())
}

async fn load_openai(config: &ModelConfig) -> Result<OpenAiModel> {
    if config.model.trim().is_empty() {
        return Err(Error::model_load("no model name configured"));
    }

    let api_key = resolve_api_key(&config.api_key, env::var("OPENAI_API_KEY").ok())?;
    let model = OpenAiModel::new(config, api_key);

    if config.verify_on_startup {
        model.verify().await.map_err(|e| {
            Error::model_load(format!("model '{}' is not available: {}", config.model, e))
        })?;
        info!("Verified model '{}' with backend", config.model);
    }

    Ok(model)
}

/// Configured key wins; otherwise the environment value; otherwise an error.
pub(crate) fn resolve_api_key(configured: &str, from_env: Option<String>) -> Result<String> {
    if !configured.trim().is_empty() {
        return Ok(configured.to_string());
    }
    from_env
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            Error::model_load("no API key configured and OPENAI_API_KEY is not set")
        })
}
