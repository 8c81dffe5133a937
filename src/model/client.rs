use crate::{Error, Result, config::ModelConfig};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use std::{sync::Arc, time::Duration};
use tracing::debug;

/// A loaded inference backend: turns one user message into one reply.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Short backend identifier, used for logging and the health endpoint.
    fn name(&self) -> &'static str;

    async fn generate(&self, message: &str) -> Result<String>;
}

/// Shared, read-only handle to the process's single loaded model.
pub type ModelHandle = Arc<dyn ChatModel>;

pub struct OpenAiModel {
    client: Client<OpenAIConfig>,
    model: String,
    system_prompt: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAiModel {
    pub fn new(config: &ModelConfig, api_key: String) -> Self {
        let mut openai_config = OpenAIConfig::new().with_api_key(api_key);

        if !config.base_url.is_empty() {
            openai_config = openai_config.with_api_base(config.base_url.clone());
        }

        // One attempt per call: failures surface to the caller immediately.
        let no_retry = backoff::ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();
        let client = Client::with_config(openai_config).with_backoff(no_retry);

        Self {
            client,
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Asks the backend for the configured model's descriptor.
    pub async fn verify(&self) -> Result<()> {
        let descriptor = self.client.models().retrieve(&self.model).await?;
        debug!("Model '{}' is available (owner: {})", descriptor.id, descriptor.owned_by);
        Ok(())
    }

    fn build_messages(&self, message: &str) -> Result<Vec<ChatCompletionRequestMessage>> {
        let mut messages = Vec::with_capacity(2);

        if let Some(ref prompt) = self.system_prompt {
            let msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(ChatCompletionRequestSystemMessageContent::Text(
                    prompt.clone(),
                ))
                .build()
                .map_err(|e| Error::inference(format!("Failed to build system message: {}", e)))?;
            messages.push(msg.into());
        }

        let msg = ChatCompletionRequestUserMessageArgs::default()
            .content(ChatCompletionRequestUserMessageContent::Text(
                message.to_string(),
            ))
            .build()
            .map_err(|e| Error::inference(format!("Failed to build user message: {}", e)))?;
        messages.push(msg.into());

        Ok(messages)
    }
}

#[async_trait]
impl ChatModel for OpenAiModel {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate(&self, message: &str) -> Result<String> {
        debug!("Creating chat completion with model {}", self.model);

        let messages = self.build_messages(message)?;

        let mut request_builder = CreateChatCompletionRequestArgs::default();
        request_builder.model(&self.model).messages(messages);

        if let Some(temperature) = self.temperature {
            request_builder.temperature(temperature);
        }

        if let Some(max_tokens) = self.max_tokens {
            request_builder.max_tokens(max_tokens);
        }

        let request = request_builder
            .build()
            .map_err(|e| Error::inference(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| Error::inference(e.to_string()))?;

        debug!(
            "Received chat completion response with {} choices",
            response.choices.len()
        );

        // A null content field has no string to hand back.
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::inference("model returned an empty reply"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_config() -> ModelConfig {
        ModelConfig {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4".to_string(),
            system_prompt: Some("Test prompt".to_string()),
            ..ModelConfig::default()
        }
    }

    #[test]
    fn test_openai_model_creation() {
        let model = OpenAiModel::new(&create_test_config(), "test-api-key".to_string());

        assert_eq!(model.model(), "gpt-4");
        assert_eq!(model.name(), "openai");
    }

    #[test]
    fn test_messages_include_system_prompt() {
        let model = OpenAiModel::new(&create_test_config(), "test-api-key".to_string());

        let messages = model.build_messages("Hello").unwrap();
        assert_eq!(messages.len(), 2);
        assert!(matches!(
            messages[0],
            ChatCompletionRequestMessage::System(_)
        ));
        assert!(matches!(messages[1], ChatCompletionRequestMessage::User(_)));
    }

    #[test]
    fn test_messages_without_system_prompt() {
        let mut config = create_test_config();
        config.system_prompt = None;
        let model = OpenAiModel::new(&config, "test-api-key".to_string());

        let messages = model.build_messages("Hello").unwrap();
        assert_eq!(messages.len(), 1);
        assert!(matches!(messages[0], ChatCompletionRequestMessage::User(_)));
    }
}
