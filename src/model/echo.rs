use super::ChatModel;
use crate::Result;
use async_trait::async_trait;

/// Local backend that replies with the input, for development without an
/// inference service.
#[derive(Debug, Clone, Default)]
pub struct EchoModel {
    prefix: String,
}

impl EchoModel {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl ChatModel for EchoModel {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn generate(&self, message: &str) -> Result<String> {
        Ok(format!("{}{}", self.prefix, message))
    }
}
