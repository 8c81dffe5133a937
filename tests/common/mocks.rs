use async_trait::async_trait;
use lite_chat::{Error, Result, model::ChatModel};
use std::sync::{Arc, Mutex};

/// Mock model for testing. Records every message it is asked about and either
/// echoes it back (with an optional prefix) or fails with a fixed error.
#[derive(Debug)]
pub struct MockChatModel {
    pub requests: Arc<Mutex<Vec<String>>>,
    pub prefix: String,
    pub error: Option<String>,
}

impl MockChatModel {
    pub fn new() -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            prefix: String::new(),
            error: None,
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn get_requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, message: &str) -> Result<String> {
        self.requests.lock().unwrap().push(message.to_string());

        if let Some(ref error) = self.error {
            return Err(Error::inference(error.clone()));
        }

        Ok(format!("{}{}", self.prefix, message))
    }
}

impl Default for MockChatModel {
    fn default() -> Self {
        Self::new()
    }
}
