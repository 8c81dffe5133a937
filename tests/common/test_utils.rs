use axum::{
    body::Body,
    http::{Request, Response},
};
use lite_chat::config::{ModelConfig, ModelProvider};
use serde_json::Value;
use tempfile::TempDir;
use tokio::fs;

/// Build a `POST /chat` request with a JSON body
pub fn chat_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a `POST /chat` request with a raw body and content type
pub fn raw_chat_request(content_type: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read a response body as JSON
pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Model configuration pointing the OpenAI backend at a test server
pub fn openai_config(base_url: &str) -> ModelConfig {
    ModelConfig {
        provider: ModelProvider::Openai,
        base_url: base_url.to_string(),
        api_key: "test-api-key".to_string(),
        model: "test-model".to_string(),
        ..ModelConfig::default()
    }
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> String {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await.unwrap();
    config_path.to_string_lossy().to_string()
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 9090
  logs:
    level: "debug"

model:
  provider: "openai"
  base_url: "http://localhost:4000/v1"
  api_key: "test-api-key"
  model: "gpt-4o-mini"
  system_prompt: "You are a helpful assistant."
  temperature: 0.2
  max_tokens: 256
  verify_on_startup: true
  max_concurrent_requests: 1
  timeout_secs: 30
"#;

/// Sample configuration using the echo backend and mostly defaults
pub const SAMPLE_ECHO_CONFIG_YAML: &str = r#"
model:
  provider: "echo"
  echo_prefix: "echo: "
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
server:
  port: "not-a-number"

model:
  provider: "unknown"
"#;
