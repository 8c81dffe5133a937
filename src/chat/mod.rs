mod error;
mod types;

pub use error::ChatError;
pub use types::{ChatRequest, ChatResponse, ErrorBody};

use crate::model::ChatModel;
use tracing::debug;

/// Validates the message, runs inference and builds the reply.
///
/// Leading and trailing whitespace is trimmed before the emptiness check, and
/// the trimmed text is what the model sees. Backend failures are reported with
/// their text intact.
pub async fn respond(
    model: &dyn ChatModel,
    request: ChatRequest,
) -> Result<ChatResponse, ChatError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ChatError::EmptyInput);
    }

    debug!("Generating reply for {} chars of input", message.len());

    let reply = model
        .generate(message)
        .await
        .map_err(|e| ChatError::Inference(e.to_string()))?;

    Ok(ChatResponse { reply })
}
