use super::types::HealthResponse;
use crate::{
    chat::{self, ChatError, ChatRequest, ChatResponse},
    model::ModelHandle,
};
use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub model: ModelHandle,
}

impl AppState {
    pub fn new(model: ModelHandle) -> Self {
        Self { model }
    }
}

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ChatError> {
    let request_id = Uuid::new_v4();

    async move {
        let Json(request) = payload.map_err(|rejection| {
            warn!("Rejected chat request body: {}", rejection.body_text());
            ChatError::from(rejection)
        })?;

        info!("Received chat request ({} chars)", request.message.len());

        match chat::respond(state.model.as_ref(), request).await {
            Ok(response) => {
                info!("Generated reply ({} chars)", response.reply.len());
                Ok(Json(response))
            }
            Err(e @ ChatError::Inference(_)) => {
                error!("Failed to generate reply: {}", e);
                Err(e)
            }
            Err(e) => {
                warn!("Rejected chat request: {}", e);
                Err(e)
            }
        }
    }
    .instrument(info_span!("chat", %request_id))
    .await
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: state.model.name(),
    })
}
