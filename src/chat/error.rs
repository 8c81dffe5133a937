use super::ErrorBody;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// The body did not match `{"message": <string>}`. Carries the status the
    /// JSON extractor chose (400, 415 or 422).
    #[error("{detail}")]
    Validation { status: StatusCode, detail: String },

    #[error("The 'message' field cannot be empty.")]
    EmptyInput,

    #[error("Error generating response: {0}")]
    Inference(String),
}

impl ChatError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { status, .. } => *status,
            Self::EmptyInput => StatusCode::BAD_REQUEST,
            Self::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ChatError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
